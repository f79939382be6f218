use crate::server::config::DatabaseConfig;

use super::sql_exception::SQLException;

pub trait DriverAdapter {
    type Con;
    fn connect(config: DatabaseConfig) -> Result<Self::Con, SQLException>;
    fn get_major_version() -> i32;
    fn get_minor_version() -> i32;
}
