use crate::{
    rdbc::{driver_adapter::DriverAdapter, sql_exception::SQLException},
    server::{config::DatabaseConfig, hashi_db::HashiDB},
};

use super::embedded_connection::EmbeddedConnection;

pub struct EmbeddedDriver;

impl DriverAdapter for EmbeddedDriver {
    type Con = EmbeddedConnection;

    fn connect(config: DatabaseConfig) -> Result<EmbeddedConnection, SQLException> {
        let db = HashiDB::open(config).map_err(SQLException::Db)?;
        Ok(EmbeddedConnection::new(db))
    }

    fn get_major_version() -> i32 {
        0
    }

    fn get_minor_version() -> i32 {
        1
    }
}
