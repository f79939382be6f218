use crate::query::constant::Constant;

use super::sql_exception::SQLException;

pub trait StatementAdapter<'a> {
    type ResultSet;

    /// Binds the value for a `?` placeholder. Indexes are 1-based.
    fn bind(&mut self, index: i32, val: Constant) -> Result<(), SQLException>;
    fn execute_query(&'a mut self, sql: &str) -> Result<Self::ResultSet, SQLException>;
    fn execute_update(&mut self, sql: &str) -> Result<i32, SQLException>;

    fn bind_int(&mut self, index: i32, val: i32) -> Result<(), SQLException> {
        self.bind(index, Constant::Int(val))
    }

    fn bind_long(&mut self, index: i32, val: i64) -> Result<(), SQLException> {
        self.bind(index, Constant::Big(val))
    }

    fn bind_double(&mut self, index: i32, val: f64) -> Result<(), SQLException> {
        self.bind(index, Constant::Double(val))
    }

    fn bind_text(&mut self, index: i32, val: &str) -> Result<(), SQLException> {
        self.bind(index, Constant::Varchar(val.to_string()))
    }

    fn bind_bytes(&mut self, index: i32, val: &[u8]) -> Result<(), SQLException> {
        self.bind(index, Constant::Bytes(val.to_vec()))
    }

    fn bind_null(&mut self, index: i32) -> Result<(), SQLException> {
        self.bind(index, Constant::Null)
    }
}
