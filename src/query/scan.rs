use crate::{error::DbError, query::constant::Constant};

pub trait Scan {
    fn before_first(&mut self) -> Result<(), DbError>;
    fn next(&mut self) -> Result<bool, DbError>;
    fn get_val(&self, fldname: &str) -> Result<Constant, DbError>;
    fn has_field(&self, fldname: &str) -> Result<bool, DbError>;
    fn close(&mut self) -> Result<(), DbError>;
}

pub trait UpdateScan: Scan {
    fn set_val(&mut self, fldname: &str, val: Constant) -> Result<(), DbError>;
    fn insert(&mut self) -> Result<(), DbError>;
    fn delete(&mut self) -> Result<(), DbError>;
}
