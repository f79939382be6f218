use crate::error::DbError;

use super::{constant::Constant, scan::Scan};

pub struct ProjectScan {
    s: Box<dyn Scan>,
    fieldlist: Vec<String>,
}

impl ProjectScan {
    pub fn new(s: Box<dyn Scan>, fieldlist: Vec<String>) -> Self {
        ProjectScan { s, fieldlist }
    }
}

impl Scan for ProjectScan {
    fn before_first(&mut self) -> Result<(), DbError> {
        self.s.before_first()
    }

    fn next(&mut self) -> Result<bool, DbError> {
        self.s.next()
    }

    fn get_val(&self, fldname: &str) -> Result<Constant, DbError> {
        if self.has_field(fldname)? {
            return self.s.get_val(fldname);
        }
        Err(DbError::NoSuchField(fldname.to_string()))
    }

    fn has_field(&self, fldname: &str) -> Result<bool, DbError> {
        Ok(self.fieldlist.iter().any(|f| f == fldname))
    }

    fn close(&mut self) -> Result<(), DbError> {
        self.s.close()
    }
}
