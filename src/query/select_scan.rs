use crate::error::DbError;

use super::{constant::Constant, predicate::Predicate, scan::Scan};

pub struct SelectScan<S: Scan> {
    us: S,
    pred: Predicate,
}

impl<S: Scan> SelectScan<S> {
    pub fn new(us: S, pred: Predicate) -> Self {
        SelectScan { us, pred }
    }
}

impl<S: Scan> Scan for SelectScan<S> {
    fn before_first(&mut self) -> Result<(), DbError> {
        self.us.before_first()
    }

    fn next(&mut self) -> Result<bool, DbError> {
        while self.us.next()? {
            if self.pred.is_satisfied(&self.us)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn get_val(&self, fldname: &str) -> Result<Constant, DbError> {
        self.us.get_val(fldname)
    }

    fn has_field(&self, fldname: &str) -> Result<bool, DbError> {
        self.us.has_field(fldname)
    }

    fn close(&mut self) -> Result<(), DbError> {
        self.us.close()
    }
}
