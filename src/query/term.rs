use crate::error::DbError;

use super::{expression::Expression, scan::Scan};

#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    lhs: Expression,
    rhs: Expression,
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

impl Term {
    pub fn new(lhs: Expression, rhs: Expression) -> Self {
        Term { lhs, rhs }
    }

    pub fn is_satisfied(&self, s: &dyn Scan) -> Result<bool, DbError> {
        let lhsval = self.lhs.evaluate(s)?;
        let rhsval = self.rhs.evaluate(s)?;
        // NULL never matches, not even another NULL.
        if lhsval.is_null() || rhsval.is_null() {
            return Ok(false);
        }
        Ok(rhsval.eq(&lhsval))
    }

    pub fn resolve(&self, binds: &[crate::query::constant::Constant]) -> Result<Term, DbError> {
        Ok(Term {
            lhs: self.lhs.resolve(binds)?,
            rhs: self.rhs.resolve(binds)?,
        })
    }
}
