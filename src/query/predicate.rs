use std::fmt;

use crate::{error::DbError, query::constant::Constant};

use super::{scan::Scan, term::Term};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicate {
    terms: Vec<Term>,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = self
            .terms
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>()
            .join(" and ");
        write!(f, "{}", content)
    }
}

impl Predicate {
    pub fn new() -> Self {
        Predicate::default()
    }

    pub fn new_from_term(t: Term) -> Self {
        Predicate { terms: vec![t] }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn conjoin_with(&mut self, pred: &Predicate) {
        self.terms.extend(pred.terms.iter().cloned());
    }

    pub fn is_satisfied(&self, s: &dyn Scan) -> Result<bool, DbError> {
        for term in self.terms.iter() {
            if !term.is_satisfied(s)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn resolve(&self, binds: &[Constant]) -> Result<Predicate, DbError> {
        let terms = self
            .terms
            .iter()
            .map(|t| t.resolve(binds))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Predicate { terms })
    }
}
