use crate::error::DbError;

use super::{constant::Constant, scan::Scan};

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Val(Constant),
    FieldName(String),
    /// A `?` placeholder, 1-based bind position.
    Param(usize),
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Val(val) => write!(f, "{}", val),
            Expression::FieldName(fldname) => write!(f, "{}", fldname),
            Expression::Param(_) => write!(f, "?"),
        }
    }
}

impl Expression {
    pub fn new_from_val(val: Constant) -> Self {
        Expression::Val(val)
    }

    pub fn new_from_fldname(fldname: String) -> Self {
        Expression::FieldName(fldname)
    }

    pub fn evaluate(&self, s: &dyn Scan) -> Result<Constant, DbError> {
        match self {
            Expression::Val(val) => Ok(val.clone()),
            Expression::FieldName(fldname) => s.get_val(fldname),
            Expression::Param(n) => Err(DbError::UnboundParam(*n)),
        }
    }

    pub fn is_field_name(&self) -> bool {
        matches!(self, Expression::FieldName(_))
    }

    pub fn as_constant(&self) -> Option<Constant> {
        match self {
            Expression::Val(val) => Some(val.clone()),
            _ => None,
        }
    }

    pub fn as_field_name(&self) -> Option<String> {
        match self {
            Expression::FieldName(fldname) => Some(fldname.clone()),
            _ => None,
        }
    }

    /// Replaces a placeholder with its bound constant. Looks up 1-based.
    pub fn resolve(&self, binds: &[Constant]) -> Result<Expression, DbError> {
        match self {
            Expression::Param(n) => binds
                .get(n - 1)
                .map(|c| Expression::Val(c.clone()))
                .ok_or(DbError::UnboundParam(*n)),
            other => Ok(other.clone()),
        }
    }
}
