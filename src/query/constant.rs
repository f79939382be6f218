use crate::{error::DbError, record::schema::field_type};

/// A single cell value as stored in a table or produced by a query.
#[derive(Debug, Clone)]
pub enum Constant {
    Null,
    Int(i32),
    Big(i64),
    Float(f32),
    Double(f64),
    Varchar(String),
    Bytes(Vec<u8>),
}

// Numeric comparison crosses representations, so a literal 5 matches a
// bigint or double cell holding 5.
impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Constant::Null, Constant::Null) => true,
            (Constant::Varchar(a), Constant::Varchar(b)) => a == b,
            (Constant::Bytes(a), Constant::Bytes(b)) => a == b,
            (a, b) => match (a.as_i64(), b.as_i64()) {
                (Some(x), Some(y)) => x == y,
                _ => match (a.as_f64(), b.as_f64()) {
                    (Some(x), Some(y)) => x == y,
                    _ => false,
                },
            },
        }
    }
}

impl std::fmt::Display for Constant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Constant::Null => write!(f, "NULL"),
            Constant::Int(v) => write!(f, "{}", v),
            Constant::Big(v) => write!(f, "{}", v),
            Constant::Float(v) => write!(f, "{}", v),
            Constant::Double(v) => write!(f, "{}", v),
            Constant::Varchar(v) => write!(f, "{}", v),
            Constant::Bytes(v) => write!(f, "x'{}'", hex::encode(v)),
        }
    }
}

impl Constant {
    pub fn is_null(&self) -> bool {
        matches!(self, Constant::Null)
    }

    pub fn type_code(&self) -> Option<i32> {
        match self {
            Constant::Null => None,
            Constant::Int(_) => Some(field_type::INTEGER),
            Constant::Big(_) => Some(field_type::BIGINT),
            Constant::Float(_) => Some(field_type::REAL),
            Constant::Double(_) => Some(field_type::DOUBLE),
            Constant::Varchar(_) => Some(field_type::VARCHAR),
            Constant::Bytes(_) => Some(field_type::VARBINARY),
        }
    }

    /// Widens a literal to the field type it is being stored into.
    /// Integer literals fit any numeric field, decimal literals fit the
    /// floating ones. Anything else must match exactly.
    pub fn coerce_to(self, fldname: &str, fldtype: i32) -> Result<Constant, DbError> {
        let mismatch = |expected: &str| DbError::TypeMismatch {
            field: fldname.to_string(),
            expected: expected.to_string(),
        };
        if self.is_null() {
            return Ok(self);
        }
        match fldtype {
            field_type::INTEGER => match self {
                Constant::Int(_) => Ok(self),
                Constant::Big(v) => i32::try_from(v)
                    .map(Constant::Int)
                    .map_err(|_| mismatch("int")),
                _ => Err(mismatch("int")),
            },
            field_type::BIGINT => match self {
                Constant::Big(_) => Ok(self),
                Constant::Int(v) => Ok(Constant::Big(v as i64)),
                _ => Err(mismatch("bigint")),
            },
            field_type::REAL => match self {
                Constant::Float(_) => Ok(self),
                Constant::Double(v) => Ok(Constant::Float(v as f32)),
                Constant::Int(v) => Ok(Constant::Float(v as f32)),
                Constant::Big(v) => Ok(Constant::Float(v as f32)),
                _ => Err(mismatch("real")),
            },
            field_type::DOUBLE => match self {
                Constant::Double(_) => Ok(self),
                Constant::Float(v) => Ok(Constant::Double(v as f64)),
                Constant::Int(v) => Ok(Constant::Double(v as f64)),
                Constant::Big(v) => Ok(Constant::Double(v as f64)),
                _ => Err(mismatch("double")),
            },
            field_type::VARCHAR => match self {
                Constant::Varchar(_) => Ok(self),
                _ => Err(mismatch("varchar")),
            },
            field_type::VARBINARY => match self {
                Constant::Bytes(_) => Ok(self),
                _ => Err(mismatch("blob")),
            },
            _ => Err(mismatch("unknown")),
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Constant::Int(v) => Some(*v),
            Constant::Big(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Constant::Int(v) => Some(*v as i64),
            Constant::Big(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|v| v as f32)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Constant::Int(v) => Some(*v as f64),
            Constant::Big(v) => Some(*v as f64),
            Constant::Float(v) => Some(*v as f64),
            Constant::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<String> {
        match self {
            Constant::Varchar(v) => Some(v.clone()),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Constant::Bytes(v) => Some(v.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Constant;
    use crate::record::schema::field_type;

    #[test]
    fn test_coerce_int_literal_widens() {
        let c = Constant::Int(7).coerce_to("a", field_type::BIGINT).unwrap();
        assert_eq!(Constant::Big(7), c);
        let c = Constant::Int(7).coerce_to("a", field_type::DOUBLE).unwrap();
        assert_eq!(Constant::Double(7.0), c);
    }

    #[test]
    fn test_coerce_rejects_cross_kind() {
        assert!(Constant::Varchar("x".to_string())
            .coerce_to("a", field_type::INTEGER)
            .is_err());
        assert!(Constant::Double(1.5)
            .coerce_to("a", field_type::INTEGER)
            .is_err());
    }

    #[test]
    fn test_null_passes_any_type() {
        for t in [
            field_type::INTEGER,
            field_type::BIGINT,
            field_type::REAL,
            field_type::DOUBLE,
            field_type::VARCHAR,
            field_type::VARBINARY,
        ] {
            assert_eq!(Constant::Null, Constant::Null.coerce_to("a", t).unwrap());
        }
    }

    #[test]
    fn test_numeric_eq_across_kinds() {
        assert_eq!(Constant::Int(5), Constant::Big(5));
        assert_eq!(Constant::Big(2), Constant::Double(2.0));
        assert_ne!(Constant::Int(5), Constant::Varchar("5".to_string()));
        assert_ne!(Constant::Null, Constant::Int(0));
    }

    #[test]
    fn test_display_blob_is_hex() {
        let c = Constant::Bytes(vec![0xde, 0xad]);
        assert_eq!("x'dead'", c.to_string());
    }
}
