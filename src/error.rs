use thiserror::Error;

/// Errors raised by the engine underneath the rdbc layer.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("table {0} does not exist")]
    NoSuchTable(String),
    #[error("table {0} already exists")]
    TableExists(String),
    #[error("field {0} does not exist")]
    NoSuchField(String),
    #[error("row {0} does not exist")]
    NoSuchRow(usize),
    #[error("type mismatch on field {field}: expected {expected}")]
    TypeMismatch { field: String, expected: String },
    #[error("bad syntax: {0}")]
    Syntax(String),
    #[error("parameter {0} is not bound")]
    UnboundParam(usize),
    #[error("database is busy: {0}")]
    Busy(String),
    #[error("database is read-only")]
    ReadOnly,
    #[error("corrupt table file {path}: {reason}")]
    Corrupt { path: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
