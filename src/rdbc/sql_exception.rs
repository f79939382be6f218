use thiserror::Error;

use crate::error::DbError;

#[derive(Debug, Error)]
pub enum SQLException {
    #[error("the value of column {0} is NULL")]
    NullColumn(i32),
    #[error("column {0} not found")]
    NoSuchColumn(String),
    #[error("{0} exceeds the total number of columns")]
    ColumnPastEnd(i32),
    #[error("the column index is less than 0")]
    NegativeColumn,
    #[error("invalid column index {0}")]
    InvalidColumn(i32),
    #[error("invalid bind index {0}")]
    BadBindIndex(i32),
    #[error("parameter {0} is not bound")]
    UnboundParam(usize),
    #[error(transparent)]
    Db(#[from] DbError),
}
