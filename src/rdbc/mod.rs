pub mod connection_adapter;
pub mod cursor_adapter;
pub mod driver_adapter;
pub mod embedded;
pub mod result_set_adapter;
pub mod result_set_cursor;
pub mod result_set_metadata_adapter;
pub mod sql_exception;
pub mod statement_adapter;
