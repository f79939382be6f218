pub mod embedded_connection;
pub mod embedded_driver;
pub mod embedded_metadata;
pub mod embedded_result_set;
pub mod embedded_statement;
