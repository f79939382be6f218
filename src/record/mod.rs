pub mod schema;
pub mod table;
pub mod table_scan;
