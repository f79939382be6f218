pub mod create_table_data;
pub mod delete_data;
pub mod insert_data;
pub mod lexer;
pub mod modify_data;
pub mod parser;
pub mod query_data;
