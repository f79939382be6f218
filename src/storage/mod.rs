pub mod table_file;
