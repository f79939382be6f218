pub mod config;
pub mod executor;
pub mod hashi_db;
