pub mod error;
pub mod parse;
pub mod query;
pub mod rdbc;
pub mod record;
pub mod server;
pub mod storage;
pub mod testlib;
pub mod tx;
