use std::path::Path;

pub mod utils;

use hashidb::{
    rdbc::{driver_adapter::DriverAdapter, embedded::embedded_driver::EmbeddedDriver},
    server::config::DatabaseConfig,
};

use clap::Parser;

#[derive(Debug, Parser)]
struct Args {
    #[arg(help = "dbname", short, default_value = "studentdb")]
    dbname: String,
    #[arg(help = "directory holding file-backed databases", long, default_value = "hashidb")]
    base: String,
    #[arg(help = "keep the database in memory only", long)]
    in_memory: bool,
    #[arg(help = "open the database read-only", long)]
    read_only: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let mut config = if args.in_memory {
        DatabaseConfig::new_in_memory(&args.dbname)
    } else {
        DatabaseConfig::new(&args.dbname, Path::new(&args.base))
    };
    config.read_only = args.read_only;

    let mut conn = match EmbeddedDriver::connect(config) {
        Ok(conn) => conn,
        Err(e) => {
            eprintln!("could not open database: {}", e);
            std::process::exit(1);
        }
    };

    while let Ok(qry) = utils::read_query() {
        utils::exec(&mut conn, &qry);
    }
}
