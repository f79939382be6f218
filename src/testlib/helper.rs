use crate::{
    rdbc::{
        connection_adapter::ConnectionAdapter,
        driver_adapter::DriverAdapter,
        embedded::{embedded_connection::EmbeddedConnection, embedded_driver::EmbeddedDriver},
        statement_adapter::StatementAdapter,
    },
    server::config::DatabaseConfig,
};

/// Opens an in-memory database for tests. Callers must pick a name no
/// other test uses, since in-memory databases are shared by name.
pub fn memory_connection(name: &str) -> EmbeddedConnection {
    EmbeddedDriver::connect(DatabaseConfig::new_in_memory(name)).expect("open in-memory database")
}

/// Creates the `people` sample table. Row 3 carries NULLs in name,
/// score and photo.
pub fn create_people(conn: &mut EmbeddedConnection) {
    let mut stmt = conn.create_statement().expect("create statement");
    stmt.execute_update(
        "create table people (id int, name varchar(9), score double, \
         photo blob, visits bigint, flagged int)",
    )
    .expect("create people");
    let rows = [
        "insert into people (id, name, score, photo, visits, flagged) \
         values (1, 'joe', 2.5, x'01ff', 10, 1)",
        "insert into people (id, name, score, photo, visits, flagged) \
         values (2, 'amy', 4.0, x'02', 20, 1)",
        "insert into people (id, name, score, photo, visits, flagged) \
         values (3, null, null, null, 30, 0)",
    ];
    for sql in rows {
        stmt.execute_update(sql).expect("insert person");
    }
}
