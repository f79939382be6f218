use std::{
    io::{stdout, Write},
    process::exit,
};

use hashidb::{
    rdbc::{
        connection_adapter::ConnectionAdapter,
        cursor_adapter::CursorAdapter,
        embedded::{
            embedded_connection::EmbeddedConnection, embedded_metadata::EmbeddedMetadata,
            embedded_result_set::EmbeddedResultSet,
        },
        result_set_adapter::ResultSetAdapter,
        result_set_cursor::ResultSetCursor,
        result_set_metadata_adapter::ResultSetMetadataAdapter,
        sql_exception::SQLException,
        statement_adapter::StatementAdapter,
    },
    record::schema::field_type,
};

pub fn read_query() -> Result<String, String> {
    print!("hashidb>");
    stdout().flush().map_err(|_| "could not flush")?;

    let mut input = String::new();
    std::io::stdin()
        .read_line(&mut input)
        .map_err(|_| "could not read")?;
    Ok(input)
}

pub fn exec(conn: &mut EmbeddedConnection, qry: &str) {
    let words: Vec<&str> = qry.split_whitespace().collect();
    if words.is_empty() {
        return;
    }

    match words[0].to_ascii_lowercase().as_str() {
        "exit" => {
            println!("bye");
            exit(0)
        }
        "begin" => report(conn.begin_transaction()),
        "commit" => report(conn.commit()),
        "rollback" => report(conn.rollback()),
        "select" => exec_query(conn, qry),
        _ => exec_update(conn, qry),
    }
}

fn report(result: Result<(), SQLException>) {
    match result {
        Ok(()) => println!("ok"),
        Err(e) => println!("error: {}", e),
    }
}

fn exec_query(conn: &mut EmbeddedConnection, sql: &str) {
    let mut stmt = match conn.create_statement() {
        Ok(stmt) => stmt,
        Err(e) => {
            println!("error: {}", e);
            return;
        }
    };
    match stmt.execute_query(sql) {
        Ok(result) => match print_result_set(result) {
            Ok(cnt) => println!("Rows: {}", cnt),
            Err(e) => println!("error: {}", e),
        },
        Err(e) => println!("invalid query {}: {}", sql.trim_end(), e),
    }
}

fn print_result_set(result: EmbeddedResultSet) -> Result<i32, SQLException> {
    let meta = result.get_metadata()?;
    let cols = meta.get_column_count()?;

    for i in 1..=cols {
        let name = meta.get_column_name(i)?.unwrap_or_default();
        let w = meta.get_column_display_size(i)?;
        print!("{:width$} ", name, width = w as usize);
    }
    println!();
    for i in 1..=cols {
        let w = meta.get_column_display_size(i)?;
        print!("{:-<width$}", "", width = w as usize + 1);
    }
    println!();

    let mut cur = ResultSetCursor::new(result);
    let mut cnt = 0;
    cur.for_each_row(|_, cur| {
        cnt += 1;
        print_record(cur, &meta)
    })?;
    cur.close()?;

    Ok(cnt)
}

fn print_record(
    cur: &mut ResultSetCursor<EmbeddedResultSet>,
    meta: &EmbeddedMetadata,
) -> Result<(), SQLException> {
    for i in 0..meta.get_column_count()? {
        let w = meta.get_column_display_size(i + 1)? as usize;
        if cur.is_null(i)? {
            print!("{:w$} ", "NULL");
            continue;
        }
        match meta.get_column_type(i + 1)? {
            Some(field_type::INTEGER) => print!("{:w$} ", cur.get_int(i)?),
            Some(field_type::BIGINT) => print!("{:w$} ", cur.get_long(i)?),
            Some(field_type::REAL) => print!("{:w$} ", cur.get_float(i)?),
            Some(field_type::DOUBLE) => print!("{:w$} ", cur.get_double(i)?),
            Some(field_type::VARBINARY) => {
                let bytes = cur.get_bytes(i)?.unwrap_or_default();
                print!("{:w$} ", hex::encode(bytes))
            }
            _ => print!("{:w$} ", cur.get_string(i)?.unwrap_or_default()),
        }
    }
    println!();

    Ok(())
}

fn exec_update(conn: &mut EmbeddedConnection, sql: &str) {
    let mut stmt = match conn.create_statement() {
        Ok(stmt) => stmt,
        Err(e) => {
            println!("error: {}", e);
            return;
        }
    };
    match stmt.execute_update(sql) {
        Ok(affected) => println!("affected: {}", affected),
        Err(e) => println!("invalid command {}: {}", sql.trim_end(), e),
    }
}
