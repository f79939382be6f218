use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::{
    error::DbError,
    query::constant::Constant,
    record::{schema::Schema, table::Table},
};

const MAGIC: &str = "hashidb 1";
const TABLE_EXT: &str = "tbl";

pub fn table_file_path(dir: &Path, tblname: &str) -> PathBuf {
    dir.join(format!("{}.{}", tblname, TABLE_EXT))
}

fn corrupt(path: &Path, reason: &str) -> DbError {
    DbError::Corrupt {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn encode_val(val: &Constant) -> String {
    match val {
        Constant::Null => "N".to_string(),
        Constant::Int(v) => format!("I:{}", v),
        Constant::Big(v) => format!("L:{}", v),
        Constant::Float(v) => format!("F:{}", v),
        Constant::Double(v) => format!("D:{}", v),
        Constant::Varchar(v) => format!("S:{}", hex::encode(v.as_bytes())),
        Constant::Bytes(v) => format!("B:{}", hex::encode(v)),
    }
}

fn decode_val(path: &Path, tok: &str) -> Result<Constant, DbError> {
    if tok == "N" {
        return Ok(Constant::Null);
    }
    let (tag, body) = tok
        .split_once(':')
        .ok_or_else(|| corrupt(path, "missing value tag"))?;
    match tag {
        "I" => body
            .parse()
            .map(Constant::Int)
            .map_err(|_| corrupt(path, "bad int value")),
        "L" => body
            .parse()
            .map(Constant::Big)
            .map_err(|_| corrupt(path, "bad bigint value")),
        "F" => body
            .parse()
            .map(Constant::Float)
            .map_err(|_| corrupt(path, "bad real value")),
        "D" => body
            .parse()
            .map(Constant::Double)
            .map_err(|_| corrupt(path, "bad double value")),
        "S" => {
            let bytes = hex::decode(body).map_err(|_| corrupt(path, "bad string hex"))?;
            String::from_utf8(bytes)
                .map(Constant::Varchar)
                .map_err(|_| corrupt(path, "string is not utf-8"))
        }
        "B" => hex::decode(body)
            .map(Constant::Bytes)
            .map_err(|_| corrupt(path, "bad blob hex")),
        _ => Err(corrupt(path, "unknown value tag")),
    }
}

pub fn save_table(dir: &Path, tblname: &str, tbl: &Table) -> Result<(), DbError> {
    fs::create_dir_all(dir)?;
    let path = table_file_path(dir, tblname);

    let mut out = String::new();
    out.push_str(&format!("{} {}\n", MAGIC, Utc::now().to_rfc3339()));
    let sch = tbl.schema();
    out.push_str(&format!("{}\n", sch.fields().len()));
    for fldname in sch.fields() {
        out.push_str(&format!(
            "{}\t{}\t{}\n",
            fldname,
            sch.field_type(fldname)?,
            sch.length(fldname)?
        ));
    }
    out.push_str(&format!("{}\n", tbl.row_count()));
    for row in tbl.rows() {
        let toks: Vec<String> = row.iter().map(encode_val).collect();
        out.push_str(&toks.join("\t"));
        out.push('\n');
    }
    fs::write(&path, out)?;
    log::debug!("saved table {} ({} rows)", path.display(), tbl.row_count());
    Ok(())
}

pub fn load_table(path: &Path) -> Result<Table, DbError> {
    let content = fs::read_to_string(path)?;
    let mut lines = content.lines();

    let header = lines.next().ok_or_else(|| corrupt(path, "empty file"))?;
    if !header.starts_with(MAGIC) {
        return Err(corrupt(path, "bad magic"));
    }

    let nfields: usize = lines
        .next()
        .and_then(|l| l.parse().ok())
        .ok_or_else(|| corrupt(path, "bad field count"))?;
    let mut sch = Schema::new();
    for _ in 0..nfields {
        let line = lines.next().ok_or_else(|| corrupt(path, "missing field"))?;
        let mut parts = line.split('\t');
        let fldname = parts.next().ok_or_else(|| corrupt(path, "bad field def"))?;
        let fldtype: i32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| corrupt(path, "bad field type"))?;
        let length: i32 = parts
            .next()
            .and_then(|p| p.parse().ok())
            .ok_or_else(|| corrupt(path, "bad field length"))?;
        sch.add_field(fldname, fldtype, length);
    }

    let nrows: usize = lines
        .next()
        .and_then(|l| l.parse().ok())
        .ok_or_else(|| corrupt(path, "bad row count"))?;
    let mut rows = Vec::with_capacity(nrows);
    for _ in 0..nrows {
        let line = lines.next().ok_or_else(|| corrupt(path, "missing row"))?;
        let row = line
            .split('\t')
            .map(|tok| decode_val(path, tok))
            .collect::<Result<Vec<_>, _>>()?;
        if row.len() != nfields {
            return Err(corrupt(path, "row width does not match schema"));
        }
        rows.push(row);
    }
    Ok(Table::new_with_rows(sch, rows))
}

/// Loads every table file in a database directory.
pub fn load_dir(dir: &Path) -> Result<HashMap<String, Table>, DbError> {
    let mut tables = HashMap::new();
    if !dir.exists() {
        return Ok(tables);
    }
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(TABLE_EXT) {
            continue;
        }
        let tblname = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| corrupt(&path, "bad file name"))?
            .to_string();
        tables.insert(tblname, load_table(&path)?);
    }
    log::debug!("loaded {} tables from {}", tables.len(), dir.display());
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::{load_dir, load_table, save_table, table_file_path};
    use crate::{
        query::constant::Constant,
        record::{schema::Schema, table::Table},
    };

    fn sample_table() -> Table {
        let mut sch = Schema::new();
        sch.add_int_field("a");
        sch.add_string_field("b", 9);
        sch.add_blob_field("c");
        sch.add_double_field("d");
        let mut t = Table::new(sch);
        let slot = t.insert_row();
        t.set_val(slot, "a", Constant::Int(1)).unwrap();
        t.set_val(slot, "b", Constant::Varchar("héllo\tworld".to_string()))
            .unwrap();
        t.set_val(slot, "c", Constant::Bytes(vec![0, 255, 7])).unwrap();
        t.set_val(slot, "d", Constant::Double(2.5)).unwrap();
        let slot = t.insert_row();
        t.set_val(slot, "a", Constant::Int(2)).unwrap();
        // b, c, d stay NULL
        t
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let t = sample_table();
        save_table(temp_dir.path(), "people", &t).unwrap();

        let loaded = load_table(&table_file_path(temp_dir.path(), "people")).unwrap();
        assert_eq!(t.schema().fields(), loaded.schema().fields());
        assert_eq!(t.rows(), loaded.rows());
        assert!(loaded.get_val(1, "b").unwrap().is_null());
    }

    #[test]
    fn test_load_dir_collects_tables() {
        let temp_dir = TempDir::new().unwrap();
        save_table(temp_dir.path(), "t1", &sample_table()).unwrap();
        save_table(temp_dir.path(), "t2", &sample_table()).unwrap();
        std::fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let tables = load_dir(temp_dir.path()).unwrap();
        assert_eq!(2, tables.len());
        assert!(tables.contains_key("t1"));
        assert!(tables.contains_key("t2"));
    }

    #[test]
    fn test_load_missing_dir_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let tables = load_dir(&temp_dir.path().join("nope")).unwrap();
        assert!(tables.is_empty());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.tbl");
        std::fs::write(&path, "not a table file\n").unwrap();
        assert!(load_table(&path).is_err());
    }
}
