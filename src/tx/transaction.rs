use std::collections::{HashMap, HashSet};

use crate::{
    error::DbError, query::constant::Constant, record::table_scan::lock_table,
    server::hashi_db::HashiDB,
};

/// A snapshot transaction. The first mutation of a table copies its rows
/// aside; rollback puts them back, commit drops the copies and persists
/// whatever was touched.
pub struct Transaction {
    db: HashiDB,
    undo_rows: HashMap<String, Vec<Vec<Constant>>>,
    created: Vec<String>,
    dirty: HashSet<String>,
}

impl Transaction {
    pub fn new(db: HashiDB) -> Self {
        Transaction {
            db,
            undo_rows: HashMap::new(),
            created: Vec::new(),
            dirty: HashSet::new(),
        }
    }

    /// Called before a table is mutated.
    pub fn snapshot(&mut self, tblname: &str) -> Result<(), DbError> {
        self.dirty.insert(tblname.to_string());
        if self.undo_rows.contains_key(tblname) || self.created.iter().any(|t| t == tblname) {
            return Ok(());
        }
        let tbl = self.db.table(tblname)?;
        let rows = lock_table(&tbl, self.db.busy_timeout_ms(), tblname)?
            .rows()
            .to_vec();
        self.undo_rows.insert(tblname.to_string(), rows);
        Ok(())
    }

    pub fn note_created(&mut self, tblname: &str) {
        self.created.push(tblname.to_string());
        self.dirty.insert(tblname.to_string());
    }

    pub fn commit(&mut self) -> Result<(), DbError> {
        let dirty: Vec<String> = self.dirty.drain().collect();
        self.db.persist(&dirty)?;
        self.undo_rows.clear();
        self.created.clear();
        if !dirty.is_empty() {
            log::debug!("committed changes to {} tables", dirty.len());
        }
        Ok(())
    }

    pub fn rollback(&mut self) -> Result<(), DbError> {
        for tblname in self.created.drain(..) {
            self.undo_rows.remove(&tblname);
            self.db.remove_table(&tblname)?;
        }
        for (tblname, rows) in self.undo_rows.drain() {
            let tbl = self.db.table(&tblname)?;
            lock_table(&tbl, self.db.busy_timeout_ms(), &tblname)?.replace_rows(rows);
        }
        self.dirty.clear();
        log::debug!("rolled back");
        Ok(())
    }
}
