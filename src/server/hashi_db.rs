use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use lazy_static::lazy_static;

use crate::{
    error::DbError,
    record::{schema::Schema, table::Table, table_scan::lock_table},
    server::config::DatabaseConfig,
    storage::table_file,
    tx::transaction::Transaction,
};

struct DbInner {
    tables: Mutex<HashMap<String, Arc<Mutex<Table>>>>,
}

lazy_static! {
    // One engine instance per database, shared by every connection in the
    // process. In-memory databases are keyed by name, file-backed ones by
    // their directory path.
    static ref REGISTRY: Mutex<HashMap<String, Arc<DbInner>>> = Mutex::new(HashMap::new());
}

/// The engine facade. Cloning yields another handle onto the same database.
#[derive(Clone)]
pub struct HashiDB {
    inner: Arc<DbInner>,
    config: DatabaseConfig,
}

impl HashiDB {
    pub fn open(config: DatabaseConfig) -> Result<Self, DbError> {
        let key = if config.in_memory {
            format!(":memory:{}", config.name)
        } else {
            config.db_path().display().to_string()
        };
        let mut reg = REGISTRY
            .lock()
            .map_err(|_| DbError::Busy("registry lock poisoned".to_string()))?;
        if let Some(inner) = reg.get(&key) {
            return Ok(HashiDB {
                inner: inner.clone(),
                config,
            });
        }

        let mut tables = HashMap::new();
        if !config.in_memory {
            for (tblname, tbl) in table_file::load_dir(&config.db_path())? {
                tables.insert(tblname, Arc::new(Mutex::new(tbl)));
            }
        }
        let inner = Arc::new(DbInner {
            tables: Mutex::new(tables),
        });
        reg.insert(key.clone(), inner.clone());
        log::debug!("opened database {}", key);
        Ok(HashiDB { inner, config })
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    pub fn busy_timeout_ms(&self) -> i64 {
        self.config.busy_timeout_ms
    }

    pub fn new_tx(&self) -> Arc<Mutex<Transaction>> {
        Arc::new(Mutex::new(Transaction::new(self.clone())))
    }

    fn tables(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, Arc<Mutex<Table>>>>, DbError> {
        self.inner
            .tables
            .lock()
            .map_err(|_| DbError::Busy("table registry lock poisoned".to_string()))
    }

    pub fn table(&self, tblname: &str) -> Result<Arc<Mutex<Table>>, DbError> {
        self.tables()?
            .get(tblname)
            .cloned()
            .ok_or_else(|| DbError::NoSuchTable(tblname.to_string()))
    }

    pub fn has_table(&self, tblname: &str) -> Result<bool, DbError> {
        Ok(self.tables()?.contains_key(tblname))
    }

    pub fn table_names(&self) -> Result<Vec<String>, DbError> {
        let mut names: Vec<String> = self.tables()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    pub fn create_table(&self, tblname: &str, sch: Schema) -> Result<Arc<Mutex<Table>>, DbError> {
        let mut tables = self.tables()?;
        if tables.contains_key(tblname) {
            return Err(DbError::TableExists(tblname.to_string()));
        }
        let tbl = Arc::new(Mutex::new(Table::new(sch)));
        tables.insert(tblname.to_string(), tbl.clone());
        Ok(tbl)
    }

    pub fn remove_table(&self, tblname: &str) -> Result<(), DbError> {
        self.tables()?.remove(tblname);
        Ok(())
    }

    /// Writes the named tables to disk. A no-op for in-memory databases.
    pub fn persist(&self, tblnames: &[String]) -> Result<(), DbError> {
        if self.config.in_memory {
            return Ok(());
        }
        let dir = self.config.db_path();
        for tblname in tblnames {
            let tbl = match self.tables()?.get(tblname).cloned() {
                Some(tbl) => tbl,
                None => continue, // rolled away before the commit
            };
            let guard = lock_table(&tbl, self.busy_timeout_ms(), tblname)?;
            table_file::save_table(&dir, tblname, &guard)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::HashiDB;
    use crate::{record::schema::Schema, server::config::DatabaseConfig};

    fn int_schema() -> Schema {
        let mut sch = Schema::new();
        sch.add_int_field("a");
        sch
    }

    #[test]
    fn test_create_and_lookup_table() {
        let db = HashiDB::open(DatabaseConfig::new_in_memory("lookupdb")).unwrap();
        db.create_table("t", int_schema()).unwrap();
        assert!(db.table("t").is_ok());
        assert!(db.table("missing").is_err());
        assert!(db.create_table("t", int_schema()).is_err());
    }

    #[test]
    fn test_in_memory_databases_share_by_name() {
        let db1 = HashiDB::open(DatabaseConfig::new_in_memory("shareddb")).unwrap();
        db1.create_table("t", int_schema()).unwrap();
        let db2 = HashiDB::open(DatabaseConfig::new_in_memory("shareddb")).unwrap();
        assert!(db2.has_table("t").unwrap());

        let other = HashiDB::open(DatabaseConfig::new_in_memory("otherdb")).unwrap();
        assert!(!other.has_table("t").unwrap());
    }

    #[test]
    fn test_persist_and_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let db = HashiDB::open(DatabaseConfig::new("filedb", temp_dir.path())).unwrap();
            db.create_table("t", int_schema()).unwrap();
            db.persist(&["t".to_string()]).unwrap();
        }
        // a different path-derived key would miss the registry; same path hits it
        let db = HashiDB::open(DatabaseConfig::new("filedb", temp_dir.path())).unwrap();
        assert!(db.has_table("t").unwrap());
    }
}
