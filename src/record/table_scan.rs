use std::sync::{Arc, Mutex, MutexGuard, TryLockError};

use chrono::Utc;

use crate::{
    error::DbError,
    query::{
        constant::Constant,
        scan::{Scan, UpdateScan},
    },
    record::table::Table,
};

const RETRY_SLEEP_MS: u64 = 5;

/// Acquires the table mutex, retrying until the busy timeout elapses.
pub fn lock_table<'a>(
    tbl: &'a Arc<Mutex<Table>>,
    busy_timeout_ms: i64,
    tblname: &str,
) -> Result<MutexGuard<'a, Table>, DbError> {
    let deadline = Utc::now().timestamp_millis() + busy_timeout_ms;
    loop {
        match tbl.try_lock() {
            Ok(guard) => return Ok(guard),
            Err(TryLockError::Poisoned(_)) => {
                return Err(DbError::Busy(format!("table {} lock poisoned", tblname)))
            }
            Err(TryLockError::WouldBlock) => {
                if Utc::now().timestamp_millis() >= deadline {
                    return Err(DbError::Busy(format!("table {} is locked", tblname)));
                }
                std::thread::sleep(std::time::Duration::from_millis(RETRY_SLEEP_MS));
            }
        }
    }
}

pub struct TableScan {
    tbl: Arc<Mutex<Table>>,
    tblname: String,
    busy_timeout_ms: i64,
    current: i64,
}

impl TableScan {
    pub fn new(tbl: Arc<Mutex<Table>>, tblname: &str, busy_timeout_ms: i64) -> Self {
        TableScan {
            tbl,
            tblname: tblname.to_string(),
            busy_timeout_ms,
            current: -1,
        }
    }

    fn table(&self) -> Result<MutexGuard<'_, Table>, DbError> {
        lock_table(&self.tbl, self.busy_timeout_ms, &self.tblname)
    }

    fn current_slot(&self) -> Result<usize, DbError> {
        if self.current < 0 {
            return Err(DbError::Syntax("scan is before the first row".to_string()));
        }
        Ok(self.current as usize)
    }
}

impl Scan for TableScan {
    fn before_first(&mut self) -> Result<(), DbError> {
        self.current = -1;
        Ok(())
    }

    fn next(&mut self) -> Result<bool, DbError> {
        let count = self.table()?.row_count() as i64;
        if self.current + 1 < count {
            self.current += 1;
            Ok(true)
        } else {
            self.current = count;
            Ok(false)
        }
    }

    fn get_val(&self, fldname: &str) -> Result<Constant, DbError> {
        let slot = self.current_slot()?;
        self.table()?.get_val(slot, fldname)
    }

    fn has_field(&self, fldname: &str) -> Result<bool, DbError> {
        Ok(self.table()?.schema().has_field(fldname))
    }

    fn close(&mut self) -> Result<(), DbError> {
        Ok(())
    }
}

impl UpdateScan for TableScan {
    fn set_val(&mut self, fldname: &str, val: Constant) -> Result<(), DbError> {
        let slot = self.current_slot()?;
        self.table()?.set_val(slot, fldname, val)
    }

    fn insert(&mut self) -> Result<(), DbError> {
        let slot = self.table()?.insert_row();
        self.current = slot as i64;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), DbError> {
        let slot = self.current_slot()?;
        self.table()?.delete_row(slot)?;
        self.current -= 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use rand::Rng;

    use super::{lock_table, TableScan};
    use crate::{
        query::{
            constant::Constant,
            scan::{Scan, UpdateScan},
        },
        record::{schema::Schema, table::Table},
    };

    fn new_table() -> Arc<Mutex<Table>> {
        let mut sch = Schema::new();
        sch.add_int_field("a");
        sch.add_string_field("b", 9);
        Arc::new(Mutex::new(Table::new(sch)))
    }

    #[test]
    fn test_table_scan_insert_and_read() {
        let tbl = new_table();
        let mut us = TableScan::new(tbl.clone(), "t", 100);
        let mut rng = rand::rng();

        let n = 50;
        let mut expected = Vec::new();
        for _ in 0..n {
            let i = rng.random_range(0..=50);
            expected.push(i);
            us.insert().unwrap();
            us.set_val("a", Constant::Int(i)).unwrap();
            us.set_val("b", Constant::Varchar(format!("rec{}", i)))
                .unwrap();
        }
        us.close().unwrap();

        let mut s = TableScan::new(tbl, "t", 100);
        s.before_first().unwrap();
        let mut got = Vec::new();
        while s.next().unwrap() {
            got.push(s.get_val("a").unwrap().as_i32().unwrap());
        }
        s.close().unwrap();
        assert_eq!(expected, got);
    }

    #[test]
    fn test_table_scan_delete_while_scanning() {
        let tbl = new_table();
        let mut us = TableScan::new(tbl.clone(), "t", 100);
        for i in 0..10 {
            us.insert().unwrap();
            us.set_val("a", Constant::Int(i)).unwrap();
        }

        us.before_first().unwrap();
        while us.next().unwrap() {
            if us.get_val("a").unwrap().as_i32().unwrap() % 2 == 0 {
                us.delete().unwrap();
            }
        }
        assert_eq!(5, tbl.lock().unwrap().row_count());
    }

    #[test]
    fn test_get_val_after_last_row_fails() {
        let tbl = new_table();
        let mut us = TableScan::new(tbl.clone(), "t", 100);
        us.insert().unwrap();
        us.set_val("a", Constant::Int(1)).unwrap();

        let mut s = TableScan::new(tbl, "t", 100);
        s.before_first().unwrap();
        while s.next().unwrap() {}
        assert!(s.get_val("a").is_err());
    }

    #[test]
    fn test_get_val_before_first_fails() {
        let tbl = new_table();
        let mut us = TableScan::new(tbl.clone(), "t", 100);
        us.insert().unwrap();
        let s = TableScan::new(tbl, "t", 100);
        assert!(s.get_val("a").is_err());
    }

    #[test]
    fn test_lock_table_times_out_while_held() {
        let tbl = new_table();
        let _guard = tbl.lock().unwrap();
        let err = lock_table(&tbl, 20, "t").unwrap_err();
        assert!(err.to_string().contains("busy"));
    }
}
