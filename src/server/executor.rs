use std::sync::{Arc, Mutex};

use crate::{
    error::DbError,
    parse::{
        create_table_data::CreateTableData, delete_data::DeleteData, insert_data::InsertData,
        modify_data::ModifyData, parser::UpdateCommand, query_data::QueryData,
    },
    query::{
        constant::Constant,
        project_scan::ProjectScan,
        scan::{Scan, UpdateScan},
        select_scan::SelectScan,
    },
    record::{schema::Schema, table_scan::TableScan},
    server::hashi_db::HashiDB,
    tx::transaction::Transaction,
};

/// Runs parsed statements directly against the tables. There is no planner;
/// queries are a table scan, an optional select filter and a projection.
#[derive(Clone)]
pub struct Executor {
    db: HashiDB,
}

impl Executor {
    pub fn new(db: HashiDB) -> Self {
        Executor { db }
    }

    pub fn execute_query(
        &self,
        qd: &QueryData,
        binds: &[Constant],
    ) -> Result<(Box<dyn Scan>, Schema), DbError> {
        let tblname = qd.table_name();
        let tbl = self.db.table(&tblname)?;
        let tblschema = crate::record::table_scan::lock_table(
            &tbl,
            self.db.busy_timeout_ms(),
            &tblname,
        )?
        .schema()
        .clone();

        let fields = if qd.is_select_all() {
            tblschema.fields().to_vec()
        } else {
            qd.fields()
        };
        let mut sch = Schema::new();
        for fldname in &fields {
            sch.add(fldname, &tblschema)?;
        }

        let pred = qd.pred().resolve(binds)?;
        let ts = TableScan::new(tbl, &tblname, self.db.busy_timeout_ms());
        let scan: Box<dyn Scan> = if pred.is_empty() {
            Box::new(ProjectScan::new(Box::new(ts), fields))
        } else {
            Box::new(ProjectScan::new(
                Box::new(SelectScan::new(ts, pred)),
                fields,
            ))
        };
        Ok((scan, sch))
    }

    pub fn execute_update(
        &self,
        cmd: &UpdateCommand,
        binds: &[Constant],
        tx: &Arc<Mutex<Transaction>>,
    ) -> Result<i32, DbError> {
        if self.db.config().read_only {
            return Err(DbError::ReadOnly);
        }
        match cmd {
            UpdateCommand::Insert(data) => self.insert(data, binds, tx),
            UpdateCommand::Delete(data) => self.delete(data, binds, tx),
            UpdateCommand::Modify(data) => self.modify(data, binds, tx),
            UpdateCommand::CreateTable(data) => self.create_table(data, tx),
        }
    }

    fn lock_tx<'a>(
        tx: &'a Arc<Mutex<Transaction>>,
    ) -> Result<std::sync::MutexGuard<'a, Transaction>, DbError> {
        tx.lock()
            .map_err(|_| DbError::Busy("transaction lock poisoned".to_string()))
    }

    fn insert(
        &self,
        data: &InsertData,
        binds: &[Constant],
        tx: &Arc<Mutex<Transaction>>,
    ) -> Result<i32, DbError> {
        let tblname = data.table_name();
        let vals = data
            .vals()
            .iter()
            .map(|e| {
                e.resolve(binds)?.as_constant().ok_or_else(|| {
                    DbError::Syntax("insert values must be constants".to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Coerce against the schema before touching the table, so a bad
        // value cannot leave a partial row behind.
        let tbl = self.db.table(&tblname)?;
        let sch = crate::record::table_scan::lock_table(
            &tbl,
            self.db.busy_timeout_ms(),
            &tblname,
        )?
        .schema()
        .clone();
        let mut checked = Vec::with_capacity(vals.len());
        for (fldname, val) in data.fields().iter().zip(vals) {
            let fldtype = sch.field_type(fldname)?;
            checked.push(val.coerce_to(fldname, fldtype)?);
        }

        Self::lock_tx(tx)?.snapshot(&tblname)?;
        let mut us = TableScan::new(tbl, &tblname, self.db.busy_timeout_ms());
        us.insert()?;
        for (fldname, val) in data.fields().iter().zip(checked) {
            us.set_val(fldname, val)?;
        }
        us.close()?;
        Ok(1)
    }

    fn delete(
        &self,
        data: &DeleteData,
        binds: &[Constant],
        tx: &Arc<Mutex<Transaction>>,
    ) -> Result<i32, DbError> {
        let tblname = data.table_name();
        let pred = data.pred().resolve(binds)?;

        Self::lock_tx(tx)?.snapshot(&tblname)?;
        let tbl = self.db.table(&tblname)?;
        let mut us = TableScan::new(tbl, &tblname, self.db.busy_timeout_ms());
        let mut count = 0;
        us.before_first()?;
        while us.next()? {
            if pred.is_satisfied(&us)? {
                us.delete()?;
                count += 1;
            }
        }
        us.close()?;
        Ok(count)
    }

    fn modify(
        &self,
        data: &ModifyData,
        binds: &[Constant],
        tx: &Arc<Mutex<Transaction>>,
    ) -> Result<i32, DbError> {
        let tblname = data.table_name();
        let pred = data.pred().resolve(binds)?;
        let newval = data.new_val().resolve(binds)?;

        Self::lock_tx(tx)?.snapshot(&tblname)?;
        let tbl = self.db.table(&tblname)?;
        let mut us = TableScan::new(tbl, &tblname, self.db.busy_timeout_ms());
        let mut count = 0;
        us.before_first()?;
        while us.next()? {
            if pred.is_satisfied(&us)? {
                let val = newval.evaluate(&us)?;
                us.set_val(&data.target_field(), val)?;
                count += 1;
            }
        }
        us.close()?;
        Ok(count)
    }

    fn create_table(
        &self,
        data: &CreateTableData,
        tx: &Arc<Mutex<Transaction>>,
    ) -> Result<i32, DbError> {
        let tblname = data.table_name();
        self.db.create_table(&tblname, data.new_schema())?;
        Self::lock_tx(tx)?.note_created(&tblname);
        Ok(0)
    }
}
