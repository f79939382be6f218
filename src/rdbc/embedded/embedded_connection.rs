use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    error::DbError,
    rdbc::{connection_adapter::ConnectionAdapter, sql_exception::SQLException},
    server::{executor::Executor, hashi_db::HashiDB},
    tx::transaction::Transaction,
};

use super::embedded_statement::EmbeddedStatement;

/// A connection onto one database. Statements auto-commit unless an
/// explicit transaction is open.
pub struct EmbeddedConnection {
    db: HashiDB,
    current_tx: Arc<Mutex<Transaction>>,
    in_explicit_tx: bool,
}

impl EmbeddedConnection {
    pub fn new(db: HashiDB) -> Self {
        let current_tx = db.new_tx();
        EmbeddedConnection {
            db,
            current_tx,
            in_explicit_tx: false,
        }
    }

    pub(crate) fn executor(&self) -> Executor {
        Executor::new(self.db.clone())
    }

    pub(crate) fn get_transaction(&self) -> Arc<Mutex<Transaction>> {
        self.current_tx.clone()
    }

    fn lock_tx(&self) -> Result<MutexGuard<'_, Transaction>, SQLException> {
        self.current_tx
            .lock()
            .map_err(|_| SQLException::Db(DbError::Busy("transaction lock poisoned".to_string())))
    }

    fn commit_current(&mut self) -> Result<(), SQLException> {
        self.lock_tx()?.commit().map_err(SQLException::Db)?;
        self.current_tx = self.db.new_tx();
        Ok(())
    }

    /// Commits unless the caller opened a transaction explicitly.
    pub(crate) fn auto_commit(&mut self) -> Result<(), SQLException> {
        if self.in_explicit_tx {
            return Ok(());
        }
        self.commit_current()
    }
}

impl<'a> ConnectionAdapter<'a> for EmbeddedConnection {
    type Statement = EmbeddedStatement<'a>;

    fn create_statement(&'a mut self) -> Result<EmbeddedStatement<'a>, SQLException> {
        Ok(EmbeddedStatement::new(self))
    }

    fn begin_transaction(&mut self) -> Result<(), SQLException> {
        if self.in_explicit_tx {
            return Err(SQLException::Db(DbError::Syntax(
                "a transaction is already open".to_string(),
            )));
        }
        self.in_explicit_tx = true;
        Ok(())
    }

    fn commit(&mut self) -> Result<(), SQLException> {
        self.in_explicit_tx = false;
        self.commit_current()
    }

    fn rollback(&mut self) -> Result<(), SQLException> {
        self.in_explicit_tx = false;
        self.lock_tx()?.rollback().map_err(SQLException::Db)?;
        self.current_tx = self.db.new_tx();
        Ok(())
    }

    fn close(&mut self) -> Result<(), SQLException> {
        self.commit()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        rdbc::{
            connection_adapter::ConnectionAdapter, result_set_adapter::ResultSetAdapter,
            statement_adapter::StatementAdapter,
        },
        testlib::helper,
    };

    fn count_rows(conn: &mut super::EmbeddedConnection, sql: &str) -> i32 {
        let mut stmt = conn.create_statement().unwrap();
        let mut rs = stmt.execute_query(sql).unwrap();
        let mut n = 0;
        while rs.next().unwrap() {
            n += 1;
        }
        rs.close().unwrap();
        n
    }

    #[test]
    fn test_rollback_undoes_uncommitted_changes() {
        let mut conn = helper::memory_connection("connrollbackdb");
        helper::create_people(&mut conn);
        assert_eq!(3, count_rows(&mut conn, "select * from people"));

        conn.begin_transaction().unwrap();
        {
            let mut stmt = conn.create_statement().unwrap();
            stmt.execute_update("delete from people").unwrap();
        }
        assert_eq!(0, count_rows(&mut conn, "select * from people"));
        conn.rollback().unwrap();
        assert_eq!(3, count_rows(&mut conn, "select * from people"));
    }

    #[test]
    fn test_explicit_commit_keeps_changes() {
        let mut conn = helper::memory_connection("conncommitdb");
        helper::create_people(&mut conn);

        conn.begin_transaction().unwrap();
        {
            let mut stmt = conn.create_statement().unwrap();
            stmt.execute_update("delete from people where id = 1").unwrap();
        }
        conn.commit().unwrap();
        conn.begin_transaction().unwrap();
        conn.rollback().unwrap();
        assert_eq!(2, count_rows(&mut conn, "select * from people"));
    }

    #[test]
    fn test_nested_begin_is_rejected() {
        let mut conn = helper::memory_connection("connnesteddb");
        conn.begin_transaction().unwrap();
        assert!(conn.begin_transaction().is_err());
    }

    #[test]
    fn test_connections_share_a_named_database() {
        let mut conn = helper::memory_connection("connshareddb");
        helper::create_people(&mut conn);

        let mut other = helper::memory_connection("connshareddb");
        assert_eq!(3, count_rows(&mut other, "select id from people"));
    }
}
