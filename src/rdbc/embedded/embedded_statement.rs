use crate::{
    parse::parser::Parser,
    query::constant::Constant,
    rdbc::{sql_exception::SQLException, statement_adapter::StatementAdapter},
};

use super::{embedded_connection::EmbeddedConnection, embedded_result_set::EmbeddedResultSet};

pub struct EmbeddedStatement<'a> {
    conn: &'a mut EmbeddedConnection,
    binds: Vec<Option<Constant>>,
}

impl<'a> EmbeddedStatement<'a> {
    pub fn new(conn: &'a mut EmbeddedConnection) -> Self {
        EmbeddedStatement {
            conn,
            binds: Vec::new(),
        }
    }

    fn collect_binds(&self) -> Result<Vec<Constant>, SQLException> {
        self.binds
            .iter()
            .enumerate()
            .map(|(i, b)| b.clone().ok_or(SQLException::UnboundParam(i + 1)))
            .collect()
    }
}

impl<'a> StatementAdapter<'a> for EmbeddedStatement<'a> {
    type ResultSet = EmbeddedResultSet<'a>;

    fn bind(&mut self, index: i32, val: Constant) -> Result<(), SQLException> {
        if index < 1 {
            return Err(SQLException::BadBindIndex(index));
        }
        let index = index as usize;
        if self.binds.len() < index {
            self.binds.resize(index, None);
        }
        self.binds[index - 1] = Some(val);
        Ok(())
    }

    fn execute_query(&'a mut self, sql: &str) -> Result<EmbeddedResultSet<'a>, SQLException> {
        let qd = Parser::new(sql).query().map_err(SQLException::Db)?;
        let binds = self.collect_binds()?;
        let (s, sch) = self
            .conn
            .executor()
            .execute_query(&qd, &binds)
            .map_err(SQLException::Db)?;
        Ok(EmbeddedResultSet::new(s, sch, self.conn))
    }

    fn execute_update(&mut self, sql: &str) -> Result<i32, SQLException> {
        let cmd = Parser::new(sql).update_cmd().map_err(SQLException::Db)?;
        let binds = self.collect_binds()?;
        let tx = self.conn.get_transaction();
        let count = self
            .conn
            .executor()
            .execute_update(&cmd, &binds, &tx)
            .map_err(SQLException::Db)?;
        self.conn.auto_commit()?;
        Ok(count)
    }
}
