use super::{sql_exception::SQLException, statement_adapter::StatementAdapter};

pub trait ConnectionAdapter<'a> {
    type Statement: StatementAdapter<'a>;

    fn create_statement(&'a mut self) -> Result<Self::Statement, SQLException>;
    /// Suspends auto-commit until `commit` or `rollback`.
    fn begin_transaction(&mut self) -> Result<(), SQLException>;
    fn commit(&mut self) -> Result<(), SQLException>;
    fn rollback(&mut self) -> Result<(), SQLException>;
    fn close(&mut self) -> Result<(), SQLException>;
}
