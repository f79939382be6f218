use super::sql_exception::SQLException;

/// The 0-based cursor surface laid over a 1-based result set. Numeric
/// getters treat NULL as an error; string and blob getters return `None`.
pub trait CursorAdapter {
    fn get_int(&mut self, column_index: i32) -> Result<i32, SQLException>;
    fn get_long(&mut self, column_index: i32) -> Result<i64, SQLException>;
    fn get_float(&mut self, column_index: i32) -> Result<f32, SQLException>;
    fn get_double(&mut self, column_index: i32) -> Result<f64, SQLException>;
    fn get_string(&mut self, column_index: i32) -> Result<Option<String>, SQLException>;
    fn get_bytes(&mut self, column_index: i32) -> Result<Option<Vec<u8>>, SQLException>;

    fn get_string_by_name(&mut self, fldname: &str) -> Result<Option<String>, SQLException>
    where
        Self: Sized,
    {
        let column_index = self.get_column_index(fldname)?;
        self.get_string(column_index)
    }

    fn get_column_index(&self, fldname: &str) -> Result<i32, SQLException>;
    fn get_column_count(&self) -> Result<i32, SQLException>;
    fn get_column_name(&self, column_index: i32) -> Result<String, SQLException>;

    fn is_null(&mut self, column_index: i32) -> Result<bool, SQLException>;
    fn next(&mut self) -> Result<bool, SQLException>;
    fn close(&mut self) -> Result<(), SQLException>;

    /// Drives `next` to exhaustion, handing the closure the 0-based row
    /// ordinal and the cursor itself.
    fn for_each_row<F>(&mut self, mut f: F) -> Result<(), SQLException>
    where
        Self: Sized,
        F: FnMut(i32, &mut Self) -> Result<(), SQLException>,
    {
        let mut index = 0;
        while self.next()? {
            f(index, self)?;
            index += 1;
        }
        Ok(())
    }
}
