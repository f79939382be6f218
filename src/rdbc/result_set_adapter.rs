use super::{
    result_set_metadata_adapter::ResultSetMetadataAdapter, sql_exception::SQLException,
};

/// The 1-based result-set surface. Numeric getters return a zero default on
/// NULL and record it in `was_null`, so callers that care must check.
pub trait ResultSetAdapter {
    type ResultSetMetadata: ResultSetMetadataAdapter;

    fn before_first(&mut self) -> Result<(), SQLException>;
    fn next(&mut self) -> Result<bool, SQLException>;

    fn get_i32(&mut self, column: i32) -> Result<i32, SQLException>;
    fn get_i64(&mut self, column: i32) -> Result<i64, SQLException>;
    fn get_f32(&mut self, column: i32) -> Result<f32, SQLException>;
    fn get_f64(&mut self, column: i32) -> Result<f64, SQLException>;
    fn get_string(&mut self, column: i32) -> Result<Option<String>, SQLException>;
    fn get_bytes(&mut self, column: i32) -> Result<Option<Vec<u8>>, SQLException>;

    /// Whether the most recently read column was NULL.
    fn was_null(&self) -> bool;
    fn is_null(&mut self, column: i32) -> Result<bool, SQLException>;

    /// The 1-based position of a named column.
    fn find_column(&self, fldname: &str) -> Result<i32, SQLException>;
    fn get_metadata(&self) -> Result<Self::ResultSetMetadata, SQLException>;
    fn close(&mut self) -> Result<(), SQLException>;

    fn get_i32_by_name(&mut self, fldname: &str) -> Result<i32, SQLException> {
        let column = self.find_column(fldname)?;
        self.get_i32(column)
    }

    fn get_string_by_name(&mut self, fldname: &str) -> Result<Option<String>, SQLException> {
        let column = self.find_column(fldname)?;
        self.get_string(column)
    }
}
