use crate::{
    error::DbError,
    query::{constant::Constant, scan::Scan},
    rdbc::{result_set_adapter::ResultSetAdapter, sql_exception::SQLException},
    record::schema::Schema,
};

use super::{embedded_connection::EmbeddedConnection, embedded_metadata::EmbeddedMetadata};

/// A result set over a finished query scan. Columns are 1-based; NULL
/// reads through a numeric getter yield the type's zero and set the
/// `was_null` flag, as the ODBC-style contract wants.
pub struct EmbeddedResultSet<'a> {
    s: Box<dyn Scan>,
    sch: Schema,
    conn: &'a mut EmbeddedConnection,
    wasnull: bool,
}

impl<'a> EmbeddedResultSet<'a> {
    pub fn new(s: Box<dyn Scan>, sch: Schema, conn: &'a mut EmbeddedConnection) -> Self {
        EmbeddedResultSet {
            s,
            sch,
            conn,
            wasnull: false,
        }
    }

    fn field_name(&self, column: i32) -> Result<String, SQLException> {
        if column < 1 || column > self.sch.fields().len() as i32 {
            return Err(SQLException::InvalidColumn(column));
        }
        Ok(self.sch.fields()[(column - 1) as usize].clone())
    }

    fn get_val(&mut self, column: i32) -> Result<Constant, SQLException> {
        let fldname = self.field_name(column)?;
        let val = self.s.get_val(&fldname).map_err(SQLException::Db)?;
        self.wasnull = val.is_null();
        Ok(val)
    }

    fn mismatch(&self, column: i32, expected: &str) -> SQLException {
        let field = self
            .sch
            .fields()
            .get((column - 1) as usize)
            .cloned()
            .unwrap_or_default();
        SQLException::Db(DbError::TypeMismatch {
            field,
            expected: expected.to_string(),
        })
    }
}

impl<'a> ResultSetAdapter for EmbeddedResultSet<'a> {
    type ResultSetMetadata = EmbeddedMetadata;

    fn before_first(&mut self) -> Result<(), SQLException> {
        self.s.before_first().map_err(SQLException::Db)
    }

    fn next(&mut self) -> Result<bool, SQLException> {
        self.s.next().map_err(SQLException::Db)
    }

    fn get_i32(&mut self, column: i32) -> Result<i32, SQLException> {
        let val = self.get_val(column)?;
        if val.is_null() {
            return Ok(0);
        }
        val.as_i32().ok_or_else(|| self.mismatch(column, "int"))
    }

    fn get_i64(&mut self, column: i32) -> Result<i64, SQLException> {
        let val = self.get_val(column)?;
        if val.is_null() {
            return Ok(0);
        }
        val.as_i64().ok_or_else(|| self.mismatch(column, "bigint"))
    }

    fn get_f32(&mut self, column: i32) -> Result<f32, SQLException> {
        let val = self.get_val(column)?;
        if val.is_null() {
            return Ok(0.0);
        }
        val.as_f32().ok_or_else(|| self.mismatch(column, "real"))
    }

    fn get_f64(&mut self, column: i32) -> Result<f64, SQLException> {
        let val = self.get_val(column)?;
        if val.is_null() {
            return Ok(0.0);
        }
        val.as_f64().ok_or_else(|| self.mismatch(column, "double"))
    }

    fn get_string(&mut self, column: i32) -> Result<Option<String>, SQLException> {
        let val = self.get_val(column)?;
        if val.is_null() {
            return Ok(None);
        }
        Ok(Some(val.to_string()))
    }

    fn get_bytes(&mut self, column: i32) -> Result<Option<Vec<u8>>, SQLException> {
        let val = self.get_val(column)?;
        if val.is_null() {
            return Ok(None);
        }
        match val.as_bytes() {
            Some(b) => Ok(Some(b)),
            None => Err(self.mismatch(column, "blob")),
        }
    }

    fn was_null(&self) -> bool {
        self.wasnull
    }

    fn is_null(&mut self, column: i32) -> Result<bool, SQLException> {
        Ok(self.get_val(column)?.is_null())
    }

    fn find_column(&self, fldname: &str) -> Result<i32, SQLException> {
        self.sch
            .fields()
            .iter()
            .position(|f| f == fldname)
            .map(|p| p as i32 + 1)
            .ok_or_else(|| SQLException::NoSuchColumn(fldname.to_string()))
    }

    fn get_metadata(&self) -> Result<EmbeddedMetadata, SQLException> {
        Ok(EmbeddedMetadata::new(self.sch.clone()))
    }

    fn close(&mut self) -> Result<(), SQLException> {
        self.s.close().map_err(SQLException::Db)?;
        self.conn.auto_commit()
    }
}
