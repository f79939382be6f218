use std::collections::HashMap;

use crate::error::DbError;

/// java.sql.Types codes, same convention the result-set metadata reports.
pub mod field_type {
    pub const INTEGER: i32 = 4;
    pub const BIGINT: i32 = -5;
    pub const REAL: i32 = 7;
    pub const DOUBLE: i32 = 8;
    pub const VARCHAR: i32 = 12;
    pub const VARBINARY: i32 = -3;
}

#[derive(Debug, Clone)]
struct FieldInfo {
    field_type: i32,
    length: i32,
}

#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<String>,
    info: HashMap<String, FieldInfo>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_field(&mut self, fldname: &str, field_type: i32, length: i32) {
        self.fields.push(fldname.to_string());
        self.info
            .insert(fldname.to_string(), FieldInfo { field_type, length });
    }

    pub fn add_int_field(&mut self, fldname: &str) {
        self.add_field(fldname, field_type::INTEGER, 0)
    }

    pub fn add_bigint_field(&mut self, fldname: &str) {
        self.add_field(fldname, field_type::BIGINT, 0)
    }

    pub fn add_real_field(&mut self, fldname: &str) {
        self.add_field(fldname, field_type::REAL, 0)
    }

    pub fn add_double_field(&mut self, fldname: &str) {
        self.add_field(fldname, field_type::DOUBLE, 0)
    }

    pub fn add_string_field(&mut self, fldname: &str, length: i32) {
        self.add_field(fldname, field_type::VARCHAR, length)
    }

    pub fn add_blob_field(&mut self, fldname: &str) {
        self.add_field(fldname, field_type::VARBINARY, 0)
    }

    pub fn add(&mut self, fldname: &str, sch: &Schema) -> Result<(), DbError> {
        let field_type = sch.field_type(fldname)?;
        let length = sch.length(fldname)?;
        self.add_field(fldname, field_type, length);
        Ok(())
    }

    pub fn add_all(&mut self, sch: &Schema) -> Result<(), DbError> {
        for fldname in sch.fields() {
            self.add(fldname, sch)?;
        }
        Ok(())
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn has_field(&self, fldname: &str) -> bool {
        self.info.contains_key(fldname)
    }

    /// Position of a field in schema order.
    pub fn field_index(&self, fldname: &str) -> Result<usize, DbError> {
        self.fields
            .iter()
            .position(|f| f == fldname)
            .ok_or_else(|| DbError::NoSuchField(fldname.to_string()))
    }

    pub fn field_type(&self, fldname: &str) -> Result<i32, DbError> {
        self.info
            .get(fldname)
            .map(|i| i.field_type)
            .ok_or_else(|| DbError::NoSuchField(fldname.to_string()))
    }

    pub fn length(&self, fldname: &str) -> Result<i32, DbError> {
        self.info
            .get(fldname)
            .map(|i| i.length)
            .ok_or_else(|| DbError::NoSuchField(fldname.to_string()))
    }
}
