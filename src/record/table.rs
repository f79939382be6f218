use crate::{error::DbError, query::constant::Constant, record::schema::Schema};

/// An in-memory table: a schema and its rows, kept in insertion order.
#[derive(Debug, Clone)]
pub struct Table {
    schema: Schema,
    rows: Vec<Vec<Constant>>,
}

impl Table {
    pub fn new(schema: Schema) -> Self {
        Table {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn new_with_rows(schema: Schema, rows: Vec<Vec<Constant>>) -> Self {
        Table { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Vec<Constant>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Appends an all-NULL row and returns its position.
    pub fn insert_row(&mut self) -> usize {
        self.rows
            .push(vec![Constant::Null; self.schema.fields().len()]);
        self.rows.len() - 1
    }

    // The slot may have gone stale since the caller computed it, so every
    // row access re-checks it under the lock.
    fn check_slot(&self, slot: usize) -> Result<(), DbError> {
        if slot >= self.rows.len() {
            return Err(DbError::NoSuchRow(slot));
        }
        Ok(())
    }

    pub fn delete_row(&mut self, slot: usize) -> Result<(), DbError> {
        self.check_slot(slot)?;
        self.rows.remove(slot);
        Ok(())
    }

    pub fn get_val(&self, slot: usize, fldname: &str) -> Result<Constant, DbError> {
        self.check_slot(slot)?;
        let idx = self.schema.field_index(fldname)?;
        Ok(self.rows[slot][idx].clone())
    }

    /// Type-checks the value against the field, widening numeric literals.
    pub fn set_val(&mut self, slot: usize, fldname: &str, val: Constant) -> Result<(), DbError> {
        self.check_slot(slot)?;
        let idx = self.schema.field_index(fldname)?;
        let fldtype = self.schema.field_type(fldname)?;
        self.rows[slot][idx] = val.coerce_to(fldname, fldtype)?;
        Ok(())
    }

    pub fn replace_rows(&mut self, rows: Vec<Vec<Constant>>) {
        self.rows = rows;
    }
}

#[cfg(test)]
mod tests {
    use super::Table;
    use crate::{query::constant::Constant, record::schema::Schema};

    fn sample_schema() -> Schema {
        let mut sch = Schema::new();
        sch.add_int_field("a");
        sch.add_string_field("b", 9);
        sch
    }

    #[test]
    fn test_insert_starts_null() {
        let mut t = Table::new(sample_schema());
        let slot = t.insert_row();
        assert!(t.get_val(slot, "a").unwrap().is_null());
        assert!(t.get_val(slot, "b").unwrap().is_null());
    }

    #[test]
    fn test_set_val_type_checked() {
        let mut t = Table::new(sample_schema());
        let slot = t.insert_row();
        t.set_val(slot, "a", Constant::Int(3)).unwrap();
        assert!(t
            .set_val(slot, "a", Constant::Varchar("x".to_string()))
            .is_err());
        assert_eq!(Constant::Int(3), t.get_val(slot, "a").unwrap());
    }

    #[test]
    fn test_delete_shifts_rows() {
        let mut t = Table::new(sample_schema());
        for i in 0..3 {
            let slot = t.insert_row();
            t.set_val(slot, "a", Constant::Int(i)).unwrap();
        }
        t.delete_row(1).unwrap();
        assert_eq!(2, t.row_count());
        assert_eq!(Constant::Int(2), t.get_val(1, "a").unwrap());
    }

    #[test]
    fn test_out_of_range_slot_is_an_error() {
        let mut t = Table::new(sample_schema());
        t.insert_row();
        assert!(t.get_val(1, "a").is_err());
        assert!(t.set_val(1, "a", Constant::Int(1)).is_err());
        assert!(t.delete_row(1).is_err());
        assert_eq!(1, t.row_count());
    }
}
