use crate::{
    rdbc::{result_set_metadata_adapter::ResultSetMetadataAdapter, sql_exception::SQLException},
    record::schema::{field_type, Schema},
};

pub struct EmbeddedMetadata {
    sch: Schema,
}

impl EmbeddedMetadata {
    pub fn new(sch: Schema) -> Self {
        EmbeddedMetadata { sch }
    }
}

impl ResultSetMetadataAdapter for EmbeddedMetadata {
    fn get_column_count(&self) -> Result<i32, SQLException> {
        Ok(self.sch.fields().len() as i32)
    }

    fn get_column_name(&self, column: i32) -> Result<Option<String>, SQLException> {
        if column < 1 {
            return Ok(None);
        }
        Ok(self.sch.fields().get((column - 1) as usize).cloned())
    }

    fn get_column_type(&self, column: i32) -> Result<Option<i32>, SQLException> {
        if let Some(fldname) = self.get_column_name(column)? {
            return Ok(Some(self.sch.field_type(&fldname).map_err(SQLException::Db)?));
        }
        Ok(None)
    }

    fn get_column_display_size(&self, column: i32) -> Result<i32, SQLException> {
        if let Some(fldname) = self.get_column_name(column)? {
            let fldtype = self.sch.field_type(&fldname).map_err(SQLException::Db)?;
            let fldlen = match fldtype {
                field_type::INTEGER => 6,
                field_type::BIGINT => 12,
                field_type::REAL | field_type::DOUBLE => 12,
                field_type::VARBINARY => 16,
                _ => self.sch.length(&fldname).map_err(SQLException::Db)?,
            };
            return Ok(i32::max(fldname.len() as i32, fldlen) + 1);
        }
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::EmbeddedMetadata;
    use crate::{
        rdbc::result_set_metadata_adapter::ResultSetMetadataAdapter,
        record::schema::{field_type, Schema},
    };

    fn meta() -> EmbeddedMetadata {
        let mut sch = Schema::new();
        sch.add_int_field("id");
        sch.add_string_field("name", 20);
        EmbeddedMetadata::new(sch)
    }

    #[test]
    fn test_columns_are_one_based() {
        let m = meta();
        assert_eq!(2, m.get_column_count().unwrap());
        assert_eq!(Some("id".to_string()), m.get_column_name(1).unwrap());
        assert_eq!(Some("name".to_string()), m.get_column_name(2).unwrap());
        assert_eq!(None, m.get_column_name(0).unwrap());
        assert_eq!(None, m.get_column_name(3).unwrap());
    }

    #[test]
    fn test_types_and_display_sizes() {
        let m = meta();
        assert_eq!(Some(field_type::INTEGER), m.get_column_type(1).unwrap());
        assert_eq!(None, m.get_column_type(9).unwrap());
        // width is at least the header, padded by one
        assert_eq!(7, m.get_column_display_size(1).unwrap());
        assert_eq!(21, m.get_column_display_size(2).unwrap());
        assert_eq!(0, m.get_column_display_size(9).unwrap());
    }
}
