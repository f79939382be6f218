use super::{
    cursor_adapter::CursorAdapter, result_set_adapter::ResultSetAdapter,
    result_set_metadata_adapter::ResultSetMetadataAdapter, sql_exception::SQLException,
};

/// Adapts any 1-based result set to the 0-based cursor surface. This is
/// pure translation: +1 on every index going down, a null check on the way
/// back up, and nothing else.
pub struct ResultSetCursor<R: ResultSetAdapter> {
    rs: R,
}

impl<R: ResultSetAdapter> ResultSetCursor<R> {
    pub fn new(rs: R) -> Self {
        ResultSetCursor { rs }
    }

    fn checked<T>(&mut self, column_index: i32, val: T) -> Result<T, SQLException> {
        if self.rs.was_null() {
            Err(SQLException::NullColumn(column_index))
        } else {
            Ok(val)
        }
    }
}

impl<R: ResultSetAdapter> CursorAdapter for ResultSetCursor<R> {
    fn get_int(&mut self, column_index: i32) -> Result<i32, SQLException> {
        let val = self.rs.get_i32(column_index + 1)?;
        self.checked(column_index, val)
    }

    fn get_long(&mut self, column_index: i32) -> Result<i64, SQLException> {
        let val = self.rs.get_i64(column_index + 1)?;
        self.checked(column_index, val)
    }

    fn get_float(&mut self, column_index: i32) -> Result<f32, SQLException> {
        let val = self.rs.get_f32(column_index + 1)?;
        self.checked(column_index, val)
    }

    fn get_double(&mut self, column_index: i32) -> Result<f64, SQLException> {
        let val = self.rs.get_f64(column_index + 1)?;
        self.checked(column_index, val)
    }

    fn get_string(&mut self, column_index: i32) -> Result<Option<String>, SQLException> {
        self.rs.get_string(column_index + 1)
    }

    fn get_bytes(&mut self, column_index: i32) -> Result<Option<Vec<u8>>, SQLException> {
        self.rs.get_bytes(column_index + 1)
    }

    fn get_column_index(&self, fldname: &str) -> Result<i32, SQLException> {
        Ok(self.rs.find_column(fldname)? - 1)
    }

    fn get_column_count(&self) -> Result<i32, SQLException> {
        self.rs.get_metadata()?.get_column_count()
    }

    fn get_column_name(&self, column_index: i32) -> Result<String, SQLException> {
        let meta = self.rs.get_metadata()?;
        if column_index >= meta.get_column_count()? {
            return Err(SQLException::ColumnPastEnd(column_index));
        }
        if column_index < 0 {
            return Err(SQLException::NegativeColumn);
        }
        meta.get_column_name(column_index + 1)?
            .ok_or(SQLException::ColumnPastEnd(column_index))
    }

    fn is_null(&mut self, column_index: i32) -> Result<bool, SQLException> {
        self.rs.is_null(column_index + 1)
    }

    fn next(&mut self) -> Result<bool, SQLException> {
        self.rs.next()
    }

    fn close(&mut self) -> Result<(), SQLException> {
        self.rs.close()
    }
}

#[cfg(test)]
mod tests {
    use super::ResultSetCursor;
    use crate::{
        query::constant::Constant,
        rdbc::{
            cursor_adapter::CursorAdapter, result_set_adapter::ResultSetAdapter,
            result_set_metadata_adapter::ResultSetMetadataAdapter, sql_exception::SQLException,
        },
        record::schema::Schema,
    };

    // A result set over fixed rows, recording the 1-based indexes it was
    // asked for.
    struct FixedResultSet {
        fields: Vec<String>,
        sch: Schema,
        rows: Vec<Vec<Constant>>,
        current: i64,
        wasnull: bool,
        pub asked: std::cell::RefCell<Vec<i32>>,
        closed: bool,
    }

    struct FixedMetadata {
        sch: Schema,
    }

    impl ResultSetMetadataAdapter for FixedMetadata {
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
            match self.get_column_name(column)? {
                Some(f) => Ok(Some(self.sch.field_type(&f).map_err(SQLException::Db)?)),
                None => Ok(None),
            }
        }
        fn get_column_display_size(&self, _column: i32) -> Result<i32, SQLException> {
            Ok(10)
        }
    }

    impl FixedResultSet {
        fn new(sch: Schema, rows: Vec<Vec<Constant>>) -> Self {
            FixedResultSet {
                fields: sch.fields().to_vec(),
                sch,
                rows,
                current: -1,
                wasnull: false,
                asked: std::cell::RefCell::new(Vec::new()),
                closed: false,
            }
        }

        fn val(&mut self, column: i32) -> Result<Constant, SQLException> {
            self.asked.borrow_mut().push(column);
            if column < 1 || column > self.fields.len() as i32 {
                return Err(SQLException::InvalidColumn(column));
            }
            let row = &self.rows[self.current as usize];
            let val = row[column as usize - 1].clone();
            self.wasnull = val.is_null();
            Ok(val)
        }
    }

    impl ResultSetAdapter for FixedResultSet {
        type ResultSetMetadata = FixedMetadata;

        fn before_first(&mut self) -> Result<(), SQLException> {
            self.current = -1;
            Ok(())
        }
        fn next(&mut self) -> Result<bool, SQLException> {
            if self.current + 1 < self.rows.len() as i64 {
                self.current += 1;
                Ok(true)
            } else {
                Ok(false)
            }
        }
        fn get_i32(&mut self, column: i32) -> Result<i32, SQLException> {
            Ok(self.val(column)?.as_i32().unwrap_or(0))
        }
        fn get_i64(&mut self, column: i32) -> Result<i64, SQLException> {
            Ok(self.val(column)?.as_i64().unwrap_or(0))
        }
        fn get_f32(&mut self, column: i32) -> Result<f32, SQLException> {
            Ok(self.val(column)?.as_f32().unwrap_or(0.0))
        }
        fn get_f64(&mut self, column: i32) -> Result<f64, SQLException> {
            Ok(self.val(column)?.as_f64().unwrap_or(0.0))
        }
        fn get_string(&mut self, column: i32) -> Result<Option<String>, SQLException> {
            let val = self.val(column)?;
            if val.is_null() {
                return Ok(None);
            }
            Ok(Some(val.to_string()))
        }
        fn get_bytes(&mut self, column: i32) -> Result<Option<Vec<u8>>, SQLException> {
            let val = self.val(column)?;
            if val.is_null() {
                return Ok(None);
            }
            Ok(val.as_bytes())
        }
        fn was_null(&self) -> bool {
            self.wasnull
        }
        fn is_null(&mut self, column: i32) -> Result<bool, SQLException> {
            Ok(self.val(column)?.is_null())
        }
        fn find_column(&self, fldname: &str) -> Result<i32, SQLException> {
            self.fields
                .iter()
                .position(|f| f == fldname)
                .map(|p| p as i32 + 1)
                .ok_or_else(|| SQLException::NoSuchColumn(fldname.to_string()))
        }
        fn get_metadata(&self) -> Result<FixedMetadata, SQLException> {
            Ok(FixedMetadata {
                sch: self.sch.clone(),
            })
        }
        fn close(&mut self) -> Result<(), SQLException> {
            self.closed = true;
            Ok(())
        }
    }

    fn sample() -> FixedResultSet {
        let mut sch = Schema::new();
        sch.add_int_field("a");
        sch.add_string_field("b", 9);
        sch.add_bigint_field("c");
        FixedResultSet::new(
            sch,
            vec![
                vec![
                    Constant::Int(10),
                    Constant::Varchar("x".to_string()),
                    Constant::Big(1 << 40),
                ],
                vec![Constant::Null, Constant::Null, Constant::Big(2)],
            ],
        )
    }

    #[test]
    fn test_index_translation_is_one_based_underneath() {
        let mut cur = ResultSetCursor::new(sample());
        assert!(cur.next().unwrap());
        assert_eq!(10, cur.get_int(0).unwrap());
        assert_eq!(Some("x".to_string()), cur.get_string(1).unwrap());
        assert_eq!(1 << 40, cur.get_long(2).unwrap());
        assert_eq!(vec![1, 2, 3], *cur.rs.asked.borrow());
    }

    #[test]
    fn test_null_numeric_is_an_error() {
        let mut cur = ResultSetCursor::new(sample());
        cur.next().unwrap();
        cur.next().unwrap();
        let err = cur.get_int(0).unwrap_err();
        assert_eq!("the value of column 0 is NULL", err.to_string());
        assert!(cur.get_long(0).is_err());
        // string and bytes come back as None instead
        assert_eq!(None, cur.get_string(1).unwrap());
    }

    #[test]
    fn test_is_null_matches_getters() {
        let mut cur = ResultSetCursor::new(sample());
        cur.next().unwrap();
        assert!(!cur.is_null(0).unwrap());
        cur.next().unwrap();
        assert!(cur.is_null(0).unwrap());
        assert!(!cur.is_null(2).unwrap());
    }

    #[test]
    fn test_get_column_index_translates_back() {
        let cur = ResultSetCursor::new(sample());
        assert_eq!(0, cur.get_column_index("a").unwrap());
        assert_eq!(2, cur.get_column_index("c").unwrap());
        let err = cur.get_column_index("nope").unwrap_err();
        assert_eq!("column nope not found", err.to_string());
    }

    #[test]
    fn test_get_column_name_bounds() {
        let cur = ResultSetCursor::new(sample());
        assert_eq!("a", cur.get_column_name(0).unwrap());
        assert_eq!("c", cur.get_column_name(2).unwrap());
        let err = cur.get_column_name(3).unwrap_err();
        assert_eq!("3 exceeds the total number of columns", err.to_string());
        let err = cur.get_column_name(-1).unwrap_err();
        assert_eq!("the column index is less than 0", err.to_string());
    }

    #[test]
    fn test_for_each_row_counts_from_zero() {
        let mut cur = ResultSetCursor::new(sample());
        let mut seen = Vec::new();
        cur.for_each_row(|i, c| {
            seen.push((i, c.is_null(0).unwrap()));
            Ok(())
        })
        .unwrap();
        assert_eq!(vec![(0, false), (1, true)], seen);
    }

    #[test]
    fn test_close_closes_result_set() {
        let mut cur = ResultSetCursor::new(sample());
        cur.close().unwrap();
        assert!(cur.rs.closed);
    }
}
