use core::fmt;

use crate::query::predicate::Predicate;

/// A parsed select statement. An empty field list means `select *`.
#[derive(Debug, Clone)]
pub struct QueryData {
    fields: Vec<String>,
    tblname: String,
    pred: Predicate,
}

impl fmt::Display for QueryData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let fields = if self.fields.is_empty() {
            "*".to_string()
        } else {
            self.fields.join(", ")
        };
        write!(f, "select {} from {}", fields, self.tblname)?;
        let predstring = self.pred.to_string();
        if !predstring.is_empty() {
            write!(f, " where {}", predstring)?;
        }
        Ok(())
    }
}

impl QueryData {
    pub fn new(fields: Vec<String>, tblname: String, pred: Predicate) -> Self {
        QueryData {
            fields,
            tblname,
            pred,
        }
    }

    pub fn table_name(&self) -> String {
        self.tblname.clone()
    }

    pub fn fields(&self) -> Vec<String> {
        self.fields.clone()
    }

    pub fn is_select_all(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn pred(&self) -> Predicate {
        self.pred.clone()
    }
}
