use crate::query::expression::Expression;

#[derive(Debug, Clone)]
pub struct InsertData {
    tblname: String,
    flds: Vec<String>,
    vals: Vec<Expression>,
}

impl InsertData {
    pub fn new(tblname: String, flds: Vec<String>, vals: Vec<Expression>) -> Self {
        InsertData {
            tblname,
            flds,
            vals,
        }
    }

    pub fn table_name(&self) -> String {
        self.tblname.clone()
    }

    pub fn fields(&self) -> Vec<String> {
        self.flds.clone()
    }

    pub fn vals(&self) -> Vec<Expression> {
        self.vals.clone()
    }
}
