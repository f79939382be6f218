use crate::{
    error::DbError,
    query::{constant::Constant, expression::Expression, predicate::Predicate, term::Term},
    record::schema::Schema,
};

use super::{
    create_table_data::CreateTableData, delete_data::DeleteData, insert_data::InsertData,
    lexer::Lexer, modify_data::ModifyData, query_data::QueryData,
};

#[derive(Debug)]
pub enum UpdateCommand {
    Insert(InsertData),
    Delete(DeleteData),
    Modify(ModifyData),
    CreateTable(CreateTableData),
}

#[derive(Debug)]
pub struct Parser<'a> {
    lex: Lexer<'a>,
    next_param: usize,
}

impl<'a> Parser<'a> {
    pub fn new(s: &'a str) -> Self {
        Parser {
            lex: Lexer::new(s),
            next_param: 1,
        }
    }

    pub fn field(&mut self) -> Result<String, DbError> {
        self.lex.eat_id()
    }

    pub fn constant(&mut self) -> Result<Constant, DbError> {
        let negate = if self.lex.match_delim('-') {
            self.lex.eat_delim('-')?;
            true
        } else {
            false
        };
        if self.lex.match_keyword("null") {
            self.lex.eat_keyword("null")?;
            if negate {
                return Err(DbError::Syntax("cannot negate null".to_string()));
            }
            return Ok(Constant::Null);
        }
        if self.lex.match_string_constant() {
            if negate {
                return Err(DbError::Syntax("cannot negate a string".to_string()));
            }
            return Ok(Constant::Varchar(self.lex.eat_string_constant()?));
        }
        if self.lex.match_blob_constant() {
            if negate {
                return Err(DbError::Syntax("cannot negate a blob".to_string()));
            }
            return Ok(Constant::Bytes(self.lex.eat_blob_constant()?));
        }
        if self.lex.match_float_constant() {
            let v = self.lex.eat_float_constant()?;
            return Ok(Constant::Double(if negate { -v } else { v }));
        }
        let v = self.lex.eat_int_constant()?;
        let v = if negate { -v } else { v };
        match i32::try_from(v) {
            Ok(i) => Ok(Constant::Int(i)),
            Err(_) => Ok(Constant::Big(v)),
        }
    }

    pub fn expression(&mut self) -> Result<Expression, DbError> {
        if self.lex.match_id() {
            return Ok(Expression::new_from_fldname(self.field()?));
        }
        if self.lex.match_delim('?') {
            self.lex.eat_delim('?')?;
            let n = self.next_param;
            self.next_param += 1;
            return Ok(Expression::Param(n));
        }
        Ok(Expression::new_from_val(self.constant()?))
    }

    pub fn term(&mut self) -> Result<Term, DbError> {
        let lhs = self.expression()?;
        self.lex.eat_delim('=')?;
        let rhs = self.expression()?;
        Ok(Term::new(lhs, rhs))
    }

    pub fn predicate(&mut self) -> Result<Predicate, DbError> {
        let mut pred = Predicate::new_from_term(self.term()?);
        if self.lex.match_keyword("and") {
            self.lex.eat_keyword("and")?;
            pred.conjoin_with(&self.predicate()?);
        }
        Ok(pred)
    }

    pub fn query(&mut self) -> Result<QueryData, DbError> {
        self.lex.eat_keyword("select")?;
        let fields = if self.lex.match_delim('*') {
            self.lex.eat_delim('*')?;
            Vec::new()
        } else {
            self.select_list()?
        };
        self.lex.eat_keyword("from")?;
        let tblname = self.lex.eat_id()?;
        if self.lex.match_delim(',') {
            return Err(DbError::Syntax(
                "multi-table queries are not supported".to_string(),
            ));
        }
        let mut pred = Predicate::new();
        if self.lex.match_keyword("where") {
            self.lex.eat_keyword("where")?;
            pred = self.predicate()?;
        }
        Ok(QueryData::new(fields, tblname, pred))
    }

    fn select_list(&mut self) -> Result<Vec<String>, DbError> {
        let mut ret = vec![self.field()?];
        if self.lex.match_delim(',') {
            self.lex.eat_delim(',')?;
            ret.extend(self.select_list()?);
        }
        Ok(ret)
    }

    pub fn update_cmd(&mut self) -> Result<UpdateCommand, DbError> {
        if self.lex.match_keyword("insert") {
            Ok(UpdateCommand::Insert(self.insert()?))
        } else if self.lex.match_keyword("delete") {
            Ok(UpdateCommand::Delete(self.delete()?))
        } else if self.lex.match_keyword("update") {
            Ok(UpdateCommand::Modify(self.modify()?))
        } else if self.lex.match_keyword("create") {
            self.lex.eat_keyword("create")?;
            Ok(UpdateCommand::CreateTable(self.create_table()?))
        } else {
            Err(DbError::Syntax("unknown command".to_string()))
        }
    }

    fn delete(&mut self) -> Result<DeleteData, DbError> {
        self.lex.eat_keyword("delete")?;
        self.lex.eat_keyword("from")?;
        let tblname = self.lex.eat_id()?;
        let mut pred = Predicate::new();
        if self.lex.match_keyword("where") {
            self.lex.eat_keyword("where")?;
            pred = self.predicate()?;
        }
        Ok(DeleteData::new(tblname, pred))
    }

    pub fn insert(&mut self) -> Result<InsertData, DbError> {
        self.lex.eat_keyword("insert")?;
        self.lex.eat_keyword("into")?;
        let tblname = self.lex.eat_id()?;
        self.lex.eat_delim('(')?;
        let flds = self.field_list()?;
        self.lex.eat_delim(')')?;
        self.lex.eat_keyword("values")?;
        self.lex.eat_delim('(')?;
        let vals = self.val_list()?;
        self.lex.eat_delim(')')?;
        if flds.len() != vals.len() {
            return Err(DbError::Syntax(format!(
                "{} fields but {} values",
                flds.len(),
                vals.len()
            )));
        }
        Ok(InsertData::new(tblname, flds, vals))
    }

    fn field_list(&mut self) -> Result<Vec<String>, DbError> {
        let mut ret = vec![self.field()?];
        if self.lex.match_delim(',') {
            self.lex.eat_delim(',')?;
            ret.extend(self.field_list()?);
        }
        Ok(ret)
    }

    fn val_list(&mut self) -> Result<Vec<Expression>, DbError> {
        let val = if self.lex.match_delim('?') {
            self.lex.eat_delim('?')?;
            let n = self.next_param;
            self.next_param += 1;
            Expression::Param(n)
        } else {
            Expression::new_from_val(self.constant()?)
        };
        let mut ret = vec![val];
        if self.lex.match_delim(',') {
            self.lex.eat_delim(',')?;
            ret.extend(self.val_list()?);
        }
        Ok(ret)
    }

    pub fn modify(&mut self) -> Result<ModifyData, DbError> {
        self.lex.eat_keyword("update")?;
        let tblname = self.lex.eat_id()?;
        self.lex.eat_keyword("set")?;
        let fldname = self.field()?;
        self.lex.eat_delim('=')?;
        let newval = self.expression()?;
        let mut pred = Predicate::new();
        if self.lex.match_keyword("where") {
            self.lex.eat_keyword("where")?;
            pred = self.predicate()?;
        }
        Ok(ModifyData::new(tblname, fldname, newval, pred))
    }

    pub fn create_table(&mut self) -> Result<CreateTableData, DbError> {
        self.lex.eat_keyword("table")?;
        let tblname = self.lex.eat_id()?;
        self.lex.eat_delim('(')?;
        let sch = self.field_defs()?;
        self.lex.eat_delim(')')?;
        Ok(CreateTableData::new(tblname, sch))
    }

    fn field_defs(&mut self) -> Result<Schema, DbError> {
        let mut schema = self.field_def()?;
        if self.lex.match_delim(',') {
            self.lex.eat_delim(',')?;
            let schema2 = self.field_defs()?;
            schema.add_all(&schema2)?;
        }
        Ok(schema)
    }

    fn field_def(&mut self) -> Result<Schema, DbError> {
        let fldname = self.field()?;
        self.field_type(fldname)
    }

    fn field_type(&mut self, fldname: String) -> Result<Schema, DbError> {
        let mut schema = Schema::new();
        if self.lex.match_keyword("int") {
            self.lex.eat_keyword("int")?;
            schema.add_int_field(&fldname);
        } else if self.lex.match_keyword("bigint") {
            self.lex.eat_keyword("bigint")?;
            schema.add_bigint_field(&fldname);
        } else if self.lex.match_keyword("real") {
            self.lex.eat_keyword("real")?;
            schema.add_real_field(&fldname);
        } else if self.lex.match_keyword("double") {
            self.lex.eat_keyword("double")?;
            schema.add_double_field(&fldname);
        } else if self.lex.match_keyword("blob") {
            self.lex.eat_keyword("blob")?;
            schema.add_blob_field(&fldname);
        } else {
            self.lex.eat_keyword("varchar")?;
            self.lex.eat_delim('(')?;
            let str_len = self.lex.eat_int_constant()?;
            self.lex.eat_delim(')')?;
            schema.add_string_field(&fldname, str_len as i32);
        }
        Ok(schema)
    }
}
