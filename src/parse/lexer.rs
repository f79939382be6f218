use std::collections::HashSet;
use std::iter::Peekable;
use std::str::Chars;

use crate::error::DbError;

#[derive(Debug)]
pub struct Lexer<'a> {
    keywords: HashSet<&'a str>,
    input: Peekable<Chars<'a>>,
    current_token: Option<Token>,
}

#[derive(Debug, PartialEq)]
pub enum Token {
    Delim(char),
    IntConstant(i64),
    FloatConstant(f64),
    StringConstant(String),
    BlobConstant(Vec<u8>),
    Keyword(String),
    Id(String),
}

fn bad_syntax(what: &str) -> DbError {
    DbError::Syntax(what.to_string())
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer {
            keywords: HashSet::from([
                "select", "from", "where", "and", "insert", "into", "values", "delete", "update",
                "set", "create", "table", "int", "bigint", "real", "double", "varchar", "blob",
                "null",
            ]),
            input: input.chars().peekable(),
            current_token: None,
        };
        lexer.next_token();
        lexer
    }

    pub fn at_end(&self) -> bool {
        self.current_token.is_none()
    }

    pub fn match_delim(&self, d: char) -> bool {
        if let Some(Token::Delim(c)) = &self.current_token {
            *c == d
        } else {
            false
        }
    }

    pub fn match_int_constant(&self) -> bool {
        matches!(&self.current_token, Some(Token::IntConstant(_)))
    }

    pub fn match_float_constant(&self) -> bool {
        matches!(&self.current_token, Some(Token::FloatConstant(_)))
    }

    pub fn match_string_constant(&self) -> bool {
        matches!(&self.current_token, Some(Token::StringConstant(_)))
    }

    pub fn match_blob_constant(&self) -> bool {
        matches!(&self.current_token, Some(Token::BlobConstant(_)))
    }

    pub fn match_keyword(&self, w: &str) -> bool {
        if let Some(Token::Keyword(kw)) = &self.current_token {
            kw == w
        } else {
            false
        }
    }

    pub fn match_id(&self) -> bool {
        matches!(&self.current_token, Some(Token::Id(_)))
    }

    pub fn eat_delim(&mut self, d: char) -> Result<(), DbError> {
        if !self.match_delim(d) {
            return Err(bad_syntax(&format!("expected '{}'", d)));
        }
        self.next_token();
        Ok(())
    }

    pub fn eat_int_constant(&mut self) -> Result<i64, DbError> {
        if let Some(Token::IntConstant(i)) = self.current_token {
            self.next_token();
            Ok(i)
        } else {
            Err(bad_syntax("expected an integer constant"))
        }
    }

    pub fn eat_float_constant(&mut self) -> Result<f64, DbError> {
        if let Some(Token::FloatConstant(v)) = self.current_token {
            self.next_token();
            Ok(v)
        } else {
            Err(bad_syntax("expected a numeric constant"))
        }
    }

    pub fn eat_string_constant(&mut self) -> Result<String, DbError> {
        if let Some(Token::StringConstant(s)) = self.current_token.take() {
            self.next_token();
            Ok(s)
        } else {
            Err(bad_syntax("expected a string constant"))
        }
    }

    pub fn eat_blob_constant(&mut self) -> Result<Vec<u8>, DbError> {
        if let Some(Token::BlobConstant(b)) = self.current_token.take() {
            self.next_token();
            Ok(b)
        } else {
            Err(bad_syntax("expected a blob constant"))
        }
    }

    pub fn eat_keyword(&mut self, w: &str) -> Result<(), DbError> {
        if !self.match_keyword(w) {
            return Err(bad_syntax(&format!("expected keyword {}", w)));
        }
        self.next_token();
        Ok(())
    }

    pub fn eat_id(&mut self) -> Result<String, DbError> {
        if let Some(Token::Id(id)) = self.current_token.take() {
            self.next_token();
            Ok(id)
        } else {
            Err(bad_syntax("expected an identifier"))
        }
    }

    fn next_token(&mut self) {
        self.current_token = self.read_token();
    }

    fn read_token(&mut self) -> Option<Token> {
        self.skip_whitespace();
        if let Some(&c) = self.input.peek() {
            match c {
                '\'' => self.read_string_constant(),
                '0'..='9' => self.read_number_constant(),
                'a'..='z' | 'A'..='Z' | '_' => self.read_word(),
                _ => self.read_delim(),
            }
        } else {
            None
        }
    }

    fn read_string_constant(&mut self) -> Option<Token> {
        self.input.next(); // Consume the opening quote
        let mut s = String::new();
        while let Some(&c) = self.input.peek() {
            if c == '\'' {
                self.input.next(); // Consume the closing quote
                return Some(Token::StringConstant(s));
            }
            s.push(c);
            self.input.next();
        }
        None
    }

    fn read_number_constant(&mut self) -> Option<Token> {
        let mut num = String::new();
        let mut is_float = false;
        while let Some(&c) = self.input.peek() {
            if c.is_ascii_digit() {
                num.push(c);
                self.input.next();
            } else if c == '.' && !is_float {
                is_float = true;
                num.push(c);
                self.input.next();
            } else {
                break;
            }
        }
        if is_float {
            num.parse().ok().map(Token::FloatConstant)
        } else {
            num.parse().ok().map(Token::IntConstant)
        }
    }

    fn read_word(&mut self) -> Option<Token> {
        let mut word = String::new();
        while let Some(&c) = self.input.peek() {
            if c.is_alphanumeric() || c == '_' {
                word.push(c);
                self.input.next();
            } else {
                break;
            }
        }
        // x'ab01' is a hex blob literal
        if word.eq_ignore_ascii_case("x") && self.input.peek() == Some(&'\'') {
            if let Some(Token::StringConstant(s)) = self.read_string_constant() {
                return hex::decode(&s).ok().map(Token::BlobConstant);
            }
            return None;
        }
        if self.keywords.contains(word.to_lowercase().as_str()) {
            Some(Token::Keyword(word.to_lowercase()))
        } else {
            Some(Token::Id(word))
        }
    }

    fn read_delim(&mut self) -> Option<Token> {
        self.input.next().map(Token::Delim)
    }

    fn skip_whitespace(&mut self) {
        while let Some(&c) = self.input.peek() {
            if c.is_whitespace() {
                self.input.next();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::Lexer;

    #[test]
    fn test_lexer_id_and_int() {
        let s = "a_b = 111";
        let mut lex = Lexer::new(s);
        let x = lex.eat_id().unwrap();
        lex.eat_delim('=').unwrap();
        let y = lex.eat_int_constant().unwrap();
        assert_eq!("a_b", x);
        assert_eq!(111, y);
        assert!(lex.at_end());
    }

    #[test]
    fn test_lexer_float_and_bigint() {
        let s = "3.25 9999999999";
        let mut lex = Lexer::new(s);
        assert!(lex.match_float_constant());
        assert_eq!(3.25, lex.eat_float_constant().unwrap());
        assert_eq!(9_999_999_999i64, lex.eat_int_constant().unwrap());
    }

    #[test]
    fn test_lexer_blob_literal() {
        let s = "x'ab01'";
        let mut lex = Lexer::new(s);
        assert!(lex.match_blob_constant());
        assert_eq!(vec![0xab, 0x01], lex.eat_blob_constant().unwrap());
    }

    #[test]
    fn test_lexer_param_and_null() {
        let s = "values (?, null)";
        let mut lex = Lexer::new(s);
        lex.eat_keyword("values").unwrap();
        lex.eat_delim('(').unwrap();
        assert!(lex.match_delim('?'));
        lex.eat_delim('?').unwrap();
        lex.eat_delim(',').unwrap();
        assert!(lex.match_keyword("null"));
    }

    #[test]
    fn test_lexer_x_is_still_an_id() {
        let mut lex = Lexer::new("x = 1");
        assert!(lex.match_id());
        assert_eq!("x", lex.eat_id().unwrap());
    }
}
