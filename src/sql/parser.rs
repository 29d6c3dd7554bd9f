use std::{fmt, str::Chars};

use super::{
    error::{ParseError, Result},
    keywords,
    scanner::Scanner,
    token::{Token, TokenType},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Select(SelectStmt),
    Alter(AlterStmt),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectStmt {
    /// Never empty. `*` appears as a field of its own.
    pub fields: Vec<String>,
    pub table_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlterOption {
    Add,
    Drop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlterStmt {
    pub table_name: String,
    pub option: AlterOption,
    pub column: ColumnStmt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Varchar,
}

/// A column as written in `ALTER TABLE`.
///
/// Dropped columns only carry a name. Added columns are always `VARCHAR(n)`
/// and always nullable, since `NULL` is the only spelling the grammar has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnStmt {
    pub column_name: String,
    pub data_type: Option<DataType>,
    pub length: u32,
    pub nullable: bool,
    pub comment: Option<String>,
}

impl ColumnStmt {
    pub fn named(column_name: impl Into<String>) -> Self {
        ColumnStmt {
            column_name: column_name.into(),
            data_type: None,
            length: 0,
            nullable: false,
            comment: None,
        }
    }

    pub fn varchar(column_name: impl Into<String>, length: u32, comment: Option<String>) -> Self {
        ColumnStmt {
            column_name: column_name.into(),
            data_type: Some(DataType::Varchar),
            length,
            nullable: true,
            comment,
        }
    }
}

pub struct Parser<I: Iterator<Item = char>> {
    scanner: Scanner<I>,
    // One token of lookahead, separate from the scanner's own pushback.
    peeked: Option<Token>,
}

impl<'a> Parser<Chars<'a>> {
    pub fn new(source: &'a str) -> Self {
        Parser::from_scanner(Scanner::new(source))
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn from_scanner(scanner: Scanner<I>) -> Self {
        Parser {
            scanner,
            peeked: None,
        }
    }

    /// Parses a single statement. Whatever follows it is left unread.
    pub fn parse(&mut self) -> Result<Stmt> {
        let token = self.advance();
        match token.token_type {
            TokenType::Select => Ok(Stmt::Select(self.select_stmt()?)),
            TokenType::Alter => Ok(Stmt::Alter(self.alter_stmt()?)),
            _ => Err(ParseError::unexpected(token, "SELECT or ALTER")),
        }
    }

    /// Parses `;`-separated statements until the end of the input.
    pub fn parse_all(&mut self) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();
        loop {
            while self.matches(TokenType::Semicolon) {}
            if self.check(TokenType::EOF) {
                break;
            }
            stmts.push(self.parse()?);
            let token = self.advance();
            match token.token_type {
                TokenType::Semicolon => continue,
                TokenType::EOF => break,
                _ => return Err(ParseError::unexpected(token, "; or EOF")),
            }
        }
        Ok(stmts)
    }

    fn select_stmt(&mut self) -> Result<SelectStmt> {
        let mut fields = Vec::new();
        loop {
            let token = self.advance();
            match token.token_type {
                TokenType::Identifier | TokenType::Star => fields.push(token.lexeme),
                _ => return Err(ParseError::unexpected(token, "field")),
            }
            if !self.matches(TokenType::Comma) {
                break;
            }
        }

        self.consume(TokenType::From, "FROM")?;
        let table_name = self.consume(TokenType::Identifier, "table name")?.lexeme;
        Ok(SelectStmt { fields, table_name })
    }

    fn alter_stmt(&mut self) -> Result<AlterStmt> {
        self.consume(TokenType::Table, "TABLE")?;
        let table_name = self.consume(TokenType::Identifier, "table name")?.lexeme;

        let token = self.advance();
        let (option, column) = match token.token_type {
            TokenType::Drop => (AlterOption::Drop, self.drop_clause()?),
            TokenType::Add => (AlterOption::Add, self.add_clause()?),
            _ => return Err(ParseError::unexpected(token, "DROP or ADD")),
        };
        Ok(AlterStmt {
            table_name,
            option,
            column,
        })
    }

    fn drop_clause(&mut self) -> Result<ColumnStmt> {
        self.consume(TokenType::Column, "COLUMN")?;
        let name = self.consume(TokenType::Identifier, "column name")?.lexeme;
        Ok(ColumnStmt::named(name))
    }

    fn add_clause(&mut self) -> Result<ColumnStmt> {
        let name = self.consume(TokenType::Identifier, "column name")?.lexeme;
        self.consume(TokenType::Varchar, "VARCHAR")?;
        self.consume(TokenType::LeftParen, "(")?;
        let number = self.consume(TokenType::Number, "NUMBER")?;
        self.consume(TokenType::RightParen, ")")?;
        let length = match number.lexeme.parse::<u32>() {
            Ok(n) => n,
            Err(source) => {
                return Err(ParseError::InvalidNumber {
                    literal: number.lexeme,
                    source,
                })
            }
        };
        self.consume(TokenType::Null, "NULL")?;

        let comment = if self.matches(TokenType::Comment) {
            Some(self.consume(TokenType::Identifier, "comment")?.lexeme)
        } else {
            None
        };
        Ok(ColumnStmt::varchar(name, length, comment))
    }

    /// Consumes the next token if it has the given type, otherwise puts it
    /// back.
    fn matches(&mut self, token_type: TokenType) -> bool {
        let token = self.advance();
        if token.is(token_type) {
            return true;
        }
        self.unadvance(token);
        false
    }

    fn check(&mut self, token_type: TokenType) -> bool {
        let token = self.advance();
        let found = token.is(token_type);
        self.unadvance(token);
        found
    }

    fn consume(&mut self, token_type: TokenType, expected: &'static str) -> Result<Token> {
        let token = self.advance();
        if token.is(token_type) {
            return Ok(token);
        }
        Err(ParseError::unexpected(token, expected))
    }

    /// Next token that is not whitespace.
    fn advance(&mut self) -> Token {
        if let Some(token) = self.peeked.take() {
            return token;
        }
        loop {
            let token = self.scanner.scan();
            if !token.is(TokenType::Whitespace) {
                return token;
            }
        }
    }

    fn unadvance(&mut self, token: Token) {
        debug_assert!(self.peeked.is_none(), "only one token can be put back");
        self.peeked = Some(token);
    }
}

// Identifiers that would not scan back as themselves get backticks.
fn write_ident(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let bare = name.starts_with(|c: char| c.is_ascii_alphabetic())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        && keywords::get(name).is_none();
    if bare {
        write!(f, "{name}")
    } else {
        write!(f, "`{name}`")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::Select(select) => fmt::Display::fmt(select, f),
            Stmt::Alter(alter) => fmt::Display::fmt(alter, f),
        }
    }
}

impl fmt::Display for SelectStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SELECT ")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if field == "*" {
                write!(f, "*")?;
            } else {
                write_ident(f, field)?;
            }
        }
        write!(f, " FROM ")?;
        write_ident(f, &self.table_name)
    }
}

impl fmt::Display for AlterStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE ")?;
        write_ident(f, &self.table_name)?;
        match self.option {
            AlterOption::Drop => write!(f, " DROP COLUMN ")?,
            AlterOption::Add => write!(f, " ADD ")?,
        }
        fmt::Display::fmt(&self.column, f)
    }
}

impl fmt::Display for ColumnStmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_ident(f, &self.column_name)?;
        if let Some(DataType::Varchar) = self.data_type {
            write!(f, " VARCHAR({})", self.length)?;
        }
        if self.nullable {
            write!(f, " NULL")?;
        }
        if let Some(comment) = &self.comment {
            write!(f, " COMMENT ")?;
            write_ident(f, comment)?;
        }
        Ok(())
    }
}
