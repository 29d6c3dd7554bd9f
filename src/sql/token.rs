use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenType {
    // Special tokens
    Illegal, EOF, Whitespace,

    // Literals
    Identifier, Number,

    // Single-character tokens
    Star, Comma, LeftParen, RightParen, Semicolon,

    // Keywords
    Select, From,
    Alter, Table, Add, Drop, Column,
    Null, Varchar, Comment,
}

impl TokenType {
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenType::Select
                | TokenType::From
                | TokenType::Alter
                | TokenType::Table
                | TokenType::Add
                | TokenType::Drop
                | TokenType::Column
                | TokenType::Null
                | TokenType::Varchar
                | TokenType::Comment
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenType::Illegal => "ILLEGAL",
            TokenType::EOF => "EOF",
            TokenType::Whitespace => "WS",
            TokenType::Identifier => "IDENT",
            TokenType::Number => "NUMBER",
            TokenType::Star => "*",
            TokenType::Comma => ",",
            TokenType::LeftParen => "(",
            TokenType::RightParen => ")",
            TokenType::Semicolon => ";",
            TokenType::Select => "SELECT",
            TokenType::From => "FROM",
            TokenType::Alter => "ALTER",
            TokenType::Table => "TABLE",
            TokenType::Add => "ADD",
            TokenType::Drop => "DROP",
            TokenType::Column => "COLUMN",
            TokenType::Null => "NULL",
            TokenType::Varchar => "VARCHAR",
            TokenType::Comment => "COMMENT",
        };
        write!(f, "{name}")
    }
}

/// A classified piece of source text.
///
/// `lexeme` is the text that produced the token. Keywords keep the case they
/// were written in and quoted identifiers drop their backticks.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
}

impl Token {
    pub fn new(token_type: TokenType, lexeme: impl Into<String>) -> Self {
        Token {
            token_type,
            lexeme: lexeme.into(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenType::EOF, String::new())
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.token_type, self.lexeme)
    }
}
