use std::num::ParseIntError;

use thiserror::Error;

use super::token::{Token, TokenType};

pub type Result<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    UnexpectedToken,
    IllegalCharacter,
    InvalidNumber,
}

/// The first problem the parser ran into. Parsing never continues past it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("found {found:?}, expected {expected}")]
    UnexpectedToken { found: String, expected: &'static str },

    /// The scanner produced an illegal token where the grammar wanted
    /// something else.
    #[error("found {found:?}, expected {expected}")]
    IllegalCharacter { found: String, expected: &'static str },

    #[error("{source}")]
    InvalidNumber { literal: String, source: ParseIntError },
}

impl ParseError {
    /// Builds the mismatch error for `token`, telling illegal characters
    /// apart from well-formed tokens in the wrong place.
    pub fn unexpected(token: Token, expected: &'static str) -> Self {
        let found = token.lexeme;
        if token.token_type == TokenType::Illegal {
            ParseError::IllegalCharacter { found, expected }
        } else {
            ParseError::UnexpectedToken { found, expected }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            ParseError::IllegalCharacter { .. } => ErrorKind::IllegalCharacter,
            ParseError::InvalidNumber { .. } => ErrorKind::InvalidNumber,
        }
    }

    /// The literal text the parser choked on.
    pub fn found(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { found, .. }
            | ParseError::IllegalCharacter { found, .. } => found,
            ParseError::InvalidNumber { literal, .. } => literal,
        }
    }

    pub fn expected(&self) -> Option<&'static str> {
        match self {
            ParseError::UnexpectedToken { expected, .. }
            | ParseError::IllegalCharacter { expected, .. } => Some(expected),
            ParseError::InvalidNumber { .. } => None,
        }
    }
}
