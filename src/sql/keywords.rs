use std::{collections::HashMap, sync::LazyLock};

use super::token::TokenType;


static KEYWORDS: LazyLock<HashMap<&'static str, TokenType>> = LazyLock::new(|| {
    HashMap::from([
        ("SELECT", TokenType::Select),
        ("FROM", TokenType::From),
        ("ALTER", TokenType::Alter),
        ("TABLE", TokenType::Table),
        ("ADD", TokenType::Add),
        ("DROP", TokenType::Drop),
        ("NULL", TokenType::Null),
        ("COLUMN", TokenType::Column),
        ("VARCHAR", TokenType::Varchar),
        ("COMMENT", TokenType::Comment),
    ])
});

/// Looks up `text` as a keyword, ignoring case. Only whole words match.
pub fn get(text: &str) -> Option<TokenType> {
    let keyword = text.to_ascii_uppercase();
    KEYWORDS.get(keyword.as_str()).copied()
}
