use std::str::Chars;

use super::{keywords, token::{Token, TokenType}};

/// Turns a stream of characters into tokens, one token per [`Scanner::scan`].
///
/// The scanner never fails. Characters it does not recognise come back as
/// [`TokenType::Illegal`] tokens so the parser can report them in context.
pub struct Scanner<I: Iterator<Item = char>> {
    source: I,
    // The most recently read character and the one waiting to be re-read.
    last: Option<char>,
    pushback: Option<char>,
}

impl<'a> Scanner<Chars<'a>> {
    pub fn new(source: &'a str) -> Self {
        Scanner::from_chars(source.chars())
    }
}

impl<I: Iterator<Item = char>> Scanner<I> {
    pub fn from_chars<T>(source: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Scanner {
            source: source.into_iter(),
            last: None,
            pushback: None,
        }
    }

    /// Returns the next token, or an EOF token with an empty lexeme once the
    /// source is exhausted.
    pub fn scan(&mut self) -> Token {
        let Some(c) = self.read() else {
            return Token::eof();
        };
        if is_whitespace(c) {
            self.unread();
            return self.whitespace();
        }
        if is_letter(c) {
            self.unread();
            return self.identifier();
        }
        if c.is_ascii_digit() {
            self.unread();
            return self.number();
        }
        match c {
            '`' => self.quoted_identifier(),
            '*' => Token::new(TokenType::Star, "*"),
            ',' => Token::new(TokenType::Comma, ","),
            '(' => Token::new(TokenType::LeftParen, "("),
            ')' => Token::new(TokenType::RightParen, ")"),
            ';' => Token::new(TokenType::Semicolon, ";"),
            _ => Token::new(TokenType::Illegal, c.to_string()),
        }
    }

    /// Yields every token, whitespace included, and stops before EOF.
    pub fn tokens(&mut self) -> impl Iterator<Item = Token> + '_ {
        std::iter::from_fn(move || {
            let token = self.scan();
            (!token.is(TokenType::EOF)).then_some(token)
        })
    }

    fn whitespace(&mut self) -> Token {
        let mut text = String::new();
        self.consume_while(&mut text, is_whitespace);
        Token::new(TokenType::Whitespace, text)
    }

    fn identifier(&mut self) -> Token {
        let mut text = String::new();
        self.consume_while(&mut text, is_word);
        let token_type = keywords::get(&text).unwrap_or(TokenType::Identifier);
        Token::new(token_type, text)
    }

    // The opening backtick has already been read. A missing closing backtick
    // ends the identifier wherever the word characters stop.
    fn quoted_identifier(&mut self) -> Token {
        let mut text = String::new();
        self.consume_while(&mut text, is_word);
        if let Some(c) = self.read() {
            if c != '`' {
                self.unread();
            }
        }
        Token::new(TokenType::Identifier, text)
    }

    fn number(&mut self) -> Token {
        let mut text = String::new();
        self.consume_while(&mut text, |c| c.is_ascii_digit());
        Token::new(TokenType::Number, text)
    }

    fn consume_while(&mut self, text: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.read() {
            if !pred(c) {
                self.unread();
                break;
            }
            text.push(c);
        }
    }

    fn read(&mut self) -> Option<char> {
        let c = self.pushback.take().or_else(|| self.source.next());
        self.last = c;
        c
    }

    /// Puts the last read character back. Only one character can be pending.
    fn unread(&mut self) {
        if let Some(c) = self.last.take() {
            self.pushback = Some(c);
        }
    }
}

fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n'
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_one(input: &str) -> Token {
        Scanner::new(input).scan()
    }

    fn token_types(input: &str) -> Vec<TokenType> {
        Scanner::new(input).tokens().map(|t| t.token_type).collect()
    }

    #[test]
    fn test_special_tokens() {
        assert_eq!(scan_one(""), Token::eof());
        assert_eq!(scan_one("#"), Token::new(TokenType::Illegal, "#"));
        assert_eq!(scan_one(" "), Token::new(TokenType::Whitespace, " "));
        assert_eq!(scan_one("\t"), Token::new(TokenType::Whitespace, "\t"));
        assert_eq!(scan_one("\n"), Token::new(TokenType::Whitespace, "\n"));
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(scan_one("*"), Token::new(TokenType::Star, "*"));
        assert_eq!(scan_one(","), Token::new(TokenType::Comma, ","));
        assert_eq!(scan_one("("), Token::new(TokenType::LeftParen, "("));
        assert_eq!(scan_one(")"), Token::new(TokenType::RightParen, ")"));
        assert_eq!(scan_one(";"), Token::new(TokenType::Semicolon, ";"));
    }

    #[test]
    fn test_identifiers() {
        assert_eq!(scan_one("foo"), Token::new(TokenType::Identifier, "foo"));
        assert_eq!(
            scan_one("Zx12_3U_-"),
            Token::new(TokenType::Identifier, "Zx12_3U_")
        );
        assert_eq!(scan_one("`foo`"), Token::new(TokenType::Identifier, "foo"));
        assert_eq!(
            scan_one("`select`"),
            Token::new(TokenType::Identifier, "select")
        );
    }

    #[test]
    fn test_unterminated_quote_ends_at_eof() {
        let mut scanner = Scanner::new("`foo");
        assert_eq!(scanner.scan(), Token::new(TokenType::Identifier, "foo"));
        assert_eq!(scanner.scan(), Token::eof());
    }

    #[test]
    fn test_quoted_identifier_stops_at_non_word_character() {
        let mut scanner = Scanner::new("`my col`");
        assert_eq!(scanner.scan(), Token::new(TokenType::Identifier, "my"));
        assert_eq!(scanner.scan(), Token::new(TokenType::Whitespace, " "));
        assert_eq!(scanner.scan(), Token::new(TokenType::Identifier, "col"));
        assert_eq!(scanner.scan(), Token::new(TokenType::Identifier, ""));
        assert_eq!(scanner.scan(), Token::eof());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(scan_one("255"), Token::new(TokenType::Number, "255"));
        assert_eq!(scan_one("007"), Token::new(TokenType::Number, "007"));
        assert_eq!(token_types("12.5"), vec![
            TokenType::Number,
            TokenType::Illegal,
            TokenType::Number,
        ]);
        assert_eq!(token_types("-1"), vec![TokenType::Illegal, TokenType::Number]);
    }

    #[test]
    fn test_keywords_keep_original_case() {
        let cases = [
            ("FROM", TokenType::From),
            ("SELECT", TokenType::Select),
            ("ALTER", TokenType::Alter),
            ("TABLE", TokenType::Table),
            ("DROP", TokenType::Drop),
            ("NULL", TokenType::Null),
            ("add", TokenType::Add),
            ("Column", TokenType::Column),
            ("varchar", TokenType::Varchar),
            ("comment", TokenType::Comment),
        ];
        for (input, token_type) in cases {
            assert_eq!(scan_one(input), Token::new(token_type, input));
        }
    }

    #[test]
    fn test_letters_only_input() {
        for input in ["a", "Selec", "selects", "tbl", "FROMx", "nul"] {
            assert_eq!(scan_one(input), Token::new(TokenType::Identifier, input));
        }
    }

    #[test]
    fn test_whitespace_run_collapses() {
        let mut scanner = Scanner::new(" \t\n  \nx");
        assert_eq!(
            scanner.scan(),
            Token::new(TokenType::Whitespace, " \t\n  \n")
        );
        assert_eq!(scanner.scan(), Token::new(TokenType::Identifier, "x"));
        assert_eq!(scanner.scan(), Token::eof());
        assert_eq!(scanner.scan(), Token::eof());
    }

    #[test]
    fn test_statement_token_stream() {
        use TokenType::*;
        assert_eq!(
            token_types("alter table t add c varchar(255) null;"),
            vec![
                Alter, Whitespace, Table, Whitespace, Identifier, Whitespace, Add,
                Whitespace, Identifier, Whitespace, Varchar, LeftParen, Number,
                RightParen, Whitespace, Null, Semicolon,
            ]
        );
    }

    #[test]
    fn test_from_chars_matches_str_source() {
        let input = "SELECT a, `b` FROM t";
        let from_str: Vec<Token> = Scanner::new(input).tokens().collect();
        let owned: Vec<char> = input.chars().collect();
        let from_chars: Vec<Token> = Scanner::from_chars(owned).tokens().collect();
        assert_eq!(from_str, from_chars);
    }

    #[test]
    fn test_independent_scanners_agree() {
        let input = "ALTER TABLE x DROP COLUMN `y` # 1";
        let first: Vec<Token> = Scanner::new(input).tokens().collect();
        let second: Vec<Token> = Scanner::new(input).tokens().collect();
        assert_eq!(first, second);
        assert_eq!(first.last(), Some(&Token::new(TokenType::Number, "1")));
    }
}
