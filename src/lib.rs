//! A scanner and recursive-descent parser for a small SQL subset: `SELECT`
//! projections and `ALTER TABLE ... ADD/DROP` column changes.
//!
//! ```
//! use sqltools::{Parser, Stmt};
//!
//! let stmt = Parser::new("SELECT id, name FROM users").parse().unwrap();
//! let Stmt::Select(select) = stmt else { unreachable!() };
//! assert_eq!(select.fields, ["id", "name"]);
//! assert_eq!(select.table_name, "users");
//! ```

pub mod sql;

pub use sql::error::{ErrorKind, ParseError, Result};
pub use sql::parser::{AlterOption, AlterStmt, ColumnStmt, DataType, Parser, SelectStmt, Stmt};
pub use sql::scanner::Scanner;
pub use sql::token::{Token, TokenType};

/// Parses exactly one statement from `source`.
pub fn parse(source: &str) -> Result<Stmt> {
    Parser::new(source).parse()
}
