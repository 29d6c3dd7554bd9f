pub mod error;
pub mod keywords;
pub mod parser;
pub mod scanner;
pub mod token;
