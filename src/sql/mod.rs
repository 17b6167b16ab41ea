//! SQL front end
//!
//! Lexer, parser and the statement tree they produce.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::Statement;
pub use lexer::{tokenize, Lexer};
pub use parser::{parse, Parser};
pub use token::{Token, TokenKind};
