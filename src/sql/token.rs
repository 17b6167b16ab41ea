//! SQL Token definitions
//!
//! This module defines all tokens that can appear in SQL statements.

use std::fmt;

/// SQL token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ========== Keywords ==========
    Create,
    Table,
    Insert,
    Into,
    Values,
    Select,
    From,
    Where,
    Update,
    Set,
    Delete,

    // Data Types
    Int,
    Varchar,

    // ========== Literals ==========
    /// Table or column name, original casing preserved
    Identifier,
    /// Single-quoted string, quotes stripped
    String,
    /// Run of ASCII digits
    Number,

    // ========== Symbols ==========
    /// (
    LeftParen,
    /// )
    RightParen,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// *
    Asterisk,
    /// =
    Equals,
    /// <>
    NotEquals,
    /// >
    GreaterThan,
    /// <
    LessThan,
    /// >=
    GreaterEqual,
    /// <=
    LessEqual,

    // ========== Special ==========
    /// End of input
    Eof,
    /// Unrecognized character or unterminated string
    Unknown,
}

impl TokenKind {
    /// Look up a keyword, ignoring case
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        match s.to_uppercase().as_str() {
            "CREATE" => Some(TokenKind::Create),
            "TABLE" => Some(TokenKind::Table),
            "INSERT" => Some(TokenKind::Insert),
            "INTO" => Some(TokenKind::Into),
            "VALUES" => Some(TokenKind::Values),
            "SELECT" => Some(TokenKind::Select),
            "FROM" => Some(TokenKind::From),
            "WHERE" => Some(TokenKind::Where),
            "UPDATE" => Some(TokenKind::Update),
            "SET" => Some(TokenKind::Set),
            "INT" => Some(TokenKind::Int),
            "VARCHAR" => Some(TokenKind::Varchar),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Create => write!(f, "CREATE"),
            TokenKind::Table => write!(f, "TABLE"),
            TokenKind::Insert => write!(f, "INSERT"),
            TokenKind::Into => write!(f, "INTO"),
            TokenKind::Values => write!(f, "VALUES"),
            TokenKind::Select => write!(f, "SELECT"),
            TokenKind::From => write!(f, "FROM"),
            TokenKind::Where => write!(f, "WHERE"),
            TokenKind::Update => write!(f, "UPDATE"),
            TokenKind::Set => write!(f, "SET"),
            TokenKind::Delete => write!(f, "DELETE"),
            TokenKind::Int => write!(f, "INT"),
            TokenKind::Varchar => write!(f, "VARCHAR"),
            TokenKind::Identifier => write!(f, "IDENTIFIER"),
            TokenKind::String => write!(f, "STRING"),
            TokenKind::Number => write!(f, "NUMBER"),
            TokenKind::LeftParen => write!(f, "LEFT_PAREN"),
            TokenKind::RightParen => write!(f, "RIGHT_PAREN"),
            TokenKind::Comma => write!(f, "COMMA"),
            TokenKind::Semicolon => write!(f, "SEMICOLON"),
            TokenKind::Asterisk => write!(f, "ASTERISK"),
            TokenKind::Equals => write!(f, "EQUALS"),
            TokenKind::NotEquals => write!(f, "NOT_EQUALS"),
            TokenKind::GreaterThan => write!(f, "GREATER_THAN"),
            TokenKind::LessThan => write!(f, "LESS_THAN"),
            TokenKind::GreaterEqual => write!(f, "GREATER_EQUAL"),
            TokenKind::LessEqual => write!(f, "LESS_EQUAL"),
            TokenKind::Eof => write!(f, "EOF"),
            TokenKind::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// A lexical token: its kind, the source text it came from and where it started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal text. Keywords keep the casing they were written in; strings
    /// carry their content without quotes.
    pub text: String,
    /// Character offset of the first character of the token
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Self::new(TokenKind::Eof, "", position)
    }

    /// Text used when reporting this token in an error message
    pub fn describe(&self) -> &str {
        match self.kind {
            TokenKind::Eof => "EOF",
            _ => &self.text,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({}, '{}')", self.kind, self.text)
    }
}
