//! SQL Lexer (Tokenizer)
//!
//! This module converts SQL strings into a stream of tokens. The lexer never
//! fails: characters it does not understand become `Unknown` tokens, which
//! are logged and left out of the stream so the parser reports the problem.

use super::token::{Token, TokenKind};

/// SQL Lexer
pub struct Lexer {
    /// Input characters
    input: Vec<char>,
    /// Current position in input
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given input
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input. The result always ends with exactly one EOF token.
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            match token.kind {
                TokenKind::Eof => {
                    tokens.push(token);
                    break;
                }
                TokenKind::Unknown => {
                    tracing::warn!(
                        text = %token.text,
                        position = token.position,
                        "dropping unrecognized input"
                    );
                }
                _ => tokens.push(token),
            }
        }

        tracing::debug!(count = tokens.len(), "tokenized input");
        tokens
    }

    /// Get the next token from the input
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        if self.is_at_end() {
            return Token::eof(self.position);
        }

        let start = self.position;
        let ch = self.current_char();

        let kind = match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Asterisk,
            '=' => TokenKind::Equals,
            '<' => {
                self.advance();
                return match self.peek_char() {
                    Some('>') => self.finish_operator(TokenKind::NotEquals, start),
                    Some('=') => self.finish_operator(TokenKind::LessEqual, start),
                    _ => Token::new(TokenKind::LessThan, "<", start),
                };
            }
            '>' => {
                self.advance();
                return match self.peek_char() {
                    Some('=') => self.finish_operator(TokenKind::GreaterEqual, start),
                    _ => Token::new(TokenKind::GreaterThan, ">", start),
                };
            }
            '\'' => return self.read_string(),
            c if c.is_ascii_digit() => return self.read_number(),
            c if c.is_ascii_alphabetic() || c == '_' => return self.read_identifier(),
            _ => TokenKind::Unknown,
        };

        self.advance();
        Token::new(kind, ch.to_string(), start)
    }

    /// Consume the second character of a two-character operator
    fn finish_operator(&mut self, kind: TokenKind, start: usize) -> Token {
        self.advance();
        let text: String = self.input[start..self.position].iter().collect();
        Token::new(kind, text, start)
    }

    /// Check if we've reached the end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Get the current character
    fn current_char(&self) -> char {
        self.input[self.position]
    }

    /// Look at the current character without consuming it
    fn peek_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to the next character
    fn advance(&mut self) {
        self.position += 1;
    }

    /// Skip whitespace characters
    fn skip_whitespace(&mut self) {
        while !self.is_at_end() && self.current_char().is_whitespace() {
            self.advance();
        }
    }

    /// Read a string literal (single-quoted, no escapes)
    fn read_string(&mut self) -> Token {
        let start = self.position;
        self.advance(); // skip opening quote

        let mut value = String::new();
        while !self.is_at_end() && self.current_char() != '\'' {
            value.push(self.current_char());
            self.advance();
        }

        // Unterminated: keep the partial content for the log line
        if self.is_at_end() {
            return Token::new(TokenKind::Unknown, value, start);
        }

        self.advance(); // skip closing quote
        Token::new(TokenKind::String, value, start)
    }

    /// Read a run of ASCII digits
    fn read_number(&mut self) -> Token {
        let start = self.position;
        while !self.is_at_end() && self.current_char().is_ascii_digit() {
            self.advance();
        }

        let text: String = self.input[start..self.position].iter().collect();
        Token::new(TokenKind::Number, text, start)
    }

    /// Read an identifier or keyword
    fn read_identifier(&mut self) -> Token {
        let start = self.position;
        while !self.is_at_end() {
            let ch = self.current_char();
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.input[start..self.position].iter().collect();
        let kind = TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier);
        Token::new(kind, text, start)
    }
}

/// Tokenize a SQL string in one call
pub fn tokenize(sql: &str) -> Vec<Token> {
    Lexer::new(sql).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(sql: &str) -> Vec<TokenKind> {
        tokenize(sql).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_create_table() {
        let tokens = tokenize("CREATE TABLE t (a INT, b VARCHAR(10));");

        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Create,
                TokenKind::Table,
                TokenKind::Identifier,
                TokenKind::LeftParen,
                TokenKind::Identifier,
                TokenKind::Int,
                TokenKind::Comma,
                TokenKind::Identifier,
                TokenKind::Varchar,
                TokenKind::LeftParen,
                TokenKind::Number,
                TokenKind::RightParen,
                TokenKind::RightParen,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[2].text, "t");
        assert_eq!(tokens[4].text, "a");
        assert_eq!(tokens[7].text, "b");
        assert_eq!(tokens[10].text, "10");
    }

    #[test]
    fn test_select_with_where() {
        let tokens = tokenize("select id, Name from Users where id >= 1;");

        assert_eq!(tokens[0].kind, TokenKind::Select);
        assert_eq!(tokens[0].text, "select");
        assert_eq!(tokens[3].kind, TokenKind::Identifier);
        assert_eq!(tokens[3].text, "Name");
        assert_eq!(tokens[5].text, "Users");
        assert_eq!(tokens[8].kind, TokenKind::GreaterEqual);
        assert_eq!(tokens[9].kind, TokenKind::Number);
    }

    #[test]
    fn test_comparison_operators() {
        assert_eq!(
            kinds("= <> > < >= <="),
            vec![
                TokenKind::Equals,
                TokenKind::NotEquals,
                TokenKind::GreaterThan,
                TokenKind::LessThan,
                TokenKind::GreaterEqual,
                TokenKind::LessEqual,
                TokenKind::Eof,
            ]
        );
        // No whitespace between operator and operand
        assert_eq!(
            kinds("a<5"),
            vec![
                TokenKind::Identifier,
                TokenKind::LessThan,
                TokenKind::Number,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_string_literal() {
        let tokens = tokenize("'hello world'");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "hello world");
        assert_eq!(tokens[0].position, 0);
    }

    #[test]
    fn test_unterminated_string_is_dropped() {
        let tokens = tokenize("VALUES ('abc");
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![TokenKind::Values, TokenKind::LeftParen, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unknown_characters_are_dropped() {
        assert_eq!(
            kinds("a @ b ! 1"),
            vec![
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Number,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_number_stops_at_non_digit() {
        let tokens = tokenize("12.5");
        // '.' is unsupported punctuation and disappears
        assert_eq!(tokens[0].text, "12");
        assert_eq!(tokens[1].text, "5");
        assert_eq!(tokens[2].kind, TokenKind::Eof);
    }

    #[test]
    fn test_positions_and_eof() {
        let tokens = tokenize("  x  ");
        assert_eq!(tokens[0].position, 2);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Eof);

        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
    }

    #[test]
    fn test_identifier_with_underscore_and_digits() {
        let tokens = tokenize("_tmp_1 user2");
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "_tmp_1");
        assert_eq!(tokens[1].text, "user2");
    }
}
