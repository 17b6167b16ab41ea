//! SQL Parser
//!
//! This module parses SQL tokens into an AST. It is a recursive-descent
//! parser with one token of lookahead and no error recovery: the first
//! unexpected token ends the parse.

use super::ast::*;
use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::catalog::{ColumnDefinition, DataType};
use crate::error::{Error, Result};

/// SQL Parser
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    /// Create a new parser from a SQL string
    pub fn new(sql: &str) -> Self {
        let mut lexer = Lexer::new(sql);
        Self::from_tokens(lexer.tokenize())
    }

    /// Create a parser over an already tokenized input
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let end = tokens.last().map(|t| t.position + t.text.chars().count()).unwrap_or(0);
            tokens.push(Token::eof(end));
        }

        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse a single SQL statement, terminated by `;`
    pub fn parse(&mut self) -> Result<Statement> {
        let stmt = match self.current().kind {
            TokenKind::Create => self.parse_create_table().map(Statement::CreateTable),
            TokenKind::Insert => self.parse_insert().map(Statement::Insert),
            TokenKind::Select => self.parse_select().map(Statement::Select),
            TokenKind::Update => self.parse_update().map(Statement::Update),
            _ => Err(Error::UnknownStatement(self.current().describe().to_string())),
        }?;

        tracing::debug!(statement = ?stmt, "parsed statement");
        Ok(stmt)
    }

    // ========== CREATE TABLE Statement ==========

    fn parse_create_table(&mut self) -> Result<CreateTableStatement> {
        self.consume(TokenKind::Create, "expected CREATE")?;
        self.consume(TokenKind::Table, "expected TABLE")?;

        let table_name = self.expect_identifier("expected table name")?;

        self.consume(TokenKind::LeftParen, "expected '('")?;

        let mut columns = Vec::new();
        loop {
            columns.push(self.parse_column_def()?);

            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        self.consume(TokenKind::RightParen, "expected ',' or ')'")?;
        self.consume(TokenKind::Semicolon, "expected ';'")?;

        Ok(CreateTableStatement {
            table_name,
            columns,
        })
    }

    fn parse_column_def(&mut self) -> Result<ColumnDefinition> {
        let name = self.expect_identifier("expected column name")?;
        let data_type = self.parse_data_type()?;

        Ok(ColumnDefinition { name, data_type })
    }

    fn parse_data_type(&mut self) -> Result<DataType> {
        match self.current().kind {
            TokenKind::Int => {
                self.advance();
                Ok(DataType::Int)
            }
            TokenKind::Varchar => {
                self.advance();
                self.consume(TokenKind::LeftParen, "expected '(' after VARCHAR")?;
                let length = self.consume(TokenKind::Number, "expected VARCHAR length")?;
                let length = match length.text.parse::<usize>() {
                    Ok(n) if n > 0 => n,
                    _ => return Err(Error::InvalidLength(length.text)),
                };
                self.consume(TokenKind::RightParen, "expected ')'")?;
                Ok(DataType::Varchar(length))
            }
            _ => Err(Error::UnknownDataType(self.current().describe().to_string())),
        }
    }

    // ========== INSERT Statement ==========

    fn parse_insert(&mut self) -> Result<InsertStatement> {
        self.consume(TokenKind::Insert, "expected INSERT")?;
        self.consume(TokenKind::Into, "expected INTO")?;

        let table_name = self.expect_identifier("expected table name")?;

        self.consume(TokenKind::Values, "expected VALUES")?;
        self.consume(TokenKind::LeftParen, "expected '('")?;

        let mut values = Vec::new();
        loop {
            values.push(self.parse_literal()?);

            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        self.consume(TokenKind::RightParen, "expected ',' or ')'")?;
        self.consume(TokenKind::Semicolon, "expected ';'")?;

        Ok(InsertStatement { table_name, values })
    }

    // ========== SELECT Statement ==========

    fn parse_select(&mut self) -> Result<SelectStatement> {
        self.consume(TokenKind::Select, "expected SELECT")?;

        let columns = if self.match_kind(TokenKind::Asterisk) {
            Projection::Wildcard
        } else {
            let mut names = Vec::new();
            loop {
                names.push(self.expect_identifier("expected column name or '*'")?);

                if !self.match_kind(TokenKind::Comma) {
                    break;
                }
            }
            Projection::Columns(names)
        };

        self.consume(TokenKind::From, "expected FROM")?;
        let table_name = self.expect_identifier("expected table name")?;

        let where_clause = self.parse_optional_where()?;

        self.consume(TokenKind::Semicolon, "expected ';'")?;

        Ok(SelectStatement {
            columns,
            table_name,
            where_clause,
        })
    }

    // ========== UPDATE Statement ==========

    fn parse_update(&mut self) -> Result<UpdateStatement> {
        self.consume(TokenKind::Update, "expected UPDATE")?;

        let table_name = self.expect_identifier("expected table name")?;

        self.consume(TokenKind::Set, "expected SET")?;

        let mut assignments = Vec::new();
        loop {
            let column = self.expect_identifier("expected column name")?;
            self.consume(TokenKind::Equals, "expected '='")?;
            let value = self.parse_literal()?;
            assignments.push(Assignment { column, value });

            if !self.match_kind(TokenKind::Comma) {
                break;
            }
        }

        let where_clause = self.parse_optional_where()?;

        self.consume(TokenKind::Semicolon, "expected ';'")?;

        Ok(UpdateStatement {
            table_name,
            assignments,
            where_clause,
        })
    }

    // ========== WHERE Clause ==========

    fn parse_optional_where(&mut self) -> Result<Option<WhereClause>> {
        if self.match_kind(TokenKind::Where) {
            self.parse_where_clause().map(Some)
        } else {
            Ok(None)
        }
    }

    fn parse_where_clause(&mut self) -> Result<WhereClause> {
        let left = self.expect_identifier("expected column name in WHERE clause")?;

        let op = match self.current().kind {
            TokenKind::Equals => ComparisonOperator::Eq,
            TokenKind::NotEquals => ComparisonOperator::Neq,
            TokenKind::GreaterThan => ComparisonOperator::Gt,
            TokenKind::LessThan => ComparisonOperator::Lt,
            TokenKind::GreaterEqual => ComparisonOperator::Gte,
            TokenKind::LessEqual => ComparisonOperator::Lte,
            _ => return Err(self.unexpected("expected comparison operator in WHERE clause")),
        };
        self.advance();

        let right = self.parse_literal()?;

        Ok(WhereClause {
            condition: Condition::Comparison { left, op, right },
        })
    }

    // ========== Helper functions ==========

    /// STRING or NUMBER, returned as raw text
    fn parse_literal(&mut self) -> Result<String> {
        match self.current().kind {
            TokenKind::String | TokenKind::Number => {
                let text = self.current().text.clone();
                self.advance();
                Ok(text)
            }
            _ => Err(self.unexpected("expected string or number literal")),
        }
    }

    fn current(&self) -> &Token {
        // The token stream always ends with EOF, and advance() never moves past it
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.current().kind != TokenKind::Eof {
            self.position += 1;
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token> {
        if self.check(kind) {
            let token = self.current().clone();
            self.advance();
            Ok(token)
        } else {
            Err(self.unexpected(message))
        }
    }

    fn expect_identifier(&mut self, message: &str) -> Result<String> {
        self.consume(TokenKind::Identifier, message).map(|t| t.text)
    }

    fn unexpected(&self, message: &str) -> Error {
        Error::Syntax {
            expected: message.to_string(),
            found: self.current().describe().to_string(),
        }
    }
}

/// Parse one SQL statement from text
pub fn parse(sql: &str) -> Result<Statement> {
    Parser::new(sql).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_table() {
        let stmt = parse("CREATE TABLE t (a INT, b VARCHAR(10));").unwrap();

        assert_eq!(
            stmt,
            Statement::CreateTable(CreateTableStatement {
                table_name: "t".to_string(),
                columns: vec![
                    ColumnDefinition::new("a", DataType::Int),
                    ColumnDefinition::new("b", DataType::Varchar(10)),
                ],
            })
        );
    }

    #[test]
    fn test_parse_create_table_missing_comma() {
        let err = parse("CREATE TABLE t (a INT b VARCHAR(5));").unwrap_err();

        match err {
            Error::Syntax { found, .. } => assert_eq!(found, "b"),
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_varchar_requires_length() {
        assert!(matches!(
            parse("CREATE TABLE t (b VARCHAR);"),
            Err(Error::Syntax { .. })
        ));
        assert!(matches!(
            parse("CREATE TABLE t (b VARCHAR(0));"),
            Err(Error::InvalidLength(_))
        ));
        assert!(matches!(
            parse("CREATE TABLE t (b TEXT);"),
            Err(Error::UnknownDataType(t)) if t == "TEXT"
        ));
    }

    #[test]
    fn test_parse_insert() {
        let stmt = parse("INSERT INTO users VALUES (1, 'Alice', 'x y');").unwrap();

        match stmt {
            Statement::Insert(i) => {
                assert_eq!(i.table_name, "users");
                assert_eq!(i.values, vec!["1", "Alice", "x y"]);
            }
            _ => panic!("Expected INSERT statement"),
        }
    }

    #[test]
    fn test_parse_insert_rejects_identifier_value() {
        let err = parse("INSERT INTO users VALUES (alice);").unwrap_err();
        assert!(matches!(err, Error::Syntax { found, .. } if found == "alice"));
    }

    #[test]
    fn test_parse_select_wildcard() {
        let stmt = parse("SELECT * FROM users;").unwrap();

        match stmt {
            Statement::Select(s) => {
                assert_eq!(s.columns, Projection::Wildcard);
                assert_eq!(s.table_name, "users");
                assert!(s.where_clause.is_none());
            }
            _ => panic!("Expected SELECT statement"),
        }
    }

    #[test]
    fn test_parse_select_with_where() {
        let stmt = parse("SELECT id, name FROM users WHERE name <> 'bob';").unwrap();

        match stmt {
            Statement::Select(s) => {
                assert_eq!(
                    s.columns,
                    Projection::Columns(vec!["id".to_string(), "name".to_string()])
                );
                assert_eq!(
                    s.where_clause.unwrap().condition,
                    Condition::Comparison {
                        left: "name".to_string(),
                        op: ComparisonOperator::Neq,
                        right: "bob".to_string(),
                    }
                );
            }
            _ => panic!("Expected SELECT statement"),
        }
    }

    #[test]
    fn test_parse_update() {
        let stmt = parse("UPDATE users SET name = 'Charlie', age = 30 WHERE id >= 1;").unwrap();

        match stmt {
            Statement::Update(u) => {
                assert_eq!(u.table_name, "users");
                assert_eq!(
                    u.assignments,
                    vec![
                        Assignment {
                            column: "name".to_string(),
                            value: "Charlie".to_string()
                        },
                        Assignment {
                            column: "age".to_string(),
                            value: "30".to_string()
                        },
                    ]
                );
                assert!(matches!(
                    u.where_clause.unwrap().condition,
                    Condition::Comparison {
                        op: ComparisonOperator::Gte,
                        ..
                    }
                ));
            }
            _ => panic!("Expected UPDATE statement"),
        }
    }

    #[test]
    fn test_semicolon_is_required() {
        let err = parse("SELECT * FROM users").unwrap_err();
        assert!(matches!(err, Error::Syntax { found, .. } if found == "EOF"));
    }

    #[test]
    fn test_where_supports_single_comparison_only() {
        let err = parse("SELECT * FROM t WHERE a = 1 AND b = 2;").unwrap_err();
        assert!(matches!(err, Error::Syntax { found, .. } if found == "AND"));
    }

    #[test]
    fn test_unknown_statement() {
        assert!(matches!(
            parse("DELETE FROM users;"),
            Err(Error::UnknownStatement(t)) if t == "DELETE"
        ));
        assert!(matches!(
            parse("DROP TABLE users;"),
            Err(Error::UnknownStatement(t)) if t == "DROP"
        ));
        assert!(matches!(parse(""), Err(Error::UnknownStatement(t)) if t == "EOF"));
    }

    #[test]
    fn test_delete_is_an_ordinary_name() {
        let stmt = parse("CREATE TABLE log (delete INT);").unwrap();
        match stmt {
            Statement::CreateTable(create) => {
                assert_eq!(create.columns[0].name, "delete");
            }
            other => panic!("Expected CREATE TABLE, got {:?}", other),
        }

        let stmt = parse("SELECT * FROM Delete WHERE delete = 1;").unwrap();
        assert!(matches!(stmt, Statement::Select(s) if s.table_name == "Delete"));
    }

    #[test]
    fn test_from_tokens_places_eof_after_last_char() {
        let tokens = vec![
            Token::new(TokenKind::Select, "SELECT", 0),
            Token::new(TokenKind::Asterisk, "*", 7),
            Token::new(TokenKind::From, "FROM", 9),
            Token::new(TokenKind::Identifier, "tÉé", 14),
        ];
        let mut parser = Parser::from_tokens(tokens);

        assert_eq!(parser.tokens.last(), Some(&Token::eof(17)));
        let err = parser.parse().unwrap_err();
        assert!(matches!(err, Error::Syntax { found, .. } if found == "EOF"));
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let stmt = parse("select * from T where A = 'x';").unwrap();
        assert!(matches!(stmt, Statement::Select(s) if s.table_name == "T"));
    }
}
