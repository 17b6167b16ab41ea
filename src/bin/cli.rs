//! memdb - interactive SQL shell

use anyhow::Context;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::EnvFilter;

use memdb::config::{Command, ShellConfig};
use memdb::sql::{tokenize, Parser, TokenKind};
use memdb::storage::Snapshot;
use memdb::Database;

/// Print welcome banner
fn print_banner() {
    println!(
        r#"
 memdb - a minimal in-memory SQL engine
 Supported: CREATE TABLE, INSERT, SELECT, UPDATE
 Type '.help' for help, '.quit' to exit
"#
    );
}

/// Print help message
fn print_help() {
    println!(
        r#"
Commands:
  .help              Show this help message
  .quit              Exit memdb (also .exit or quit)
  .tables            List all tables
  .schema [table]    Show table schema

SQL Commands (end each statement with ';'):
  CREATE TABLE ...   Create a new table (INT, VARCHAR(n) columns)
  INSERT INTO ...    Insert one row
  SELECT ...         Query rows, optionally filtered by one comparison
  UPDATE ...         Update rows, optionally filtered by one comparison

Examples:
  CREATE TABLE users (id INT, name VARCHAR(100));
  INSERT INTO users VALUES (1, 'Alice');
  SELECT * FROM users WHERE id = 1;
  UPDATE users SET name = 'Bob' WHERE id = 1;
"#
    );
}

fn print_usage() {
    println!(
        r#"Usage: memdb-cli [OPTIONS]

Options:
  -s, --snapshot <path>   Snapshot file (default: {})
      --no-snapshot       Do not read or write a snapshot
      --history <path>    Line history file (default: {})
  -v, --verbose           Show tokens and debug logs
  -h, --help              Show this message"#,
        memdb::config::DEFAULT_SNAPSHOT_PATH,
        memdb::config::DEFAULT_HISTORY_PATH
    );
}

fn init_logging(config: &ShellConfig) {
    let filter = if config.verbose {
        EnvFilter::new(config.log_directive())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_directive()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Interactive shell state
struct Shell {
    config: ShellConfig,
    database: Database,
}

impl Shell {
    fn new(config: ShellConfig) -> Self {
        let database = Self::restore(&config);
        Self { config, database }
    }

    /// Load tables from the snapshot file, falling back to an empty database
    fn restore(config: &ShellConfig) -> Database {
        let Some(path) = &config.snapshot_path else {
            return Database::new();
        };

        let restored = Snapshot::load_from_disk(path)
            .and_then(|snapshot| Database::from_snapshot(snapshot.unwrap_or_default()));
        match restored {
            Ok(db) => {
                let names = db.table_names();
                if !names.is_empty() {
                    println!("Restored {} table(s) from {}", names.len(), path.display());
                }
                db
            }
            Err(e) => {
                eprintln!("Could not restore snapshot {}: {}", path.display(), e);
                Database::new()
            }
        }
    }

    fn save_snapshot(&self) {
        if let Some(path) = &self.config.snapshot_path {
            if let Err(e) = self.database.snapshot().save_to_disk(path) {
                tracing::warn!(path = %path.display(), error = %e, "failed to write snapshot");
            }
        }
    }

    /// Execute a SQL statement
    fn execute_sql(&mut self, sql: &str) {
        let tokens = tokenize(sql.trim());

        if self.config.verbose {
            for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
                println!("  {}", token);
            }
        }

        let stmt = match Parser::from_tokens(tokens).parse() {
            Ok(stmt) => stmt,
            Err(e) => {
                eprintln!("{}", e);
                return;
            }
        };

        if self.config.verbose {
            println!("  AST: {:?}", stmt);
        }

        let mutation = stmt.is_mutation();
        match self.database.execute(stmt) {
            Ok(result) => {
                print!("{}", result.render());
                if mutation {
                    self.save_snapshot();
                }
            }
            Err(e) => eprintln!("{}", e),
        }
    }

    /// Handle special dot commands. Returns false when the shell should exit.
    fn handle_special_command(&self, cmd: &str) -> bool {
        let parts: Vec<&str> = cmd.split_whitespace().collect();

        match parts.first().copied() {
            Some(".help") => print_help(),
            Some(".quit") | Some(".exit") => return false,
            Some(".tables") => {
                let tables = self.database.table_names();
                if tables.is_empty() {
                    println!("No tables found.");
                } else {
                    for table in tables {
                        println!("  {}", table);
                    }
                }
            }
            Some(".schema") => match parts.get(1) {
                Some(name) => match self.database.get_table(name) {
                    Ok(table) => println!("{}", table.describe()),
                    Err(e) => eprintln!("{}", e),
                },
                None => {
                    for name in self.database.table_names() {
                        if let Ok(table) = self.database.get_table(name) {
                            println!("{}", table.describe());
                        }
                    }
                }
            },
            Some(other) => {
                eprintln!("Unknown command: {}", other);
                eprintln!("Type '.help' for available commands.");
            }
            None => {}
        }
        true
    }

    /// Main REPL loop
    fn run(&mut self) -> anyhow::Result<()> {
        let mut editor = DefaultEditor::new().context("failed to initialize line editor")?;
        if editor.load_history(&self.config.history_path).is_err() {
            tracing::debug!("no previous history");
        }

        print_banner();

        let mut buffer = String::new();

        loop {
            let prompt = if buffer.is_empty() {
                &self.config.prompt
            } else {
                &self.config.continuation_prompt
            };

            let line = match editor.readline(prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    buffer.clear();
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => return Err(anyhow::anyhow!("failed to read input: {}", e)),
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            if buffer.is_empty() {
                if trimmed.eq_ignore_ascii_case("quit") {
                    break;
                }
                if trimmed.starts_with('.') {
                    let _ = editor.add_history_entry(trimmed);
                    if !self.handle_special_command(trimmed) {
                        break;
                    }
                    continue;
                }
            }

            if !buffer.is_empty() {
                buffer.push(' ');
            }
            buffer.push_str(trimmed);

            // A statement is complete once a line ends with a semicolon
            if trimmed.ends_with(';') {
                let sql = std::mem::take(&mut buffer);
                let _ = editor.add_history_entry(sql.as_str());
                self.execute_sql(&sql);
            }
        }

        if let Err(e) = editor.save_history(&self.config.history_path) {
            tracing::warn!(error = %e, "failed to save history");
        }
        println!("Goodbye!");
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    let config = match ShellConfig::from_args(std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print_usage();
            return Ok(());
        }
        Err(e) => {
            eprintln!("error: {}", e);
            print_usage();
            std::process::exit(2);
        }
    };

    init_logging(&config);

    Shell::new(config).run()
}
