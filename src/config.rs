//! Shell configuration
//!
//! Settings for the interactive shell, built from command-line arguments.
//! The SQL core itself takes no configuration.

use std::path::PathBuf;

/// Default snapshot file, relative to the working directory
pub const DEFAULT_SNAPSHOT_PATH: &str = "memdb.snapshot.json";

/// Default line-editor history file
pub const DEFAULT_HISTORY_PATH: &str = ".memdb_history";

/// Shell configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ShellConfig {
    /// Prompt shown for a new statement
    pub prompt: String,
    /// Prompt shown while a statement continues over several lines
    pub continuation_prompt: String,
    /// Where to write the snapshot after each change; `None` disables it
    pub snapshot_path: Option<PathBuf>,
    /// Line-editor history file
    pub history_path: PathBuf,
    /// Log tokens and parsed statements
    pub verbose: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "SQL> ".to_string(),
            continuation_prompt: "...> ".to_string(),
            snapshot_path: Some(PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            verbose: false,
        }
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Start the shell
    Run(ShellConfig),
    /// Print usage and exit
    Help,
}

impl ShellConfig {
    /// Create a new shell config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snapshot file
    pub fn snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = Some(path.into());
        self
    }

    /// Disable the snapshot file
    pub fn no_snapshot(mut self) -> Self {
        self.snapshot_path = None;
        self
    }

    /// Set the history file
    pub fn history_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.history_path = path.into();
        self
    }

    /// Set verbose flag
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Log filter directive for the tracing subscriber
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "memdb=debug"
        } else {
            "warn"
        }
    }

    /// Parse command-line arguments (without the program name)
    pub fn from_args<I, S>(args: I) -> std::result::Result<Command, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::new();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--help" | "-h" => return Ok(Command::Help),
                "--verbose" | "-v" => config = config.verbose(true),
                "--no-snapshot" => config = config.no_snapshot(),
                "--snapshot" | "-s" => match args.next() {
                    Some(path) => config = config.snapshot_path(path.as_ref()),
                    None => return Err("--snapshot requires a path".to_string()),
                },
                "--history" => match args.next() {
                    Some(path) => config = config.history_path(path.as_ref()),
                    None => return Err("--history requires a path".to_string()),
                },
                other => return Err(format!("unknown argument '{}'", other)),
            }
        }

        Ok(Command::Run(config))
    }
}
