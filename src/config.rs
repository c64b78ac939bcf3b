//! Process configuration.
//!
//! The store path is resolved in order: `--db <path>` (or `--db=<path>`),
//! then the `LEDGER_DB` environment variable, then `bank.db` in the working
//! directory. Arguments after the options form a one-shot command.

use crate::error::{LedgerError, Result};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the store file.
pub const DB_ENV_VAR: &str = "LEDGER_DB";

/// Store file used when nothing else is configured.
pub const DEFAULT_DB_PATH: &str = "bank.db";

const USAGE: &str = "Usage: ledger [--db <path>] [command [args...]]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Location of the store file.
    pub db_path: PathBuf,

    /// Command to run once instead of starting the interactive loop.
    /// Empty for interactive mode.
    pub command: Vec<String>,
}

impl Config {
    /// Reads configuration from the process arguments and environment.
    pub fn from_env() -> Result<Self> {
        Self::from_parts(env::args().skip(1), env::var_os(DB_ENV_VAR))
    }

    /// Builds configuration from explicit arguments (program name excluded)
    /// and the value of `LEDGER_DB`, if set.
    pub fn from_parts<I>(args: I, env_db: Option<OsString>) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut db_path = None;
        let mut args = args.into_iter();
        let mut command = Vec::new();

        while let Some(arg) = args.next() {
            if arg == "--db" {
                let path = args.next().ok_or_else(|| LedgerError::InvalidArguments {
                    message: "--db requires a path".to_string(),
                })?;
                db_path = Some(PathBuf::from(path));
            } else if let Some(path) = arg.strip_prefix("--db=") {
                db_path = Some(PathBuf::from(path));
            } else if arg.starts_with("--") {
                return Err(LedgerError::InvalidArguments {
                    message: format!("unknown option '{}'. {}", arg, USAGE),
                });
            } else {
                command.push(arg);
                command.extend(args.by_ref());
            }
        }

        let db_path = db_path
            .or_else(|| env_db.filter(|p| !p.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        if db_path.as_os_str().is_empty() {
            return Err(LedgerError::InvalidArguments {
                message: "store path must not be empty".to_string(),
            });
        }

        Ok(Config { db_path, command })
    }

    /// Returns `true` when no one-shot command was given.
    pub fn is_interactive(&self) -> bool {
        self.command.is_empty()
    }
}
