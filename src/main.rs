//! Simple Ledger CLI
//!
//! Opens accounts and moves funds, persisting balances to a CSV store file.
//!
//! # Usage
//!
//! ```bash
//! ledger                         # interactive loop on stdin
//! ledger deposit alice 50        # run one command and exit
//! ledger --db data/bank.db list  # use another store file
//! ```
//!
//! # Environment Variables
//!
//! - `LEDGER_DB`: store file path when `--db` is not given (default `bank.db`)
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use simple_ledger::command::USAGE;
use simple_ledger::{
    Command, Config, CsvFileStore, Ledger, LedgerError, ParseCommandError, Result, Session,
};
use std::io;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        if matches!(e, LedgerError::Command(ParseCommandError::Unrecognized)) {
            eprintln!("{}", USAGE);
        }
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_env()?;
    log::debug!("Using store {}", config.db_path.display());

    let session = Session::new(Ledger::new(CsvFileStore::new(&config.db_path)));
    session.ledger().initialize()?;

    let stdout = io::stdout();
    if config.is_interactive() {
        let stdin = io::stdin();
        session.run(stdin.lock(), stdout.lock())?;
    } else {
        let command = Command::from_tokens(&config.command)?;
        session.execute(&command, &mut stdout.lock())?;
    }

    Ok(())
}
