//! Command execution and the interactive loop.

use crate::command::{Command, ParseCommandError, USAGE};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::store::AccountStore;
use log::{debug, warn};
use std::io::{BufRead, Write};

const BANNER: &str = "Simple ledger. Type 'help' for commands.";
const PROMPT: &str = "> ";

/// Whether the interactive loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Runs commands against a ledger and renders their output.
#[derive(Debug)]
pub struct Session<S> {
    ledger: Ledger<S>,
}

impl<S: AccountStore> Session<S> {
    pub fn new(ledger: Ledger<S>) -> Self {
        Session { ledger }
    }

    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    /// Executes one command, writing its output to `out`.
    ///
    /// Ledger and store failures are returned to the caller; nothing is
    /// written for a failed command.
    pub fn execute<W: Write>(&self, command: &Command, out: &mut W) -> Result<Flow> {
        debug!("Executing {:?}", command);

        match command {
            Command::Init => {
                self.ledger.initialize()?;
                writeln!(out, "Store initialized.")?;
            }
            Command::Create {
                username,
                initial_balance,
            } => {
                let account = self.ledger.open_account(username, *initial_balance)?;
                writeln!(out, "Created: {}", account)?;
            }
            Command::Deposit { username, amount } => {
                let account = self.ledger.deposit(username, *amount)?;
                writeln!(out, "New balance: {}", account.balance)?;
            }
            Command::Withdraw { username, amount } => {
                let account = self.ledger.withdraw(username, *amount)?;
                writeln!(out, "New balance: {}", account.balance)?;
            }
            Command::Balance { username } => match self.ledger.get_account(username)? {
                Some(account) => writeln!(out, "{}: {}", account.username, account.balance)?,
                None => writeln!(out, "Account not found.")?,
            },
            Command::List => {
                for account in self.ledger.list_accounts()? {
                    writeln!(out, "{}", account)?;
                }
            }
            Command::Help => writeln!(out, "{}", USAGE)?,
            Command::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Reads commands line by line until `exit` or end of input.
    ///
    /// Every failure is reported on `out` as `Error: ...` and the loop
    /// carries on with the next line.
    pub fn run<R: BufRead, W: Write>(&self, input: R, mut out: W) -> Result<()> {
        writeln!(out, "{}", BANNER)?;

        let mut lines = input.lines();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    writeln!(out)?;
                    break;
                }
            };

            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let command = match Command::parse(line) {
                Ok(command) => command,
                Err(e @ ParseCommandError::Unrecognized) => {
                    writeln!(out, "{}", e)?;
                    continue;
                }
                Err(e) => {
                    writeln!(out, "Error: {}", e)?;
                    continue;
                }
            };

            match self.execute(&command, &mut out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit) => break,
                Err(e) => {
                    warn!("Command '{}' failed: {}", line, e);
                    writeln!(out, "Error: {}", e)?;
                }
            }
        }

        out.flush()?;
        Ok(())
    }
}
