//! Command parsing for the ledger CLI.

use crate::money::{Money, ParseMoneyError};
use std::str::FromStr;
use thiserror::Error;

/// One-line summary of every command.
pub const USAGE: &str = "Commands: init | create <username> [initial_balance] | \
deposit <username> <amount> | withdraw <username> <amount> | balance <username> | \
list | help | exit";

/// A parsed ledger command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ensure the store exists.
    Init,

    /// Open an account, optionally with an opening balance.
    Create {
        username: String,
        initial_balance: Money,
    },

    /// Add funds.
    Deposit { username: String, amount: Money },

    /// Remove funds.
    Withdraw { username: String, amount: Money },

    /// Show one account's balance.
    Balance { username: String },

    /// Show every account.
    List,

    Help,

    Exit,
}

/// Reasons a command line could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Unknown command or wrong args. Type 'help'.")]
    Unrecognized,

    #[error("Invalid amount: {0}")]
    Amount(#[from] ParseMoneyError),
}

impl Command {
    /// Parses a whitespace-separated command line.
    ///
    /// The verb is case-insensitive; usernames are taken verbatim.
    pub fn parse(line: &str) -> Result<Command, ParseCommandError> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        Self::from_tokens(&tokens)
    }

    /// Parses a command from pre-split tokens (e.g. process arguments).
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Command, ParseCommandError> {
        let tokens: Vec<&str> = tokens.iter().map(AsRef::as_ref).collect();
        let Some((verb, args)) = tokens.split_first() else {
            return Err(ParseCommandError::Unrecognized);
        };

        let command = match (verb.to_lowercase().as_str(), args) {
            ("init", []) => Command::Init,
            ("create", [username]) => Command::Create {
                username: username.to_string(),
                initial_balance: Money::ZERO,
            },
            ("create", [username, balance]) => Command::Create {
                username: username.to_string(),
                initial_balance: Money::from_str(balance)?,
            },
            ("deposit", [username, amount]) => Command::Deposit {
                username: username.to_string(),
                amount: Money::from_str(amount)?,
            },
            ("withdraw", [username, amount]) => Command::Withdraw {
                username: username.to_string(),
                amount: Money::from_str(amount)?,
            },
            ("balance", [username]) => Command::Balance {
                username: username.to_string(),
            },
            ("list", []) => Command::List,
            ("help", _) => Command::Help,
            ("exit", _) => Command::Exit,
            _ => return Err(ParseCommandError::Unrecognized),
        };

        Ok(command)
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_create_with_and_without_balance() {
        assert_eq!(
            Command::parse("create alice").unwrap(),
            Command::Create {
                username: "alice".to_string(),
                initial_balance: Money::ZERO,
            }
        );
        assert_eq!(
            Command::parse("create alice 100.0").unwrap(),
            Command::Create {
                username: "alice".to_string(),
                initial_balance: money("100"),
            }
        );
    }

    #[test]
    fn test_parse_money_commands() {
        assert_eq!(
            Command::parse("deposit bob 5.25").unwrap(),
            Command::Deposit {
                username: "bob".to_string(),
                amount: money("5.25"),
            }
        );
        assert_eq!(
            Command::parse("withdraw bob 1").unwrap(),
            Command::Withdraw {
                username: "bob".to_string(),
                amount: money("1"),
            }
        );
    }

    #[test]
    fn test_parse_handles_case_and_whitespace() {
        assert_eq!(
            Command::parse("  BALANCE   Alice  ").unwrap(),
            Command::Balance {
                username: "Alice".to_string(),
            }
        );
        assert_eq!(Command::parse("List").unwrap(), Command::List);
        assert_eq!(Command::parse("\tinit\t").unwrap(), Command::Init);
    }

    #[test]
    fn test_parse_help_and_exit_ignore_args() {
        assert_eq!(Command::parse("help me").unwrap(), Command::Help);
        assert_eq!(Command::parse("exit now").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        for line in ["", "deposit alice", "withdraw", "balance", "list all", "create a 1 2"] {
            assert_eq!(
                Command::parse(line),
                Err(ParseCommandError::Unrecognized),
                "line: {line:?}"
            );
        }
    }

    #[test]
    fn test_parse_rejects_unknown_verb() {
        assert_eq!(
            Command::parse("transfer alice bob 5"),
            Err(ParseCommandError::Unrecognized)
        );
    }

    #[test]
    fn test_parse_reports_bad_amount() {
        assert!(matches!(
            Command::parse("deposit alice ten"),
            Err(ParseCommandError::Amount(ParseMoneyError::Invalid(_)))
        ));
        assert!(matches!(
            Command::parse("create alice 1.001"),
            Err(ParseCommandError::Amount(ParseMoneyError::TooPrecise(_)))
        ));
    }

    #[test]
    fn test_from_tokens_matches_parse() {
        let args = vec!["deposit".to_string(), "alice".to_string(), "7".to_string()];
        assert_eq!(
            Command::from_tokens(&args).unwrap(),
            Command::parse("deposit alice 7").unwrap()
        );
    }
}
