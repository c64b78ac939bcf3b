//! # Simple Ledger
//!
//! Named accounts with deposits, withdrawals and balance inquiries,
//! persisted to a CSV store file.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: 2 decimal places via `rust_decimal`
//! - **Non-negative balances**: every balance change is a single checked
//!   update inside the store
//! - **Unique usernames**: enforced by the store on insert
//! - **Injected storage**: [`Ledger`] works over any [`AccountStore`]
//!
//! ## Example
//!
//! ```
//! use simple_ledger::{Ledger, MemoryStore, Money};
//!
//! let ledger = Ledger::new(MemoryStore::new());
//! ledger.open_account("alice", Money::from_minor_units(10_000)).unwrap();
//! let alice = ledger.deposit("alice", Money::from_minor_units(5_000)).unwrap();
//! assert_eq!(alice.balance.to_string(), "150.00");
//! ```

pub mod account;
pub mod command;
pub mod config;
pub mod error;
pub mod ledger;
pub mod money;
pub mod session;
pub mod store;

pub use account::Account;
pub use command::{Command, ParseCommandError};
pub use config::Config;
pub use error::{LedgerError, Result};
pub use ledger::Ledger;
pub use money::{Money, ParseMoneyError};
pub use session::{Flow, Session};
pub use store::{AccountStore, CsvFileStore, MemoryStore};
