//! Error types for the ledger.

use crate::command::ParseCommandError;
use crate::money::Money;
use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors that can occur in the store, the ledger service or the CLI.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to read or write the store file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding error while writing the store file
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The temporary store file could not replace the original
    #[error("Failed to replace store file: {0}")]
    Persist(#[from] tempfile::PersistError),

    /// The store file holds data that violates the table constraints
    #[error("Corrupt store at row {row}: {message}")]
    CorruptStore { row: usize, message: String },

    /// Uniqueness constraint on `username` rejected an insert
    #[error("Duplicate key: username '{username}' is already taken")]
    DuplicateKey { username: String },

    /// Balance update referenced an id that does not exist
    #[error("No account with id {id}")]
    NotFound { id: u64 },

    /// An account with this username is already open
    #[error("Account with username '{username}' already exists.")]
    AccountExists { username: String },

    /// No account is open under this username
    #[error("Account '{username}' not found.")]
    AccountNotFound { username: String },

    /// Amount is zero, negative, or would overflow the balance
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount { amount: Money, reason: &'static str },

    /// Withdrawal exceeds the current balance
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Money, requested: Money },

    /// Username is empty or contains whitespace
    #[error("Invalid username '{username}': must be non-empty and contain no whitespace")]
    InvalidUsername { username: String },

    /// Unparsable command line
    #[error("{0}")]
    Command(#[from] ParseCommandError),

    /// Bad process arguments
    #[error("Invalid arguments: {message}")]
    InvalidArguments { message: String },
}
