//! Account persistence.
//!
//! [`AccountStore`] is the seam between the ledger rules and the storage
//! backend. Two backends share the same [`AccountTable`] constraint logic:
//!
//! - [`CsvFileStore`]: durable, one CSV file replaced atomically per write
//! - [`MemoryStore`]: process memory only

mod file;
mod memory;
mod table;

pub use file::CsvFileStore;
pub use memory::MemoryStore;
pub use table::AccountTable;

use crate::account::Account;
use crate::error::Result;
use crate::money::Money;

/// Storage operations over account records.
///
/// Every method is a self-contained unit of work: implementations acquire
/// whatever lock or handle they need and release it before returning, on
/// both success and error paths.
pub trait AccountStore: Send + Sync {
    /// Ensures the backing table exists. Safe to call any number of times.
    fn initialize(&self) -> Result<()>;

    /// Inserts a new account and returns its assigned id.
    ///
    /// Fails with `DuplicateKey` if the username is taken; the check and the
    /// insert are a single atomic step.
    fn create_account(&self, username: &str, initial_balance: Money) -> Result<u64>;

    /// Looks up an account by username. Not-found is `Ok(None)`.
    fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Overwrites the balance of account `id`. Fails with `NotFound` for an
    /// unknown id.
    fn update_balance(&self, id: u64, new_balance: Money) -> Result<()>;

    /// Atomically applies `balance = balance + delta` when the result is
    /// non-negative and returns the stored record.
    ///
    /// Fails with `NotFound` for an unknown id and `InsufficientFunds` if the
    /// balance would go negative; the record is untouched on failure.
    fn adjust_balance(&self, id: u64, delta: Money) -> Result<Account>;

    /// All accounts, ascending by id.
    fn list_all(&self) -> Result<Vec<Account>>;
}
