//! Ledger service: account rules layered on an [`AccountStore`].
//!
//! The service owns no state of its own. Every balance change goes through
//! [`AccountStore::adjust_balance`], which checks and writes in one step, so
//! concurrent callers cannot lose an update or overdraw an account.

use crate::account::{validate_username, Account};
use crate::error::{LedgerError, Result};
use crate::money::Money;
use crate::store::AccountStore;
use log::{debug, info, warn};

/// Opens accounts and moves funds in and out of them.
///
/// The store is injected at construction; the ledger never locates storage
/// on its own.
#[derive(Debug)]
pub struct Ledger<S> {
    store: S,
}

impl<S: AccountStore> Ledger<S> {
    /// Creates a ledger over `store`.
    pub fn new(store: S) -> Self {
        Ledger { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Ensures the store's table exists.
    pub fn initialize(&self) -> Result<()> {
        self.store.initialize()
    }

    /// Opens a new account.
    ///
    /// # Errors
    ///
    /// - `InvalidUsername` if `username` is empty or contains whitespace
    /// - `InvalidAmount` if `initial_balance` is negative
    /// - `AccountExists` if the username is taken
    pub fn open_account(&self, username: &str, initial_balance: Money) -> Result<Account> {
        validate_username(username)?;

        if initial_balance.is_negative() {
            return Err(LedgerError::InvalidAmount {
                amount: initial_balance,
                reason: "opening balance cannot be negative",
            });
        }

        if self.store.find_by_username(username)?.is_some() {
            warn!("Refusing to open duplicate account '{}'", username);
            return Err(account_exists(username));
        }

        let id = match self.store.create_account(username, initial_balance) {
            Ok(id) => id,
            // Another writer took the name between the lookup and the insert.
            Err(LedgerError::DuplicateKey { username }) => {
                warn!("Lost race opening account '{}'", username);
                return Err(LedgerError::AccountExists { username });
            }
            Err(e) => return Err(e),
        };

        info!(
            "Opened account {} for '{}' with balance {}",
            id, username, initial_balance
        );
        Ok(Account::new(id, username, initial_balance))
    }

    /// Adds `amount` to the account's balance and returns the updated record.
    pub fn deposit(&self, username: &str, amount: Money) -> Result<Account> {
        ensure_positive(amount)?;
        let account = self.require_account(username)?;

        let updated = self.store.adjust_balance(account.id, amount)?;
        debug!(
            "Deposited {} to '{}', balance {} -> {}",
            amount, username, account.balance, updated.balance
        );
        Ok(updated)
    }

    /// Removes `amount` from the account's balance and returns the updated
    /// record. The balance is left untouched if it does not cover `amount`.
    pub fn withdraw(&self, username: &str, amount: Money) -> Result<Account> {
        ensure_positive(amount)?;
        let account = self.require_account(username)?;

        if !account.can_cover(amount) {
            debug!(
                "Withdrawal of {} from '{}' rejected, balance {}",
                amount, username, account.balance
            );
            return Err(LedgerError::InsufficientFunds {
                balance: account.balance,
                requested: amount,
            });
        }

        let updated = self.store.adjust_balance(account.id, -amount)?;
        debug!(
            "Withdrew {} from '{}', balance {} -> {}",
            amount, username, account.balance, updated.balance
        );
        Ok(updated)
    }

    /// Looks up an account. Absence is not an error.
    pub fn get_account(&self, username: &str) -> Result<Option<Account>> {
        self.store.find_by_username(username)
    }

    /// All accounts in creation order.
    pub fn list_accounts(&self) -> Result<Vec<Account>> {
        self.store.list_all()
    }

    fn require_account(&self, username: &str) -> Result<Account> {
        self.store
            .find_by_username(username)?
            .ok_or_else(|| LedgerError::AccountNotFound {
                username: username.to_string(),
            })
    }
}

fn ensure_positive(amount: Money) -> Result<()> {
    if !amount.is_positive() {
        return Err(LedgerError::InvalidAmount {
            amount,
            reason: "amount must be positive",
        });
    }
    Ok(())
}

fn account_exists(username: &str) -> LedgerError {
    LedgerError::AccountExists {
        username: username.to_string(),
    }
}
