//! Process-local account store.

use super::{AccountStore, AccountTable};
use crate::account::Account;
use crate::error::Result;
use crate::money::Money;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Account store held in memory. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<AccountTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, AccountTable> {
        // Table methods check constraints before mutating any row.
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AccountStore for MemoryStore {
    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn create_account(&self, username: &str, initial_balance: Money) -> Result<u64> {
        self.table().insert(username, initial_balance)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.table().find_by_username(username).cloned())
    }

    fn update_balance(&self, id: u64, new_balance: Money) -> Result<()> {
        self.table().set_balance(id, new_balance)
    }

    fn adjust_balance(&self, id: u64, delta: Money) -> Result<Account> {
        self.table().adjust_balance(id, delta)
    }

    fn list_all(&self) -> Result<Vec<Account>> {
        Ok(self.table().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use std::str::FromStr;

    #[test]
    fn test_create_find_and_update() {
        let store = MemoryStore::new();
        store.initialize().unwrap();

        let id = store
            .create_account("alice", Money::from_str("10").unwrap())
            .unwrap();
        store
            .update_balance(id, Money::from_str("12.5").unwrap())
            .unwrap();

        let account = store.find_by_username("alice").unwrap().unwrap();
        assert_eq!(account.id, id);
        assert_eq!(account.balance.to_string(), "12.50");
        assert!(store.find_by_username("bob").unwrap().is_none());
    }

    #[test]
    fn test_update_balance_unknown_id() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.update_balance(3, Money::ZERO),
            Err(LedgerError::NotFound { id: 3 })
        ));
    }
}
