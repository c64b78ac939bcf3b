//! In-memory account table shared by the store backends.
//!
//! Enforces the table constraints: auto-assigned ascending ids, unique
//! usernames and non-negative balances.

use crate::account::Account;
use crate::error::{LedgerError, Result};
use crate::money::Money;
use std::collections::{BTreeMap, HashMap};

/// Account rows indexed by id, with a secondary username index.
#[derive(Debug, Clone, Default)]
pub struct AccountTable {
    rows: BTreeMap<u64, Account>,
    by_username: HashMap<String, u64>,
}

impl AccountTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from previously stored rows, checking every constraint.
    ///
    /// Each row is paired with its 1-indexed position in the source so that
    /// violations can be reported precisely.
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, Account)>,
    {
        let mut table = AccountTable::new();

        for (row, account) in rows {
            if account.id == 0 {
                return Err(corrupt(row, "id must be positive".to_string()));
            }
            if account.balance.is_negative() {
                return Err(corrupt(
                    row,
                    format!("negative balance {} for '{}'", account.balance, account.username),
                ));
            }
            if table.rows.contains_key(&account.id) {
                return Err(corrupt(row, format!("duplicate id {}", account.id)));
            }
            if table.by_username.contains_key(&account.username) {
                return Err(corrupt(
                    row,
                    format!("duplicate username '{}'", account.username),
                ));
            }

            table.by_username.insert(account.username.clone(), account.id);
            table.rows.insert(account.id, account);
        }

        Ok(table)
    }

    /// Number of accounts in the table.
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    /// The id the next insert will receive.
    fn next_id(&self) -> u64 {
        self.rows.keys().next_back().map_or(1, |last| last + 1)
    }

    /// Inserts a new account and returns its id.
    pub fn insert(&mut self, username: &str, balance: Money) -> Result<u64> {
        if self.by_username.contains_key(username) {
            return Err(LedgerError::DuplicateKey {
                username: username.to_string(),
            });
        }

        let id = self.next_id();
        self.by_username.insert(username.to_string(), id);
        self.rows.insert(id, Account::new(id, username, balance));
        Ok(id)
    }

    pub fn find_by_username(&self, username: &str) -> Option<&Account> {
        self.by_username
            .get(username)
            .and_then(|id| self.rows.get(id))
    }

    /// Overwrites the balance of account `id`.
    pub fn set_balance(&mut self, id: u64, balance: Money) -> Result<()> {
        let account = self
            .rows
            .get_mut(&id)
            .ok_or(LedgerError::NotFound { id })?;
        account.balance = balance;
        Ok(())
    }

    /// Applies `delta` to the balance of account `id` if the result stays
    /// non-negative, returning the updated record.
    pub fn adjust_balance(&mut self, id: u64, delta: Money) -> Result<Account> {
        let account = self
            .rows
            .get_mut(&id)
            .ok_or(LedgerError::NotFound { id })?;
        account.balance = account.balance_after(delta)?;
        Ok(account.clone())
    }

    /// Iterates accounts in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        self.rows.values()
    }

    /// Clones all accounts in ascending id order.
    pub fn to_vec(&self) -> Vec<Account> {
        self.iter().cloned().collect()
    }
}

fn corrupt(row: usize, message: String) -> LedgerError {
    LedgerError::CorruptStore { row, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_insert_assigns_ascending_ids() {
        let mut table = AccountTable::new();
        assert_eq!(table.insert("alice", money("1")).unwrap(), 1);
        assert_eq!(table.insert("bob", money("2")).unwrap(), 2);
        assert_eq!(table.insert("carol", money("3")).unwrap(), 3);

        let names: Vec<_> = table.iter().map(|a| a.username.as_str()).collect();
        assert_eq!(names, ["alice", "bob", "carol"]);
    }

    #[test]
    fn test_insert_duplicate_username_leaves_table_unchanged() {
        let mut table = AccountTable::new();
        table.insert("alice", money("10")).unwrap();

        let err = table.insert("alice", money("99")).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateKey { ref username } if username == "alice"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.find_by_username("alice").unwrap().balance, money("10"));
    }

    #[test]
    fn test_ids_continue_after_loaded_rows() {
        let table = AccountTable::from_rows(vec![
            (2, Account::new(4, "alice", money("1"))),
            (3, Account::new(9, "bob", money("2"))),
        ]);
        let mut table = table.unwrap();
        assert_eq!(table.insert("carol", Money::ZERO).unwrap(), 10);
    }

    #[test]
    fn test_set_balance_unknown_id() {
        let mut table = AccountTable::new();
        let err = table.set_balance(42, money("1")).unwrap_err();
        assert!(matches!(err, LedgerError::NotFound { id: 42 }));
    }

    #[test]
    fn test_adjust_balance_guards_negative() {
        let mut table = AccountTable::new();
        let id = table.insert("alice", money("5")).unwrap();

        assert!(matches!(
            table.adjust_balance(id, -money("5.01")),
            Err(LedgerError::InsufficientFunds { .. })
        ));
        assert_eq!(table.find_by_username("alice").unwrap().balance, money("5"));

        let updated = table.adjust_balance(id, -money("5")).unwrap();
        assert_eq!(updated.balance, Money::ZERO);
    }

    #[test]
    fn test_from_rows_rejects_duplicates() {
        let err = AccountTable::from_rows(vec![
            (2, Account::new(1, "alice", money("1"))),
            (3, Account::new(2, "alice", money("2"))),
        ])
        .unwrap_err();
        assert!(matches!(err, LedgerError::CorruptStore { row: 3, .. }));

        let err = AccountTable::from_rows(vec![
            (2, Account::new(1, "alice", money("1"))),
            (3, Account::new(1, "bob", money("2"))),
        ])
        .unwrap_err();
        assert!(matches!(err, LedgerError::CorruptStore { row: 3, .. }));
    }

    #[test]
    fn test_from_rows_rejects_negative_balance() {
        let err =
            AccountTable::from_rows(vec![(2, Account::new(1, "alice", money("-1")))]).unwrap_err();
        assert!(matches!(err, LedgerError::CorruptStore { row: 2, .. }));
    }
}
