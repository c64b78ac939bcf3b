//! Account model and username rules.

use crate::error::{LedgerError, Result};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A uniquely named balance-holding record.
///
/// # Invariants
///
/// - `id` and `username` never change after creation
/// - `balance` is never negative once stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Store-assigned identifier, ascending in creation order.
    pub id: u64,

    /// Unique account name.
    pub username: String,

    /// Current balance.
    pub balance: Money,
}

impl Account {
    pub fn new(id: u64, username: impl Into<String>, balance: Money) -> Self {
        Account {
            id,
            username: username.into(),
            balance,
        }
    }

    /// Returns `true` if the balance covers a withdrawal of `amount`.
    pub fn can_cover(&self, amount: Money) -> bool {
        self.balance >= amount
    }

    /// Computes the balance after applying `delta`.
    ///
    /// Fails with `InsufficientFunds` if the result would be negative and with
    /// `InvalidAmount` if the addition overflows.
    pub fn balance_after(&self, delta: Money) -> Result<Money> {
        let updated = self
            .balance
            .checked_add(delta)
            .ok_or(LedgerError::InvalidAmount {
                amount: delta,
                reason: "balance would overflow",
            })?;

        if updated.is_negative() {
            return Err(LedgerError::InsufficientFunds {
                balance: self.balance,
                requested: -delta,
            });
        }

        Ok(updated)
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.id, self.username, self.balance)
    }
}

/// Checks that a username is a single non-empty token.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() || username.chars().any(char::is_whitespace) {
        return Err(LedgerError::InvalidUsername {
            username: username.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    #[test]
    fn test_balance_after_deposit() {
        let account = Account::new(1, "alice", money("100"));
        assert_eq!(account.balance_after(money("50")).unwrap(), money("150"));
    }

    #[test]
    fn test_balance_after_withdrawal_to_zero() {
        let account = Account::new(1, "alice", money("100"));
        assert_eq!(account.balance_after(-money("100")).unwrap(), Money::ZERO);
    }

    #[test]
    fn test_balance_after_rejects_negative_result() {
        let account = Account::new(1, "alice", money("100"));
        let err = account.balance_after(-money("100.01")).unwrap_err();

        match err {
            LedgerError::InsufficientFunds { balance, requested } => {
                assert_eq!(balance, money("100"));
                assert_eq!(requested, money("100.01"));
            }
            other => panic!("Expected InsufficientFunds, got {other:?}"),
        }
    }

    #[test]
    fn test_balance_after_rejects_overflow() {
        let account = Account::new(1, "alice", money("792281625142643375935439503"));
        let err = account.balance_after(money("1")).unwrap_err();

        assert!(matches!(
            err,
            LedgerError::InvalidAmount {
                reason: "balance would overflow",
                ..
            }
        ));
    }

    #[test]
    fn test_can_cover() {
        let account = Account::new(1, "alice", money("10"));
        assert!(account.can_cover(money("10")));
        assert!(!account.can_cover(money("10.01")));
    }

    #[test]
    fn test_display_is_tab_separated() {
        let account = Account::new(7, "bob", money("3.5"));
        assert_eq!(account.to_string(), "7\tbob\t3.50");
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("alice_01").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("alice smith").is_err());
        assert!(validate_username("tab\there").is_err());
    }
}
