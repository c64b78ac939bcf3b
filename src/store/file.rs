//! Durable account store backed by a single CSV file.
//!
//! File layout:
//!
//! ```text
//! id,username,balance
//! 1,alice,100.00
//! 2,bob,0.00
//! ```
//!
//! Every operation reloads the file, so changes made by another handle are
//! visible. Writes go to a temporary file in the same directory which then
//! replaces the original by rename; readers never observe a partial file.

use super::{AccountStore, AccountTable};
use crate::account::Account;
use crate::error::{LedgerError, Result};
use crate::money::Money;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, info};
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use tempfile::NamedTempFile;

const HEADER: [&str; 3] = ["id", "username", "balance"];

/// Account store persisted to a CSV file.
#[derive(Debug)]
pub struct CsvFileStore {
    path: PathBuf,

    /// Serializes load-modify-save cycles from this handle.
    lock: Mutex<()>,
}

impl CsvFileStore {
    /// Creates a handle for the store file at `path`. Nothing is touched on
    /// disk until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CsvFileStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `f` against the current table contents.
    fn read<T>(&self, f: impl FnOnce(&AccountTable) -> T) -> Result<T> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let table = self.load()?;
        Ok(f(&table))
    }

    /// Runs `f` against the current table contents and persists the result.
    ///
    /// Nothing is written if `f` fails.
    fn write<T>(&self, f: impl FnOnce(&mut AccountTable) -> Result<T>) -> Result<T> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut table = self.load()?;
        let output = f(&mut table)?;
        self.save(&table)?;
        Ok(output)
    }

    /// Loads the table. A missing file reads as an empty table.
    fn load(&self) -> Result<AccountTable> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Store file {} absent, using empty table", self.path.display());
                return Ok(AccountTable::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut csv_reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for (row_idx, result) in csv_reader.deserialize::<Account>().enumerate() {
            let row_num = row_idx + 2; // 1-indexed, accounting for header row
            let account = result.map_err(|e| LedgerError::CorruptStore {
                row: row_num,
                message: e.to_string(),
            })?;
            rows.push((row_num, account));
        }

        AccountTable::from_rows(rows)
    }

    /// Writes the whole table to a temporary file and renames it over the
    /// store file.
    fn save(&self, table: &AccountTable) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut csv_writer = WriterBuilder::new()
                .has_headers(false)
                .from_writer(temp.as_file_mut());

            csv_writer.write_record(HEADER)?;
            for account in table.iter() {
                csv_writer.serialize(account)?;
            }
            csv_writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path)?;

        debug!("Wrote {} accounts to {}", table.len(), self.path.display());
        Ok(())
    }
}

impl AccountStore for CsvFileStore {
    fn initialize(&self) -> Result<()> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        if self.path.exists() {
            let table = self.load()?;
            debug!("Store {} ready with {} accounts", self.path.display(), table.len());
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        self.save(&AccountTable::new())?;
        info!("Created store file {}", self.path.display());
        Ok(())
    }

    fn create_account(&self, username: &str, initial_balance: Money) -> Result<u64> {
        self.write(|table| table.insert(username, initial_balance))
    }

    fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        self.read(|table| table.find_by_username(username).cloned())
    }

    fn update_balance(&self, id: u64, new_balance: Money) -> Result<()> {
        self.write(|table| table.set_balance(id, new_balance))
    }

    fn adjust_balance(&self, id: u64, delta: Money) -> Result<Account> {
        self.write(|table| table.adjust_balance(id, delta))
    }

    fn list_all(&self) -> Result<Vec<Account>> {
        self.read(AccountTable::to_vec)
    }
}
