//! In-memory ledger storage for testing.

use std::cell::{Cell, RefCell};

use crate::core::StatisticsLedger;
use crate::error::{CodebreakerError, Result};
use crate::storage::LedgerStore;

/// In-memory ledger store for testing.
///
/// Holds the last saved ledger and can be told to fail saves, which lets
/// session tests exercise the persistence-failure path without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryLedgerStore {
    ledger: RefCell<StatisticsLedger>,
    fail_saves: Cell<bool>,
    saves: Cell<usize>,
}

impl MemoryLedgerStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `ledger`.
    pub fn with_ledger(ledger: StatisticsLedger) -> Self {
        Self {
            ledger: RefCell::new(ledger),
            ..Self::default()
        }
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// A copy of the stored ledger.
    pub fn snapshot(&self) -> StatisticsLedger {
        self.ledger.borrow().clone()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn load(&self) -> Result<StatisticsLedger> {
        Ok(self.snapshot())
    }

    fn save(&self, ledger: &StatisticsLedger) -> Result<()> {
        if self.fail_saves.get() {
            return Err(CodebreakerError::storage(
                "<memory>",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "saves disabled"),
            ));
        }
        *self.ledger.borrow_mut() = ledger.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
