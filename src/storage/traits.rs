//! Ledger storage traits for codebreaker.

use crate::core::StatisticsLedger;
use crate::error::{FailOpen, Result};

/// Trait for statistics ledger persistence.
///
/// A store holds exactly one ledger. `save` replaces whatever was stored
/// before; there is no incremental update.
pub trait LedgerStore {
    /// Read the stored ledger.
    ///
    /// A store that does not exist yet or is empty yields an empty ledger.
    fn load(&self) -> Result<StatisticsLedger>;

    /// Overwrite the store with `ledger`.
    fn save(&self, ledger: &StatisticsLedger) -> Result<()>;

    /// Load the ledger, downgrading any failure to a warning and an empty ledger.
    fn load_or_empty(&self) -> StatisticsLedger {
        self.load().fail_open_default("history could not be read")
    }

    /// Save the ledger, downgrading any failure to a warning.
    ///
    /// Returns whether the ledger was persisted.
    fn save_or_warn(&self, ledger: &StatisticsLedger) -> bool {
        self.save(ledger)
            .map(|()| true)
            .fail_open_with("history could not be updated", false)
    }
}

/// Blanket implementation so a borrowed store can be handed to a session
/// while the caller keeps access to it.
impl<T: LedgerStore + ?Sized> LedgerStore for &T {
    fn load(&self) -> Result<StatisticsLedger> {
        (**self).load()
    }

    fn save(&self, ledger: &StatisticsLedger) -> Result<()> {
        (**self).save(ledger)
    }
}
