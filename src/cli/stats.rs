//! Stats command for codebreaker.
//!
//! Prints the statistics ledger without starting a game.

use serde::{Deserialize, Serialize};

use crate::core::{LedgerEntry, StatisticsLedger};
use crate::error::Result;
use crate::session::display;
use crate::storage::LedgerStore;

/// Options for the stats command.
#[derive(Debug, Clone, Default)]
pub struct StatsOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the stats command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsOutput {
    /// Whether the history was read successfully.
    pub success: bool,
    /// One entry per code length, ascending.
    pub entries: Vec<StatsEntryInfo>,
    /// Error message if the history could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One ledger entry for output, keyed by its code length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatsEntryInfo {
    /// Code length.
    pub code_length: usize,
    /// The recorded statistics, flattened into this object.
    #[serde(flatten)]
    pub entry: LedgerEntry,
}

impl StatsEntryInfo {
    fn new(code_length: usize, entry: &LedgerEntry) -> Self {
        Self {
            code_length,
            entry: *entry,
        }
    }
}

impl StatsOutput {
    /// Create a successful output.
    pub fn success(ledger: &StatisticsLedger) -> Self {
        Self {
            success: true,
            entries: ledger
                .iter()
                .map(|(len, entry)| StatsEntryInfo::new(len, entry))
                .collect(),
            error: None,
        }
    }

    /// Create a failed output.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            entries: Vec::new(),
            error: Some(error.into()),
        }
    }
}

/// The stats command implementation.
pub struct StatsCommand<S> {
    store: S,
}

impl<S: LedgerStore> StatsCommand<S> {
    /// Create a new stats command reading from `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the stats command.
    ///
    /// Unlike a game session, an unreadable history is reported rather
    /// than silently replaced with an empty one.
    pub fn run(&self) -> StatsOutput {
        match self.store.load() {
            Ok(ledger) => StatsOutput::success(&ledger),
            Err(e) => {
                tracing::warn!("history could not be read: {}", e);
                StatsOutput::failure(e.to_string())
            }
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StatsOutput, options: &StatsOptions) -> Result<String> {
        if options.quiet {
            return Ok(String::new());
        }

        if options.json {
            Ok(serde_json::to_string_pretty(output)?)
        } else {
            Ok(Self::format_human_readable(output))
        }
    }

    fn format_human_readable(output: &StatsOutput) -> String {
        if !output.success {
            return format!(
                "Stats failed: {}",
                output.error.as_deref().unwrap_or("unknown error")
            );
        }

        let ledger: StatisticsLedger = output
            .entries
            .iter()
            .map(|e| (e.code_length, e.entry))
            .collect();
        display::ledger_table(&ledger)
    }
}
