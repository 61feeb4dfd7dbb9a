//! Per-code-length statistics ledger.
//!
//! The ledger maps a code length to the player's aggregate record at that
//! length. [`StatisticsLedger::record_result`] is the only way to change an
//! entry: it snapshots the prior entry, derives the feedback and the new
//! running average from that snapshot, and only then writes the result back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::MIN_CODE_LENGTH;
use crate::error::{CodebreakerError, Result};

/// Aggregate record for one code length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Number of won rounds recorded at this length.
    pub games_played: u32,
    /// Fewest guesses ever needed to win.
    pub best_score: u32,
    /// Mean guesses needed to win.
    pub average_score: f64,
}

impl LedgerEntry {
    /// Entry for the very first game at a length.
    pub fn first(guesses: u32) -> Self {
        Self {
            games_played: 1,
            best_score: guesses,
            average_score: f64::from(guesses),
        }
    }

    /// Entry after one more game taking `guesses`.
    ///
    /// The prior average is weighted by the pre-increment game count.
    /// Returns `None` once the game count is saturated.
    pub fn with_game(&self, guesses: u32) -> Option<Self> {
        let games_played = self.games_played.checked_add(1)?;
        let n = f64::from(self.games_played);
        Some(Self {
            games_played,
            best_score: self.best_score.min(guesses),
            average_score: (self.average_score * n + f64::from(guesses)) / (n + 1.0),
        })
    }

    /// How a game taking `guesses` compares with this (prior) entry.
    pub fn assess(&self, guesses: u32) -> RecordFeedback {
        if guesses < self.best_score {
            RecordFeedback::NewBest {
                previous: self.best_score,
            }
        } else if f64::from(guesses) < self.average_score {
            RecordFeedback::BetterThanAverage {
                average: self.average_score,
            }
        } else {
            RecordFeedback::Ordinary
        }
    }
}

/// What a recorded round meant relative to the player's history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordFeedback {
    /// No earlier game at this length.
    FirstGame,
    /// Fewer guesses than the previous best.
    NewBest { previous: u32 },
    /// Not a new best, but below the average as it stood before this game.
    BetterThanAverage { average: f64 },
    /// Nothing worth celebrating.
    Ordinary,
}

/// Mapping from code length to [`LedgerEntry`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatisticsLedger {
    entries: BTreeMap<usize, LedgerEntry>,
}

impl StatisticsLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for a code length, if any game has been recorded.
    pub fn get(&self, code_length: usize) -> Option<&LedgerEntry> {
        self.entries.get(&code_length)
    }

    /// Entries in ascending code length order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LedgerEntry)> {
        self.entries.iter().map(|(len, entry)| (*len, entry))
    }

    /// Number of code lengths with a record.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no game has ever been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record a won round at `code_length` that took `guesses` guesses.
    ///
    /// Feedback is evaluated against the entry as it was before this game.
    /// Rejects a zero guess count, a code length below the minimum, or an
    /// entry whose game count is already at its limit, without touching
    /// the ledger.
    pub fn record_result(&mut self, code_length: usize, guesses: u32) -> Result<RecordFeedback> {
        if code_length < MIN_CODE_LENGTH {
            return Err(CodebreakerError::InvalidCodeLength {
                length: code_length,
                minimum: MIN_CODE_LENGTH,
            });
        }
        if guesses == 0 {
            return Err(CodebreakerError::InvalidScore { guesses });
        }

        let (updated, feedback) = match self.entries.get(&code_length) {
            Some(prior) => {
                let updated = prior
                    .with_game(guesses)
                    .ok_or(CodebreakerError::LedgerOverflow { code_length })?;
                (updated, prior.assess(guesses))
            }
            None => (LedgerEntry::first(guesses), RecordFeedback::FirstGame),
        };

        tracing::debug!(
            code_length,
            guesses,
            games_played = updated.games_played,
            average = updated.average_score,
            "recorded round"
        );

        self.entries.insert(code_length, updated);
        Ok(feedback)
    }
}

impl FromIterator<(usize, LedgerEntry)> for StatisticsLedger {
    fn from_iter<I: IntoIterator<Item = (usize, LedgerEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
