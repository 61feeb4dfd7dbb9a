//! Codebreaker - a numeric code-guessing game
//!
//! The machine picks a secret code of digits, the player guesses, and each
//! guess is scored by how many digits are right and in place versus right
//! but misplaced. A per-player ledger keeps games played, best score and
//! average score for every code length across sessions.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod session;
pub mod storage;
pub mod util;

pub use config::Config;
pub use crate::core::{
    score, Code, Digits, Guess, LedgerEntry, RecordFeedback, ScoreResult, StatisticsLedger,
};
pub use error::{CodebreakerError, Result};
pub use session::{run_menu, Prompter, RoundOutcome, Session};
pub use storage::{FileLedgerStore, LedgerStore, MemoryLedgerStore};

// CLI commands
pub use cli::{PlayCommand, StatsCommand};
