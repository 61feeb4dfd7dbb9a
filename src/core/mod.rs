//! Core game logic for codebreaker.
//!
//! Digit sequences, the two-pass scorer and the statistics ledger. Nothing
//! in here touches the filesystem or the terminal.

pub mod code;
pub mod ledger;
pub mod scorer;

pub use code::{is_numeric, Code, Digits, Guess};
pub use ledger::{LedgerEntry, RecordFeedback, StatisticsLedger};
pub use scorer::{score, score_digits, ScoreResult};
