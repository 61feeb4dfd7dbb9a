//! CLI commands for codebreaker.
//!
//! - **play**: the interactive menu (default)
//! - **stats**: print the statistics ledger

pub mod play;
pub mod stats;

pub use play::{PlayCommand, PlayOptions};
pub use stats::{StatsCommand, StatsOptions, StatsOutput};
