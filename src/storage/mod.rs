//! Ledger storage for codebreaker.
//!
//! This module persists the statistics ledger, with a flat-file backend for
//! real play and an in-memory backend for tests.

pub mod file;
pub mod memory;
pub mod traits;

pub use file::{format_history, parse_history, FileLedgerStore};
pub use memory::MemoryLedgerStore;
pub use traits::LedgerStore;
