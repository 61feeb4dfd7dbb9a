//! Interactive play.
//!
//! Reading and validating player input, rendering feedback, running rounds
//! against the ledger, and the top-level menu.

pub mod display;
pub mod input;
pub mod menu;
pub mod round;

pub use input::{validate_code_length, validate_guess, InputRejection, Prompter};
pub use menu::{run_menu, MenuChoice};
pub use round::{RoundOutcome, Session};
