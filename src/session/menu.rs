//! Top-level menu loop.

use std::io::{BufRead, Write};

use crate::error::{CodebreakerError, Result};
use crate::session::display;
use crate::session::input::Prompter;
use crate::session::round::Session;
use crate::storage::LedgerStore;

/// A main menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Instructions,
    Play,
    Stats,
    Quit,
}

impl MenuChoice {
    /// Parse a menu response. Surrounding whitespace and case are ignored.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "i" => Some(Self::Instructions),
            "p" => Some(Self::Play),
            "s" => Some(Self::Stats),
            "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Run the menu until the player quits or input ends.
///
/// Returns the number of rounds completed.
pub fn run_menu<S, R, W>(session: &mut Session<S>, prompter: &mut Prompter<R, W>) -> Result<u32>
where
    S: LedgerStore,
    R: BufRead,
    W: Write,
{
    writeln!(prompter.output(), "{}", display::TITLE)?;

    let mut rounds = 0;
    loop {
        writeln!(prompter.output(), "{}", display::menu())?;
        let response = match prompter.read_line("") {
            Ok(line) => line,
            Err(CodebreakerError::InputClosed) => break,
            Err(e) => return Err(e),
        };

        match MenuChoice::parse(&response) {
            Some(MenuChoice::Instructions) => {
                writeln!(prompter.output(), "{}", display::instructions())?;
            }
            Some(MenuChoice::Play) => match session.play_round(prompter) {
                Ok(_) => rounds += 1,
                Err(CodebreakerError::InputClosed) => break,
                Err(e) => return Err(e),
            },
            Some(MenuChoice::Stats) => {
                writeln!(
                    prompter.output(),
                    "{}",
                    display::ledger_table(session.ledger())
                )?;
            }
            Some(MenuChoice::Quit) => {
                writeln!(prompter.output(), "Ok bye!")?;
                break;
            }
            None => writeln!(prompter.output(), "I don't understand...")?,
        }
    }

    tracing::debug!(rounds, "menu closed");
    Ok(rounds)
}
