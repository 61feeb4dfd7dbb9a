//! One game session: the ledger, its store, and the rounds played against it.

use std::io::{BufRead, Write};

use rand::Rng;

use crate::config::Config;
use crate::core::{score, Code, Digits, RecordFeedback, StatisticsLedger};
use crate::error::Result;
use crate::session::display;
use crate::session::input::Prompter;
use crate::storage::LedgerStore;

/// Result of a completed round.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundOutcome {
    /// Length of the code that was cracked.
    pub code_length: usize,
    /// Guesses it took, including the winning one.
    pub guesses: u32,
    /// How the result compared with the player's history.
    pub feedback: RecordFeedback,
    /// Whether the updated ledger reached the store.
    pub saved: bool,
}

/// A player's session.
///
/// Owns the ledger for the life of the process. The ledger is loaded once
/// when the session starts and saved after every won round.
pub struct Session<S> {
    store: S,
    ledger: StatisticsLedger,
    min_code_length: usize,
    max_code_length: usize,
    show_code: bool,
}

impl<S: LedgerStore> Session<S> {
    /// Start a session, loading the ledger from `store`.
    ///
    /// An unreadable store yields an empty ledger and a warning.
    pub fn new(store: S, config: &Config) -> Self {
        let ledger = store.load_or_empty();
        tracing::debug!(entries = ledger.len(), "session started");
        Self {
            store,
            ledger,
            min_code_length: config.game.min_code_length,
            max_code_length: config.game.max_code_length,
            show_code: config.game.show_code,
        }
    }

    /// The in-memory ledger.
    pub fn ledger(&self) -> &StatisticsLedger {
        &self.ledger
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Play a round with a code drawn from the thread-local RNG.
    pub fn play_round<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
    ) -> Result<RoundOutcome> {
        self.play_round_with(prompter, &mut rand::thread_rng())
    }

    /// Play a round with a code drawn from `rng`.
    pub fn play_round_with<R: BufRead, W: Write, G: Rng + ?Sized>(
        &mut self,
        prompter: &mut Prompter<R, W>,
        rng: &mut G,
    ) -> Result<RoundOutcome> {
        let code_length = prompter.code_length(self.min_code_length, self.max_code_length)?;
        writeln!(
            prompter.output(),
            "{}",
            display::history_summary(code_length, self.ledger.get(code_length))
        )?;

        let code = Digits::generate(code_length, rng);
        self.play_code(prompter, &code)
    }

    /// Play a round against a known code.
    ///
    /// Guesses are read until one matches; the result is then recorded and
    /// saved. A failed save is only a warning.
    pub fn play_code<R: BufRead, W: Write>(
        &mut self,
        prompter: &mut Prompter<R, W>,
        code: &Code,
    ) -> Result<RoundOutcome> {
        let code_length = code.len();
        if self.show_code {
            writeln!(prompter.output(), "{}", code)?;
        }

        let mut guesses: u32 = 0;
        loop {
            guesses += 1;
            let guess = prompter.guess(code_length)?;
            let result = score(code, &guess)?;

            if result.is_win(code_length) {
                break;
            }
            writeln!(
                prompter.output(),
                "{}",
                display::render_feedback(&result, code_length)
            )?;
        }

        writeln!(prompter.output(), "{}", display::win_message(guesses))?;

        let (feedback, saved) = self.finish_round(code_length, guesses)?;
        if let Some(message) = display::record_message(&feedback, code_length, guesses) {
            writeln!(prompter.output(), "{}", message)?;
        }
        if !saved {
            writeln!(prompter.output(), "Uh oh, the history file couldn't be updated")?;
        }

        Ok(RoundOutcome {
            code_length,
            guesses,
            feedback,
            saved,
        })
    }

    /// Record a won round in the ledger and persist it.
    ///
    /// Returns the feedback and whether the save succeeded. The in-memory
    /// ledger keeps the update either way. A result the loaded history
    /// cannot absorb is logged and reported as unsaved.
    pub fn finish_round(
        &mut self,
        code_length: usize,
        guesses: u32,
    ) -> Result<(RecordFeedback, bool)> {
        let feedback = match self.ledger.record_result(code_length, guesses) {
            Ok(feedback) => feedback,
            Err(e) if e.is_fail_open() => {
                tracing::warn!("round not recorded: {}", e);
                return Ok((RecordFeedback::Ordinary, false));
            }
            Err(e) => return Err(e),
        };
        let saved = self.store.save_or_warn(&self.ledger);
        Ok((feedback, saved))
    }
}
