//! Guess scoring.
//!
//! A guess is scored in two passes. The exact pass runs to completion
//! first; only positions it leaves unconsumed take part in the partial
//! pass. Each code digit and each guess digit is consumed at most once,
//! so repeated digits are never double-counted.

use crate::core::code::{Code, Guess};
use crate::error::{CodebreakerError, Result};

/// Outcome of scoring one guess against a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// Right digit in the right position.
    pub exact: usize,
    /// Right digit in the wrong position.
    pub partial: usize,
}

impl ScoreResult {
    /// Create a result from its two counts.
    pub fn new(exact: usize, partial: usize) -> Self {
        Self { exact, partial }
    }

    /// Whether this result means the guess reproduced a code of `code_length`.
    pub fn is_win(&self, code_length: usize) -> bool {
        self.exact == code_length
    }

    /// Positions matched by neither pass.
    pub fn misses(&self, code_length: usize) -> usize {
        code_length.saturating_sub(self.exact + self.partial)
    }
}

/// Score `guess` against `code`.
///
/// Returns `LengthMismatch` if the sequences differ in length.
pub fn score(code: &Code, guess: &Guess) -> Result<ScoreResult> {
    score_digits(code.as_slice(), guess.as_slice())
}

/// Score two raw digit slices. See [`score`].
pub fn score_digits(code: &[u8], guess: &[u8]) -> Result<ScoreResult> {
    if code.len() != guess.len() {
        return Err(CodebreakerError::length_mismatch(code.len(), guess.len()));
    }

    let mut code_used = vec![false; code.len()];
    let mut guess_used = vec![false; guess.len()];

    let mut exact = 0;
    for (i, (c, g)) in code.iter().zip(guess).enumerate() {
        if c == g {
            code_used[i] = true;
            guess_used[i] = true;
            exact += 1;
        }
    }

    let mut partial = 0;
    for (g, _) in guess.iter().zip(&guess_used).filter(|(_, used)| !**used) {
        let found = code
            .iter()
            .zip(code_used.iter_mut())
            .find(|(c, used)| !**used && *c == g);
        if let Some((_, used)) = found {
            *used = true;
            partial += 1;
        }
    }

    Ok(ScoreResult { exact, partial })
}
