//! Digit sequences used for secret codes and guesses.

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::{CodebreakerError, Result};

/// An ordered, immutable sequence of the digits 0-9.
///
/// Both the secret code and each guess are `Digits`. Leading zeros are
/// significant: `007` and `700` are different codes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Digits(Vec<u8>);

/// The secret sequence generated for one round.
pub type Code = Digits;

/// One attempt by the player to reproduce the code.
pub type Guess = Digits;

impl Digits {
    /// Parse a string made only of ASCII digits.
    ///
    /// Empty input and any non-digit character are rejected.
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() || !is_numeric(input) {
            return Err(CodebreakerError::invalid_digits(input));
        }
        Ok(Self(input.bytes().map(|b| b - b'0').collect()))
    }

    /// Generate `length` digits, each drawn uniformly from 0-9.
    pub fn generate<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Self {
        Self((0..length).map(|_| rng.gen_range(0..10u8)).collect())
    }

    /// Number of digits.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the sequence has no digits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The digits as values in `0..=9`.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Digits {
    type Err = CodebreakerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Digits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// Returns true if every character of `s` is an ASCII digit.
///
/// Vacuously true for the empty string.
pub fn is_numeric(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
