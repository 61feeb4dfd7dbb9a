//! Line-oriented player input.
//!
//! Validation is a set of pure functions; [`Prompter`] wraps them in
//! retry-until-valid loops over any `BufRead`/`Write` pair, so tests can
//! drive a whole game from a byte buffer.

use std::fmt;
use std::io::{BufRead, Write};

use crate::core::{is_numeric, Digits, Guess};
use crate::error::{CodebreakerError, Result};

/// Why a line of player input was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    /// A code length that is not a whole number.
    NotANumber,
    /// A code length below the minimum.
    TooShort { minimum: usize },
    /// A code length above the maximum.
    TooLong { maximum: usize },
    /// A guess with the wrong number of characters.
    WrongLength { expected: usize },
    /// A guess containing something other than digits.
    NotNumeric,
}

impl fmt::Display for InputRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "You must enter a number"),
            Self::TooShort { minimum } => {
                write!(
                    f,
                    "You must choose a number greater than {}",
                    minimum.saturating_sub(1)
                )
            }
            Self::TooLong { maximum } => {
                write!(f, "You must choose a number no greater than {}", maximum)
            }
            Self::WrongLength { expected } => write!(f, "You must enter {} numbers", expected),
            Self::NotNumeric => write!(f, "The code may contain only numbers"),
        }
    }
}

/// Validate a requested code length against `minimum..=maximum`.
///
/// A digit string too large for `usize` is reported as too long.
pub fn validate_code_length(
    input: &str,
    minimum: usize,
    maximum: usize,
) -> std::result::Result<usize, InputRejection> {
    let input = input.trim();
    if input.is_empty() || !is_numeric(input) {
        return Err(InputRejection::NotANumber);
    }
    let length: usize = input
        .parse()
        .map_err(|_| InputRejection::TooLong { maximum })?;
    if length < minimum {
        return Err(InputRejection::TooShort { minimum });
    }
    if length > maximum {
        return Err(InputRejection::TooLong { maximum });
    }
    Ok(length)
}

/// Validate a guess for a code of `code_length` digits.
///
/// Length is checked before content.
pub fn validate_guess(
    input: &str,
    code_length: usize,
) -> std::result::Result<Guess, InputRejection> {
    let input = input.trim();
    if input.chars().count() != code_length {
        return Err(InputRejection::WrongLength {
            expected: code_length,
        });
    }
    Digits::parse(input).map_err(|_| InputRejection::NotNumeric)
}

/// Prompts the player and reads validated answers.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter over an input and an output stream.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// The output stream, for writing messages between prompts.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Consume the prompter, returning its streams.
    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }

    /// Write `prompt` and read one line, without its line terminator.
    ///
    /// Returns `InputClosed` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(CodebreakerError::InputClosed);
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Keep prompting until `validate` accepts a line.
    ///
    /// Each refusal is reported to the player before asking again.
    pub fn prompt_until<T, F>(&mut self, prompt: &str, validate: F) -> Result<T>
    where
        F: Fn(&str) -> std::result::Result<T, InputRejection>,
    {
        loop {
            let line = self.read_line(prompt)?;
            match validate(&line) {
                Ok(value) => return Ok(value),
                Err(rejection) => {
                    tracing::debug!(input = %line, ?rejection, "rejected input");
                    writeln!(self.output, "{}", rejection)?;
                }
            }
        }
    }

    /// Ask for a code length between `minimum` and `maximum`.
    pub fn code_length(&mut self, minimum: usize, maximum: usize) -> Result<usize> {
        self.prompt_until("How long do you want the code to be? ", |line| {
            validate_code_length(line, minimum, maximum)
        })
    }

    /// Ask for a guess of exactly `code_length` digits.
    pub fn guess(&mut self, code_length: usize) -> Result<Guess> {
        self.prompt_until("Guess the code: ", |line| validate_guess(line, code_length))
    }
}
