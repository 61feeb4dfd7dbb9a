//! Unified error types for codebreaker.
//!
//! Persistence problems are never allowed to end a game. Storage, parse,
//! config and ledger overflow errors are "fail-open": callers log a warning
//! and carry on with a safe default (usually an empty ledger). Everything
//! else is either a programmer error (a mismatched scorer call) or the
//! terminal going away.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for codebreaker operations.
#[derive(Error, Debug)]
pub enum CodebreakerError {
    /// I/O errors while reading or writing the history file.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A history line that does not have the `L:N:B:A` shape.
    #[error("malformed history line {line}: {message}")]
    Parse { line: usize, message: String },

    /// JSON serialization errors from `stats --json`.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// The scorer was handed a code and a guess of different lengths.
    #[error("code has {code_len} digits but guess has {guess_len}")]
    LengthMismatch { code_len: usize, guess_len: usize },

    /// Text that is not made only of the digits 0-9.
    #[error("not a digit sequence: {input:?}")]
    InvalidDigits { input: String },

    /// A code length below the configured minimum.
    #[error("code length {length} is below the minimum of {minimum}")]
    InvalidCodeLength { length: usize, minimum: usize },

    /// A round result that cannot have come from a won round.
    #[error("invalid score: {guesses} guesses")]
    InvalidScore { guesses: u32 },

    /// The games played counter for a length cannot be incremented.
    #[error("games played at code length {code_length} cannot grow any further")]
    LedgerOverflow { code_length: usize },

    /// The player's input stream reached end-of-file.
    #[error("input closed")]
    InputClosed,

    /// Errors reading from or writing to the terminal.
    #[error("terminal error: {source}")]
    Terminal {
        #[source]
        source: io::Error,
    },
}

/// A specialized Result type for codebreaker operations.
pub type Result<T> = std::result::Result<T, CodebreakerError>;

impl CodebreakerError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error for a 1-based line number.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a length mismatch error.
    pub fn length_mismatch(code_len: usize, guess_len: usize) -> Self {
        Self::LengthMismatch {
            code_len,
            guess_len,
        }
    }

    /// Create an invalid digits error.
    pub fn invalid_digits(input: impl Into<String>) -> Self {
        Self::InvalidDigits {
            input: input.into(),
        }
    }

    /// Check if this error should trigger fail-open behavior.
    ///
    /// Only persistence, configuration and ledger overflow errors qualify.
    /// A length mismatch is a bug and a closed terminal ends the session.
    pub fn is_fail_open(&self) -> bool {
        matches!(
            self,
            Self::Storage { .. }
                | Self::Parse { .. }
                | Self::Config { .. }
                | Self::LedgerOverflow { .. }
        )
    }
}

impl From<io::Error> for CodebreakerError {
    fn from(err: io::Error) -> Self {
        Self::Terminal { source: err }
    }
}

impl From<serde_json::Error> for CodebreakerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-open error handling.
///
/// Log the error as a warning and return a safe value instead of
/// propagating it.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Process exit codes for the codebreaker binary.
pub mod exit_codes {
    /// Normal exit, including the player quitting or closing input.
    pub const SUCCESS: i32 = 0;

    /// A fatal, non-fail-open error ended the process.
    pub const FAILURE: i32 = 1;

    /// The process panicked.
    pub const CRASH: i32 = 3;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_display() {
        let err = CodebreakerError::storage(
            "/tmp/CODEBREAKER.history",
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        );
        assert!(err.to_string().contains("storage error"));
        assert!(err.to_string().contains("/tmp/CODEBREAKER.history"));
    }

    #[test]
    fn test_parse_error_display() {
        let err = CodebreakerError::parse(3, "expected 4 fields, found 2");
        assert_eq!(
            err.to_string(),
            "malformed history line 3: expected 4 fields, found 2"
        );
    }

    #[test]
    fn test_length_mismatch_display() {
        let err = CodebreakerError::length_mismatch(4, 3);
        assert_eq!(err.to_string(), "code has 4 digits but guess has 3");
    }

    #[test]
    fn test_invalid_code_length_display() {
        let err = CodebreakerError::InvalidCodeLength {
            length: 1,
            minimum: 2,
        };
        assert_eq!(err.to_string(), "code length 1 is below the minimum of 2");
    }

    #[test]
    fn test_config_error_display() {
        let err = CodebreakerError::config("invalid TOML");
        assert_eq!(err.to_string(), "config error: invalid TOML");
    }

    #[test]
    fn test_is_fail_open() {
        let fail_open = vec![
            CodebreakerError::storage("/x", io::Error::other("boom")),
            CodebreakerError::parse(1, "bad"),
            CodebreakerError::config("bad"),
            CodebreakerError::LedgerOverflow { code_length: 4 },
        ];
        for err in fail_open {
            assert!(err.is_fail_open(), "{} should be fail-open", err);
        }

        let fatal = vec![
            CodebreakerError::length_mismatch(2, 3),
            CodebreakerError::invalid_digits("12a"),
            CodebreakerError::InvalidScore { guesses: 0 },
            CodebreakerError::InputClosed,
            CodebreakerError::Serde {
                message: "bad".to_string(),
            },
        ];
        for err in fatal {
            assert!(!err.is_fail_open(), "{} should not be fail-open", err);
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: CodebreakerError = io_err.into();
        assert!(matches!(err, CodebreakerError::Terminal { .. }));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid").unwrap_err();
        let err: CodebreakerError = json_err.into();
        assert!(matches!(err, CodebreakerError::Serde { .. }));
        assert!(err.to_string().starts_with("serialization error: "));
    }

    #[test]
    fn test_fail_open_default() {
        let result: Result<Vec<u32>> = Err(CodebreakerError::parse(1, "bad"));
        let value = result.fail_open_default("test context");
        assert!(value.is_empty());
    }

    #[test]
    fn test_fail_open_with() {
        let result: Result<i32> = Err(CodebreakerError::config("bad"));
        let value = result.fail_open_with("test context", 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_fail_open_success() {
        let result: Result<i32> = Ok(100);
        let value = result.fail_open_default("test context");
        assert_eq!(value, 100);
    }
}
