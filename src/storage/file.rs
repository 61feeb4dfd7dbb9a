//! File-based ledger storage for codebreaker.
//!
//! The history file holds one line per code length:
//!
//! ```text
//! codeLength:gamesPlayed:bestScore:averageScore
//! ```
//!
//! with no header. Every save rewrites the whole file via temp file +
//! rename.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::core::{LedgerEntry, StatisticsLedger};
use crate::error::{CodebreakerError, Result};
use crate::storage::LedgerStore;
use crate::util::read_to_string_limited;

/// File-based ledger storage.
#[derive(Debug, Clone)]
pub struct FileLedgerStore {
    /// Path of the history file.
    path: PathBuf,
}

impl FileLedgerStore {
    /// Create a store at the history path named by `config`.
    pub fn new(config: &Config) -> Result<Self> {
        let path = config.history_path().ok_or_else(|| {
            CodebreakerError::config(
                "Could not determine history file location (no home directory)",
            )
        })?;
        Ok(Self::with_path(path))
    }

    /// Create a store backed by a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the history file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the temp file used during atomic writes.
    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path.with_file_name(format!(".{}.tmp", name))
    }

    fn atomic_write(&self, content: &str) -> Result<()> {
        let temp_path = self.temp_path();

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| CodebreakerError::storage(&temp_path, e))?;
            file.write_all(content.as_bytes())
                .map_err(|e| CodebreakerError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| CodebreakerError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &self.path).map_err(|e| CodebreakerError::storage(&self.path, e))
    }
}

impl LedgerStore for FileLedgerStore {
    fn load(&self) -> Result<StatisticsLedger> {
        if !self.path.exists() {
            // Leave an empty history behind so the next save has a file to replace.
            if let Err(e) = fs::File::create(&self.path) {
                tracing::warn!(
                    path = %self.path.display(),
                    "could not create a history file: {}",
                    e
                );
            }
            return Ok(StatisticsLedger::new());
        }

        let content = read_to_string_limited(&self.path)?;
        parse_history(&content)
    }

    fn save(&self, ledger: &StatisticsLedger) -> Result<()> {
        self.atomic_write(&format_history(ledger))?;
        tracing::debug!(path = %self.path.display(), entries = ledger.len(), "saved history");
        Ok(())
    }
}

/// Parse the contents of a history file.
///
/// Blank lines are skipped. Any other line that is not four `:`-separated
/// numbers, with positive counts and a finite non-negative average, fails
/// the whole parse. A repeated code length keeps the last line.
pub fn parse_history(content: &str) -> Result<StatisticsLedger> {
    let mut entries = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        entries.push(parse_line(index + 1, line)?);
    }

    Ok(entries.into_iter().collect())
}

fn parse_line(line_no: usize, line: &str) -> Result<(usize, LedgerEntry)> {
    let fields: Vec<&str> = line.split(':').map(str::trim).collect();
    let &[code_length, games_played, best_score, average_score] = fields.as_slice() else {
        return Err(CodebreakerError::parse(
            line_no,
            format!("expected 4 fields, found {}", fields.len()),
        ));
    };

    let code_length = parse_field::<usize>(line_no, "code length", code_length)?;
    let games_played = parse_field::<u32>(line_no, "games played", games_played)?;
    let best_score = parse_field::<u32>(line_no, "best score", best_score)?;
    let average_score = parse_field::<f64>(line_no, "average score", average_score)?;

    if games_played == 0 {
        return Err(CodebreakerError::parse(line_no, "games played must be positive"));
    }
    if best_score == 0 {
        return Err(CodebreakerError::parse(line_no, "best score must be positive"));
    }
    if !average_score.is_finite() || average_score < 0.0 {
        return Err(CodebreakerError::parse(
            line_no,
            format!("average score {} is not a non-negative number", average_score),
        ));
    }

    Ok((
        code_length,
        LedgerEntry {
            games_played,
            best_score,
            average_score,
        },
    ))
}

fn parse_field<T: std::str::FromStr>(line_no: usize, name: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| CodebreakerError::parse(line_no, format!("invalid {}: {:?}", name, value)))
}

/// Render a ledger in history file format.
///
/// `f64` values use the shortest representation that parses back to the
/// same value.
pub fn format_history(ledger: &StatisticsLedger) -> String {
    let mut out = String::new();
    for (code_length, entry) in ledger.iter() {
        out.push_str(&format!(
            "{}:{}:{}:{}\n",
            code_length, entry.games_played, entry.best_score, entry.average_score
        ));
    }
    out
}
