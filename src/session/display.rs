//! Text shown to the player.
//!
//! Every function here returns a `String` and writes nothing, so the
//! session decides where text goes and tests can compare it directly.

use crate::core::{LedgerEntry, RecordFeedback, ScoreResult, StatisticsLedger};

/// Game title printed at startup.
pub const TITLE: &str = "CODE⚡BREAKER";

/// Symbol for a right digit in the right position.
pub const FULL_MATCH: char = '★';

/// Symbol for a right digit in the wrong position.
pub const PARTIAL_MATCH: char = '☆';

/// Filler for positions that matched nothing.
pub const NO_MATCH: char = '-';

/// Render score feedback: full matches, then partial matches, then filler
/// up to `code_length` symbols.
pub fn render_feedback(result: &ScoreResult, code_length: usize) -> String {
    let mut out = String::with_capacity(code_length * FULL_MATCH.len_utf8());
    out.extend(std::iter::repeat(FULL_MATCH).take(result.exact));
    out.extend(std::iter::repeat(PARTIAL_MATCH).take(result.partial));
    out.extend(std::iter::repeat(NO_MATCH).take(result.misses(code_length)));
    out
}

/// How to play.
pub fn instructions() -> String {
    format!(
        "You select a code length.  The computer will pick a random numeric code of that \
         length.  You then try to guess the code.  On every guess, the computer will tell you \
         how many numbers in your guess are both the correct number and in the correct \
         position ({}) and how many are the correct number but not in the correct position \
         ({}).  Using this information, you should eventually be able to deduce the correct code!",
        FULL_MATCH, PARTIAL_MATCH
    )
}

/// The main menu.
pub fn menu() -> String {
    [
        "",
        "What do you want to do?",
        "(i) Show instructions",
        "(p) Play a game",
        "(s) Show statistics",
        "(q) Quit",
    ]
    .join("\n")
}

/// The player's record at a length, shown before a round starts.
pub fn history_summary(code_length: usize, entry: Option<&LedgerEntry>) -> String {
    match entry {
        Some(e) => format!(
            "The number of times you have tried codes of length {} is {}.  \
             Your average and best number of guesses are {:.2} and {}, respectively.",
            code_length, e.games_played, e.average_score, e.best_score
        ),
        None => format!("This is your first time trying a code of length {}", code_length),
    }
}

/// Announcement for a won round.
pub fn win_message(guesses: u32) -> String {
    format!("You cracked the code!  Number of guesses: {}", guesses)
}

/// Celebration for a recorded result, if it deserves one.
pub fn record_message(
    feedback: &RecordFeedback,
    code_length: usize,
    guesses: u32,
) -> Option<String> {
    match feedback {
        RecordFeedback::NewBest { .. } => Some(format!(
            "{} is a new best score for codes of length {}!",
            guesses, code_length
        )),
        RecordFeedback::BetterThanAverage { average } => Some(format!(
            "{} is better than your average score of {:.2} for codes of length {}!",
            guesses, average, code_length
        )),
        RecordFeedback::FirstGame | RecordFeedback::Ordinary => None,
    }
}

/// Table of every ledger entry.
pub fn ledger_table(ledger: &StatisticsLedger) -> String {
    if ledger.is_empty() {
        return "No games recorded yet.".to_string();
    }

    let mut lines = vec![format!(
        "{:>6}  {:>6}  {:>5}  {:>8}",
        "length", "games", "best", "average"
    )];
    for (code_length, entry) in ledger.iter() {
        lines.push(format!(
            "{:>6}  {:>6}  {:>5}  {:>8.2}",
            code_length, entry.games_played, entry.best_score, entry.average_score
        ));
    }
    lines.join("\n")
}
