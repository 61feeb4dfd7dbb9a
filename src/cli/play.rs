//! Play command for codebreaker.
//!
//! Starts the interactive menu against the history file.

use std::io::{BufRead, Write};

use crate::config::Config;
use crate::error::Result;
use crate::session::{run_menu, Prompter, Session};
use crate::storage::LedgerStore;

/// Options for the play command.
#[derive(Debug, Clone, Default)]
pub struct PlayOptions {
    /// Print each secret code when its round starts.
    pub show_code: bool,
}

/// The play command implementation.
pub struct PlayCommand<S> {
    config: Config,
    store: S,
}

impl<S: LedgerStore> PlayCommand<S> {
    /// Create a new play command.
    pub fn new(config: Config, store: S) -> Self {
        Self { config, store }
    }

    /// Run the menu over the given streams.
    ///
    /// Returns the number of rounds completed.
    pub fn run<R: BufRead, W: Write>(
        self,
        options: &PlayOptions,
        input: R,
        output: W,
    ) -> Result<u32> {
        let mut config = self.config;
        if options.show_code {
            config.game.show_code = true;
        }

        let mut session = Session::new(self.store, &config);
        let mut prompter = Prompter::new(input, output);
        run_menu(&mut session, &mut prompter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryLedgerStore;
    use std::io::Cursor;

    #[test]
    fn test_play_quit() {
        let store = MemoryLedgerStore::new();
        let cmd = PlayCommand::new(Config::default(), &store);
        let mut out = Vec::new();

        let rounds = cmd
            .run(&PlayOptions::default(), Cursor::new(b"q\n".to_vec()), &mut out)
            .unwrap();

        assert_eq!(rounds, 0);
        assert!(String::from_utf8(out).unwrap().contains("Ok bye!"));
    }

    #[test]
    fn test_show_code_option_reveals_secret() {
        let store = MemoryLedgerStore::new();
        let cmd = PlayCommand::new(Config::default(), &store);
        let mut out = Vec::new();

        // Input ends at the first guess prompt, after the code is printed.
        cmd.run(
            &PlayOptions { show_code: true },
            Cursor::new(b"p\n2\n".to_vec()),
            &mut out,
        )
        .unwrap();

        let out = String::from_utf8(out).unwrap();
        let revealed = out
            .lines()
            .find(|line| line.len() == 2 && line.bytes().all(|b| b.is_ascii_digit()));
        assert!(revealed.is_some(), "secret not printed:\n{}", out);
    }
}
