//! Configuration loading for codebreaker.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. User config (`~/.codebreaker.toml`)
//! 3. Defaults (lowest priority)
//!
//! All configuration is optional. The game runs with sensible defaults
//! when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CodebreakerError, Result};

/// Name of the history file written into the codebreaker home directory.
pub const DEFAULT_HISTORY_FILE: &str = "CODEBREAKER.history";

/// Name of the user config file inside the codebreaker home directory.
pub const CONFIG_FILE: &str = ".codebreaker.toml";

/// Name of the crash log inside the codebreaker home directory.
pub const CRASH_LOG_FILE: &str = ".codebreaker-crash.log";

/// The shortest code the game will ever generate.
pub const MIN_CODE_LENGTH: usize = 2;

/// The longest code the game will ever generate.
pub const MAX_CODE_LENGTH: usize = 64;

/// Main configuration struct for codebreaker.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Gameplay configuration.
    pub game: GameConfig,
}

/// Gameplay configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Smallest code length the player may choose.
    pub min_code_length: usize,
    /// Largest code length the player may choose.
    pub max_code_length: usize,
    /// Print the secret code when a round starts (debugging aid).
    pub show_code: bool,
    /// File name of the history ledger, relative to the codebreaker home.
    pub history_file: String,
}

impl GameConfig {
    /// Check if a minimum code length is valid (must be >= 2).
    pub fn is_valid_min_code_length(value: usize) -> bool {
        value >= MIN_CODE_LENGTH
    }

    /// Check if a maximum code length is valid (must be in 2..=64).
    pub fn is_valid_max_code_length(value: usize) -> bool {
        (MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&value)
    }

    /// Check if a history file name is usable.
    ///
    /// Must be a bare, non-empty file name; directories are not allowed.
    pub fn is_valid_history_file(value: &str) -> bool {
        !value.trim().is_empty()
            && Path::new(value).file_name().and_then(|n| n.to_str()) == Some(value)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_code_length: MIN_CODE_LENGTH,
            max_code_length: MAX_CODE_LENGTH,
            show_code: false,
            history_file: DEFAULT_HISTORY_FILE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration with full precedence chain.
    pub fn load() -> Self {
        match codebreaker_home() {
            Some(home) => Self::load_from_home(&home),
            None => {
                let mut config = Config::default();
                config.apply_env_overrides();
                config.check_code_length_range();
                config
            }
        }
    }

    /// Load configuration using a specific home directory.
    pub fn load_from_home(home: &Path) -> Self {
        let mut config = match Self::load_from_file(&home.join(CONFIG_FILE)) {
            Ok(config) => config,
            Err(CodebreakerError::Storage { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Config::default()
            }
            Err(e) => {
                tracing::warn!("ignoring user config: {}", e);
                Config::default()
            }
        };

        config.validate();
        config.apply_env_overrides();
        config.check_code_length_range();
        config
    }

    /// Load config from a specific file path.
    fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| CodebreakerError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| CodebreakerError::config(e.to_string()))
    }

    /// Reset file-provided values that fail validation.
    fn validate(&mut self) {
        let defaults = GameConfig::default();
        if !GameConfig::is_valid_min_code_length(self.game.min_code_length) {
            tracing::warn!(
                value = self.game.min_code_length,
                "min_code_length must be at least {}, using default",
                MIN_CODE_LENGTH
            );
            self.game.min_code_length = defaults.min_code_length;
        }
        if !GameConfig::is_valid_max_code_length(self.game.max_code_length) {
            tracing::warn!(
                value = self.game.max_code_length,
                "max_code_length must be between {} and {}, using default",
                MIN_CODE_LENGTH,
                MAX_CODE_LENGTH
            );
            self.game.max_code_length = defaults.max_code_length;
        }
        if !GameConfig::is_valid_history_file(&self.game.history_file) {
            tracing::warn!(
                value = %self.game.history_file,
                "history_file must be a plain file name, using default"
            );
            self.game.history_file = defaults.history_file;
        }
    }

    /// Fall back to the shortest minimum when it exceeds the maximum.
    fn check_code_length_range(&mut self) {
        if self.game.min_code_length > self.game.max_code_length {
            tracing::warn!(
                min = self.game.min_code_length,
                max = self.game.max_code_length,
                "min_code_length exceeds max_code_length, using {}",
                MIN_CODE_LENGTH
            );
            self.game.min_code_length = MIN_CODE_LENGTH;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // CODEBREAKER_MIN_CODE_LENGTH
        if let Ok(val) = env::var("CODEBREAKER_MIN_CODE_LENGTH") {
            match val.parse::<usize>() {
                Ok(n) if GameConfig::is_valid_min_code_length(n) => {
                    self.game.min_code_length = n;
                }
                _ => tracing::warn!(
                    "Invalid CODEBREAKER_MIN_CODE_LENGTH value '{}'. \
                    Expected an integer >= {}. Using '{}'.",
                    val,
                    MIN_CODE_LENGTH,
                    self.game.min_code_length
                ),
            }
        }

        // CODEBREAKER_MAX_CODE_LENGTH
        if let Ok(val) = env::var("CODEBREAKER_MAX_CODE_LENGTH") {
            match val.parse::<usize>() {
                Ok(n) if GameConfig::is_valid_max_code_length(n) => {
                    self.game.max_code_length = n;
                }
                _ => tracing::warn!(
                    "Invalid CODEBREAKER_MAX_CODE_LENGTH value '{}'. \
                    Expected an integer from {} to {}. Using '{}'.",
                    val,
                    MIN_CODE_LENGTH,
                    MAX_CODE_LENGTH,
                    self.game.max_code_length
                ),
            }
        }

        // CODEBREAKER_SHOW_CODE
        if let Ok(val) = env::var("CODEBREAKER_SHOW_CODE") {
            match val.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.game.show_code = true,
                "0" | "false" | "no" => self.game.show_code = false,
                _ => tracing::warn!(
                    "Invalid CODEBREAKER_SHOW_CODE value '{}'. Expected true or false.",
                    val
                ),
            }
        }

        // CODEBREAKER_HISTORY_FILE
        if let Ok(val) = env::var("CODEBREAKER_HISTORY_FILE") {
            if GameConfig::is_valid_history_file(&val) {
                self.game.history_file = val;
            } else {
                tracing::warn!(
                    "Invalid CODEBREAKER_HISTORY_FILE value '{}'. \
                    Expected a plain file name. Using '{}'.",
                    val,
                    self.game.history_file
                );
            }
        }
    }

    /// Full path of the history ledger for this configuration.
    pub fn history_path(&self) -> Option<PathBuf> {
        codebreaker_home().map(|h| h.join(&self.game.history_file))
    }
}

/// Get the codebreaker home directory.
///
/// Checks `CODEBREAKER_HOME` first, then falls back to the user's home
/// directory. An empty `CODEBREAKER_HOME` is ignored.
pub fn codebreaker_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("CODEBREAKER_HOME") {
        if home.is_empty() {
            tracing::warn!("CODEBREAKER_HOME is empty, using default");
        } else {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            if let Ok(canonical) = path.canonicalize() {
                return Some(canonical);
            }
            tracing::warn!("CODEBREAKER_HOME is relative and doesn't exist, using as-is");
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        return Some(home);
    }

    let fallback_path = env::temp_dir();
    tracing::warn!(
        "HOME not set, using fallback location: {}",
        fallback_path.display()
    );
    Some(fallback_path)
}

/// Get the crash log path.
pub fn crash_log_path() -> Option<PathBuf> {
    codebreaker_home().map(|h| h.join(CRASH_LOG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn clear_env() {
        env::remove_var("CODEBREAKER_MIN_CODE_LENGTH");
        env::remove_var("CODEBREAKER_MAX_CODE_LENGTH");
        env::remove_var("CODEBREAKER_SHOW_CODE");
        env::remove_var("CODEBREAKER_HISTORY_FILE");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.game.min_code_length, 2);
        assert_eq!(config.game.max_code_length, 64);
        assert!(!config.game.show_code);
        assert_eq!(config.game.history_file, "CODEBREAKER.history");
    }

    #[test]
    fn test_is_valid_max_code_length() {
        assert!(GameConfig::is_valid_max_code_length(2));
        assert!(GameConfig::is_valid_max_code_length(64));
        assert!(!GameConfig::is_valid_max_code_length(1));
        assert!(!GameConfig::is_valid_max_code_length(65));
        assert!(!GameConfig::is_valid_max_code_length(usize::MAX));
    }

    #[test]
    fn test_is_valid_history_file() {
        assert!(GameConfig::is_valid_history_file("CODEBREAKER.history"));
        assert!(!GameConfig::is_valid_history_file(""));
        assert!(!GameConfig::is_valid_history_file("   "));
        assert!(!GameConfig::is_valid_history_file("nested/history"));
        assert!(!GameConfig::is_valid_history_file(".."));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE);
        fs::write(
            &config_path,
            r#"
[game]
min_code_length = 4
show_code = true
"#,
        )
        .unwrap();

        let config = Config::load_from_file(&config_path).unwrap();
        assert_eq!(config.game.min_code_length, 4);
        assert!(config.game.show_code);
        assert_eq!(config.game.history_file, DEFAULT_HISTORY_FILE);
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join(CONFIG_FILE);
        fs::write(&config_path, "this is not valid toml [[[").unwrap();

        let result = Config::load_from_file(&config_path);
        assert!(matches!(result, Err(CodebreakerError::Config { .. })));
    }

    #[test]
    #[serial]
    fn test_load_from_home_missing_file_uses_defaults() {
        clear_env();
        let dir = TempDir::new().unwrap();

        let config = Config::load_from_home(dir.path());
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_load_from_home_rejects_invalid_values() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"
[game]
min_code_length = 1
max_code_length = 100000
history_file = "a/b"
"#,
        )
        .unwrap();

        let config = Config::load_from_home(dir.path());
        assert_eq!(config.game.min_code_length, 2);
        assert_eq!(config.game.max_code_length, MAX_CODE_LENGTH);
        assert_eq!(config.game.history_file, DEFAULT_HISTORY_FILE);
    }

    #[test]
    #[serial]
    fn test_min_above_max_falls_back() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[game]\nmin_code_length = 10\nmax_code_length = 6\n",
        )
        .unwrap();

        let config = Config::load_from_home(dir.path());
        assert_eq!(config.game.min_code_length, MIN_CODE_LENGTH);
        assert_eq!(config.game.max_code_length, 6);
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[game]\nmin_code_length = 3\n",
        )
        .unwrap();

        env::set_var("CODEBREAKER_MIN_CODE_LENGTH", "5");
        env::set_var("CODEBREAKER_MAX_CODE_LENGTH", "12");
        env::set_var("CODEBREAKER_SHOW_CODE", "yes");
        env::set_var("CODEBREAKER_HISTORY_FILE", "alt.history");

        let config = Config::load_from_home(dir.path());
        clear_env();

        assert_eq!(config.game.min_code_length, 5);
        assert_eq!(config.game.max_code_length, 12);
        assert!(config.game.show_code);
        assert_eq!(config.game.history_file, "alt.history");
    }

    #[test]
    #[serial]
    fn test_invalid_env_values_ignored() {
        clear_env();
        let dir = TempDir::new().unwrap();

        env::set_var("CODEBREAKER_MIN_CODE_LENGTH", "1");
        env::set_var("CODEBREAKER_MAX_CODE_LENGTH", "18446744073709551615");
        env::set_var("CODEBREAKER_SHOW_CODE", "maybe");
        env::set_var("CODEBREAKER_HISTORY_FILE", "../escape");

        let config = Config::load_from_home(dir.path());
        clear_env();

        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_codebreaker_home_with_env() {
        let dir = TempDir::new().unwrap();
        env::set_var("CODEBREAKER_HOME", dir.path().to_str().unwrap());

        let home = codebreaker_home().unwrap();
        assert_eq!(home, dir.path());

        env::remove_var("CODEBREAKER_HOME");
    }

    #[test]
    #[serial]
    fn test_codebreaker_home_empty_env_falls_back() {
        env::set_var("CODEBREAKER_HOME", "");

        let home = codebreaker_home();
        assert!(home.is_some());
        assert_ne!(home.unwrap(), PathBuf::from(""));

        env::remove_var("CODEBREAKER_HOME");
    }

    #[test]
    #[serial]
    fn test_history_path_uses_home_and_file_name() {
        let dir = TempDir::new().unwrap();
        env::set_var("CODEBREAKER_HOME", dir.path().to_str().unwrap());

        let config = Config::default();
        let path = config.history_path().unwrap();
        assert_eq!(path, dir.path().join("CODEBREAKER.history"));
        assert_eq!(
            crash_log_path().unwrap(),
            dir.path().join(".codebreaker-crash.log")
        );

        env::remove_var("CODEBREAKER_HOME");
    }
}
