//! Filter thresholds
//!
//! Every limit the classifier applies is a policy knob loaded from
//! configuration. The defaults below are starting values, not contract.

use serde::Deserialize;
use std::time::Duration;

/// Chat filter policy
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FilterConfig {
    /// Minimum time between two accepted messages from one participant
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
    /// Maximum message length in characters
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    /// Messages shorter than this are never checked for capitals
    #[serde(default = "default_capslock_min_length")]
    pub capslock_min_length: usize,
    /// Uppercase letters / all letters above which a message is shouting
    #[serde(default = "default_capslock_ratio")]
    pub capslock_ratio: f64,
    /// Messages shorter than this are never checked for special characters
    #[serde(default = "default_specials_min_length")]
    pub specials_min_length: usize,
    /// Special characters / all characters above which a message is refused
    #[serde(default = "default_specials_ratio")]
    pub specials_ratio: f64,
    /// Messages shorter than this are never checked for spaces
    #[serde(default = "default_spaces_min_length")]
    pub spaces_min_length: usize,
    /// A message needs at least `length / chars_per_word` words
    #[serde(default = "default_chars_per_word")]
    pub chars_per_word: usize,
    /// Number of recent messages remembered for repeat detection
    #[serde(default = "default_history_size")]
    pub history_size: usize,
    /// Word-repetition check only applies from this many words
    #[serde(default = "default_repeat_words_min_words")]
    pub repeat_words_min_words: usize,
    /// Distinct words / all words below which a message is refused
    #[serde(default = "default_repeat_words_ratio")]
    pub repeat_words_ratio: f64,
    /// Messages inside `flood_window_ms` (this one included) that trigger a drop
    #[serde(default = "default_flood_count")]
    pub flood_count: usize,
    #[serde(default = "default_flood_window_ms")]
    pub flood_window_ms: u64,
    /// Case-insensitive substrings that cause a silent drop
    #[serde(default)]
    pub shadow_ban_patterns: Vec<String>,
}

fn default_min_interval_ms() -> u64 {
    500
}

fn default_max_length() -> usize {
    200
}

fn default_capslock_min_length() -> usize {
    10
}

fn default_capslock_ratio() -> f64 {
    0.5
}

fn default_specials_min_length() -> usize {
    10
}

fn default_specials_ratio() -> f64 {
    0.5
}

fn default_spaces_min_length() -> usize {
    50
}

fn default_chars_per_word() -> usize {
    20
}

fn default_history_size() -> usize {
    5
}

fn default_repeat_words_min_words() -> usize {
    4
}

fn default_repeat_words_ratio() -> f64 {
    0.4
}

fn default_flood_count() -> usize {
    10
}

fn default_flood_window_ms() -> u64 {
    30_000
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
            max_length: default_max_length(),
            capslock_min_length: default_capslock_min_length(),
            capslock_ratio: default_capslock_ratio(),
            specials_min_length: default_specials_min_length(),
            specials_ratio: default_specials_ratio(),
            spaces_min_length: default_spaces_min_length(),
            chars_per_word: default_chars_per_word(),
            history_size: default_history_size(),
            repeat_words_min_words: default_repeat_words_min_words(),
            repeat_words_ratio: default_repeat_words_ratio(),
            flood_count: default_flood_count(),
            flood_window_ms: default_flood_window_ms(),
            shadow_ban_patterns: Vec::new(),
        }
    }
}

impl FilterConfig {
    #[inline]
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }

    #[inline]
    pub fn flood_window(&self) -> Duration {
        Duration::from_millis(self.flood_window_ms)
    }

    /// Reject configurations the classifier cannot work with
    pub fn validate(&self) -> Result<(), FilterConfigError> {
        if self.max_length == 0 {
            return Err(FilterConfigError::Zero("max_length"));
        }
        if self.chars_per_word == 0 {
            return Err(FilterConfigError::Zero("chars_per_word"));
        }
        if self.history_size == 0 {
            return Err(FilterConfigError::Zero("history_size"));
        }
        if self.flood_count == 0 {
            return Err(FilterConfigError::Zero("flood_count"));
        }
        for (name, ratio) in [
            ("capslock_ratio", self.capslock_ratio),
            ("specials_ratio", self.specials_ratio),
            ("repeat_words_ratio", self.repeat_words_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) || ratio == 0.0 {
                return Err(FilterConfigError::RatioOutOfRange(name, ratio));
            }
        }
        Ok(())
    }
}

/// Invalid filter configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must be in (0, 1], got {1}")]
    RatioOutOfRange(&'static str, f64),
}
