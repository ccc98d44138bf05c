//! Pure chat classifier
//!
//! Checks run in a fixed order and the first failing check decides the
//! verdict:
//!
//! 1. empty after trimming        -> `NoMessage`
//! 2. too soon after the last one -> `TooFast`
//! 3. longer than the maximum     -> `TooLong`
//! 4. mostly capital letters      -> `Capslock`
//! 5. mostly special characters   -> `TooManySpecials`
//! 6. too few words for its size  -> `NotEnoughSpaces`
//! 7. same as the previous one    -> `Repeat`
//! 8. same words as a recent one  -> `RepeatWords`
//! 9. shadow-banned or flooding   -> `Dropped`

use std::collections::HashSet;
use std::time::Instant;

use super::config::FilterConfig;
use super::state::ModerationState;
use super::verdict::{DropReason, RejectReason, Verdict};

/// Stateless classifier over a participant's [`ModerationState`]
#[derive(Debug, Clone)]
pub struct ChatFilter {
    config: FilterConfig,
    shadow_ban_patterns: Vec<String>,
}

impl ChatFilter {
    /// Build a filter over `config`
    ///
    /// An invalid config is logged and used as-is; zero thresholds disable
    /// the checks that would divide by them.
    pub fn new(config: FilterConfig) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "Chat filter built from invalid config");
        }
        let shadow_ban_patterns = config
            .shadow_ban_patterns
            .iter()
            .map(|p| p.to_lowercase())
            .filter(|p| !p.is_empty())
            .collect();
        Self {
            config,
            shadow_ban_patterns,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Classify `text` against `state` as of `now`
    ///
    /// Returns the verdict together with the state to keep. A rejected
    /// message yields an unchanged copy of `state`.
    pub fn classify(
        &self,
        state: &ModerationState,
        text: &str,
        now: Instant,
    ) -> (Verdict, ModerationState) {
        let message = text.trim();
        let mut next = state.clone();

        match self.check(state, message, now) {
            Err(reason) => (Verdict::Rejected(reason), next),
            Ok(verdict) => {
                next.record(
                    message,
                    now,
                    self.config.history_size,
                    self.config.flood_window(),
                );
                (verdict, next)
            }
        }
    }

    fn check(
        &self,
        state: &ModerationState,
        message: &str,
        now: Instant,
    ) -> Result<Verdict, RejectReason> {
        if message.is_empty() {
            return Err(RejectReason::NoMessage);
        }

        if let Some(last) = state.last_message_at() {
            if now.saturating_duration_since(last) < self.config.min_interval() {
                return Err(RejectReason::TooFast);
            }
        }

        let length = message.chars().count();
        if length > self.config.max_length {
            return Err(RejectReason::TooLong);
        }
        if self.is_shouting(message, length) {
            return Err(RejectReason::Capslock);
        }
        if self.has_too_many_specials(message, length) {
            return Err(RejectReason::TooManySpecials);
        }
        if self.lacks_spaces(message, length) {
            return Err(RejectReason::NotEnoughSpaces);
        }

        if state.last_message() == Some(message) {
            return Err(RejectReason::Repeat);
        }

        // Messages with no words (emoji, bare punctuation) only fall under
        // the exact `Repeat` check.
        let words = normalized_words(message);
        if !words.is_empty()
            && (state.history().any(|prior| normalized_words(prior) == words)
                || self.repeats_words(&words))
        {
            return Err(RejectReason::RepeatWords);
        }

        if self.is_shadow_banned(message) {
            return Ok(Verdict::Dropped(DropReason::ShadowBanned));
        }

        // Count this message as well.
        let rate = state.messages_within(self.config.flood_window(), now) + 1;
        if rate >= self.config.flood_count {
            return Ok(Verdict::Dropped(DropReason::Flood));
        }

        Ok(Verdict::Accepted)
    }

    fn is_shouting(&self, message: &str, length: usize) -> bool {
        if length < self.config.capslock_min_length {
            return false;
        }
        let (letters, upper) = message
            .chars()
            .filter(|c| c.is_alphabetic())
            .fold((0usize, 0usize), |(letters, upper), c| {
                (letters + 1, upper + usize::from(c.is_uppercase()))
            });
        letters > 0 && upper as f64 / letters as f64 > self.config.capslock_ratio
    }

    fn has_too_many_specials(&self, message: &str, length: usize) -> bool {
        if length < self.config.specials_min_length {
            return false;
        }
        let specials = message
            .chars()
            .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
            .count();
        specials as f64 / length as f64 > self.config.specials_ratio
    }

    fn lacks_spaces(&self, message: &str, length: usize) -> bool {
        if length < self.config.spaces_min_length {
            return false;
        }
        match length.checked_div(self.config.chars_per_word) {
            Some(expected) => message.split_whitespace().count() < expected,
            None => false,
        }
    }

    fn repeats_words(&self, words: &[String]) -> bool {
        if words.len() < self.config.repeat_words_min_words {
            return false;
        }
        let distinct: HashSet<&str> = words.iter().map(String::as_str).collect();
        (distinct.len() as f64 / words.len() as f64) < self.config.repeat_words_ratio
    }

    fn is_shadow_banned(&self, message: &str) -> bool {
        if self.shadow_ban_patterns.is_empty() {
            return false;
        }
        let lowered = message.to_lowercase();
        self.shadow_ban_patterns
            .iter()
            .any(|pattern| lowered.contains(pattern.as_str()))
    }
}

/// Lower-cased words with surrounding punctuation stripped
fn normalized_words(message: &str) -> Vec<String> {
    message
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}
