//! Application configuration structs
//!
//! Loads configuration from environment variables and config files.

use chat_core::FilterConfig;
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub chat: ChatSettings,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub mailbox: MailboxConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_env")]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: default_env(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Global chat feature settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    /// When false only admins may use global chat
    #[serde(default = "default_global_chat_enabled")]
    pub global_chat_enabled: bool,
    /// How long a transport should hold a poll open
    #[serde(default = "default_poll_timeout_ms")]
    pub poll_timeout_ms: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            global_chat_enabled: default_global_chat_enabled(),
            poll_timeout_ms: default_poll_timeout_ms(),
        }
    }
}

impl ChatSettings {
    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

/// Per-participant mailbox settings
#[derive(Debug, Clone, Deserialize)]
pub struct MailboxConfig {
    /// Maximum undelivered events before the oldest is evicted
    #[serde(default = "default_mailbox_capacity")]
    pub capacity: usize,
}

impl Default for MailboxConfig {
    fn default() -> Self {
        Self {
            capacity: default_mailbox_capacity(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "chat-server".to_string()
}

fn default_env() -> Environment {
    Environment::Development
}

fn default_global_chat_enabled() -> bool {
    true
}

fn default_poll_timeout_ms() -> u64 {
    30_000
}

fn default_mailbox_capacity() -> usize {
    256
}

/// Read and parse an optional environment variable
fn parse_var<T: FromStr>(name: &'static str) -> Result<Option<T>, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue(name, raw)),
        Err(_) => Ok(None),
    }
}

impl ChatConfig {
    /// Load configuration from environment variables
    ///
    /// Every variable is optional; unset values fall back to defaults.
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed, or the
    /// resulting filter policy is invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let mut config = Self::default();

        if let Ok(name) = env::var("APP_NAME") {
            config.app.name = name;
        }
        if let Ok(raw) = env::var("APP_ENV") {
            config.app.env = match raw.to_lowercase().as_str() {
                "production" => Environment::Production,
                "staging" => Environment::Staging,
                "development" => Environment::Development,
                _ => return Err(ConfigError::InvalidValue("APP_ENV", raw)),
            };
        }

        if let Some(v) = parse_var("CHAT_GLOBAL_ENABLED")? {
            config.chat.global_chat_enabled = v;
        }
        if let Some(v) = parse_var("CHAT_POLL_TIMEOUT_MS")? {
            config.chat.poll_timeout_ms = v;
        }
        if let Some(v) = parse_var("CHAT_MAILBOX_CAPACITY")? {
            config.mailbox.capacity = v;
        }

        let filter = &mut config.filter;
        if let Some(v) = parse_var("CHAT_FILTER_MIN_INTERVAL_MS")? {
            filter.min_interval_ms = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_MAX_LENGTH")? {
            filter.max_length = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_CAPSLOCK_MIN_LENGTH")? {
            filter.capslock_min_length = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_CAPSLOCK_RATIO")? {
            filter.capslock_ratio = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_SPECIALS_MIN_LENGTH")? {
            filter.specials_min_length = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_SPECIALS_RATIO")? {
            filter.specials_ratio = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_SPACES_MIN_LENGTH")? {
            filter.spaces_min_length = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_CHARS_PER_WORD")? {
            filter.chars_per_word = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_HISTORY_SIZE")? {
            filter.history_size = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_REPEAT_WORDS_MIN_WORDS")? {
            filter.repeat_words_min_words = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_REPEAT_WORDS_RATIO")? {
            filter.repeat_words_ratio = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_FLOOD_COUNT")? {
            filter.flood_count = v;
        }
        if let Some(v) = parse_var("CHAT_FILTER_FLOOD_WINDOW_MS")? {
            filter.flood_window_ms = v;
        }
        if let Ok(raw) = env::var("CHAT_FILTER_SHADOW_BAN_PATTERNS") {
            filter.shadow_ban_patterns = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional file layered under `CHAT__*`
    /// environment overrides (e.g. `CHAT__FILTER__MAX_LENGTH=300`)
    ///
    /// # Errors
    /// Returns an error if a source cannot be read or deserialized, or the
    /// resulting configuration is invalid
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(false))
            .add_source(
                ::config::Environment::with_prefix("CHAT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("filter.shadow_ban_patterns"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mailbox.capacity == 0 {
            return Err(ConfigError::InvalidValue(
                "mailbox.capacity",
                "0".to_string(),
            ));
        }
        self.filter
            .validate()
            .map_err(|e| ConfigError::InvalidFilter(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),

    #[error("Invalid filter policy: {0}")]
    InvalidFilter(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
}
