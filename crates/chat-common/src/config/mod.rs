//! Configuration structs

mod app_config;

pub use app_config::{
    AppSettings, ChatConfig, ChatSettings, ConfigError, Environment, MailboxConfig,
};
