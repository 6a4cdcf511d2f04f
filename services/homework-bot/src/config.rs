//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_retry_interval")]
    pub retry_interval_seconds: u64,
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub failure_reports: FailureReportConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub practicum_token: Option<String>,
    #[serde(default)]
    pub telegram_token: Option<String>,
    #[serde(default)]
    pub telegram_chat_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            retry_interval_seconds: default_retry_interval(),
            cursor: CursorConfig::default(),
            telegram: TelegramConfig::default(),
            failure_reports: FailureReportConfig::default(),
            log: LogConfig::default(),
            practicum_token: None,
            telegram_token: None,
            telegram_chat_id: None,
        }
    }
}

/// How the `from_date` cursor behaves between polls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorMode {
    /// Every poll reuses the startup cursor
    #[default]
    Fixed,
    /// The cursor moves forward after each successfully handled poll
    Advance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CursorConfig {
    #[serde(default)]
    pub mode: CursorMode,
    #[serde(default = "default_lookback")]
    pub lookback_seconds: u64,
    /// Explicit startup cursor, overrides the lookback
    #[serde(default)]
    pub start_timestamp: Option<i64>,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            mode: CursorMode::default(),
            lookback_seconds: default_lookback(),
            start_timestamp: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_base")]
    pub api_base: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: default_telegram_api_base(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureReportConfig {
    /// Undelivered failure reports in a row before reports become log-only; 0 never demotes
    #[serde(default = "default_max_delivery_failures")]
    pub max_consecutive_delivery_failures: u32,
}

impl Default for FailureReportConfig {
    fn default() -> Self {
        Self {
            max_consecutive_delivery_failures: default_max_delivery_failures(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_log_prefix")]
    pub file_prefix: String,
    #[serde(default = "default_log_max_files")]
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file_prefix: default_log_prefix(),
            max_files: default_log_max_files(),
        }
    }
}

/// Tokens and destination needed by the poll loop, all guaranteed non-empty
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval_seconds)
    }

    /// Fill absent secrets from the process environment
    pub fn resolve_secrets(&mut self) {
        self.resolve_secrets_with(|name| std::env::var(name).ok());
    }

    /// Fill absent secrets using `lookup`; values already set in the file win
    pub fn resolve_secrets_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for (slot, var) in [
            (&mut self.practicum_token, PRACTICUM_TOKEN_VAR),
            (&mut self.telegram_token, TELEGRAM_TOKEN_VAR),
            (&mut self.telegram_chat_id, TELEGRAM_CHAT_ID_VAR),
        ] {
            if is_blank(slot.as_deref()) {
                *slot = lookup(var);
            }
        }
    }

    /// Check the poll settings and that every secret is present and non-empty
    pub fn validate(&self) -> crate::Result<Credentials> {
        if self.retry_interval_seconds == 0 {
            return Err(crate::BotError::Config(
                "retry_interval_seconds must be at least 1".to_string(),
            ));
        }

        let missing: Vec<&str> = [
            (&self.practicum_token, PRACTICUM_TOKEN_VAR),
            (&self.telegram_token, TELEGRAM_TOKEN_VAR),
            (&self.telegram_chat_id, TELEGRAM_CHAT_ID_VAR),
        ]
        .into_iter()
        .filter(|(value, _)| is_blank(value.as_deref()))
        .map(|(_, var)| var)
        .collect();

        if !missing.is_empty() {
            return Err(crate::BotError::MissingConfiguration(missing.join(", ")));
        }

        Ok(Credentials {
            practicum_token: self.practicum_token.clone().unwrap_or_default(),
            telegram_token: self.telegram_token.clone().unwrap_or_default(),
            telegram_chat_id: self.telegram_chat_id.clone().unwrap_or_default(),
        })
    }

    /// Cursor to start polling from, given the current Unix time
    pub fn initial_cursor(&self, now: i64) -> i64 {
        match self.cursor.start_timestamp {
            Some(start) => start,
            None => now.saturating_sub_unsigned(self.cursor.lookback_seconds).max(0),
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_retry_interval() -> u64 {
    600
}

fn default_lookback() -> u64 {
    600
}

fn default_telegram_api_base() -> String {
    "https://api.telegram.org".to_string()
}

fn default_max_delivery_failures() -> u32 {
    3
}

fn default_log_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_prefix() -> String {
    "homework-bot".to_string()
}

fn default_log_max_files() -> usize {
    3
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::BotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        crate::BotError::Config(format!("Failed to parse config file {:?}: {}", path, e))
    })
}
