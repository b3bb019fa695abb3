//! Process configuration read from the environment

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::llm::{gemini::DEFAULT_BASE_URL, RetryPolicy};
use crate::store::connection::DEFAULT_DATABASE_PATH;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const DATABASE_PATH_VAR: &str = "DATABASE_PATH";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const STATIC_DIR_VAR: &str = "STATIC_DIR";
pub const BASE_URL_VAR: &str = "GEMINI_API_BASE_URL";
pub const MAX_ATTEMPTS_VAR: &str = "GENERATION_MAX_ATTEMPTS";
pub const RETRY_DELAY_VAR: &str = "GENERATION_RETRY_DELAY_MS";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_STATIC_DIR: &str = "./ui/build";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),

    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server needs to start
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini API credential
    pub api_key: String,
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Directory holding the prebuilt frontend bundle
    pub static_dir: PathBuf,
    pub gemini_base_url: String,
    pub retry: RetryPolicy,
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through `lookup`, which returns the value of a
    /// variable if set
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_key = get(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;

        let database_path = get(DATABASE_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let bind_addr_value = get(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = parse_var(BIND_ADDR_VAR, &bind_addr_value)?;

        let static_dir = get(STATIC_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let gemini_base_url = get(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let defaults = RetryPolicy::default();
        let max_attempts = match get(MAX_ATTEMPTS_VAR) {
            Some(value) => {
                let attempts: u32 = parse_var(MAX_ATTEMPTS_VAR, &value)?;
                if attempts == 0 {
                    return Err(ConfigError::Invalid {
                        var: MAX_ATTEMPTS_VAR,
                        value,
                        reason: "must be at least 1".to_string(),
                    });
                }
                attempts
            }
            None => defaults.max_attempts,
        };
        let delay = match get(RETRY_DELAY_VAR) {
            Some(value) => Duration::from_millis(parse_var(RETRY_DELAY_VAR, &value)?),
            None => defaults.delay,
        };

        Ok(Self {
            api_key,
            database_path,
            bind_addr,
            static_dir,
            gemini_base_url,
            retry: RetryPolicy::new(max_attempts, delay),
        })
    }
}

fn parse_var<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
