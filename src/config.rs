use std::{env, net::SocketAddr, str::FromStr, time::Duration};

use thiserror::Error;

const DEFAULT_DB_PATH: &str = "beaten-games.db";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "8080";
const DEFAULT_STATIC_DIR: &str = "static";
const DEFAULT_SEARCH_TIMEOUT_SECS: &str = "10";
const DEFAULT_LOG_FILE_PATH: &str = "logs/beaten-games.log";
const DEFAULT_LOG_ARCHIVE_PATTERN: &str = "logs/beaten-games.{}.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub giant_bomb_api_key: String,
    pub giant_bomb_api_url: String,
    pub search_timeout: Duration,
    pub db_path: String,
    pub address: SocketAddr,
    pub static_dir: String,
    pub log_file_path: String,
    pub log_archive_pattern: String,
}

impl Config {
    /// Reads the configuration from the environment. Call after the `.env`
    /// file has been loaded.
    pub fn from_env() -> Result<Self, ConfigError> {
        let giant_bomb_api_key = env::var("GIANT_BOMB_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("GIANT_BOMB_API_KEY"))?;

        let host: String = parse_or("BEATEN_GAMES_HOST", DEFAULT_HOST)?;
        let port: u16 = parse_or("BEATEN_GAMES_PORT", DEFAULT_PORT)?;
        let address = format!("{}:{}", host, port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "BEATEN_GAMES_HOST",
                message: e.to_string(),
            })?;

        let search_timeout_secs: u64 =
            parse_or("SEARCH_TIMEOUT_SECS", DEFAULT_SEARCH_TIMEOUT_SECS)?;

        Ok(Self {
            giant_bomb_api_key,
            giant_bomb_api_url: parse_or("GIANT_BOMB_API_URL", giantbomb_client::DEFAULT_API_URL)?,
            search_timeout: Duration::from_secs(search_timeout_secs),
            db_path: parse_or("BEATEN_GAMES_DB", DEFAULT_DB_PATH)?,
            address,
            static_dir: parse_or("BEATEN_GAMES_STATIC_DIR", DEFAULT_STATIC_DIR)?,
            log_file_path: parse_or("LOG_FILE_PATH", DEFAULT_LOG_FILE_PATH)?,
            log_archive_pattern: parse_or("LOG_ARCHIVE_PATTERN", DEFAULT_LOG_ARCHIVE_PATTERN)?,
        })
    }
}

fn parse_or<T>(key: &'static str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: e.to_string(),
    })
}
