use crate::error::{Error, Result};
use std::{env, fmt::Debug, str::FromStr, time::Duration};
use url::Url;

#[derive(Clone)]
pub struct Config {
    pub bot_token: String,
    pub youtube: YoutubeConfig,
    pub health: HealthConfig,
}

#[derive(Clone)]
pub struct YoutubeConfig {
    pub api_key: String,
    pub api_url: Url,
    pub timeout: Duration,
    pub concurrency: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthConfig {
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingEnv` if a required secret is not set and
    /// `Error::InvalidEnv` if a value cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = required(&lookup, "TELOXIDE_TOKEN")
            .or_else(|_| required(&lookup, "BOT_TOKEN"))
            .map_err(|_| Error::MissingEnv("TELOXIDE_TOKEN"))?;

        Ok(Self {
            bot_token,
            youtube: YoutubeConfig::from_lookup(&lookup)?,
            health: HealthConfig::from_lookup(&lookup)?,
        })
    }
}

impl YoutubeConfig {
    pub const DEFAULT_API_URL: &'static str = "https://www.googleapis.com/youtube/v3/videos";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    pub const DEFAULT_CONCURRENCY: usize = 8;

    fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("YOUTUBE_API_URL")
            .unwrap_or_else(|| Self::DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url).map_err(|_| Error::InvalidEnv {
            key: "YOUTUBE_API_URL",
            value: api_url,
        })?;

        let timeout_secs =
            parse_or(lookup, "YOUTUBE_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS)?;
        let concurrency = parse_or(lookup, "FETCH_CONCURRENCY", Self::DEFAULT_CONCURRENCY)?;

        Ok(Self {
            api_key: required(lookup, "YOUTUBE_API_KEY")?,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            concurrency: concurrency.clamp(1, crate::extract::MAX_LINKS),
        })
    }
}

impl HealthConfig {
    pub const DEFAULT_PORT: u16 = 8000;

    fn from_lookup<F>(lookup: &F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parse_or(lookup, "HEALTH_PORT", Self::DEFAULT_PORT)?,
        })
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &"<redacted>")
            .field("youtube", &self.youtube)
            .field("health", &self.health)
            .finish()
    }
}

impl Debug for YoutubeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YoutubeConfig")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .field("timeout", &self.timeout)
            .field("concurrency", &self.concurrency)
            .finish()
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(Error::MissingEnv(key))
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => {
            value.trim().parse().map_err(|_| Error::InvalidEnv { key, value })
        }
        _ => Ok(default),
    }
}
