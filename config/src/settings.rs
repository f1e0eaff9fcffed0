//! Typed view of the honeypot environment variables.
//!
//! | key | default |
//! |-----|---------|
//! | `HONEYPOT_API_KEY` | none (required by `serve`) |
//! | `PORT` | `3000` |
//! | `HONEYPOT_ADDR` | `0.0.0.0:$PORT` |
//! | `HONEYPOT_MODEL` | `gpt-4o-mini` |
//! | `HONEYPOT_TURN_TIMEOUT_SECS` | `60` (`0` disables) |
//! | `HONEYPOT_JUDGE_TEMPERATURE` | `0.7` |
//! | `HONEYPOT_ADVERSARY_TEMPERATURE` | `0.9` |

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TURN_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_JUDGE_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_ADVERSARY_TEMPERATURE: f32 = 0.9;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Shared secret expected in `X-API-KEY`.
    pub api_key: Option<String>,
    /// Listen address for the HTTP surface.
    pub bind_addr: String,
    pub model: String,
    /// Per-call judgement timeout; `None` when disabled.
    pub turn_timeout: Option<Duration>,
    pub judge_temperature: f32,
    pub adversary_temperature: f32,
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup` (key → value). Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port: u16 = parse_or(&get, "PORT", DEFAULT_PORT)?;
        let bind_addr = get("HONEYPOT_ADDR").unwrap_or_else(|| format!("0.0.0.0:{}", port));
        let timeout_secs: u64 =
            parse_or(&get, "HONEYPOT_TURN_TIMEOUT_SECS", DEFAULT_TURN_TIMEOUT_SECS)?;
        let judge_temperature =
            parse_temperature(&get, "HONEYPOT_JUDGE_TEMPERATURE", DEFAULT_JUDGE_TEMPERATURE)?;
        let adversary_temperature = parse_temperature(
            &get,
            "HONEYPOT_ADVERSARY_TEMPERATURE",
            DEFAULT_ADVERSARY_TEMPERATURE,
        )?;

        Ok(Self {
            api_key: get("HONEYPOT_API_KEY"),
            bind_addr,
            model: get("HONEYPOT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            turn_timeout: (timeout_secs > 0).then(|| Duration::from_secs(timeout_secs)),
            judge_temperature,
            adversary_temperature,
        })
    }

    /// The API key, or [`SettingsError::Missing`] when unset.
    pub fn require_api_key(&self) -> Result<&str, SettingsError> {
        self.api_key
            .as_deref()
            .ok_or(SettingsError::Missing("HONEYPOT_API_KEY"))
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, SettingsError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    let Some(value) = get(key) else {
        return Ok(default);
    };
    match value.parse::<T>() {
        Ok(v) => Ok(v),
        Err(e) => Err(SettingsError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

fn parse_temperature<G>(get: &G, key: &'static str, default: f32) -> Result<f32, SettingsError>
where
    G: Fn(&str) -> Option<String>,
{
    let t: f32 = parse_or(get, key, default)?;
    if (0.0..=2.0).contains(&t) {
        Ok(t)
    } else {
        Err(SettingsError::Invalid {
            key,
            value: t.to_string(),
            reason: "temperature must be within 0..=2".to_string(),
        })
    }
}
