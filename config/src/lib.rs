//! Load configuration from XDG `config.toml` and project `.env`, apply it to the process
//! environment with priority **existing env > .env > XDG**, then read typed [`Settings`].

mod dotenv_file;
mod settings;
mod xdg_toml;

use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

pub use settings::{
    Settings, SettingsError, DEFAULT_ADVERSARY_TEMPERATURE, DEFAULT_JUDGE_TEMPERATURE,
    DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_TURN_TIMEOUT_SECS,
};

/// App name used for the XDG config directory.
pub const APP_NAME: &str = "honeypot";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    Dotenv(#[from] dotenv::Error),
}

/// Held by tests that read or set `XDG_CONFIG_HOME`, which is process-wide.
#[cfg(test)]
pub(crate) static XDG_ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn lock_xdg_env() -> std::sync::MutexGuard<'static, ()> {
    XDG_ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

/// Loads `$XDG_CONFIG_HOME/<app_name>/config.toml` (`[env]` table) and `.env`, then sets only
/// the variables that are **not** already set in the process environment.
///
/// * `override_dir`: if `Some`, read `.env` from this directory instead of the current one.
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<(), LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv_file::load_env_map(override_dir)?;

    let mut keys: HashSet<&String> = xdg_map.keys().collect();
    keys.extend(dotenv_map.keys());

    for key in keys {
        if std::env::var_os(key).is_some() {
            continue;
        }
        if let Some(v) = dotenv_map.get(key).or_else(|| xdg_map.get(key)) {
            std::env::set_var(key, v);
        }
    }
    Ok(())
}
