//! Settings file and per-user directories.
//!
//! - settings: `$XDG_CONFIG_HOME/livedash/settings.json` (Linux),
//!   `~/Library/Application Support/livedash/settings.json` (macOS),
//!   `%APPDATA%\livedash\settings.json` (Windows)
//! - logs: `<cache dir>/livedash/logs`

use crate::core::config::DashboardConfig;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "livedash";
const SETTINGS_FILE: &str = "settings.json";
const LOG_DIR: &str = "logs";

pub const DISABLE_SETTINGS_ENV: &str = "LIVEDASH_DISABLE_SETTINGS";

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Application Support"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".config"));
    }

    #[cfg(target_os = "windows")]
    {
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

fn get_cache_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join("Library/Caches"));
    }

    #[cfg(target_os = "linux")]
    {
        if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
            return Some(PathBuf::from(xdg));
        }
        return std::env::var("HOME")
            .ok()
            .map(|home| PathBuf::from(home).join(".cache"));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(local) = std::env::var("LOCALAPPDATA") {
            return Some(PathBuf::from(local));
        }
        return std::env::var("APPDATA").ok().map(PathBuf::from);
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    {
        None
    }
}

pub fn get_settings_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| dir.join(APP_NAME).join(SETTINGS_FILE))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_cache_dir().map(|dir| dir.join(APP_NAME).join(LOG_DIR))
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    let dir = get_log_dir().ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Cannot determine log directory",
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

/// Reads a settings file. A missing file is silent; an unreadable or invalid
/// one is logged and ignored.
pub fn load_settings(path: &Path) -> Option<DashboardConfig> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "settings unreadable");
            return None;
        }
    };

    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "settings invalid; using defaults");
            None
        }
    }
}

fn settings_disabled() -> bool {
    std::env::var(DISABLE_SETTINGS_ENV)
        .map(|v| {
            let v = v.trim();
            !v.is_empty() && v != "0"
        })
        .unwrap_or(false)
}

/// Configuration from `explicit`, or else the per-user settings file, or else
/// defaults.
pub fn resolve_config(explicit: Option<&Path>) -> DashboardConfig {
    let default_path = get_settings_path();
    resolve_config_with(explicit, settings_disabled(), default_path.as_deref())
}

pub fn resolve_config_with(
    explicit: Option<&Path>,
    disabled: bool,
    default_path: Option<&Path>,
) -> DashboardConfig {
    if let Some(path) = explicit {
        if !path.exists() {
            tracing::warn!(path = %path.display(), "config file not found; using defaults");
        }
        return load_settings(path).unwrap_or_default();
    }
    if disabled {
        return DashboardConfig::default();
    }
    default_path.and_then(load_settings).unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/app/settings.rs"]
mod tests;
