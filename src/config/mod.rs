// src/config/mod.rs
//
// Runtime configuration
//
// PRINCIPLES:
// - Defaults work against a local backend with no file present
// - A JSON file in the user config directory overrides defaults
// - Environment variables override the file

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const ENV_API_URL: &str = "BACKOFFICE_API_URL";
pub const ENV_API_TOKEN: &str = "BACKOFFICE_API_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "BACKOFFICE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackofficeConfig {
    /// Backend host, e.g. `http://localhost:8000`
    pub api_base_url: String,

    /// Fixed path prefix every resource lives under
    pub api_prefix: String,

    pub auth_token: Option<String>,

    /// `None` keeps the HTTP client default
    pub request_timeout_secs: Option<u64>,

    /// Page size requested when a page loads its lists
    pub default_page_size: u32,

    pub camera: CameraConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub width: u32,
    pub height: u32,
    pub jpeg_quality: u8,

    /// How long an open waits for the webview's permission answer
    pub open_timeout_secs: u64,
}

impl Default for BackofficeConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            api_prefix: "/api".to_string(),
            auth_token: None,
            request_timeout_secs: None,
            default_page_size: 1000,
            camera: CameraConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            jpeg_quality: 90,
            open_timeout_secs: 30,
        }
    }
}

/// Get the configuration file path
///
/// Path structure: {CONFIG_DIR}/condo-backoffice/config.json
pub fn config_path() -> AppResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AppError::Config("Could not determine config directory".to_string()))?;

    Ok(config_dir.join("condo-backoffice").join("config.json"))
}

impl BackofficeConfig {
    /// Load from the default location, then apply environment overrides.
    pub fn load() -> AppResult<Self> {
        let mut config = Self::load_from(&config_path()?)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from an explicit file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.api_base_url = url;
        }

        if let Some(token) = lookup(ENV_API_TOKEN) {
            self.auth_token = if token.is_empty() { None } else { Some(token) };
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!("{} must be a number of seconds", ENV_TIMEOUT_SECS))
            })?;
            self.request_timeout_secs = Some(secs);
        }

        Ok(())
    }

    /// Base URL joined with the API prefix, without a trailing slash.
    pub fn api_root(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        let prefix = self.api_prefix.trim_matches('/');

        if prefix.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, prefix)
        }
    }
}
