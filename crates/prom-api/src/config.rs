//! Client configuration.
//!
//! Priority, lowest to highest: built-in defaults, `config.toml` in the
//! config directory, `PROM_API_URL` / `PROM_USER_ID` env vars, explicit
//! overrides from the command line.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Signed-in user, if one is remembered.
    pub user_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: concat!("prom/", env!("CARGO_PKG_VERSION")).to_string(),
            user_id: None,
        }
    }
}

fn dirs_home() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// `PROM_CONFIG_DIR`, else `~/.prom`.
pub fn default_config_dir() -> PathBuf {
    env::var("PROM_CONFIG_DIR")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(|| dirs_home().join(".prom"))
}

impl ClientConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ApiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn load_file(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Config file from `dir` (or the default directory) with env overrides.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let dir = dir.map(Path::to_path_buf).unwrap_or_else(default_config_dir);
        let mut config = Self::load_file(&dir.join("config.toml"))?;
        config.apply_overrides(
            env::var("PROM_API_URL").ok().as_deref(),
            env::var("PROM_USER_ID").ok().as_deref(),
        )?;
        tracing::debug!("using API at {}", config.api_base_url);
        Ok(config)
    }

    /// Replace fields with any non-blank override.
    pub fn apply_overrides(&mut self, api_url: Option<&str>, user_id: Option<&str>) -> Result<()> {
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            self.api_base_url = url.to_string();
        }
        if let Some(user) = user_id.map(str::trim).filter(|u| !u.is_empty()) {
            self.user_id = Some(user.to_string());
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ApiError::Config(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ApiError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
