use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::api_client::UserRole;

/// Environment override for `api.base_url`.
pub const ENV_BASE_URL: &str = "TELECOM_API_BASE_URL";
/// Environment override for `api.use_mock` (truthy: `1`, `true`, `yes`).
pub const ENV_USE_MOCK: &str = "TELECOM_USE_MOCK";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend base URL; the chat path is fixed.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Skip the network entirely and answer from the built-in fixture.
    pub use_mock: bool,

    /// Artificial delay before the mock answer, in milliseconds.
    pub mock_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Role attached to every request.
    pub user_role: UserRole,

    /// Caller identifier attached to every request.
    pub user_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
            use_mock: false,
            mock_delay_ms: 2000,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_role: UserRole::CustomerService,
            user_id: "demo-user-001".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }
}

impl Config {
    /// Load config from the default location, creating it with defaults on
    /// first run, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            Self::load_from(&config_path)?
        } else {
            let default_config = Self::default();
            default_config.save_to(&config_path)?;
            info!(path = %config_path.display(), "wrote default config");
            default_config
        };

        for key in [ENV_BASE_URL, ENV_USE_MOCK] {
            if let Ok(value) = std::env::var(key) {
                config.apply_override(key, &value);
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("parsing config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("writing config to {}", path.display()))?;
        Ok(())
    }

    /// Apply one environment-style override. Returns true when the key was
    /// recognized.
    pub fn apply_override(&mut self, key: &str, value: &str) -> bool {
        match key {
            ENV_BASE_URL => {
                self.api.base_url = value.trim().to_string();
                true
            }
            ENV_USE_MOCK => {
                self.api.use_mock = matches!(
                    value.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes"
                );
                true
            }
            _ => false,
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("cannot determine config directory")?
            .join("telecom-master");
        Ok(config_dir.join("config.toml"))
    }
}
