// ABOUTME: Configuration loading for robotutor.
// ABOUTME: Reads ~/.robotutor/config.toml and applies CLI overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ask: AskConfig,
    pub widget: WidgetConfig,
    pub log: LogConfig,
}

/// Which ask action to use and how to reach it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AskConfig {
    pub provider: String,
    pub deployment_url: String,
    pub action: String,
    /// Request timeout in seconds; 0 disables it.
    pub timeout_seconds: u64,
    pub connect_timeout_seconds: u64,
    /// Environment variable holding an optional bearer token.
    pub auth_token_env: String,
}

impl Default for AskConfig {
    fn default() -> Self {
        Self {
            provider: "convex".to_string(),
            deployment_url: String::new(),
            action: "chat:askRobotics".to_string(),
            timeout_seconds: 60,
            connect_timeout_seconds: 10,
            auth_token_env: "ROBOTUTOR_AUTH_TOKEN".to_string(),
        }
    }
}

/// Widget presentation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub title: String,
    pub subtitle: String,
    pub start_open: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            title: "Robotics Tutor".to_string(),
            subtitle: "AI-powered help".to_string(),
            start_open: false,
        }
    }
}

/// Log output settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    /// Log file path; defaults to ~/.robotutor/logs/robotutor.log.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Values from the command line that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub provider: Option<String>,
    pub deployment_url: Option<String>,
    pub action: Option<String>,
    pub open: bool,
}

impl Config {
    /// Load config from ~/.robotutor/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from a specific path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(provider) = overrides.provider {
            self.ask.provider = provider;
        }
        if let Some(url) = overrides.deployment_url {
            self.ask.deployment_url = url;
        }
        if let Some(action) = overrides.action {
            self.ask.action = action;
        }
        if overrides.open {
            self.widget.start_open = true;
        }
    }

    /// Directory holding config and logs.
    pub fn base_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".robotutor")
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        Self::base_dir().join("config.toml")
    }

    /// Path to the log file, honoring `[log] file`.
    pub fn log_path(&self) -> PathBuf {
        self.log
            .file
            .clone()
            .unwrap_or_else(|| Self::base_dir().join("logs").join("robotutor.log"))
    }
}
