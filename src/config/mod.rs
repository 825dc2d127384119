#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, OwnerCommand};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_USER_AGENT: &str = concat!("door-access/", env!("CARGO_PKG_VERSION"));

/// Connection settings after merging defaults, the config file and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientSettings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Applies values from a config file on top of the current settings.
    pub fn merge_file(mut self, file: &TomlConfig) -> Self {
        if let Some(base_url) = &file.server.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(secs) = file.server.timeout_seconds {
            self.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(user_agent) = &file.server.user_agent {
            self.user_agent = user_agent.clone();
        }
        self
    }
}

impl ConfigProvider for ClientSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for ClientSettings {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("user_agent", &self.user_agent)?;
        Ok(())
    }
}
