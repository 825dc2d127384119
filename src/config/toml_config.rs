use crate::utils::error::{DoorError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DoorError::TomlError {
            message: e.to_string(),
        })
    }

    /// 替換環境變數 (例如 ${DOOR_SERVER})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DoorError::TomlError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.verbose).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.server.base_url {
            validate_url("server.base_url", base_url)?;
        }
        if let Some(timeout) = self.server.timeout_seconds {
            validate_range("server.timeout_seconds", timeout, 1, 600)?;
        }
        if let Some(user_agent) = &self.server.user_agent {
            validate_non_empty_string("server.user_agent", user_agent)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[server]
base_url = "http://door.local:5000"
timeout_seconds = 15
user_agent = "front-door-tablet"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.server.base_url.as_deref(), Some("http://door.local:5000"));
        assert_eq!(config.server.timeout_seconds, Some(15));
        assert_eq!(config.server.user_agent.as_deref(), Some("front-door-tablet"));
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.server.base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOOR_ACCESS_TEST_SERVER", "https://door.example.com");

        let toml_content = r#"
[server]
base_url = "${DOOR_ACCESS_TEST_SERVER}"
user_agent = "${DOOR_ACCESS_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.server.base_url.as_deref(), Some("https://door.example.com"));
        assert_eq!(
            config.server.user_agent.as_deref(),
            Some("${DOOR_ACCESS_TEST_UNSET_VAR}")
        );

        std::env::remove_var("DOOR_ACCESS_TEST_SERVER");
    }

    #[test]
    fn test_config_validation() {
        let bad_url = TomlConfig::from_toml_str("[server]\nbase_url = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let bad_timeout = TomlConfig::from_toml_str("[server]\ntimeout_seconds = 0\n").unwrap();
        assert!(bad_timeout.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = TomlConfig::from_toml_str("[server\nbase_url = 1");
        assert!(matches!(result, Err(DoorError::TomlError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbase_url = \"http://10.0.0.8:5000\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.server.base_url.as_deref(), Some("http://10.0.0.8:5000"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TomlConfig::from_file("/nonexistent/door-access.toml");
        assert!(matches!(result, Err(DoorError::IoError(_))));
    }
}
