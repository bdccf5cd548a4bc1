use crate::config::ClientConfig;
use crate::utils::error::{Result, SolenceError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Config file layout:
///
/// ```toml
/// [client]
/// api_url = "https://solence.ai/api"
/// api_key = "${SOLENCE_API_KEY}"
/// timeout_seconds = 30
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SolenceConfigFile {
    #[serde(default)]
    pub client: ClientConfig,
}

impl SolenceConfigFile {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading config file: {}", path.display());
        let content = std::fs::read_to_string(path).map_err(SolenceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut parsed: Self =
            toml::from_str(&processed_content).map_err(|e| SolenceError::ConfigError {
                message: format!("TOML parsing error: {}", e),
            })?;
        parsed.client = parsed.client.normalized();
        Ok(parsed)
    }

    /// 替換環境變數 (例如 ${SOLENCE_API_KEY})，找不到的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SolenceError::ConfigError {
            message: format!("Invalid env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                format!("${{{}}}", var_name)
            })
        });

        Ok(result.to_string())
    }

    pub fn into_client_config(self) -> ClientConfig {
        self.client
    }
}

impl Validate for SolenceConfigFile {
    fn validate(&self) -> Result<()> {
        self.client.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_client_table() {
        let toml_content = r#"
[client]
api_url = "https://staging.solence.ai/api"
api_key = "key-123"
timeout_seconds = 15
"#;

        let config = SolenceConfigFile::from_toml_str(toml_content).unwrap();

        assert_eq!(config.client.api_url, "https://staging.solence.ai/api");
        assert_eq!(config.client.api_key.as_deref(), Some("key-123"));
        assert_eq!(config.client.timeout_seconds, Some(15));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = SolenceConfigFile::from_toml_str("[client]\n").unwrap();
        assert_eq!(config.client, ClientConfig::default());

        let config = SolenceConfigFile::from_toml_str("").unwrap();
        assert_eq!(config.client.api_url, crate::config::SOLENCE_API_URL);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SOLENCE_TEST_KEY_SUBST", "from-env");

        let toml_content = r#"
[client]
api_key = "${SOLENCE_TEST_KEY_SUBST}"
"#;

        let config = SolenceConfigFile::from_toml_str(toml_content).unwrap();
        assert_eq!(config.client.api_key.as_deref(), Some("from-env"));

        std::env::remove_var("SOLENCE_TEST_KEY_SUBST");
    }

    #[test]
    fn test_unresolved_env_var_fails_validation() {
        let toml_content = r#"
[client]
api_key = "${SOLENCE_TEST_KEY_NEVER_SET}"
"#;

        let config = SolenceConfigFile::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.client.api_key.as_deref(),
            Some("${SOLENCE_TEST_KEY_NEVER_SET}")
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_api_key_means_unauthenticated() {
        let config = SolenceConfigFile::from_toml_str("[client]\napi_key = \"\"\n").unwrap();
        assert!(!config.client.is_authenticated());
    }

    #[test]
    fn test_loaded_api_key_never_rendered() {
        let config =
            SolenceConfigFile::from_toml_str("[client]\napi_key = \"sk_live_file_key\"\n").unwrap();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk_live_file_key"));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SolenceConfigFile::from_toml_str("[client\napi_url = 1").unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[client]\napi_url = \"http://localhost:9000/api\"\n")
            .unwrap();

        let config = SolenceConfigFile::from_file(temp_file.path()).unwrap();
        assert_eq!(config.client.api_url, "http://localhost:9000/api");
    }
}
