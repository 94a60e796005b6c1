pub mod toml_config;

#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::ports::ServiceConfig;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

/// 未指定端點時使用本機開發伺服器,與網頁前端同源
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/suggestions";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

/// 合併所有來源後實際生效的設定。
/// 優先序:命令列旗標 > 設定檔 > 內建預設值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
    pub max_suggestions: usize,
    pub countries_file: Option<String>,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            countries_file: None,
        }
    }
}

impl ServiceConfig for EffectiveConfig {
    fn api_endpoint(&self) -> &str {
        &self.endpoint
    }

    fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }
}

impl Validate for EffectiveConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;

        if let Some(api_key) = &self.api_key {
            validation::validate_non_empty_string("api_key", api_key)?;
        }

        validation::validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        validation::validate_positive_number("max_suggestions", self.max_suggestions, 1)?;

        if let Some(file) = &self.countries_file {
            validation::validate_path("countries_file", file)?;
            let files = [file.clone()];
            validation::validate_file_extensions("countries_file", &files, &["json", "csv"])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EffectiveConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.api_endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.max_suggestions(), DEFAULT_MAX_SUGGESTIONS);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = EffectiveConfig {
            timeout_seconds: 0,
            ..EffectiveConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_api_key() {
        let config = EffectiveConfig {
            api_key: Some("   ".to_string()),
            ..EffectiveConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_countries_file_extension() {
        let config = EffectiveConfig {
            countries_file: Some("./countries.yaml".to_string()),
            ..EffectiveConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
