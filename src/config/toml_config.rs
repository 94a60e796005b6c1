use crate::config::{DEFAULT_MAX_SUGGESTIONS, DEFAULT_TIMEOUT_SECONDS};
use crate::utils::error::{Result, SuggestError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub service: ServiceSection,
    pub catalog: Option<CatalogSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSection {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_suggestions: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSection {
    pub countries_file: Option<String>,
}

impl TomlConfig {
    /// 讀取並解析 TOML 配置檔
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SuggestError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 解析 TOML 字串,解析前先展開 ${VAR} 形式的環境變數
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = Self::substitute_env_vars(content)?;

        toml::from_str(&expanded).map_err(|e| SuggestError::ConfigValidationError {
            field: "toml".to_string(),
            message: format!("TOML syntax error: {}", e),
        })
    }

    // 未設定的變數原樣保留,交給驗證階段攔下
    fn substitute_env_vars(content: &str) -> Result<String> {
        let pattern = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let expanded = pattern.replace_all(content, |caps: &regex::Captures| {
            let name = &caps[1];
            std::env::var(name).unwrap_or_else(|_| format!("${{{}}}", name))
        });

        Ok(expanded.into_owned())
    }

    /// 驗證各欄位的合理性,回傳第一個發現的問題
    pub fn validate_config(&self) -> Result<()> {
        // 任何欄位殘留 ${VAR} 都表示環境變數沒有設定
        check_env_resolved("service.endpoint", &self.service.endpoint)?;

        validation::validate_url("service.endpoint", &self.service.endpoint)?;

        if let Some(api_key) = &self.service.api_key {
            check_env_resolved("service.api_key", api_key)?;
            validation::validate_non_empty_string("service.api_key", api_key)?;
        }

        if let Some(timeout) = self.service.timeout_seconds {
            validation::validate_range("service.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(max) = self.service.max_suggestions {
            validation::validate_positive_number("service.max_suggestions", max, 1)?;
        }

        if let Some(file) = self.countries_file() {
            validation::validate_path("catalog.countries_file", file)?;
            validation::validate_file_extensions(
                "catalog.countries_file",
                &[file.to_string()],
                &["json", "csv"],
            )?;
        }

        Ok(())
    }

    /// 取得服務端點
    pub fn api_endpoint(&self) -> &str {
        &self.service.endpoint
    }

    /// 取得 API 金鑰
    pub fn api_key(&self) -> Option<&str> {
        self.service.api_key.as_deref()
    }

    /// 取得請求逾時秒數
    pub fn timeout_seconds(&self) -> u64 {
        self.service.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    /// 取得建議數量上限
    pub fn max_suggestions(&self) -> usize {
        self.service.max_suggestions.unwrap_or(DEFAULT_MAX_SUGGESTIONS)
    }

    /// 取得替代國家表路徑
    pub fn countries_file(&self) -> Option<&str> {
        self.catalog
            .as_ref()
            .and_then(|catalog| catalog.countries_file.as_deref())
    }
}

fn check_env_resolved(field: &str, value: &str) -> Result<()> {
    if value.contains("${") {
        return Err(SuggestError::MissingConfigError {
            field: format!("{} (unresolved environment variable: {})", field, value),
        });
    }
    Ok(())
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
