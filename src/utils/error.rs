use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuggestError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Suggestion service returned {status}: {message}")]
    SuggestionRequestFailed { status: u16, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Country catalog error: {message}")]
    CatalogError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤嚴重程度，決定 CLI 的退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// 警告性質，流程仍視為成功
    Low,
    /// 暫時性問題，重試通常可恢復
    Medium,
    /// 處理錯誤，需要使用者介入
    High,
    /// 系統層級錯誤
    Critical,
}

/// 錯誤分類，用於日誌與診斷
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Service,
    Data,
    Io,
    Configuration,
}

impl SuggestError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SuggestError::ApiError(_) | SuggestError::SuggestionRequestFailed { .. } => {
                ErrorSeverity::Medium
            }
            SuggestError::SerializationError(_)
            | SuggestError::CsvError(_)
            | SuggestError::CatalogError { .. }
            | SuggestError::ConfigValidationError { .. }
            | SuggestError::MissingConfigError { .. }
            | SuggestError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            SuggestError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            SuggestError::ApiError(_) => ErrorCategory::Network,
            SuggestError::SuggestionRequestFailed { .. } => ErrorCategory::Service,
            SuggestError::SerializationError(_)
            | SuggestError::CsvError(_)
            | SuggestError::CatalogError { .. } => ErrorCategory::Data,
            SuggestError::IoError(_) => ErrorCategory::Io,
            SuggestError::ConfigValidationError { .. }
            | SuggestError::MissingConfigError { .. }
            | SuggestError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SuggestError::ApiError(_) => {
                "Check your network connection and the suggestion service endpoint, then try again"
            }
            SuggestError::SuggestionRequestFailed { .. } => {
                "The suggestion service rejected the request; verify the endpoint and API key"
            }
            SuggestError::SerializationError(_) => {
                "The service response could not be parsed; confirm the endpoint speaks the suggestion API"
            }
            SuggestError::CsvError(_) => {
                "Check the country table CSV for missing columns or malformed rows"
            }
            SuggestError::IoError(_) => "Check file permissions and that the path exists",
            SuggestError::CatalogError { .. } => {
                "Verify the country table file format (.json or .csv with code,name,emoji,reference_url)"
            }
            SuggestError::ConfigValidationError { .. }
            | SuggestError::MissingConfigError { .. }
            | SuggestError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line arguments"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SuggestError::ApiError(_) => {
                "Could not reach the suggestion service. Please check your connection.".to_string()
            }
            SuggestError::SuggestionRequestFailed { status, .. } => {
                format!("The suggestion service answered with an error (HTTP {}).", status)
            }
            SuggestError::SerializationError(_) => {
                "The suggestion service sent a response we could not understand.".to_string()
            }
            SuggestError::CsvError(_) | SuggestError::CatalogError { .. } => {
                "The country table could not be loaded.".to_string()
            }
            SuggestError::IoError(_) => "A file could not be read.".to_string(),
            SuggestError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            SuggestError::MissingConfigError { field } => {
                format!("Configuration is missing '{}'.", field)
            }
            SuggestError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value for '{}' is invalid: {}.", field, reason)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SuggestError>;
