use thiserror::Error;

#[derive(Error, Debug)]
pub enum SolenceError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API responded with HTTP {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// 2 表示可重試，1 為請求或設定錯誤，3 為系統錯誤
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl SolenceError {
    /// 本地前置條件失敗，發生在任何網路請求之前
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            SolenceError::ConfigError { .. } | SolenceError::InvalidConfigValueError { .. }
        )
    }

    /// 非 2xx 回應或傳輸層失敗
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            SolenceError::HttpStatusError { .. } | SolenceError::ApiError(_)
        )
    }

    /// 取得 HTTP 狀態碼（若有）
    pub fn status(&self) -> Option<u16> {
        match self {
            SolenceError::HttpStatusError { status, .. } => Some(*status),
            SolenceError::ApiError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SolenceError::ApiError(_) => ErrorSeverity::Medium,
            SolenceError::HttpStatusError { status, .. } if *status >= 500 || *status == 429 => {
                ErrorSeverity::Medium
            }
            SolenceError::HttpStatusError { .. } => ErrorSeverity::High,
            SolenceError::SerializationError(_) => ErrorSeverity::High,
            SolenceError::ConfigError { .. } | SolenceError::InvalidConfigValueError { .. } => {
                ErrorSeverity::High
            }
            SolenceError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SolenceError::ApiError(e) if e.is_timeout() => {
                "The Solence API did not answer in time".to_string()
            }
            SolenceError::ApiError(_) => "Could not reach the Solence API".to_string(),
            SolenceError::HttpStatusError { status, body } => {
                format!("API Error (HTTP {}): {}", status, body)
            }
            SolenceError::SerializationError(_) => {
                "The Solence API returned a response that could not be decoded".to_string()
            }
            SolenceError::IoError(e) => format!("File access failed: {}", e),
            SolenceError::ConfigError { message } => message.clone(),
            SolenceError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid configuration for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            SolenceError::ApiError(_) => {
                "Check your network connection or raise --timeout, then try again"
            }
            SolenceError::HttpStatusError { status: 401, .. }
            | SolenceError::HttpStatusError { status: 403, .. } => {
                "Verify the API key passed via --api-key or SOLENCE_API_KEY"
            }
            SolenceError::HttpStatusError { status: 404, .. } => {
                "Check the wallet address and the configured API URL"
            }
            SolenceError::HttpStatusError { status, .. } if *status >= 500 || *status == 429 => {
                "The service is busy or unavailable, try again later"
            }
            SolenceError::HttpStatusError { .. } => {
                "Review the request parameters against the API documentation"
            }
            SolenceError::SerializationError(_) => {
                "Make sure the API URL points at a Solence API endpoint"
            }
            SolenceError::IoError(_) => "Check that the config file exists and is readable",
            SolenceError::ConfigError { .. } | SolenceError::InvalidConfigValueError { .. } => {
                "Fix the configuration (flags, environment or config file) and retry"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SolenceError>;
