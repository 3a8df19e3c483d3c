use thiserror::Error;

/// Rule violations raised by the selection view-model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Cannot compare more than {max} countries")]
    LimitReached { max: usize },

    #[error("Country '{country}' is already selected")]
    AlreadySelected { country: String },

    #[error("At least one country must stay selected")]
    LastCountry,

    #[error("Country '{country}' is not selected")]
    NotSelected { country: String },

    #[error("Country name cannot be empty")]
    EmptyName,
}

#[derive(Error, Debug)]
pub enum GdpError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API returned HTTP {status} for {endpoint}")]
    HttpStatusError { endpoint: String, status: u16 },

    #[error("Unusable response from {endpoint}: {reason}")]
    ResponseError { endpoint: String, reason: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field '{field}'")]
    MissingConfigError { field: String },

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Selection,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GdpError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GdpError::ApiError(_) | GdpError::HttpStatusError { .. } => ErrorCategory::Network,
            GdpError::CsvError(_)
            | GdpError::SerializationError(_)
            | GdpError::ResponseError { .. } => ErrorCategory::Data,
            GdpError::ConfigValidationError { .. }
            | GdpError::InvalidConfigValueError { .. }
            | GdpError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GdpError::Selection(_) => ErrorCategory::Selection,
            GdpError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Selection => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Whether retrying the same operation later may succeed.
    pub fn is_retryable(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GdpError::ApiError(e) if e.is_timeout() => {
                "The economic data service did not answer in time".to_string()
            }
            GdpError::ApiError(_) | GdpError::HttpStatusError { .. } => {
                "The economic data service could not be reached".to_string()
            }
            GdpError::ResponseError { .. } | GdpError::SerializationError(_) => {
                "The economic data service returned data that could not be used".to_string()
            }
            GdpError::CsvError(_) => "Failed to write the CSV output".to_string(),
            GdpError::IoError(e) => format!("File system error: {}", e),
            GdpError::ConfigValidationError { field, .. }
            | GdpError::InvalidConfigValueError { field, .. }
            | GdpError::MissingConfigError { field } => {
                format!("Configuration problem with '{}': {}", field, self)
            }
            GdpError::Selection(e) => e.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check your connection or run with --offline",
            ErrorCategory::Data => "Try again later; demonstration data is used meanwhile",
            ErrorCategory::Configuration => "Fix the configuration file or command line flags",
            ErrorCategory::Selection => "Pick between one and four distinct countries",
            ErrorCategory::System => "Check file permissions and available disk space",
        }
    }
}

pub type Result<T> = std::result::Result<T, GdpError>;
