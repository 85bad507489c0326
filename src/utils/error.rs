use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresenterError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {message}")]
    HttpStatusError { status: u16, message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Base64 decoding failed: {0}")]
    Base64Error(#[from] base64::DecodeError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown persona: {id}")]
    PersonaNotFound { id: String },

    #[error("{stage} generation failed: {message}")]
    GenerationError { stage: String, message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Configuration,
    Storage,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PresenterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::HttpStatusError { .. } | Self::GenerationError { .. } => {
                ErrorCategory::Network
            }
            Self::SerializationError(_)
            | Self::CsvError(_)
            | Self::Base64Error(_)
            | Self::ProcessingError { .. } => ErrorCategory::Data,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) | Self::ZipError(_) => ErrorCategory::Storage,
            Self::PersonaNotFound { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 生成失敗時內容會改用預設文案，不影響結果
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::HttpStatusError { .. } => {
                "Could not reach the generative AI service.".to_string()
            }
            Self::GenerationError { stage, .. } => {
                format!("Generating the {} section failed.", stage)
            }
            Self::PersonaNotFound { id } => format!("There is no customer persona named '{}'.", id),
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Setting '{}' is required.", field),
            Self::IoError(_) | Self::ZipError(_) => {
                "The presentation could not be written to disk.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check the API key and network access, or run without a key to use fallback content"
            }
            ErrorCategory::Data => "Re-run the generation; the service returned unexpected data",
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Storage => "Make sure the output path exists and is writable",
            ErrorCategory::Input => "Run with --list-personas to see the available personas",
        }
    }
}

pub type Result<T> = std::result::Result<T, PresenterError>;
