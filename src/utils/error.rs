use thiserror::Error;

#[derive(Error, Debug)]
pub enum HousingError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Download of {url} failed with status {status}")]
    DownloadError { url: String, status: u16 },

    #[error("Archive error: {message}")]
    ArchiveError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Schema error in column '{column}': {message}")]
    SchemaError { column: String, message: String },

    #[error("Data error: {message}")]
    DataError { message: String },

    #[error("Model error: {message}")]
    ModelError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    Model,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HousingError {
    pub fn data(message: impl Into<String>) -> Self {
        Self::DataError {
            message: message.into(),
        }
    }

    pub fn model(message: impl Into<String>) -> Self {
        Self::ModelError {
            message: message.into(),
        }
    }

    pub fn schema(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaError {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::DownloadError { .. } => ErrorCategory::Network,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::CsvError(_)
            | Self::ArchiveError { .. }
            | Self::SchemaError { .. }
            | Self::DataError { .. } => ErrorCategory::Data,
            Self::ModelError { .. } | Self::SerializationError(_) => ErrorCategory::Model,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路錯誤通常重試即可
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data | ErrorCategory::Model => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::HttpError(_) => "Check network connectivity and retry the download",
            Self::DownloadError { .. } => "Verify the dataset URL is reachable and retry",
            Self::ArchiveError { .. } => {
                "The downloaded archive looks corrupt; delete it and run ingest again"
            }
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration value and run the command again"
            }
            Self::CsvError(_) | Self::SchemaError { .. } => {
                "Make sure the CSV file has the expected housing columns"
            }
            Self::DataError { .. } => "Inspect the input dataset for empty or invalid rows",
            Self::ModelError { .. } | Self::SerializationError(_) => {
                "Retrain the model with the current version of the tool"
            }
            Self::IoError(_) => "Check that the paths exist and are writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch the dataset: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Data => format!("Problem with the housing data: {}", self),
            ErrorCategory::Model => format!("Problem with the model artifact: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// 依嚴重程度決定程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    /// 記錄詳細錯誤並輸出使用者訊息
    pub fn report(&self) {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            self,
            self.category(),
            self.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", self.recovery_suggestion());

        eprintln!("❌ {}", self.user_friendly_message());
        eprintln!("💡 {}", self.recovery_suggestion());
    }
}

pub type Result<T> = std::result::Result<T, HousingError>;
