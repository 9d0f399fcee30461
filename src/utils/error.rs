use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommendError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("{source_name} responded with status {status}: {message}")]
    SourceError {
        source_name: String,
        status: u16,
        message: String,
    },

    #[error("Spreadsheet error: {message}")]
    SpreadsheetError { message: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl RecommendError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            RecommendError::ApiError(_) | RecommendError::SourceError { .. } => {
                ErrorCategory::Network
            }
            RecommendError::ConfigError { .. }
            | RecommendError::ConfigValidationError { .. }
            | RecommendError::InvalidConfigValueError { .. }
            | RecommendError::MissingConfigError { .. } => ErrorCategory::Configuration,
            RecommendError::CsvError(_)
            | RecommendError::SerializationError(_)
            | RecommendError::SpreadsheetError { .. }
            | RecommendError::ProcessingError { .. } => ErrorCategory::Data,
            RecommendError::IoError(_) | RecommendError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            RecommendError::ApiError(_) => {
                "Check network connectivity and the source endpoints, then run again".to_string()
            }
            RecommendError::SourceError { status, .. } if *status == 401 || *status == 403 => {
                "Verify the API key, secret and customer id in the configuration".to_string()
            }
            RecommendError::SourceError { .. } => {
                "The remote source rejected the request; try again later".to_string()
            }
            RecommendError::CsvError(_) => {
                "Make sure the input file has a header row and titles in the first column"
                    .to_string()
            }
            RecommendError::SpreadsheetError { .. } => {
                "Save the workbook as .xlsx with titles in column A of the first sheet".to_string()
            }
            RecommendError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            RecommendError::ZipError(_) | RecommendError::SerializationError(_) => {
                "The output bundle could not be written; check free disk space".to_string()
            }
            RecommendError::MissingConfigError { field } => {
                format!("Add '{}' to the configuration file or pass --offline", field)
            }
            RecommendError::ConfigError { .. }
            | RecommendError::ConfigValidationError { .. }
            | RecommendError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again".to_string()
            }
            RecommendError::ProcessingError { .. } => {
                "Inspect the input rows for unexpected content".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Remote source unavailable: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Data => format!("Input data problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
