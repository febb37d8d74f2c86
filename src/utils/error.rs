use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("{path} is not a valid JSON file: {source}")]
    InvalidJsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Table detection failed for {path}: {message}")]
    DetectionError { path: String, message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration file error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Detection,
    Configuration,
}

impl ToolError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ToolError::IoError(_) => ErrorCategory::Io,
            ToolError::CsvError(_)
            | ToolError::SerializationError(_)
            | ToolError::InvalidJsonError { .. } => ErrorCategory::Data,
            ToolError::DetectionError { .. } => ErrorCategory::Detection,
            ToolError::ConfigError { .. }
            | ToolError::MissingConfigError { .. }
            | ToolError::InvalidConfigValueError { .. }
            | ToolError::ConfigValidationError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ToolError::IoError(e) => format!("File access failed: {}", e),
            ToolError::InvalidJsonError { path, .. } => {
                format!("{} is not a valid JSON file", path)
            }
            ToolError::DetectionError { path, .. } => {
                format!("Could not read tables from {}", path)
            }
            ToolError::MissingConfigError { field } => {
                format!("Missing required setting: {}", field)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the path exists and that you have permission to read or write it",
            ErrorCategory::Data => "Check that the input file is well-formed",
            ErrorCategory::Detection => {
                "Check that the file is a readable PDF and that the Tabula jar path is correct"
            }
            ErrorCategory::Configuration => "Check the command-line arguments and configuration file",
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;
