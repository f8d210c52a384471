use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Cannot open catalog source '{path}': {source}")]
    SourceUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },

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

    #[error("Catalog already loaded")]
    AlreadyLoaded,

    #[error("Catalog not loaded")]
    NotLoaded,

    #[error("Unknown course: {id}")]
    UnknownCourse { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Source,
    Parsing,
    Configuration,
    Session,
    Lookup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CatalogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SourceUnavailable { .. } | Self::IoError(_) => ErrorCategory::Source,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Parsing,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::AlreadyLoaded | Self::NotLoaded => ErrorCategory::Session,
            Self::UnknownCourse { .. } => ErrorCategory::Lookup,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyLoaded | Self::NotLoaded => ErrorSeverity::Low,
            Self::UnknownCourse { .. } => ErrorSeverity::Medium,
            Self::CsvError(_)
            | Self::SerializationError(_)
            | Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::SourceUnavailable { .. } | Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// 會話可以繼續的錯誤 (選單迴圈只回報，不結束)
    pub fn is_recoverable(&self) -> bool {
        self.severity() <= ErrorSeverity::Medium
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } | Self::IoError(_) => {
                "Check that the course file exists and is readable"
            }
            Self::CsvError(_) => "Check the course file for unreadable rows or encoding problems",
            Self::SerializationError(_) => "Retry without --json",
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file or command-line flags",
            Self::AlreadyLoaded => "The catalog is already loaded, continue with list or lookup",
            Self::NotLoaded => "Load the data structure first (menu option 1)",
            Self::UnknownCourse { .. } => "Use a course ID from the course list, e.g. CSCI100",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::SourceUnavailable { path, .. } => format!("ERROR: File '{}' failed to open!", path),
            Self::AlreadyLoaded => "ERROR: File already loaded.".to_string(),
            Self::NotLoaded => "ERROR: Data structure not loaded.".to_string(),
            Self::UnknownCourse { .. } => "ERROR: Invalid course.".to_string(),
            other => format!("ERROR: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
