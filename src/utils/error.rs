use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiftError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl SiftError {
    /// Short hint shown next to the error on the CLI.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::CsvError(_) => "Check that the records file is comma-separated with an origin and rank column",
            Self::IoError(_) => "Check that the input path exists and the output path is writable",
            Self::MissingConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Run with --help to see the expected arguments"
            }
            Self::ProcessingError { .. } => "Re-run with --verbose for per-stage diagnostics",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiftError>;
