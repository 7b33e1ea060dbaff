//! Segscope error types

/// Generic text shown when the classification service could not be reached.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred while processing the file";

/// Segscope error types
#[derive(Debug, thiserror::Error)]
pub enum SegscopeError {
    // Upload gate (pre-flight, local)
    #[error("no file selected")]
    NoFileSelected,

    #[error("wrong format: only CSV files are accepted")]
    WrongFormat,

    #[error("file too large: {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    /// Another upload is still in flight.
    #[error("an upload is already in progress")]
    Busy,

    // Transport errors
    /// No HTTP response was received at all.
    #[error("transport failure: {0}")]
    TransportFailure(String),

    /// The service answered with a non-success status, or with a success
    /// status and a body that is not a list of records.
    #[error("server rejected upload ({status}): {message}")]
    ServerRejected { status: u16, message: String },

    // Local data errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl SegscopeError {
    /// Text suitable for a transient user notification.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoFileSelected => "Please select a file".to_string(),
            Self::WrongFormat => "Only CSV files are accepted".to_string(),
            Self::TooLarge { .. } => "File size must be less than 10MB".to_string(),
            Self::Busy => "A file is already being processed".to_string(),
            Self::TransportFailure(_) => GENERIC_FAILURE_MESSAGE.to_string(),
            Self::ServerRejected { message, .. } => message.clone(),
            Self::Io(e) => format!("Could not read file: {e}"),
            Self::Json(e) => format!("Invalid results file: {e}"),
            Self::Configuration(msg) => msg.clone(),
        }
    }

    /// Whether this error was raised by the upload gate before any request was made.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::NoFileSelected | Self::WrongFormat | Self::TooLarge { .. } | Self::Busy
        )
    }

    /// Short machine-friendly label, used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoFileSelected => "no_file_selected",
            Self::WrongFormat => "wrong_format",
            Self::TooLarge { .. } => "too_large",
            Self::Busy => "busy",
            Self::TransportFailure(_) => "transport_failure",
            Self::ServerRejected { .. } => "server_rejected",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::Configuration(_) => "configuration",
        }
    }
}

/// Result type alias for Segscope operations
pub type Result<T> = std::result::Result<T, SegscopeError>;
