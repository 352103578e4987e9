//! Error types module
//!
//! `AppError` is the application-level error every layer converts into before
//! it reaches a client. Each variant self-describes its HTTP presentation via
//! [`ErrorMetadata`].

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors such as rejected file types
    Debug,
    /// Recoverable issues such as an oversized payload or an interrupted stream
    Warn,
    /// Failures on the server side
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_FILE_TYPE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported file type: '{extension}'")]
    UnsupportedFileType { extension: String },

    #[error("Payload exceeds the {limit} byte upload limit")]
    PayloadTooLarge { limit: u64 },

    #[error("Upload destination unavailable: {0}")]
    DestinationUnavailable(String),

    #[error("Upload stream failed: {0}")]
    StreamFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::UnsupportedFileType { .. } => (
            415,
            "UNSUPPORTED_FILE_TYPE",
            false,
            Some("Upload a file with an allowed extension"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge { .. } => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size and try again"),
            false,
            LogLevel::Warn,
        ),
        AppError::DestinationUnavailable(_) => (
            503,
            "DESTINATION_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::StreamFailed(_) => (
            400,
            "STREAM_FAILED",
            true,
            Some("Retry the upload"),
            false,
            LogLevel::Warn,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Send a multipart/form-data body with a 'file' part"),
            false,
            LogLevel::Debug,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::UnsupportedFileType { .. } => "UnsupportedFileType",
            AppError::PayloadTooLarge { .. } => "PayloadTooLarge",
            AppError::DestinationUnavailable(_) => "DestinationUnavailable",
            AppError::StreamFailed(_) => "StreamFailed",
            AppError::InvalidInput(_) => "InvalidInput",
        }
    }

    /// Full internal message, returned to clients only outside production
    pub fn detailed_message(&self) -> String {
        self.to_string()
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::UnsupportedFileType { extension } if extension.is_empty() => {
                "Files without an extension are not accepted".to_string()
            }
            AppError::UnsupportedFileType { extension } => {
                format!("File type '{}' is not accepted", extension)
            }
            AppError::PayloadTooLarge { limit } => {
                format!("File exceeds the maximum upload size of {} bytes", limit)
            }
            AppError::DestinationUnavailable(_) => "Upload destination is unavailable".to_string(),
            AppError::StreamFailed(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
        }
    }
}
