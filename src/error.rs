//! Error handling for unique-pass-gen

use thiserror::Error;

/// Main error type for unique-pass-gen
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PassGenError {
    #[error("no character class selected")]
    NoClassSelected,

    #[error("the selected length {length} exceeds the allowed length {pool_size}")]
    LengthExceedsPool { length: usize, pool_size: usize },

    #[error("length {length} is shorter than the {classes} selected sets")]
    LengthBelowClassCount { length: usize, classes: usize },

    #[error("invalid length: {value}")]
    InvalidLength { value: String },

    #[error("malformed request body: {message}")]
    MalformedRequest { message: String },

    #[error("ran out of unique characters: needed {needed}, {available} available")]
    InsufficientUniqueCharacters { needed: usize, available: usize },

    #[error("secure random source failed: {message}")]
    RandomSourceFailure { message: String },

    #[error("all {space} possible passwords for this selection were already issued")]
    PasswordSpaceExhausted { space: u128 },

    #[error("no unused password found after {attempts} attempts")]
    AttemptsExhausted { attempts: u64 },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("CLI error: {message}")]
    Cli { message: String },
}

impl PassGenError {
    /// Create a length-exceeds-pool error
    pub fn length_exceeds_pool(length: usize, pool_size: usize) -> Self {
        Self::LengthExceedsPool { length, pool_size }
    }

    /// Create an invalid length error
    pub fn invalid_length(value: impl Into<String>) -> Self {
        Self::InvalidLength {
            value: value.into(),
        }
    }

    /// Create a malformed-request error
    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    /// Create an insufficient-unique-characters error
    pub fn insufficient_unique_characters(needed: usize, available: usize) -> Self {
        Self::InsufficientUniqueCharacters { needed, available }
    }

    /// Wrap a failure of the secure random source
    pub fn random_source(err: impl std::fmt::Display) -> Self {
        Self::RandomSourceFailure {
            message: err.to_string(),
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// Errors caused by the request itself rather than by the service
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NoClassSelected
                | Self::LengthExceedsPool { .. }
                | Self::LengthBelowClassCount { .. }
                | Self::InvalidLength { .. }
                | Self::MalformedRequest { .. }
                | Self::Cli { .. }
        )
    }

    /// Short machine-readable name, used by the JSON API
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoClassSelected => "no_class_selected",
            Self::LengthExceedsPool { .. } => "length_exceeds_pool",
            Self::LengthBelowClassCount { .. } => "length_below_class_count",
            Self::InvalidLength { .. } => "invalid_length",
            Self::MalformedRequest { .. } => "malformed_request",
            Self::InsufficientUniqueCharacters { .. } => "insufficient_unique_characters",
            Self::RandomSourceFailure { .. } => "random_source_failure",
            Self::PasswordSpaceExhausted { .. } => "password_space_exhausted",
            Self::AttemptsExhausted { .. } => "attempts_exhausted",
            Self::Timeout { .. } => "timeout",
            Self::Config { .. } => "config",
            Self::Io { .. } => "io",
            Self::Internal { .. } => "internal",
            Self::Cli { .. } => "cli",
        }
    }

    /// HTTP status code the request boundary responds with
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NoClassSelected
            | Self::LengthExceedsPool { .. }
            | Self::LengthBelowClassCount { .. }
            | Self::InvalidLength { .. }
            | Self::MalformedRequest { .. }
            | Self::Cli { .. } => 400,
            Self::PasswordSpaceExhausted { .. } | Self::AttemptsExhausted { .. } => 409,
            Self::Timeout { .. } => 503,
            _ => 500,
        }
    }

    /// Get user-friendly error message
    ///
    /// Internal failures collapse into one generic message so that nothing about
    /// the random source or pool accounting leaks to the client.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoClassSelected => "select at least one set".to_string(),
            Self::LengthExceedsPool { pool_size, .. } => format!(
                "the selected length exceeds the allowed length ({} characters max for this selection)",
                pool_size
            ),
            Self::LengthBelowClassCount { classes, .. } => format!(
                "the selected length is too short, it must be at least {} for this selection",
                classes
            ),
            Self::InvalidLength { .. } => "invalid length".to_string(),
            Self::MalformedRequest { .. } => "malformed request body".to_string(),
            Self::PasswordSpaceExhausted { .. } | Self::AttemptsExhausted { .. } => {
                "no new password is available for this selection, try a longer length or more sets"
                    .to_string()
            }
            Self::Timeout { .. } => "password generation took too long, please retry".to_string(),
            Self::Cli { message } => format!("{}\nUse --help for usage information", message),
            _ => "internal server error".to_string(),
        }
    }
}

impl From<rand::Error> for PassGenError {
    fn from(err: rand::Error) -> Self {
        Self::random_source(err)
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PassGenError>;

#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::PassGenError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::PassGenError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::PassGenError::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::PassGenError::internal(format!($fmt, $($arg)*))
    };
}
