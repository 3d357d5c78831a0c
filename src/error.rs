//! Error types and handling for `DriveWise`

use thiserror::Error;

/// Main error type for the `DriveWise` library
#[derive(Error, Debug)]
pub enum DriveWiseError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl DriveWiseError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            DriveWiseError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            DriveWiseError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            DriveWiseError::Io { .. } => {
                "I/O operation failed. Please check the server address and permissions."
                    .to_string()
            }
        }
    }
}
