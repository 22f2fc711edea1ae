//! # Application Error Types
//!
//! This module defines common error types used throughout the bread planner.
//! It provides structured error handling for catalogue loading, cart updates
//! and shopping list persistence.

use std::fmt;

/// General application error type for consistent error handling
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    /// Configuration validation errors
    Config(String),
    /// Validation errors (recipe selectors, order quantities, etc.)
    Validation(String),
    /// Malformed recipe catalogue content
    Parse(String),
    /// File system errors
    FileSystem(String),
    /// Shopping list serialization errors
    Serialization(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(msg) => write!(f, "[CONFIG] {}", msg),
            AppError::Validation(msg) => write!(f, "[VALIDATION] {}", msg),
            AppError::Parse(msg) => write!(f, "[PARSE] {}", msg),
            AppError::FileSystem(msg) => write!(f, "[FILESYSTEM] {}", msg),
            AppError::Serialization(msg) => write!(f, "[SERIALIZATION] {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Standardized error logging utilities for consistent error reporting across the application
pub mod error_logging {
    use tracing::error;

    /// Log file system errors with path and operation context
    pub fn log_filesystem_error(
        error: &impl std::fmt::Display,
        operation: &str,
        path: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            path = ?path,
            "File system operation failed"
        );
    }

    /// Log catalogue parse errors with line and recipe context
    pub fn log_parse_error(
        error: &impl std::fmt::Display,
        line_number: usize,
        recipe_name: Option<&str>,
        line: &str,
    ) {
        error!(
            error = %error,
            line_number = %line_number,
            recipe_name = ?recipe_name,
            line = ?if line.chars().count() > 100 { format!("{}...", line.chars().take(100).collect::<String>()) } else { line.to_string() },
            "Recipe catalogue line rejected"
        );
    }

    /// Log validation errors with input context
    pub fn log_validation_error(
        error: &impl std::fmt::Display,
        operation: &str,
        input_type: &str,
        input_value: Option<&str>,
    ) {
        error!(
            error = %error,
            operation = %operation,
            input_type = %input_type,
            input_value = ?input_value,
            "Validation failed"
        );
    }

    /// Log configuration errors during startup/initialization
    pub fn log_config_error(error: &impl std::fmt::Display, config_key: &str, operation: &str) {
        error!(
            error = %error,
            config_key = %config_key,
            operation = %operation,
            "Configuration error"
        );
    }
}
