//! Path Validation module for configured file locations
//!
//! The recipe list and shopping list paths come from the environment, so they
//! are checked once at startup before any file is opened:
//!
//! - Empty paths and null bytes are rejected
//! - Path and file name length limits are enforced
//! - Reserved device names (CON, NUL, ...) are rejected for portability
//! - The path must name a file, not end in a directory component
//!
//! ## Usage Examples
//!
//! ```rust
//! use bread_planner::path_validation::{validate_file_path, PathValidationError};
//!
//! assert!(validate_file_path("./recipelist.txt").is_ok());
//! assert_eq!(validate_file_path(""), Err(PathValidationError::EmptyPath));
//! assert_eq!(validate_file_path("out/"), Err(PathValidationError::MissingFileName));
//! ```

use std::fmt;
use std::path::Path;

/// Errors that can occur during path validation
#[derive(Debug, Clone, PartialEq)]
pub enum PathValidationError {
    /// Empty path provided
    EmptyPath,
    /// Path contains null bytes
    NullByte,
    /// Path is too long
    PathTooLong,
    /// Filename is too long
    FilenameTooLong,
    /// Filename uses reserved name
    ReservedName,
    /// Path does not end in a file name
    MissingFileName,
}

impl fmt::Display for PathValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathValidationError::EmptyPath => write!(f, "path is empty"),
            PathValidationError::NullByte => write!(f, "path contains a null byte"),
            PathValidationError::PathTooLong => {
                write!(f, "path is longer than {} bytes", MAX_PATH_LENGTH)
            }
            PathValidationError::FilenameTooLong => {
                write!(f, "file name is longer than {} bytes", MAX_FILENAME_LENGTH)
            }
            PathValidationError::ReservedName => write!(f, "file name is a reserved device name"),
            PathValidationError::MissingFileName => write!(f, "path does not name a file"),
        }
    }
}

impl std::error::Error for PathValidationError {}

/// Result type for path validation operations
pub type PathValidationResult<T> = Result<T, PathValidationError>;

/// Maximum allowed filename length (255 bytes on most filesystems)
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Maximum allowed path length (4096 bytes on most systems)
pub const MAX_PATH_LENGTH: usize = 4096;

/// Reserved filenames that should not be used (Windows compatibility)
pub const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Validate a configured file path
pub fn validate_file_path(path: &str) -> PathValidationResult<()> {
    if path.trim().is_empty() {
        return Err(PathValidationError::EmptyPath);
    }

    if path.contains('\0') {
        return Err(PathValidationError::NullByte);
    }

    if path.len() > MAX_PATH_LENGTH {
        return Err(PathValidationError::PathTooLong);
    }

    if path.ends_with('/') || path.ends_with('\\') {
        return Err(PathValidationError::MissingFileName);
    }

    let file_name = Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or(PathValidationError::MissingFileName)?;

    if file_name.len() > MAX_FILENAME_LENGTH {
        return Err(PathValidationError::FilenameTooLong);
    }

    if is_reserved_name(file_name) {
        return Err(PathValidationError::ReservedName);
    }

    Ok(())
}

/// Check the stem of `file_name` against [`RESERVED_NAMES`], ignoring case
pub fn is_reserved_name(file_name: &str) -> bool {
    let stem = file_name.split('.').next().unwrap_or(file_name);
    RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
}
