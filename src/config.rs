//! # Unified Application Configuration
//!
//! This module gathers every setting of the bread planner into a single
//! structured configuration object. Values are read from environment
//! variables (a `.env` file is loaded first by the binary), validated once at
//! startup, and then handed to the [`Session`](crate::session::Session).

use crate::errors::{error_logging, AppError, AppResult};
use crate::path_validation::validate_file_path;
use crate::serializer::ListFormat;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Input and output file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileConfig {
    /// Recipe catalogue to load at startup
    pub recipe_list_path: PathBuf,
    /// Where the shopping list is saved
    pub shopping_list_path: PathBuf,
    /// Format used when saving the shopping list
    pub list_format: ListFormat,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            recipe_list_path: PathBuf::from("./recipelist.txt"),
            shopping_list_path: PathBuf::from("./shoppinglist.txt"),
            list_format: ListFormat::Text,
        }
    }
}

impl FileConfig {
    /// Validate file configuration
    pub fn validate(&self) -> AppResult<()> {
        for (key, path) in [
            ("RECIPE_LIST_PATH", &self.recipe_list_path),
            ("SHOPPING_LIST_PATH", &self.shopping_list_path),
        ] {
            let raw = path.to_str().ok_or_else(|| {
                AppError::Config(format!("{} must be valid UTF-8", key))
            })?;
            validate_file_path(raw).map_err(|e| {
                AppError::Config(format!("{} '{}' is invalid: {}", key, raw, e))
            })?;
        }

        if self.recipe_list_path == self.shopping_list_path {
            return Err(AppError::Config(
                "Shopping list path cannot be the same as the recipe list path".to_string(),
            ));
        }

        Ok(())
    }
}

/// Limits applied to interactive orders
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Largest quantity change accepted in one order, in either direction
    pub max_order_quantity: i64,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            max_order_quantity: 1000,
        }
    }
}

impl OrderConfig {
    /// Validate order configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.max_order_quantity <= 0 {
            return Err(AppError::Config(
                "Max order quantity must be greater than 0".to_string(),
            ));
        }

        if self.max_order_quantity > 1_000_000 {
            return Err(AppError::Config(
                "Max order quantity cannot be greater than 1000000".to_string(),
            ));
        }

        Ok(())
    }
}

/// Log output style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!(
                "Unknown log format '{}'. Expected 'pretty', 'compact' or 'json'",
                other
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level for the bread_planner target
    pub level: String,
    /// Output style
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl LoggingConfig {
    const LEVELS: [&'static str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

    /// Validate logging configuration
    pub fn validate(&self) -> AppResult<()> {
        let level = self.level.trim().to_lowercase();
        if !Self::LEVELS.contains(&level.as_str()) {
            return Err(AppError::Config(format!(
                "Log level '{}' is invalid. Expected one of: {}",
                self.level,
                Self::LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Unified application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// File locations and formats
    pub files: FileConfig,
    /// Interactive order limits
    pub orders: OrderConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Missing keys fall back to defaults; present but unparsable values are
    /// configuration errors.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("RECIPE_LIST_PATH") {
            config.files.recipe_list_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("SHOPPING_LIST_PATH") {
            config.files.shopping_list_path = PathBuf::from(path);
        }
        if let Some(format) = lookup("SHOPPING_LIST_FORMAT") {
            config.files.list_format = format.parse::<ListFormat>().inspect_err(|e| {
                error_logging::log_config_error(e, "SHOPPING_LIST_FORMAT", "from_env")
            })?;
        }

        if let Some(max) = lookup("MAX_ORDER_QUANTITY") {
            config.orders.max_order_quantity = max.trim().parse::<i64>().map_err(|_| {
                let err =
                    AppError::Config("MAX_ORDER_QUANTITY must be a valid number".to_string());
                error_logging::log_config_error(&err, "MAX_ORDER_QUANTITY", "from_env");
                err
            })?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level.trim().to_lowercase();
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            config.logging.format = format.parse::<LogFormat>().inspect_err(|e| {
                error_logging::log_config_error(e, "LOG_FORMAT", "from_env")
            })?;
        }

        Ok(config)
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        self.files.validate()?;
        self.orders.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: recipe_list={}, shopping_list={}, list_format={}, max_order_quantity={}, log_level={}, log_format={}",
            self.files.recipe_list_path.display(),
            self.files.shopping_list_path.display(),
            self.files.list_format,
            self.orders.max_order_quantity,
            self.logging.level,
            self.logging.format
        )
    }
}
