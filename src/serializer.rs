//! Shopping list persistence.
//!
//! The list is written to a temporary file next to the destination and then
//! persisted over it, so the destination either keeps its previous content or
//! holds the complete new list.

use crate::errors::{error_logging, AppError, AppResult};
use crate::recipe::Ingredient;
use crate::shopping_list::{whole_amount, OrderLine, ShoppingList};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use tempfile::NamedTempFile;
use tracing::info;

/// On-disk shape of the shopping list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ListFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ListFormat::Text),
            "json" => Ok(ListFormat::Json),
            other => Err(AppError::Config(format!(
                "Unknown shopping list format '{}'. Expected 'text' or 'json'",
                other
            ))),
        }
    }
}

impl fmt::Display for ListFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListFormat::Text => f.write_str("text"),
            ListFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct TotalEntry {
    ingredient: Ingredient,
    label: &'static str,
    amount: i64,
}

#[derive(Debug, Serialize)]
struct ShoppingListDocument<'a> {
    orders: &'a [OrderLine],
    totals: Vec<TotalEntry>,
}

/// Render `list` in the requested format
pub fn render(list: &ShoppingList, format: ListFormat) -> AppResult<String> {
    match format {
        ListFormat::Text => Ok(list.render()),
        ListFormat::Json => {
            let document = ShoppingListDocument {
                orders: &list.orders,
                totals: list
                    .totals
                    .iter()
                    .map(|(ingredient, amount)| TotalEntry {
                        ingredient,
                        label: ingredient.label(),
                        amount: whole_amount(amount),
                    })
                    .collect(),
            };
            let mut json = serde_json::to_string_pretty(&document)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write `contents` to `path`, replacing whatever was there
///
/// A destination that exists but is read-only is refused rather than
/// replaced.
pub fn write_atomically(path: &Path, contents: &str) -> AppResult<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let result = (|| -> io::Result<()> {
        match fs::metadata(path) {
            Ok(metadata) if metadata.permissions().readonly() => {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    "destination is read-only",
                ));
            }
            _ => {}
        }

        let mut temp = NamedTempFile::new_in(directory)?;
        temp.write_all(contents.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    })();

    result.map_err(|e| {
        error_logging::log_filesystem_error(&e, "write_shopping_list", path.to_str());
        AppError::FileSystem(format!(
            "Problem writing the shopping list '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Render `list` and write it to `path`
///
/// Returns the exact text that was written.
pub fn write_shopping_list(
    path: &Path,
    list: &ShoppingList,
    format: ListFormat,
) -> AppResult<String> {
    let contents = render(list, format)?;
    write_atomically(path, &contents)?;
    info!(
        path = %path.display(),
        %format,
        orders = list.orders.len(),
        bytes = contents.len(),
        "Shopping list written"
    );
    Ok(contents)
}
