//! # Session
//!
//! A session owns the catalogue, the cart and the configuration for one run
//! of the planner. It is the only thing the interactive menu talks to: the
//! menu supplies 1-based recipe selectors and quantities, the session hands
//! back recipe names, the rendered summary and success or failure of file
//! operations.

use crate::cart::Cart;
use crate::catalogue::{self, Catalogue, ParseDiagnostic, Severity};
use crate::config::AppConfig;
use crate::errors::{error_logging, AppError, AppResult};
use crate::serializer;
use crate::shopping_list::{self, ShoppingList};
use std::path::PathBuf;
use tracing::{info, warn};

/// What a catalogue load produced
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub recipe_count: usize,
    pub diagnostics: Vec<ParseDiagnostic>,
    pub discarded: Vec<String>,
}

impl LoadReport {
    /// Diagnostics that only warrant a warning
    pub fn warnings(&self) -> impl Iterator<Item = &ParseDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    /// Malformed lines as application errors
    pub fn parse_errors(&self) -> Vec<AppError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
            .map(AppError::from)
            .collect()
    }
}

/// Catalogue, cart and settings for one planning session
#[derive(Debug, Clone)]
pub struct Session {
    config: AppConfig,
    catalogue: Catalogue,
    cart: Cart,
}

impl Session {
    /// Create a session with an empty catalogue
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            catalogue: Catalogue::default(),
            cart: Cart::new(),
        }
    }

    /// Create a session around an already loaded catalogue
    pub fn with_catalogue(config: AppConfig, catalogue: Catalogue) -> Self {
        Self {
            config,
            catalogue,
            cart: Cart::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Load the configured recipe list, replacing the current catalogue
    ///
    /// On a read failure the session keeps the recipes parsed before the
    /// failure and the error is returned. The cart is cleared in both cases
    /// since its indices refer to the previous catalogue.
    pub fn load_catalogue(&mut self) -> AppResult<LoadReport> {
        let path = self.config.files.recipe_list_path.clone();
        self.cart.clear();

        match catalogue::load_catalogue(&path) {
            Ok(outcome) => {
                self.catalogue = outcome.catalogue;
                Ok(LoadReport {
                    recipe_count: self.catalogue.len(),
                    diagnostics: outcome.diagnostics,
                    discarded: outcome.discarded,
                })
            }
            Err(failure) => {
                warn!(
                    recipes = failure.partial.catalogue.len(),
                    "Keeping recipes parsed before the load failure"
                );
                self.catalogue = failure.partial.catalogue;
                Err(failure.error)
            }
        }
    }

    pub fn recipe_count(&self) -> usize {
        self.catalogue.len()
    }

    pub fn recipe_names(&self) -> Vec<&str> {
        self.catalogue.names()
    }

    /// Change the ordered quantity of a recipe
    ///
    /// `selector` is 1-based, as shown in the recipe menu. `quantity` may be
    /// negative to remove loaves. Returns the quantity now in the cart.
    pub fn order(&mut self, selector: usize, quantity: i64) -> AppResult<i64> {
        if selector == 0 || selector > self.catalogue.len() {
            let err = AppError::Validation(format!(
                "Recipe {} does not exist. Choose a recipe between 1 and {}",
                selector,
                self.catalogue.len()
            ));
            error_logging::log_validation_error(
                &err,
                "order",
                "recipe_selector",
                Some(&selector.to_string()),
            );
            return Err(err);
        }

        let now = self.cart.adjust(selector - 1, quantity);
        info!(selector, quantity, in_cart = now, "Order updated");
        Ok(now)
    }

    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Aggregate the cart into a shopping list
    pub fn summary(&self) -> ShoppingList {
        shopping_list::summarize(&self.cart, &self.catalogue)
    }

    /// Text form of [`summary`](Self::summary)
    pub fn render_summary(&self) -> String {
        self.summary().render()
    }

    /// Write the shopping list to the configured destination
    ///
    /// Returns the path written to.
    pub fn save_summary(&self) -> AppResult<PathBuf> {
        let path = self.config.files.shopping_list_path.clone();
        serializer::write_shopping_list(&path, &self.summary(), self.config.files.list_format)?;
        Ok(path)
    }
}
