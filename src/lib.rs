//! # Bread Planner
//!
//! Loads a catalogue of bread recipes from a text file, collects loaf orders
//! in a cart and folds them into a consolidated ingredient shopping list.

pub mod cart;
pub mod catalogue;
pub mod config;
pub mod errors;
pub mod menu;
pub mod observability;
pub mod path_validation;
pub mod recipe;
pub mod serializer;
pub mod session;
pub mod shopping_list;

// Re-export types for easier access
pub use cart::Cart;
pub use catalogue::{Catalogue, ParseOutcome};
pub use errors::{AppError, AppResult};
pub use recipe::{Ingredient, Recipe};
pub use session::Session;
pub use shopping_list::{summarize, ShoppingList};
