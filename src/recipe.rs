//! # Recipe Records
//!
//! A recipe is a name plus the five ingredient amounts the bakery tracks.
//! Ingredients form a closed set, so they are modelled as an enum and every
//! per-ingredient table in the crate is indexed by it.

use serde::Serialize;
use std::fmt;

/// The ingredients a recipe can call for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Ingredient {
    Butter,
    Eggs,
    Flour,
    Sugar,
    Yeast,
}

impl Ingredient {
    /// All ingredients, in shopping list order
    pub const ALL: [Ingredient; 5] = [
        Ingredient::Butter,
        Ingredient::Eggs,
        Ingredient::Flour,
        Ingredient::Sugar,
        Ingredient::Yeast,
    ];

    /// Match a catalogue token (case-insensitive) against the known ingredients
    ///
    /// # Examples
    /// ```
    /// use bread_planner::recipe::Ingredient;
    ///
    /// assert_eq!(Ingredient::from_token("FLOUR"), Some(Ingredient::Flour));
    /// assert_eq!(Ingredient::from_token(" eggs "), Some(Ingredient::Eggs));
    /// assert_eq!(Ingredient::from_token("cocoa"), None);
    /// ```
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "butter" => Some(Ingredient::Butter),
            "eggs" => Some(Ingredient::Eggs),
            "flour" => Some(Ingredient::Flour),
            "sugar" => Some(Ingredient::Sugar),
            "yeast" => Some(Ingredient::Yeast),
            _ => None,
        }
    }

    /// Token used for this ingredient in the recipe catalogue
    pub fn token(self) -> &'static str {
        match self {
            Ingredient::Butter => "butter",
            Ingredient::Eggs => "eggs",
            Ingredient::Flour => "flour",
            Ingredient::Sugar => "sugar",
            Ingredient::Yeast => "yeast",
        }
    }

    /// Unit-labelled name printed on the shopping list
    pub fn label(self) -> &'static str {
        match self {
            Ingredient::Butter => "grams of butter",
            Ingredient::Eggs => "egg(s)",
            Ingredient::Flour => "grams of flour",
            Ingredient::Sugar => "grams of sugar",
            Ingredient::Yeast => "grams of yeast",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Ingredient::Butter => 0,
            Ingredient::Eggs => 1,
            Ingredient::Flour => 2,
            Ingredient::Sugar => 3,
            Ingredient::Yeast => 4,
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A bread recipe as read from the catalogue
///
/// Amounts default to zero. Only the catalogue parser fills them in; once a
/// recipe is in a [`Catalogue`](crate::catalogue::Catalogue) it is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    name: String,
    sugar: f64,
    eggs: f64,
    flour: f64,
    yeast: f64,
    butter: f64,
}

impl Recipe {
    /// Create a recipe with every ingredient amount set to zero
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sugar: 0.0,
            eggs: 0.0,
            flour: 0.0,
            yeast: 0.0,
            butter: 0.0,
        }
    }

    /// Builder-style setter, handy for constructing fixtures
    pub fn with(mut self, ingredient: Ingredient, amount: f64) -> Self {
        self.set(ingredient, amount);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Amount of `ingredient` one loaf of this recipe needs
    pub fn amount(&self, ingredient: Ingredient) -> f64 {
        match ingredient {
            Ingredient::Butter => self.butter,
            Ingredient::Eggs => self.eggs,
            Ingredient::Flour => self.flour,
            Ingredient::Sugar => self.sugar,
            Ingredient::Yeast => self.yeast,
        }
    }

    pub(crate) fn set(&mut self, ingredient: Ingredient, amount: f64) {
        match ingredient {
            Ingredient::Butter => self.butter = amount,
            Ingredient::Eggs => self.eggs = amount,
            Ingredient::Flour => self.flour = amount,
            Ingredient::Sugar => self.sugar = amount,
            Ingredient::Yeast => self.yeast = amount,
        }
    }
}
