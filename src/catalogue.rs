//! # Recipe Catalogue
//!
//! This module reads the plain-text recipe list into an ordered, read-only
//! [`Catalogue`].
//!
//! ## File format
//!
//! ```text
//! Recipe White
//! flour 500
//! sugar 10
//!
//! Recipe Rye
//! flour 400
//! yeast 5
//! ```
//!
//! - A line whose first token is `Recipe` starts a new recipe; the rest of the
//!   line is its name.
//! - A blank line closes the current recipe.
//! - Any other line inside a recipe is `<ingredient> <amount>`.
//! - The last recipe does not need a trailing blank line.
//!
//! ## Diagnostics
//!
//! Parsing never aborts. Unknown ingredients are reported as warnings and
//! skipped. A malformed ingredient line (missing or non-numeric amount) is an
//! error: the recipe it belongs to is dropped from the catalogue while every
//! other recipe is kept.
//!
//! Bytes that are not valid UTF-8 are replaced with U+FFFD and the line is
//! reported as a warning; only a failing reader ends a load early.

use crate::errors::{error_logging, AppError};
use crate::recipe::{Ingredient, Recipe};
use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

lazy_static! {
    static ref RECIPE_MARKER: Regex =
        Regex::new(r"^Recipe(?:\s+(?P<name>.*?))?\s*$").expect("Invalid recipe marker pattern");
    static ref INGREDIENT_LINE: Regex = Regex::new(r"^\s*(?P<name>\S+)(?:\s+(?P<amount>\S+))?")
        .expect("Invalid ingredient line pattern");
}

/// Ordered, read-only sequence of recipes
///
/// A recipe is identified by its position, so two recipes may share a name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogue {
    recipes: Vec<Recipe>,
}

impl Catalogue {
    pub fn from_recipes(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Recipe at a 0-based position
    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.recipes.iter().map(Recipe::name).collect()
    }
}

/// How serious a parse diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// What went wrong on a catalogue line
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticKind {
    /// Ingredient name is not one of the five known ingredients
    UnknownIngredient { token: String },
    /// Ingredient line with no amount token
    MissingAmount { token: String },
    /// Amount token is not a finite, non-negative number
    InvalidAmount { token: String, amount: String },
    /// Ingredient line that does not belong to any recipe
    OrphanLine,
    /// Line bytes were not valid UTF-8 and were decoded with replacement characters
    InvalidEncoding,
}

/// A problem found while parsing, tied to its 1-based line number
#[derive(Debug, Clone, PartialEq)]
pub struct ParseDiagnostic {
    pub line_number: usize,
    pub recipe: Option<String>,
    pub kind: DiagnosticKind,
}

impl ParseDiagnostic {
    pub fn severity(&self) -> Severity {
        match self.kind {
            DiagnosticKind::UnknownIngredient { .. }
            | DiagnosticKind::OrphanLine
            | DiagnosticKind::InvalidEncoding => Severity::Warning,
            DiagnosticKind::MissingAmount { .. } | DiagnosticKind::InvalidAmount { .. } => {
                Severity::Error
            }
        }
    }
}

impl fmt::Display for ParseDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: ", self.line_number)?;
        match &self.kind {
            DiagnosticKind::UnknownIngredient { token } => {
                write!(f, "unexpected ingredient encountered: {}", token)?
            }
            DiagnosticKind::MissingAmount { token } => {
                write!(f, "ingredient '{}' has no amount", token)?
            }
            DiagnosticKind::InvalidAmount { token, amount } => {
                write!(f, "ingredient '{}' has an invalid amount '{}'", token, amount)?
            }
            DiagnosticKind::OrphanLine => write!(f, "ingredient line outside of a recipe")?,
            DiagnosticKind::InvalidEncoding => {
                write!(f, "line is not valid UTF-8, unreadable characters were replaced")?
            }
        }
        if let Some(recipe) = &self.recipe {
            write!(f, " (recipe '{}')", recipe)?;
        }
        Ok(())
    }
}

impl From<&ParseDiagnostic> for AppError {
    fn from(diagnostic: &ParseDiagnostic) -> Self {
        AppError::Parse(diagnostic.to_string())
    }
}

/// Everything a parse produced: the catalogue plus what was skipped and why
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutcome {
    pub catalogue: Catalogue,
    pub diagnostics: Vec<ParseDiagnostic>,
    /// Names of recipes dropped because of malformed ingredient lines
    pub discarded: Vec<String>,
}

impl ParseOutcome {
    pub fn warnings(&self) -> impl Iterator<Item = &ParseDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ParseDiagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity() == Severity::Error)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }
}

/// The catalogue file could not be read to the end
///
/// `partial` holds whatever was parsed before the failure.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadFailure {
    pub partial: ParseOutcome,
    pub error: AppError,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} recipe(s) parsed before the failure)",
            self.error,
            self.partial.catalogue.len()
        )
    }
}

impl std::error::Error for LoadFailure {}

struct PendingRecipe {
    recipe: Recipe,
    malformed: bool,
}

enum ParserState {
    Idle,
    InRecipe(PendingRecipe),
}

/// Line-driven catalogue parser
///
/// Feed lines with [`feed_line`](Self::feed_line) and call
/// [`finish`](Self::finish) at end of input to flush the last recipe.
pub struct CatalogueParser {
    state: ParserState,
    recipes: Vec<Recipe>,
    diagnostics: Vec<ParseDiagnostic>,
    discarded: Vec<String>,
    line_number: usize,
}

impl Default for CatalogueParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogueParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Idle,
            recipes: Vec::new(),
            diagnostics: Vec::new(),
            discarded: Vec::new(),
            line_number: 0,
        }
    }

    /// Number of recipes completed so far
    pub fn recipe_count(&self) -> usize {
        self.recipes.len()
    }

    pub fn feed_line(&mut self, line: &str) {
        self.line_number += 1;

        if let Some(captures) = RECIPE_MARKER.captures(line) {
            let name = captures
                .name("name")
                .map(|m| m.as_str().trim())
                .unwrap_or_default();
            self.start_recipe(name);
        } else if line.trim().is_empty() {
            self.flush();
        } else {
            self.ingredient_line(line);
        }
    }

    /// Flush any recipe still in progress and return the result
    pub fn finish(mut self) -> ParseOutcome {
        self.flush();
        info!(
            recipes = self.recipes.len(),
            diagnostics = self.diagnostics.len(),
            discarded = self.discarded.len(),
            "Recipe catalogue parsed"
        );
        ParseOutcome {
            catalogue: Catalogue::from_recipes(self.recipes),
            diagnostics: self.diagnostics,
            discarded: self.discarded,
        }
    }

    /// Feed a raw line that may not be valid UTF-8
    ///
    /// Invalid sequences become U+FFFD and the line gets a warning; parsing
    /// carries on with the next line.
    pub fn feed_bytes(&mut self, bytes: &[u8]) {
        let bytes = bytes.strip_suffix(b"\n").unwrap_or(bytes);
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);

        match String::from_utf8_lossy(bytes) {
            Cow::Borrowed(line) => self.feed_line(line),
            Cow::Owned(line) => {
                self.feed_line(&line);
                let recipe = match &self.state {
                    ParserState::InRecipe(pending) => Some(pending.recipe.name().to_string()),
                    ParserState::Idle => None,
                };
                warn!(
                    line_number = self.line_number,
                    line = %line,
                    "Recipe list line is not valid UTF-8"
                );
                self.diagnostics.push(ParseDiagnostic {
                    line_number: self.line_number,
                    recipe,
                    kind: DiagnosticKind::InvalidEncoding,
                });
            }
        }
    }

    /// Keep only fully closed recipes; the one in progress may be truncated
    fn finish_partial(mut self) -> ParseOutcome {
        self.state = ParserState::Idle;
        self.finish()
    }

    fn start_recipe(&mut self, name: &str) {
        // A marker without a blank line before it still closes the previous recipe
        self.flush();
        if name.is_empty() {
            warn!(line_number = self.line_number, "Recipe marker without a name");
        }
        debug!(line_number = self.line_number, recipe = %name, "Starting recipe");
        self.state = ParserState::InRecipe(PendingRecipe {
            recipe: Recipe::new(name),
            malformed: false,
        });
    }

    fn flush(&mut self) {
        match std::mem::replace(&mut self.state, ParserState::Idle) {
            ParserState::Idle => {}
            ParserState::InRecipe(pending) if pending.malformed => {
                warn!(
                    recipe = %pending.recipe.name(),
                    "Discarding recipe with malformed ingredient lines"
                );
                self.discarded.push(pending.recipe.name().to_string());
            }
            ParserState::InRecipe(pending) => {
                debug!(recipe = %pending.recipe.name(), "Recipe complete");
                self.recipes.push(pending.recipe);
            }
        }
    }

    fn ingredient_line(&mut self, line: &str) {
        let line_number = self.line_number;
        let pending = match &mut self.state {
            ParserState::InRecipe(pending) => pending,
            ParserState::Idle => {
                warn!(line_number, line = %line, "Ingredient line outside of a recipe, skipping");
                self.diagnostics.push(ParseDiagnostic {
                    line_number,
                    recipe: None,
                    kind: DiagnosticKind::OrphanLine,
                });
                return;
            }
        };

        let recipe_name = pending.recipe.name().to_string();
        match parse_ingredient_line(line) {
            Ok(Some((ingredient, amount))) => {
                debug!(line_number, recipe = %recipe_name, %ingredient, amount, "Ingredient");
                pending.recipe.set(ingredient, amount);
            }
            Ok(None) => {
                let token = ingredient_token(line);
                warn!(line_number, recipe = %recipe_name, token = %token, "Unexpected ingredient encountered");
                self.diagnostics.push(ParseDiagnostic {
                    line_number,
                    recipe: Some(recipe_name),
                    kind: DiagnosticKind::UnknownIngredient { token },
                });
            }
            Err(kind) => {
                pending.malformed = true;
                let diagnostic = ParseDiagnostic {
                    line_number,
                    recipe: Some(recipe_name),
                    kind,
                };
                error_logging::log_parse_error(
                    &diagnostic,
                    line_number,
                    diagnostic.recipe.as_deref(),
                    line,
                );
                self.diagnostics.push(diagnostic);
            }
        }
    }
}

fn ingredient_token(line: &str) -> String {
    line.split_whitespace().next().unwrap_or_default().to_string()
}

/// Parse one `<ingredient> <amount>` line
///
/// Returns `Ok(None)` for an ingredient name that is not one of the five
/// known ingredients. Tokens after the amount are ignored.
pub fn parse_ingredient_line(line: &str) -> Result<Option<(Ingredient, f64)>, DiagnosticKind> {
    let captures = INGREDIENT_LINE
        .captures(line)
        .ok_or(DiagnosticKind::OrphanLine)?;
    let token = captures["name"].to_string();

    let Some(ingredient) = Ingredient::from_token(&token) else {
        return Ok(None);
    };

    let raw_amount = captures
        .name("amount")
        .ok_or_else(|| DiagnosticKind::MissingAmount {
            token: token.clone(),
        })?
        .as_str();

    match raw_amount.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(Some((ingredient, amount))),
        _ => Err(DiagnosticKind::InvalidAmount {
            token,
            amount: raw_amount.to_string(),
        }),
    }
}

/// Parse a whole catalogue held in memory
pub fn parse_catalogue(text: &str) -> ParseOutcome {
    let mut parser = CatalogueParser::new();
    for line in text.lines() {
        parser.feed_line(line);
    }
    parser.finish()
}

/// Parse a catalogue from any buffered reader
///
/// Lines that are not valid UTF-8 are decoded lossily and reported as
/// warnings. On an I/O error the recipes completed before the failure are
/// returned inside the [`LoadFailure`].
pub fn read_catalogue<R: BufRead>(mut reader: R) -> Result<ParseOutcome, LoadFailure> {
    let mut parser = CatalogueParser::new();
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => parser.feed_bytes(&buffer),
            Err(e) => {
                return Err(LoadFailure {
                    partial: parser.finish_partial(),
                    error: AppError::FileSystem(format!(
                        "Problem reading the recipe list: {}",
                        e
                    )),
                });
            }
        }
    }
    Ok(parser.finish())
}

/// Load the recipe catalogue file at `path`
pub fn load_catalogue(path: &Path) -> Result<ParseOutcome, LoadFailure> {
    let file = File::open(path).map_err(|e| {
        error_logging::log_filesystem_error(&e, "open_recipe_list", path.to_str());
        LoadFailure {
            partial: ParseOutcome::default(),
            error: AppError::FileSystem(format!(
                "Problem reading the recipe list file '{}': {}",
                path.display(),
                e
            )),
        }
    })?;

    let outcome = read_catalogue(BufReader::new(file)).inspect_err(|failure| {
        error_logging::log_filesystem_error(&failure.error, "read_recipe_list", path.to_str());
    })?;

    info!(
        path = %path.display(),
        recipes = outcome.catalogue.len(),
        "Recipe catalogue loaded"
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient_line() {
        assert_eq!(
            parse_ingredient_line("flour 500"),
            Ok(Some((Ingredient::Flour, 500.0)))
        );
        assert_eq!(
            parse_ingredient_line("Sugar 12.5"),
            Ok(Some((Ingredient::Sugar, 12.5)))
        );
        assert_eq!(parse_ingredient_line("cocoa 50"), Ok(None));
    }

    #[test]
    fn test_parse_ingredient_line_ignores_trailing_tokens() {
        assert_eq!(
            parse_ingredient_line("eggs 2 large"),
            Ok(Some((Ingredient::Eggs, 2.0)))
        );
    }

    #[test]
    fn test_parse_ingredient_line_rejects_bad_amounts() {
        assert_eq!(
            parse_ingredient_line("butter"),
            Err(DiagnosticKind::MissingAmount {
                token: "butter".to_string()
            })
        );
        assert_eq!(
            parse_ingredient_line("butter lots"),
            Err(DiagnosticKind::InvalidAmount {
                token: "butter".to_string(),
                amount: "lots".to_string()
            })
        );
        assert!(parse_ingredient_line("butter -5").is_err());
        assert!(parse_ingredient_line("butter NaN").is_err());
        assert!(parse_ingredient_line("butter inf").is_err());
    }

    #[test]
    fn test_recipe_marker_requires_whole_token() {
        let outcome = parse_catalogue("Recipes are fun\nflour 1\n");
        assert!(outcome.catalogue.is_empty());
        assert_eq!(outcome.diagnostics.len(), 2);
        assert!(outcome
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::OrphanLine));
    }

    #[test]
    fn test_marker_without_name() {
        let outcome = parse_catalogue("Recipe\nflour 100\n");
        assert_eq!(outcome.catalogue.len(), 1);
        assert_eq!(outcome.catalogue.names(), vec![""]);
    }

    #[test]
    fn test_consecutive_markers_flush_previous_recipe() {
        let outcome = parse_catalogue("Recipe A\nflour 1\nRecipe B\nflour 2\n");
        assert_eq!(outcome.catalogue.names(), vec!["A", "B"]);
        assert_eq!(
            outcome.catalogue.get(1).map(|r| r.amount(Ingredient::Flour)),
            Some(2.0)
        );
    }

    #[test]
    fn test_extra_blank_lines_are_harmless() {
        let outcome = parse_catalogue("\n\nRecipe A\nflour 1\n\n\n\nRecipe B\n\n");
        assert_eq!(outcome.catalogue.names(), vec!["A", "B"]);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_repeated_ingredient_overwrites() {
        let outcome = parse_catalogue("Recipe A\nflour 1\nFLOUR 7\n");
        assert_eq!(
            outcome.catalogue.get(0).map(|r| r.amount(Ingredient::Flour)),
            Some(7.0)
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = ParseDiagnostic {
            line_number: 3,
            recipe: Some("Rye".to_string()),
            kind: DiagnosticKind::UnknownIngredient {
                token: "cocoa".to_string(),
            },
        };
        assert_eq!(
            diagnostic.to_string(),
            "line 3: unexpected ingredient encountered: cocoa (recipe 'Rye')"
        );
        assert_eq!(diagnostic.severity(), Severity::Warning);
    }

    struct BrokenReader;

    impl std::io::Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "device went away"))
        }
    }

    #[test]
    fn test_read_failure_keeps_closed_recipes() {
        use std::io::Read;

        let source = std::io::Cursor::new(b"Recipe A\nflour 1\n\nRecipe B\nflour 2".to_vec())
            .chain(BrokenReader);

        let failure = read_catalogue(std::io::BufReader::new(source)).unwrap_err();
        assert_eq!(failure.partial.catalogue.names(), vec!["A"]);
        assert!(matches!(failure.error, AppError::FileSystem(_)));
    }

    #[test]
    fn test_latin1_byte_keeps_later_recipes() {
        let bytes = b"Recipe White\nflour 500\n\nRecipe P\xe2te\nflour 1\n\nRecipe Rye\nflour 400\n";

        let outcome = read_catalogue(&bytes[..]).unwrap();
        assert_eq!(
            outcome.catalogue.names(),
            vec!["White", "P\u{FFFD}te", "Rye"]
        );
        assert_eq!(outcome.catalogue.get(2).unwrap().amount(Ingredient::Flour), 400.0);

        let warnings: Vec<_> = outcome.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line_number, 4);
        assert_eq!(warnings[0].kind, DiagnosticKind::InvalidEncoding);
        assert_eq!(warnings[0].recipe.as_deref(), Some("P\u{FFFD}te"));
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_reader_handles_crlf_and_missing_final_newline() {
        let outcome = read_catalogue(&b"Recipe White\r\nflour 500\r\n\r\nRecipe Rye\r\nyeast 5"[..]).unwrap();
        assert_eq!(outcome.catalogue.names(), vec!["White", "Rye"]);
        assert_eq!(outcome.catalogue.get(1).unwrap().amount(Ingredient::Yeast), 5.0);
        assert!(outcome.diagnostics.is_empty());
    }
}
