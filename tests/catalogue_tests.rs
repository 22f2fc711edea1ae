//! # Catalogue Parsing Tests
//!
//! End-to-end tests for reading recipe lists, from in-memory text and from
//! files on disk.


#[cfg(test)]
mod tests {
    use super::test_helpers::{BAKERY, WHITE_AND_RYE};
    use bread_planner::catalogue::{
        load_catalogue, parse_catalogue, DiagnosticKind, Severity,
    };
    use bread_planner::errors::AppError;
    use bread_planner::recipe::Ingredient;
    use std::io::Write;

    #[test]
    fn test_two_recipes_in_file_order() {
        let outcome = parse_catalogue(WHITE_AND_RYE);
        let catalogue = &outcome.catalogue;

        assert_eq!(catalogue.len(), 2);
        assert!(outcome.diagnostics.is_empty());

        let white = catalogue.get(0).unwrap();
        assert_eq!(white.name(), "White");
        assert_eq!(white.amount(Ingredient::Flour), 500.0);
        assert_eq!(white.amount(Ingredient::Sugar), 10.0);
        assert_eq!(white.amount(Ingredient::Yeast), 0.0);

        let rye = catalogue.get(1).unwrap();
        assert_eq!(rye.name(), "Rye");
        assert_eq!(rye.amount(Ingredient::Flour), 400.0);
        assert_eq!(rye.amount(Ingredient::Yeast), 5.0);
        assert_eq!(rye.amount(Ingredient::Butter), 0.0);
    }

    #[test]
    fn test_trailing_blank_line_is_optional() {
        let without = parse_catalogue("Recipe A\nflour 1\n\nRecipe B\nflour 2");
        let with = parse_catalogue("Recipe A\nflour 1\n\nRecipe B\nflour 2\n\n");

        assert_eq!(without.catalogue, with.catalogue);
        assert_eq!(without.catalogue.names(), vec!["A", "B"]);
    }

    #[test]
    fn test_recipe_count_matches_markers() {
        for count in 0..6 {
            let mut text = String::new();
            for i in 0..count {
                text.push_str(&format!("Recipe Bread {}\nflour {}\n\n", i, 100 * (i + 1)));
            }
            let outcome = parse_catalogue(&text);
            assert_eq!(outcome.catalogue.len(), count);
            for i in 0..count {
                assert_eq!(
                    outcome.catalogue.get(i).unwrap().name(),
                    format!("Bread {}", i)
                );
            }
        }
    }

    #[test]
    fn test_duplicate_names_are_distinct_recipes() {
        let outcome = parse_catalogue("Recipe Loaf\nflour 1\n\nRecipe Loaf\nflour 2\n");
        assert_eq!(outcome.catalogue.len(), 2);
        assert_eq!(
            outcome.catalogue.get(1).unwrap().amount(Ingredient::Flour),
            2.0
        );
    }

    #[test]
    fn test_ingredient_names_are_case_insensitive() {
        let outcome = parse_catalogue("Recipe Mixed\nFlour 1\nEGGS 2\nbUtTeR 3\n");
        let recipe = outcome.catalogue.get(0).unwrap();
        assert_eq!(recipe.amount(Ingredient::Flour), 1.0);
        assert_eq!(recipe.amount(Ingredient::Eggs), 2.0);
        assert_eq!(recipe.amount(Ingredient::Butter), 3.0);
    }

    #[test]
    fn test_unknown_ingredient_is_a_warning() {
        let outcome = parse_catalogue("Recipe Chocolate\nflour 300\ncocoa 50\nsugar 40\n");

        assert_eq!(outcome.catalogue.len(), 1);
        let recipe = outcome.catalogue.get(0).unwrap();
        assert_eq!(recipe.amount(Ingredient::Flour), 300.0);
        assert_eq!(recipe.amount(Ingredient::Sugar), 40.0);
        assert_eq!(recipe.amount(Ingredient::Butter), 0.0);
        assert_eq!(recipe.amount(Ingredient::Eggs), 0.0);
        assert_eq!(recipe.amount(Ingredient::Yeast), 0.0);

        let warnings: Vec<_> = outcome.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].line_number, 3);
        assert_eq!(warnings[0].recipe.as_deref(), Some("Chocolate"));
        assert_eq!(
            warnings[0].kind,
            DiagnosticKind::UnknownIngredient {
                token: "cocoa".to_string()
            }
        );
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_malformed_amount_discards_only_that_recipe() {
        let text = "Recipe Good\nflour 100\n\nRecipe Bad\nflour lots\nsugar 5\n\nRecipe Also Good\neggs 2\n";
        let outcome = parse_catalogue(text);

        assert_eq!(outcome.catalogue.names(), vec!["Good", "Also Good"]);
        assert_eq!(outcome.discarded, vec!["Bad".to_string()]);

        let errors: Vec<_> = outcome.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].severity(), Severity::Error);
        assert_eq!(errors[0].line_number, 5);
        assert_eq!(
            errors[0].kind,
            DiagnosticKind::InvalidAmount {
                token: "flour".to_string(),
                amount: "lots".to_string()
            }
        );
    }

    #[test]
    fn test_missing_amount_is_an_error() {
        let outcome = parse_catalogue("Recipe Short\nyeast\n");
        assert!(outcome.catalogue.is_empty());
        assert!(outcome.has_errors());
        assert_eq!(outcome.discarded, vec!["Short".to_string()]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let outcome = parse_catalogue("Recipe White\r\nflour 500\r\n\r\nRecipe Rye\r\nflour 400\r\n");
        assert_eq!(outcome.catalogue.names(), vec!["White", "Rye"]);
        assert!(outcome.diagnostics.is_empty());
    }

    #[test]
    fn test_load_catalogue_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(BAKERY.as_bytes()).unwrap();

        let outcome = load_catalogue(file.path()).unwrap();
        assert_eq!(
            outcome.catalogue.names(),
            vec!["White Bread", "Brioche", "Sourdough Rye"]
        );
        assert_eq!(
            outcome.catalogue.get(1).unwrap().amount(Ingredient::Eggs),
            5.0
        );
    }

    #[test]
    fn test_load_file_with_latin1_name_keeps_every_recipe() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"Recipe White\nflour 500\n\nRecipe P\xe2te\nflour 1\n\nRecipe Rye\nflour 400\n")
            .unwrap();

        let outcome = load_catalogue(file.path()).unwrap();
        assert_eq!(outcome.catalogue.len(), 3);
        assert_eq!(outcome.catalogue.get(2).unwrap().name(), "Rye");
        assert!(outcome
            .warnings()
            .any(|d| d.kind == DiagnosticKind::InvalidEncoding && d.line_number == 4));
    }

    #[test]
    fn test_load_missing_file_reports_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let failure = load_catalogue(&dir.path().join("nope.txt")).unwrap_err();

        assert!(matches!(failure.error, AppError::FileSystem(_)));
        assert!(failure.partial.catalogue.is_empty());
    }

    #[test]
    fn test_load_directory_reports_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let failure = load_catalogue(dir.path()).unwrap_err();
        assert!(matches!(failure.error, AppError::FileSystem(_)));
    }
}
