//! # Shopping List Aggregation
//!
//! Folds a [`Cart`] against a [`Catalogue`] into per-recipe order lines and
//! per-ingredient totals. Aggregation is pure: the same cart and catalogue
//! always give the same list, and nothing is cached between calls.

use crate::cart::Cart;
use crate::catalogue::Catalogue;
use crate::recipe::Ingredient;
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::ops::{Add, AddAssign};

/// Header printed between the order lines and the ingredient totals
pub const TOTALS_HEADER: &str = "You will need a total of:";

/// Accumulated amount for each of the five ingredients
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IngredientTotals {
    amounts: [f64; 5],
}

impl IngredientTotals {
    pub fn get(&self, ingredient: Ingredient) -> f64 {
        self.amounts[ingredient.index()]
    }

    pub fn accumulate(&mut self, ingredient: Ingredient, amount: f64) {
        self.amounts[ingredient.index()] += amount;
    }

    /// Totals in shopping list order; always yields all five ingredients
    pub fn iter(&self) -> impl Iterator<Item = (Ingredient, f64)> + '_ {
        Ingredient::ALL
            .into_iter()
            .map(move |ingredient| (ingredient, self.get(ingredient)))
    }

    /// Total rounded to a whole number, as printed on the list
    pub fn whole(&self, ingredient: Ingredient) -> i64 {
        whole_amount(self.get(ingredient))
    }
}

impl Add for IngredientTotals {
    type Output = IngredientTotals;

    fn add(mut self, rhs: IngredientTotals) -> IngredientTotals {
        self += rhs;
        self
    }
}

impl AddAssign for IngredientTotals {
    fn add_assign(&mut self, rhs: IngredientTotals) {
        for ingredient in Ingredient::ALL {
            self.accumulate(ingredient, rhs.get(ingredient));
        }
    }
}

/// Round half away from zero
pub fn whole_amount(amount: f64) -> i64 {
    amount.round() as i64
}

/// One ordered recipe on the shopping list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderLine {
    pub recipe_index: usize,
    pub name: String,
    pub quantity: i64,
}

impl fmt::Display for OrderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} loaf/loaves.", self.quantity, self.name)
    }
}

/// Result of aggregating a cart
#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingList {
    pub orders: Vec<OrderLine>,
    pub totals: IngredientTotals,
}

impl ShoppingList {
    /// Human-readable summary, one line per order and per ingredient
    ///
    /// ```text
    /// 2 White loaf/loaves.
    /// 1 Rye loaf/loaves.
    ///
    /// You will need a total of:
    /// 0 grams of butter
    /// 0 egg(s)
    /// 1400 grams of flour
    /// 20 grams of sugar
    /// 5 grams of yeast
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        for order in &self.orders {
            // Writing into a String cannot fail
            let _ = writeln!(out, "{}", order);
        }
        out.push('\n');
        out.push_str(TOTALS_HEADER);
        out.push('\n');
        for (ingredient, amount) in self.totals.iter() {
            let _ = writeln!(out, "{} {}", whole_amount(amount), ingredient.label());
        }
        out
    }
}

impl fmt::Display for ShoppingList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Build the shopping list for `cart`
///
/// # Panics
///
/// Panics if the cart references a recipe index outside the catalogue.
/// Indices are validated before they reach the cart, so this is a contract
/// violation rather than a runtime condition.
pub fn summarize(cart: &Cart, catalogue: &Catalogue) -> ShoppingList {
    let mut orders = Vec::with_capacity(cart.len());
    let mut totals = IngredientTotals::default();

    for (recipe_index, quantity) in cart.iter() {
        let recipe = catalogue.get(recipe_index).unwrap_or_else(|| {
            panic!(
                "cart references recipe index {} but the catalogue holds {} recipe(s)",
                recipe_index,
                catalogue.len()
            )
        });

        for ingredient in Ingredient::ALL {
            totals.accumulate(ingredient, recipe.amount(ingredient) * quantity as f64);
        }

        orders.push(OrderLine {
            recipe_index,
            name: recipe.name().to_string(),
            quantity,
        });
    }

    ShoppingList { orders, totals }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::Recipe;

    fn bakery() -> Catalogue {
        Catalogue::from_recipes(vec![
            Recipe::new("White")
                .with(Ingredient::Flour, 500.0)
                .with(Ingredient::Sugar, 10.0),
            Recipe::new("Rye")
                .with(Ingredient::Flour, 400.0)
                .with(Ingredient::Yeast, 5.0),
        ])
    }

    #[test]
    fn test_summarize_two_recipes() {
        let catalogue = bakery();
        let cart: Cart = vec![(0, 2), (1, 1)].into_iter().collect();

        let list = summarize(&cart, &catalogue);

        assert_eq!(list.totals.get(Ingredient::Flour), 1400.0);
        assert_eq!(list.totals.get(Ingredient::Sugar), 20.0);
        assert_eq!(list.totals.get(Ingredient::Yeast), 5.0);
        assert_eq!(list.totals.get(Ingredient::Butter), 0.0);
        assert_eq!(list.totals.get(Ingredient::Eggs), 0.0);
        assert_eq!(list.orders.len(), 2);
        assert_eq!(list.orders[0].to_string(), "2 White loaf/loaves.");
        assert_eq!(list.orders[1].to_string(), "1 Rye loaf/loaves.");
    }

    #[test]
    fn test_render_layout() {
        let catalogue = bakery();
        let cart: Cart = vec![(0, 2), (1, 1)].into_iter().collect();

        let rendered = summarize(&cart, &catalogue).render();

        assert_eq!(
            rendered,
            "2 White loaf/loaves.\n\
             1 Rye loaf/loaves.\n\
             \n\
             You will need a total of:\n\
             0 grams of butter\n\
             0 egg(s)\n\
             1400 grams of flour\n\
             20 grams of sugar\n\
             5 grams of yeast\n"
        );
    }

    #[test]
    fn test_empty_cart_still_lists_every_ingredient() {
        let list = summarize(&Cart::new(), &bakery());
        assert!(list.orders.is_empty());
        assert_eq!(list.totals.iter().count(), 5);
        assert!(list.render().starts_with("\nYou will need a total of:\n"));
    }

    #[test]
    fn test_summarize_is_repeatable() {
        let catalogue = bakery();
        let cart: Cart = vec![(1, 3)].into_iter().collect();
        assert_eq!(summarize(&cart, &catalogue), summarize(&cart, &catalogue));
    }

    #[test]
    fn test_fractional_amounts_are_rounded() {
        let catalogue = Catalogue::from_recipes(vec![Recipe::new("Sweet")
            .with(Ingredient::Sugar, 2.5)
            .with(Ingredient::Yeast, 0.4)]);
        let cart: Cart = vec![(0, 1)].into_iter().collect();

        let list = summarize(&cart, &catalogue);
        assert_eq!(list.totals.whole(Ingredient::Sugar), 3);
        assert_eq!(list.totals.whole(Ingredient::Yeast), 0);
        assert!(list.render().contains("3 grams of sugar\n"));
    }

    #[test]
    #[should_panic(expected = "cart references recipe index 5")]
    fn test_out_of_range_index_panics() {
        let cart: Cart = vec![(5, 1)].into_iter().collect();
        summarize(&cart, &bakery());
    }

    #[test]
    fn test_totals_addition() {
        let mut a = IngredientTotals::default();
        a.accumulate(Ingredient::Flour, 100.0);
        let mut b = IngredientTotals::default();
        b.accumulate(Ingredient::Flour, 50.0);
        b.accumulate(Ingredient::Eggs, 2.0);

        let sum = a + b;
        assert_eq!(sum.get(Ingredient::Flour), 150.0);
        assert_eq!(sum.get(Ingredient::Eggs), 2.0);
    }
}
