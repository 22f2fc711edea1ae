//! Interactive console menu.
//!
//! Reads choices from any [`BufRead`] and writes prompts to any [`Write`], so
//! the loop runs the same against a terminal or an in-memory script. All
//! planning logic lives in [`Session`]; this module only prompts and prints.

use crate::session::Session;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Main menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Reprint,
    ShowRecipes,
    Order,
    Checkout,
    Quit,
}

impl MenuChoice {
    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            0 => Some(MenuChoice::Reprint),
            1 => Some(MenuChoice::ShowRecipes),
            2 => Some(MenuChoice::Order),
            3 => Some(MenuChoice::Checkout),
            4 => Some(MenuChoice::Quit),
            _ => None,
        }
    }
}

pub struct Menu<'a, R, W> {
    session: &'a mut Session,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(session: &'a mut Session, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
        }
    }

    /// Run until the user quits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.show_options()?;
            let Some(number) = self.prompt_in_range("Please enter your choice:", 0, 4)? else {
                break;
            };
            let Some(choice) = MenuChoice::from_number(number) else {
                continue;
            };
            debug!(?choice, "Menu choice");

            let keep_going = match choice {
                MenuChoice::Reprint => true,
                MenuChoice::ShowRecipes => {
                    self.show_recipes()?;
                    true
                }
                MenuChoice::Order => self.order()?,
                MenuChoice::Checkout => self.checkout()?,
                MenuChoice::Quit => {
                    writeln!(self.output, "Bye!")?;
                    false
                }
            };
            if !keep_going {
                break;
            }
        }
        self.output.flush()
    }

    fn show_options(&mut self) -> io::Result<()> {
        writeln!(self.output, "Please select one of the following options:")?;
        writeln!(self.output, "1. Show available recipes.")?;
        writeln!(self.output, "2. Create Shopping List.")?;
        writeln!(self.output, "3. Print Shopping List.")?;
        writeln!(self.output, "4. Quit Program.")?;
        writeln!(self.output, "0. to reprint this menu.")?;
        writeln!(self.output)
    }

    fn show_recipes(&mut self) -> io::Result<()> {
        writeln!(self.output, "Available Recipes:")?;
        for (position, name) in self.session.recipe_names().into_iter().enumerate() {
            writeln!(self.output, "{}. {}", position + 1, name)?;
        }
        writeln!(self.output)
    }

    /// Returns `false` when input ended mid-order
    fn order(&mut self) -> io::Result<bool> {
        let count = self.session.recipe_count();
        if count == 0 {
            writeln!(self.output, "No recipes are available to order.\n")?;
            return Ok(true);
        }

        let Some(selector) =
            self.prompt_in_range("Which bread would you like?", 1, count as i64)?
        else {
            return Ok(false);
        };

        let max = self.session.config().orders.max_order_quantity;
        let Some(quantity) =
            self.prompt_in_range("How much of this bread would you like?", -max, max)?
        else {
            return Ok(false);
        };

        // The prompt bounds keep the selector inside the catalogue
        if let Err(e) = self.session.order(selector as usize, quantity) {
            writeln!(self.output, "{}", e)?;
        }
        Ok(true)
    }

    /// Returns `false` when input ended at the save question
    fn checkout(&mut self) -> io::Result<bool> {
        if self.session.is_cart_empty() {
            writeln!(self.output, "Cart is empty.\n")?;
            return Ok(true);
        }

        write!(self.output, "{}", self.session.render_summary())?;
        write!(self.output, "Do you want to save this list (Y/n)? ")?;
        self.output.flush()?;

        let Some(decision) = self.read_line()? else {
            return Ok(false);
        };

        if decision.trim().eq_ignore_ascii_case("y") {
            match self.session.save_summary() {
                Ok(path) => writeln!(self.output, "Shopping list saved to {}.", path.display())?,
                Err(e) => writeln!(self.output, "Could not save the shopping list: {}", e)?,
            }
        }
        writeln!(self.output)?;
        Ok(true)
    }

    /// Ask until an integer in `min..=max` is entered; `None` at end of input
    pub fn prompt_in_range(&mut self, prompt: &str, min: i64, max: i64) -> io::Result<Option<i64>> {
        write!(self.output, "{} ", prompt)?;
        self.output.flush()?;

        loop {
            let Some(line) = self.read_line()? else {
                writeln!(self.output)?;
                return Ok(None);
            };

            match line.trim().parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(Some(value)),
                _ => {
                    write!(
                        self.output,
                        "Please enter a number between {} and {}: ",
                        min, max
                    )?;
                    self.output.flush()?;
                }
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
