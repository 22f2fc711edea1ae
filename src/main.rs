use anyhow::Result;
use bread_planner::config::AppConfig;
use bread_planner::menu::Menu;
use bread_planner::observability;
use bread_planner::session::Session;
use std::io::{self, Write};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    config.validate().map_err(|e| {
        anyhow::anyhow!("Configuration validation failed: {}. Please check your environment.", e)
    })?;

    observability::init_tracing(&config.logging)?;
    info!("{}", config.summary());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "Welcome to the Bread Planner.")?;

    let mut session = Session::new(config);
    match session.load_catalogue() {
        Ok(report) => {
            for diagnostic in report.warnings() {
                writeln!(out, "Warning: {}", diagnostic)?;
            }
            for error in report.parse_errors() {
                writeln!(out, "Error: {}", error)?;
            }
            for name in &report.discarded {
                writeln!(out, "Skipped recipe '{}' because of malformed lines.", name)?;
            }
            writeln!(out, "Loaded {} recipe(s).\n", report.recipe_count)?;
        }
        Err(e) => {
            warn!(error = %e, "Continuing with a partial recipe catalogue");
            writeln!(out, "Problem reading the recipe list: {}", e)?;
            writeln!(out, "Loaded {} recipe(s).\n", session.recipe_count())?;
        }
    }

    let stdin = io::stdin();
    Menu::new(&mut session, stdin.lock(), out).run()?;

    info!("Session finished");
    Ok(())
}
