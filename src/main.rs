mod analytics;
mod config;
mod db;
mod error;
mod export;
mod logging;
mod models;
mod run;
mod tracker;
mod ui;
mod validate;

use anyhow::{Context, Result};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::from_env()?;
    config.ensure_dirs()?;
    logging::init(&config.log_path)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting budget-tracker");

    let db = db::Database::open(&config.db_path).with_context(|| {
        format!(
            "Failed to open transaction store: {}",
            config.db_path.display()
        )
    })?;
    let mut tracker = tracker::Tracker::new(db);

    match args.len() {
        1 => run::as_tui(&mut tracker, &config),
        _ => run::as_cli(&args, &mut tracker, &config),
    }
}
