mod cli;
mod config;
mod db;
mod engine;
mod exercises;
mod models;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::MetaRepo;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    AppConfig::ensure_data_dir()?;
    let db_path = AppConfig::db_path()?;
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;

    match cli.command {
        // Setup wizard
        Some(Commands::Setup { reset }) => {
            handlers::handle_setup(&conn, &mut config, reset)?;
        }

        // Explicit subcommands — check setup first
        Some(cmd) => {
            ensure_setup(&conn, &mut config)?;
            match cmd {
                Commands::Log { file, plan, day } => {
                    handlers::handle_log(&conn, &config, &file, plan, day)?;
                }
                Commands::Status => {
                    handlers::handle_status(&conn, &config)?;
                }
                Commands::Badges { all } => {
                    handlers::handle_badges(&conn, all)?;
                }
                Commands::History { limit } => {
                    handlers::handle_history(&conn, limit)?;
                }
                Commands::Stats { week } => {
                    handlers::handle_stats(&conn, &config, week)?;
                }
                Commands::Plan { action } => {
                    handlers::handle_plan(&conn, &action)?;
                }
                Commands::Export => {
                    handlers::handle_export(&conn, &config)?;
                }
                Commands::Setup { .. } => unreachable!(),
            }
        }

        // No subcommand → status view
        None => {
            ensure_setup(&conn, &mut config)?;
            handlers::handle_status(&conn, &config)?;
        }
    }

    Ok(())
}

/// Check if setup has been done; if not, run the wizard automatically.
fn ensure_setup(conn: &Connection, config: &mut AppConfig) -> Result<()> {
    let done = MetaRepo::get(conn, "setup_done")?;
    if done.as_deref() != Some("1") {
        eprintln!("No configuration found. Running setup...");
        eprintln!();
        handlers::handle_setup(conn, config, false)?;
    }
    Ok(())
}
