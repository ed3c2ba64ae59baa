use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use directories::ProjectDirs;
use diary::api::DiaryApi;
use diary::config::DiaryConfig;
use diary::error::{DiaryError, Result};
use diary::store::sqlite::SqliteStore;
use navkit::{Console, Router};
use tracing::info;
use tracing_subscriber::EnvFilter;

use super::app::{App, Settings};
use super::render;
use super::screens;
use super::setup::{Cli, Commands};

/// Overrides the data directory (config and default database).
const HOME_ENV: &str = "DIARY_HOME";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
        console::set_colors_enabled(false);
    }

    let data_dir = data_dir()?;
    let config = DiaryConfig::load(&data_dir)?;
    let database = resolve_database(&cli, &config, &data_dir);

    match cli.command {
        Some(Commands::Path) => handle_path(&data_dir, &database),
        Some(Commands::Stats { json }) => handle_stats(&database, json),
        Some(Commands::Open) | None => {
            let settings = Settings::from_config(&config, cli.page_size.map(usize::from));
            handle_open(&database, settings)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "diary", "diary")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| DiaryError::Config("could not determine a data directory".to_string()))
}

fn resolve_database(cli: &Cli, config: &DiaryConfig, data_dir: &Path) -> PathBuf {
    match &cli.db {
        Some(path) => path.clone(),
        None => data_dir.join(&config.database_file),
    }
}

fn open_api(database: &Path) -> Result<DiaryApi<SqliteStore>> {
    if let Some(parent) = database.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    info!(path = %database.display(), "opening diary database");
    Ok(DiaryApi::new(SqliteStore::open(database)?))
}

fn handle_open(database: &Path, settings: Settings) -> Result<()> {
    let mut app = App::new(Console::stdio(), open_api(database)?, settings);
    let outcome = Router::new(screens::main_menu()).run(&mut app);
    let closed = app.close();

    let visited = outcome?;
    info!(visited, "session finished");
    closed
}

fn handle_stats(database: &Path, json: bool) -> Result<()> {
    let api = open_api(database)?;
    let stats = api.statistics()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", render::statistics(&stats));
    }
    api.into_store().close()
}

fn handle_path(data_dir: &Path, database: &Path) -> Result<()> {
    println!("data:     {}", data_dir.display());
    println!("database: {}", database.display());
    Ok(())
}
