mod commands;
mod config;
mod error;
mod paths;
mod session;
mod settings;

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info, warn};
use simplelog::{Config as LogConfig, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};
use vendor_select_lib::listing::InMemoryListing;
use vendor_select_lib::model::Vendor;

use crate::commands::HELP;
use crate::config::Config;
use crate::error::CliError;
use crate::session::{Outcome, Session};
use crate::settings::{MemoryBackend, SettingsProvider, SqliteBackend, ViewPreferences};

/// Pick vendors from a filterable list and print the selection as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON file holding an array of vendors.
    #[arg(long, required_unless_present = "list_views")]
    vendors: Option<PathBuf>,
    /// Name under which sorting, filters and paging are remembered.
    #[arg(long, default_value = "vendor-select")]
    view: String,
    /// Text shown above the list.
    #[arg(long)]
    description: Option<String>,
    /// Configuration file to use instead of the platform default.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Forget the remembered view before starting.
    #[arg(long)]
    reset_view: bool,
    /// Print the names of remembered views and exit.
    #[arg(long)]
    list_views: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(args: Args) -> Result<ExitCode, CliError> {
    let config = Config::load(args.config.as_deref())?;
    init_logging(&config)?;
    match config.source() {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("Using default embedded configuration"),
    }

    let settings = open_settings(&config).await;
    if args.list_views {
        for view in ViewPreferences::stored_views(&settings).await? {
            println!("{}", view);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(vendors_path) = args.vendors else {
        return Err(CliError::MissingVendors);
    };
    let contents = tokio::fs::read_to_string(&vendors_path).await?;
    let vendors: Vec<Vendor> = serde_json::from_str(&contents)?;
    info!("Loaded {} vendors from {}", vendors.len(), vendors_path.display());

    let preferences = ViewPreferences::new(settings, &args.view);
    if args.reset_view {
        preferences.reset().await?;
    }
    let initial = match preferences.load().await {
        Ok(Some(state)) => state,
        Ok(None) => config.initial_table_state(),
        Err(e) => {
            warn!("Ignoring stored view '{}': {}", args.view, e);
            config.initial_table_state()
        }
    };

    let mut session = Session::new(
        InMemoryListing::new(vendors),
        preferences,
        initial,
        args.description,
    );
    match session.refresh().await {
        Ok(()) => {}
        Err(CliError::Listing(e)) => {
            warn!("Stored view no longer applies ({}), starting fresh", e);
            session.reset_view(config.initial_table_state()).await?;
        }
        Err(e) => return Err(e),
    }

    let mut ui = std::io::stderr();
    session.render(&mut ui)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(ui, "{}", e)?;
                continue;
            }
        };
        let show_help = command == commands::Command::Help;

        match session.handle(command).await? {
            Outcome::Continue if show_help => writeln!(ui, "{}", HELP)?,
            Outcome::Continue => session.render(&mut ui)?,
            Outcome::Rejected(message) => writeln!(ui, "{}", message)?,
            Outcome::Committed(vendors) => {
                info!("Committed {} vendors", vendors.len());
                println!("{}", serde_json::to_string_pretty(&vendors)?);
                return Ok(ExitCode::SUCCESS);
            }
            Outcome::Cancelled => {
                info!("Selection cancelled");
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    // End of input counts as cancelling.
    info!(
        "Input closed with {} selected, cancelling",
        session.workflow().count()
    );
    debug!("Final view: {:?}", session.table_state());
    session.handle(commands::Command::Cancel).await?;
    Ok(ExitCode::FAILURE)
}

/// Log to `<cache>/latest.log`, archiving the previous run's log first.
fn init_logging(config: &Config) -> Result<(), CliError> {
    let Some(dir) = paths::cache_dir() else {
        eprintln!("No cache directory available, logging disabled");
        return Ok(());
    };
    std::fs::create_dir_all(&dir)?;
    paths::rotate_logs(&dir);

    let log_file = File::create(paths::log_file(&dir))?;
    if WriteLogger::init(config.log_level()?, LogConfig::default(), log_file).is_err() {
        eprintln!("Logger already initialized");
    }
    Ok(())
}

/// Open the settings database, falling back to memory if it is unavailable.
async fn open_settings(config: &Config) -> SettingsProvider {
    let Some(path) = config.settings_db() else {
        warn!("No data directory available, view settings will not be saved");
        return SettingsProvider::new(MemoryBackend::new());
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!("Cannot create {}: {}", parent.display(), e);
        }
    }
    match SqliteBackend::open(&path).await {
        Ok(backend) => SettingsProvider::new(backend),
        Err(e) => {
            warn!("Cannot open {}: {}, view settings will not be saved", path.display(), e);
            SettingsProvider::new(MemoryBackend::new())
        }
    }
}
