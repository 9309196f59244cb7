//! tf-itemdb CLI
//!
//! Maintains a local cache of the TF2 item schema and compiles it, together
//! with trade.tf pricing data and the English locale, into item aggregates.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use tf_itemdb_core::Settings;

use crate::commands::{check, compile, decode, fetch, locale, status, update};
use crate::error::CliError;

#[derive(Parser)]
#[command(name = "tf-itemdb")]
#[command(about = "Fetch and compile the TF2 item database", long_about = None)]
struct Cli {
    /// Directory holding snapshot files (overrides TF_ITEMDB_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask Steam whether the stored schema version is current
    Check,

    /// Download the item schema, resuming an interrupted download
    FetchItems {
        /// Schema version to fetch (default: the stored version marker)
        #[arg(long)]
        version: Option<u64>,
    },

    /// Download the English locale token tables
    UpdateLocale,

    /// Decode a KeyValues text file and print it as JSON
    Decode {
        /// File to decode
        file: PathBuf,
    },

    /// Reconcile catalog, pricing and locale into item aggregates
    Compile,

    /// Run check, fetch-items, update-locale and compile in order
    Update {
        /// Run every stage even if the schema version is unchanged
        #[arg(long)]
        force: bool,
    },

    /// Show the state of the stored snapshots
    Status,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e
        );
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let data_dir = cli.data_dir;
    let settings = || load_settings(data_dir.clone());

    match cli.command {
        Commands::Check => check::run_check(&settings()?),
        Commands::FetchItems { version } => fetch::run_fetch_items(&settings()?, version),
        Commands::UpdateLocale => locale::run_update_locale(&settings()?),
        Commands::Decode { file } => decode::run_decode(&file),
        Commands::Compile => compile::run_compile(&settings()?),
        Commands::Update { force } => update::run_update(&settings()?, force),
        Commands::Status => status::run_status(&settings()?),
    }
}

fn load_settings(data_dir: Option<PathBuf>) -> Result<Settings, CliError> {
    let mut settings = Settings::load()?;
    if let Some(dir) = data_dir {
        settings = settings.with_data_dir(dir);
    }
    log::debug!("Data directory: {}", settings.data_dir.display());
    Ok(settings)
}
