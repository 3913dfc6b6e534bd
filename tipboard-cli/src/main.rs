mod config;
mod errors;
mod loader;
mod runner;
mod watcher;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tipboard::{Dashboard, Dataset};

use crate::errors::Result;

#[derive(Parser)]
#[command(name = "tipboard")]
#[command(about = "Interactive dashboard over a filterable tips dataset")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive dashboard
    Run(RunArgs),
    /// Write the bundled sample dataset to a file
    Init {
        /// Where to write the dataset
        path: PathBuf,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Dataset file to load and watch (bundled sample data when omitted)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Disable the dataset file watcher
    #[arg(long)]
    no_watch: bool,

    /// Override the watcher debounce delay in milliseconds
    #[arg(long)]
    debounce_ms: Option<u32>,

    /// Override the number of rows the table command prints
    #[arg(long)]
    table_rows: Option<usize>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Init { path } => init_dataset(path),
        Commands::Run(args) => run_dashboard(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_dataset(path: PathBuf) -> Result<()> {
    loader::write_sample(&path)?;
    println!("Wrote sample dataset to {}", path.display());
    Ok(())
}

async fn run_dashboard(args: RunArgs) -> Result<()> {
    let mut config = config::load().into_config();
    if args.no_watch {
        config.auto_reload = false;
    }
    if let Some(ms) = args.debounce_ms {
        config.debounce_ms = ms;
    }
    if let Some(rows) = args.table_rows {
        config.table_rows = rows;
    }

    let dataset = match &args.data {
        Some(path) => {
            let dataset = loader::load_dataset(path)?;
            info!(path = %path.display(), rows = dataset.len(), "dataset loaded");
            dataset
        }
        None => Dataset::sample(),
    };
    let dashboard = Arc::new(Dashboard::new(dataset));

    let (event_tx, event_rx) = mpsc::channel(32);
    let watcher_handle = match &args.data {
        Some(path) => watcher::start_watcher(path.clone(), event_tx, &config).await?,
        None => None,
    };

    runner::run(dashboard, args.data, config, event_rx).await?;

    if let Some(handle) = watcher_handle {
        handle.stop();
    }
    Ok(())
}
