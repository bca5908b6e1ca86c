mod console_map;
mod extract;
mod sync;
mod watch;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use listmap_core::{AppConfig, Selectors};

#[derive(Debug, Parser)]
#[command(name = "listmap-cli")]
#[command(about = "Sync map markers from an HTML location list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Extract location records from an HTML file and print them as JSON.
    Extract {
        /// HTML file holding the location list.
        #[arg(long)]
        input: PathBuf,
        /// Selectors YAML file; defaults to the built-in selectors.
        #[arg(long)]
        selectors: Option<PathBuf>,
    },
    /// Run one reconciliation pass against the console map and print a
    /// marker summary.
    Sync {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        selectors: Option<PathBuf>,
    },
    /// Poll an HTML file for changes and keep the console map in sync.
    Watch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        selectors: Option<PathBuf>,
        /// Poll interval in milliseconds; defaults to LISTMAP_WATCH_INTERVAL_MS.
        #[arg(long)]
        interval_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = listmap_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Extract { input, selectors } => {
            let selectors = resolve_selectors(selectors.as_deref(), &config)?;
            extract::run_extract(&input, &selectors).await
        }
        Commands::Sync { input, selectors } => {
            let selectors = resolve_selectors(selectors.as_deref(), &config)?;
            sync::run_sync(&input, &selectors, &config).await
        }
        Commands::Watch {
            input,
            selectors,
            interval_ms,
        } => {
            let selectors = resolve_selectors(selectors.as_deref(), &config)?;
            let interval_ms = interval_ms.unwrap_or(config.watch_interval_ms);
            watch::run_watch(&input, selectors, interval_ms, &config).await
        }
    }
}

/// Selector precedence: `--selectors` flag, then `LISTMAP_SELECTORS_PATH`,
/// then the built-in defaults.
fn resolve_selectors(flag: Option<&Path>, config: &AppConfig) -> anyhow::Result<Selectors> {
    let path = flag.or(config.selectors_path.as_deref());
    match path {
        Some(path) => listmap_core::load_selectors(path)
            .map_err(|e| anyhow::anyhow!("failed to load selectors: {e}")),
        None => Ok(Selectors::default()),
    }
}
