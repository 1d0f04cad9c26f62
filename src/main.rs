use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use fuelog::BackendKind;
use fuelog::backend::{AuthBackend, FuelBackend, HttpBackend, MockBackend};
use fuelog::core::clock::{Clock, SystemClock};
use fuelog::core::config::{self, ResolvedConfig};
use fuelog::core::export::write_export;
use fuelog::core::log_store::LogStore;
use fuelog::core::session::{FileTokenStore, SessionContext, TokenStore};
use fuelog::core::state::App;
use fuelog::core::stats::compute_stats;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "fuelog", version, about = "Track fuel purchases and spending")]
struct Args {
    /// Backend to talk to (overrides config file and FUELOG_BACKEND)
    #[arg(short, long, value_enum)]
    backend: Option<BackendKind>,

    /// Base URL for the HTTP backend (overrides config file and FUELOG_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch all fuel logs and write them to a CSV file
    Export {
        /// Directory to write into (defaults to the configured export_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the dashboard statistics
    Stats,
    /// Forget the stored session token
    Logout,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to fuelog.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("fuelog.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}. Using defaults.");
        log::warn!("Config error: {}. Using defaults.", e);
        Default::default()
    });
    let resolved = config::resolve(
        &file_config,
        args.backend.map(|b| b.as_str()),
        args.api_url.as_deref(),
    );

    log::info!(
        "Fuelog starting up with backend: {} ({})",
        resolved.backend,
        resolved.api_url
    );

    let token_store = FileTokenStore::default_location()?;
    let (backend, auth) = build_backends(&resolved);

    match args.command {
        None => {
            let session = SessionContext::init(Box::new(token_store));
            let app = App::from_config(backend, auth, session, Arc::new(SystemClock), &resolved);
            fuelog::tui::run(app)
        }
        Some(Command::Logout) => {
            token_store.clear_token()?;
            println!("Logged out.");
            Ok(())
        }
        Some(Command::Stats) => {
            let store = fetch_headless(&token_store, backend.as_ref()).await?;
            let stats = compute_stats(store.records(), SystemClock.today());
            let c = resolved.currency;
            println!("Fuel logs:          {}", store.len());
            println!("Avg. cost / liter:  {}", c.format(stats.average_cost_per_liter));
            println!("Monthly spend:      {}", c.format(stats.monthly_spend));
            println!("Total liters:       {:.2} L", stats.total_liters);
            println!("Total cost:         {}", c.format(stats.total_cost));
            Ok(())
        }
        Some(Command::Export { output }) => {
            let store = fetch_headless(&token_store, backend.as_ref()).await?;
            let dir = output.unwrap_or_else(|| resolved.export_dir.clone());
            let path = write_export(&dir, store.records(), SystemClock.today())
                .map_err(std::io::Error::other)?;
            println!("Exported {} fuel logs to {}", store.len(), path.display());
            Ok(())
        }
    }
}

/// The configured backend, used both for records and for sign-in.
fn build_backends(config: &ResolvedConfig) -> (Arc<dyn FuelBackend>, Arc<dyn AuthBackend>) {
    match config.backend.as_str() {
        "http" => {
            let backend = Arc::new(HttpBackend::new(Some(config.api_url.clone())));
            (backend.clone() as Arc<dyn FuelBackend>, backend as Arc<dyn AuthBackend>)
        }
        _ => {
            let backend = Arc::new(MockBackend::new(config.mock_delay_ms));
            (backend.clone() as Arc<dyn FuelBackend>, backend as Arc<dyn AuthBackend>)
        }
    }
}

/// Loads the collection outside the TUI. Requires a stored token.
async fn fetch_headless(
    token_store: &FileTokenStore,
    backend: &dyn FuelBackend,
) -> std::io::Result<LogStore> {
    let Some(token) = token_store.get_token() else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "not signed in; run `fuelog` and sign in first",
        ));
    };
    backend.set_token(Some(token));

    let mut store = LogStore::new();
    store
        .fetch(backend)
        .await
        .map_err(std::io::Error::other)?;
    Ok(store)
}
