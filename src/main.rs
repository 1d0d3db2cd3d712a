use std::io::{Write, stdout};
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cnapp_dashboard::application::DashboardStore;
use cnapp_dashboard::domain::{DashboardStoragePort, StorageError};
use cnapp_dashboard::infrastructure::{
    AppConfig, CliArgs, JsonFileStorage, MemoryStorage, StorageManager,
};
use cnapp_dashboard::presentation::{App, cli};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(args: &CliArgs) -> Result<AppConfig> {
    let mut config = match StorageManager::new() {
        Ok(manager) => manager.load_config(args.config.as_deref())?,
        Err(e) => {
            eprintln!("warning: {e}; using default configuration");
            AppConfig::default()
        }
    };
    config.merge_with_args(args);
    Ok(config)
}

fn create_storage(config: &AppConfig) -> Result<Arc<dyn DashboardStoragePort>> {
    if config.ephemeral {
        warn!("Ephemeral mode: changes will not be persisted");
        return Ok(Arc::new(MemoryStorage::new()));
    }

    let dir = config
        .effective_data_dir()
        .ok_or(StorageError::LocationUnavailable)?;
    Ok(Arc::new(JsonFileStorage::in_dir(dir)))
}

async fn run_tui(store: DashboardStore, config: &AppConfig) -> Result<()> {
    let app = App::new(store, config);

    let mut terminal = ratatui::init();
    if config.ui.mouse {
        crossterm::execute!(stdout(), EnableMouseCapture)?;
    }

    let result = app.run(&mut terminal).await;

    if config.ui.mouse {
        crossterm::execute!(stdout(), DisableMouseCapture)?;
    }
    ratatui::restore();

    result
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let mut args = CliArgs::parse();
    let command = args.command.take();
    let config = load_config(&args)?;

    init_logging(&config)?;

    info!(version = cnapp_dashboard::VERSION, "Starting {}", cnapp_dashboard::NAME);

    let storage = create_storage(&config)?;
    let mut store = DashboardStore::open(storage).await;

    if let Some(command) = command {
        let result = cli::run(
            command,
            &mut store,
            &mut stdout().lock(),
            &mut std::io::stderr().lock(),
        )
        .await;
        stdout().flush()?;
        return result;
    }

    run_tui(store, &config).await
}
