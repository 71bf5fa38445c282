use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::controller::AppController;
use crate::profile::load_config;
use crate::state::AppState;

pub mod controller;
pub mod events;
pub mod profile;
pub mod state;
pub mod ui;


/// Translate Arabic song lyrics and keep a vocabulary of the words in them
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON config file, overrides the environment
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Log as JSON lines on stderr
    #[arg(long)]
    log_json: bool,
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    dotenvy::dotenv().ok();
    init_logging(args.log_json);

    let config = load_config(args.config.as_deref())?;
    tracing::info!("Translation backend at {}", config.backend.url);

    let state = Arc::new(AppState::new(config)?);
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::debug!("Task finished"),
                Ok(Err(e)) => tracing::error!("Task failed: {e}"),
                Err(e) => tracing::error!("Task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        if let Ok(Err(e)) = result {
            tracing::debug!("Task exited with error during shutdown: {e}");
        }
    }

    Ok(())
}
