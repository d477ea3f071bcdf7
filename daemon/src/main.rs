mod config;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use funpress_jobs::JobRegistry;
use funpress_settings::{AppEnvironment, SettingsStore};
use funpress_watch::{FolderWatcher, WatchEvent};

use config::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let env = match &args.data_dir {
        Some(dir) => AppEnvironment::new(dir.clone()),
        None => AppEnvironment::from_user_data_dir(),
    };
    env.ensure_dirs()?;
    info!("Data directory: {}", env.base_path().display());

    let store = SettingsStore::new(env);
    let mut settings = store.load()?.unwrap_or_default();

    // A folder given on the command line wins and is persisted back
    if let Some(folder) = &args.folder {
        settings.folder_path = Some(folder.clone());
        if let Err(e) = store.save(&settings) {
            warn!("Failed to persist settings: {e}");
        }
    }

    let folder = match settings.folder_path.clone() {
        Some(folder) => folder,
        None => {
            error!("No folder to watch. Use --folder or save one in user-settings.json");
            std::process::exit(1);
        }
    };

    let registry = Arc::new(JobRegistry::new());
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let watcher = FolderWatcher::with_poll_interval(
        registry.clone(),
        events_tx,
        Duration::from_secs(args.interval_secs),
    );

    let images = watcher.select_folder(&folder)?;
    info!(
        "Watching {} ({} image(s) present)",
        folder.display(),
        images.len()
    );

    loop {
        tokio::select! {
            event = events_rx.recv() => match event {
                Some(WatchEvent::Added(image)) => info!("New image: {}", image.path.display()),
                Some(WatchEvent::Removed(image)) => info!("Image removed: {}", image.path.display()),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    watcher.stop();
    registry.finish_all_jobs();

    Ok(())
}
