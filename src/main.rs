// Re-export library modules so binary-internal modules can use crate::queue:: and friends
pub(crate) use review_queue::{bucket, deck, error, queue, tree};

mod app;
mod config;
mod keys;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use tracing_subscriber::EnvFilter;

use config::AppConfig;

fn config_path() -> PathBuf {
    AppConfig::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

/// Log to a file next to the config; the terminal belongs to the UI.
fn init_tracing(log_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::options().create(true).append(true).open(log_path)?;

    let filter =
        EnvFilter::try_from_env("REVIEW_QUEUE_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| e.to_string())?;
    Ok(())
}

fn restore_terminal(mouse: bool) {
    if mouse {
        let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    }
    ratatui::restore();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path();

    if !path.exists() {
        AppConfig::write_default(&path)?;
        eprintln!(
            "Created default config at: {}\nSet queue.snapshot to your scheduler's JSON export, then run again.",
            path.display()
        );
        return Ok(());
    }

    let config = match AppConfig::load_from_path(&path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", path.display(), e);
            eprintln!("Fix the config file or delete it to regenerate defaults.");
            return Ok(());
        }
    };

    let log_path = path.with_file_name("review-queue.log");
    if let Err(e) = init_tracing(&log_path) {
        eprintln!("Logging disabled ({}): {}", log_path.display(), e);
    }

    let mouse = config.ui.mouse;
    let mut terminal = ratatui::init();
    if mouse {
        let _ = crossterm::execute!(std::io::stdout(), EnableMouseCapture);
    }

    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal(mouse);
        hook(info);
    }));

    let result = app::run(&config, &mut terminal).await;

    restore_terminal(mouse);

    if let Err(e) = result {
        tracing::error!(error = %e, "review queue exited with error");
        eprintln!("Error: {}", e);
    }

    Ok(())
}
