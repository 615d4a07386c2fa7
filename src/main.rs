//! remote-select demo entry point
//!
//! Opens an interactive terminal select over an in-memory option list and
//! prints the final selection as JSON when the user quits.
//!
//! # Configuration
//!
//! Settings are read from `--config`, or from the user's config directory
//! (`~/.config/remote-select/config.toml` on Linux) when present.

use remote_select::{SelectError, SelectionValue, cli::Cli, ui::ratatui_adapter::app};
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type Result<T> = std::result::Result<T, SelectError>;

/// Send logs to `path`; the terminal belongs to the UI
fn setup_logging(path: &Path, default_level: &str) -> Result<()> {
    let file = File::create(path)?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();

    Ok(())
}

async fn run(cli: Cli) -> Result<SelectionValue> {
    let config = cli.load_config()?;
    let source = cli.build_source()?;
    info!(
        options = source.len(),
        mode = ?config.mode(),
        "starting select"
    );

    let value = app::run(source, &config, SelectionValue::Empty).await?;
    info!(selected = value.options().len(), "select finished");
    Ok(value)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_args();

    if let Some(path) = &cli.log_file
        && let Err(e) = setup_logging(path, cli.log_level.as_filter_str())
    {
        eprintln!("Error: could not open log file {}: {e}", path.display());
        std::process::exit(1);
    }

    let value = match run(cli).await {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match serde_json::to_string_pretty(&value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
