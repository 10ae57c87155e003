mod app;
mod config;
mod theme;
mod ui;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::AppState;
use crate::config::{GuiConfig, gui_config_path, load_gui_config};

/// Shows one stored request/response pair.
#[derive(Debug, Parser)]
#[command(name = "reqview-gui")]
struct Cli {
    /// SQLite capture database; remembered in gui.toml once given
    #[arg(long)]
    database: Option<PathBuf>,

    /// Id of the stored request to show
    #[arg(long)]
    id: i64,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> iced::Result {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config_path = gui_config_path();
    let config = load_gui_config(&config_path).unwrap_or_else(|err| {
        tracing::warn!(path = %config_path.display(), error = %err, "using default gui config");
        GuiConfig::default()
    });

    let Cli { database, id, .. } = cli;
    iced::application(AppState::title, AppState::update, AppState::view)
        .theme(AppState::theme)
        .run_with(move || AppState::new(config, config_path, database, id))
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();
}
