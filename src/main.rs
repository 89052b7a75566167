use clap::Parser;
use tracing_subscriber::EnvFilter;

use riskmap::cli::{self, Cli, Commands};
use riskmap::errors::RiskmapError;
use riskmap::settings::SettingsStore;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => default_log_level(),
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(!cli.no_color)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let result = match cli.command {
        Commands::Scan(args) => cli::scan::handle_scan(args).await,
        Commands::Request(args) => cli::request::handle_request(args).await,
        Commands::Domain(command) => cli::domain::handle_domain(command).await,
        Commands::Alerts(command) => cli::alerts::handle_alerts(command).await,
        Commands::Exposure(args) => cli::exposure::handle_exposure(args).await,
        Commands::Settings(command) => cli::settings::handle_settings(command).await,
    };

    match result {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            let exit_code = match &e {
                RiskmapError::Config(_) => 2,
                RiskmapError::Authentication(_) => 4,
                RiskmapError::InvalidTarget(_) => 5,
                _ => 1,
            };
            std::process::exit(exit_code);
        }
    }
}

/// Default level honors the stored logging preference; unreadable settings
/// fall back to info.
fn default_log_level() -> &'static str {
    let enabled = SettingsStore::open_default()
        .and_then(|s| s.read())
        .map(|settings| settings.enable_logging())
        .unwrap_or(true);
    if enabled {
        "info"
    } else {
        "warn"
    }
}
