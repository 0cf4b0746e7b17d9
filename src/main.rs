use calmverse::api::Services;
use calmverse::config::Config;
use calmverse::ui::{make_config, App};
use dioxus::prelude::*;
use tracing::{error, info};

fn main() {
    // Use RUST_LOG env var if set, otherwise default to info level
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    let config = Config::load();
    info!("Starting CalmVerse against {}", config.api_url);

    let services = match Services::from_config(&config) {
        Ok(services) => services,
        Err(e) => {
            error!("Failed to set up API clients: {}", e);
            std::process::exit(1);
        }
    };

    LaunchBuilder::desktop()
        .with_cfg(make_config())
        .with_context(config)
        .with_context(services)
        .launch(App);
}
