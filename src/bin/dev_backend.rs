use std::net::SocketAddr;
use tracing::{error, warn};

const DEFAULT_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() {
    // Use RUST_LOG env var if set, otherwise default to info level
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt().with_env_filter(log_filter).init();

    let raw = std::env::var("CALMVERSE_DEV_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let addr: SocketAddr = match raw.parse() {
        Ok(addr) => addr,
        Err(e) => {
            warn!("Invalid CALMVERSE_DEV_ADDR '{}' ({}), using {}", raw, e, DEFAULT_ADDR);
            SocketAddr::from(([127, 0, 0, 1], 8000))
        }
    };

    if let Err(e) = calmverse::dev_backend::serve(addr).await {
        error!("Dev backend failed: {}", e);
        std::process::exit(1);
    }
}
