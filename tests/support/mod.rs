use calmverse::api::CalmverseClient;
use calmverse::dev_backend;
use std::net::SocketAddr;

/// Initialize tracing for tests with proper test output handling
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Seeded dev backend on an ephemeral port plus a client pointed at it
pub async fn start_backend() -> CalmverseClient {
    tracing_init();
    let addr = dev_backend::spawn(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .expect("Failed to start dev backend");
    CalmverseClient::new(format!("http://{}", addr))
}
