use std::net::SocketAddr;

use anyhow::Result;
use log::info;

use injection_tracker_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG controls verbosity)
    env_logger::init();
    info!("Starting injection tracker backend");

    let app_state = initialize_backend().await?;
    let app = create_router(app_state);

    // Start the server
    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
