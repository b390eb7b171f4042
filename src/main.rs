use std::net::SocketAddr;

use axum::serve;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::error::StartupError;
use crate::router::create_router;

mod config;
mod error;
mod router;
mod routes;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    // Initialize environment
    dotenv().ok();

    // Initialize logging with target info
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new("ipecho=debug,tower_http=debug"))
                .unwrap(),
        )
        .with_target(true)
        .init();

    info!("Starting ipecho server");

    let settings = Settings::load()?;
    debug!(
        "Report policy: require_origin_header={}, strip_port_from_address={}",
        settings.require_origin_header, settings.strip_port_from_address
    );

    // Create and configure app
    let app = create_router(settings.policy()).layer(TraceLayer::new_for_http());

    // Start server
    let listener = TcpListener::bind(&settings.listen_address).await?;
    info!("Listening on address: {}", settings.listen_address);

    // ConnectInfo records each connection's peer address for the handler.
    match serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    {
        Ok(_) => info!("Server shutdown gracefully"),
        Err(e) => error!("Server error: {}", e),
    }

    Ok(())
}
