use crate::api::{routes, AppState};
use std::net::SocketAddr;
use tracing::info;

/// Starts and runs the HTTP server using Axum web framework
///
/// # Arguments
/// * `port` - Port number to listen on for incoming HTTP connections
/// * `state` - Shared handler state
///
/// # Returns
/// * `Result<(), std::io::Error>` - Error if binding or serving fails
pub async fn launch_server(port: u16, state: AppState) -> Result<(), std::io::Error> {
    let app = routes::app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Report form listening on http://{}", addr);
    axum::serve(listener, app).await
}
