use crate::{config::HealthConfig, error::Result};
use axum::{Router, http::StatusCode, routing::get};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

const BODY: &str = "Bot is running";

/// Liveness check for the hosting platform.
#[must_use]
pub fn router() -> Router {
    Router::new().route("/", get(health))
}

async fn health() -> (StatusCode, &'static str) {
    (StatusCode::OK, BODY)
}

/// Bind `0.0.0.0:{port}` and serve the health endpoint until the process exits.
///
/// # Errors
///
/// Returns `Error::Io` if the port cannot be bound or the server fails.
pub async fn serve(config: HealthConfig) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;
    serve_on(listener).await
}

/// # Errors
///
/// Returns `Error::Io` if the server fails.
pub async fn serve_on(listener: TcpListener) -> Result<()> {
    info!(addr = %listener.local_addr()?, "health endpoint listening");
    axum::serve(listener, router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn handler_ok() {
        assert_eq!(health().await, (StatusCode::OK, BODY));
    }

    #[tokio::test]
    async fn serves_over_http() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(serve_on(listener));

        let response = reqwest::get(format!("http://{addr}/"))
            .await
            .expect("request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.expect("body"), BODY);
    }
}
