//! Liveness endpoint
//!
//! `GET /` and `GET /health` answer `200 OK` while the process is up.

use std::net::SocketAddr;
use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;
use tracing::info;
use crate::config::HealthConfig;
use crate::utils::errors::{CompanyBotError, Result};

async fn ok() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(ok))
        .route("/health", get(ok))
}

/// Serve on an already bound listener until the task is dropped
pub async fn serve_on(listener: TcpListener) -> Result<()> {
    axum::serve(listener, router()).await?;
    Ok(())
}

pub async fn serve(config: &HealthConfig) -> Result<()> {
    let addr: SocketAddr = config
        .bind_address
        .parse()
        .map_err(|e| CompanyBotError::Config(format!("Invalid health bind address: {}", e)))?;

    let listener = TcpListener::bind(addr).await?;
    info!(address = %addr, "Health endpoint listening");
    serve_on(listener).await
}
