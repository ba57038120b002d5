//! Keep-alive HTTP endpoint used by the hosting platform's health checks.

use axum::{Json, Router, routing::get};
use serde::Serialize;
use tracing::{error, info};

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    ts: i64,
}

/// Routes: `GET /` (plain text) and `GET /health` (JSON).
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

async fn root() -> &'static str {
    "Bot UNI.PRF online ✅"
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        ts: chrono::Utc::now().timestamp_millis(),
    })
}

/// Serves the keep-alive endpoint on `0.0.0.0:port` until the process exits.
pub async fn start_server(port: u16) {
    let addr = format!("0.0.0.0:{port}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind keep-alive endpoint to {}: {}", addr, e);
            return;
        }
    };
    info!("Keep-alive endpoint listening on {}", addr);

    if let Err(e) = axum::serve(listener, create_router()).await {
        error!("Keep-alive endpoint error: {}", e);
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_health_route_responds() {
        let response = create_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = create_router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
