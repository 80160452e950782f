//! HTTP surface.
//!
//! - `POST /api/analyze` runs the pipeline for `{"repo_url": ...}`.
//! - `GET /api/health` always answers `{"status": "healthy"}`.
//!
//! Failures are `{"error": message}`: 400 for caller mistakes, 500 for
//! everything else.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::errors::{Error, Result};
use crate::pipeline::{AnalysisReport, AnalysisService};

pub const MISSING_REPO_URL: &str = "Repository URL is required";

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub repo_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub data: AnalysisReport,
}

/// Error half of every handler; renders as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(Error::invalid_input(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Error analyzing repository: {}", self.0);
            StatusCode::INTERNAL_SERVER_ERROR
        };

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Application routes with CORS and request tracing.
///
/// # Errors
///
/// Returns [`Error::Config`] if an allowed origin is not a valid header value.
pub fn router(service: Arc<AnalysisService>, cors_origins: &[String]) -> Result<Router> {
    let origins = cors_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|_| Error::Config(format!("Invalid CORS origin: {}", origin)))
        })
        .collect::<Result<Vec<_>>>()?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .route("/api/analyze", post(analyze_repository))
        .route("/api/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(service))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: &ServerConfig, service: Arc<AnalysisService>) -> Result<()> {
    let app = router(service, &config.cors_origins)?;
    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;

    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn analyze_repository(
    State(service): State<Arc<AnalysisService>>,
    payload: std::result::Result<Json<AnalyzeRequest>, JsonRejection>,
) -> std::result::Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = payload?;

    let repo_url = request
        .repo_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| Error::invalid_input(MISSING_REPO_URL))?;

    tracing::info!("Received analysis request for {}", repo_url);
    let report = service.analyze(repo_url).await?;

    Ok(Json(AnalyzeResponse {
        status: "success",
        data: report,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_client_errors_render_400() {
        let response = ApiError::from(Error::invalid_input(MISSING_REPO_URL)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Repository URL is required" })
        );
    }

    #[tokio::test]
    async fn test_upstream_errors_render_500() {
        let response =
            ApiError::from(Error::upstream("GitHub", 404, "Not Found")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "GitHub error (404): Not Found" })
        );
    }

    #[test]
    fn test_missing_repo_url_deserializes() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.repo_url.is_none());
    }
}
