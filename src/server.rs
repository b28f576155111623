//! HTTP surface: a thin axum router over the lookup pipeline.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::PanchangaError;
use crate::record::{CalendarRecord, PlanetsSnapshot};
use crate::store::CalendarService;

impl IntoResponse for PanchangaError {
    fn into_response(self) -> Response {
        let status = match &self {
            PanchangaError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            PanchangaError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            PanchangaError::InvalidResponse | PanchangaError::ParseError => StatusCode::BAD_GATEWAY,
            PanchangaError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CalendarService>,
}

#[derive(Deserialize)]
struct InstantQuery {
    date: Option<String>,
    timestamp: Option<String>,
}

impl InstantQuery {
    fn key(self) -> Result<String, PanchangaError> {
        self.timestamp.or(self.date).ok_or_else(|| {
            PanchangaError::InvalidArgument("missing date or timestamp parameter".to_string())
        })
    }
}

async fn info_handler(
    State(state): State<AppState>,
    Query(query): Query<InstantQuery>,
) -> Result<Json<CalendarRecord>, PanchangaError> {
    let key = query.key()?;
    Ok(Json(state.service.get_or_compute(&key).await?))
}

async fn planets_handler(
    State(state): State<AppState>,
    Query(query): Query<InstantQuery>,
) -> Result<Json<PlanetsSnapshot>, PanchangaError> {
    let key = query.key()?;
    Ok(Json(state.service.list_planets(&key).await?))
}

async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/info", get(info_handler))
        .route("/planets", get(planets_handler))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(state: AppState, bind_addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("panchanga service listening on http://{bind_addr}");
    axum::serve(listener, router(state)).await
}
