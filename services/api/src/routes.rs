use crate::infra::{AppState, FeedSettings};
use axum::body::Bytes;
use axum::extract::Query;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{DateTime, Utc};
use review_feed::error::AppError;
use review_feed::extract::{CardRejection, ReviewCard, ReviewExtractor};
use serde::{Deserialize, Serialize};
use serde_json::json;

const REQUEST_ORIGIN: &str = "request body";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExtractQuery {
    #[serde(default)]
    pub(crate) diagnostics: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExtractResponse {
    pub(crate) reviews: Vec<ReviewCard>,
    pub(crate) total: usize,
    pub(crate) cards_seen: usize,
    pub(crate) extracted_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) rejections: Option<Vec<CardRejection>>,
}

pub(crate) fn review_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/reviews/extract", post(extract_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Body is the raw HTML page. Nothing carries over between requests.
pub(crate) async fn extract_endpoint(
    Extension(settings): Extension<FeedSettings>,
    Query(query): Query<ExtractQuery>,
    body: Bytes,
) -> Result<Json<ExtractResponse>, AppError> {
    let extractor = ReviewExtractor::new(settings.extractor_options(query.diagnostics))?;
    let report = extractor.extract_reader(body.as_ref(), REQUEST_ORIGIN)?;

    let total = report.total();
    let rejections = query.diagnostics.then_some(report.rejections);

    Ok(Json(ExtractResponse {
        reviews: report.reviews,
        total,
        cards_seen: report.cards_seen,
        extracted_at: Utc::now(),
        rejections,
    }))
}
