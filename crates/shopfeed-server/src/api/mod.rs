mod feeds;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::feed::{FeedError, FeedService};
use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub feeds: FeedService,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

/// Plain-text error response. Feed clients are ad platforms and shell
/// scripts, so the body is a short fixed message and never the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    #[must_use]
    pub const fn new(status: StatusCode, message: &'static str) -> Self {
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

pub(super) const MISSING_SHOP: &str = "Missing ?shop=";
pub(super) const FETCH_FAILED: &str = "Error fetching products";

/// Logs `error` against the request and picks the response for it.
/// `render_message` is used when the products were fetched but could not be
/// serialized.
pub(super) fn map_feed_error(
    request_id: &str,
    error: &FeedError,
    render_message: &'static str,
) -> ApiError {
    if let FeedError::InvalidRequest(reason) = error {
        tracing::warn!(request_id, reason = %reason, "rejected feed request");
        let message = if reason == MISSING_SHOP {
            MISSING_SHOP
        } else {
            "Invalid ?shop="
        };
        return ApiError::new(StatusCode::BAD_REQUEST, message);
    }

    if error.is_source_failure() {
        tracing::error!(request_id, error = %error, "feed source failed");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED)
    } else {
        tracing::error!(request_id, error = %error, "feed rendering failed");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, render_message)
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/feed/shopify/xml/google", get(feeds::google_xml))
        .route("/api/feed/shopify/xml/google.xml", get(feeds::google_xml))
        .route("/feed/shopify/xml/tiktok", get(feeds::tiktok_xml))
        .route("/api/feed/shopify/xml/tiktok.xml", get(feeds::tiktok_xml))
        .route("/feed/shopify/csv", get(feeds::csv))
        .route("/api/feed/shopify/csv", get(feeds::csv))
        .route("/api/feed/shopify/xml/csv", get(feeds::csv))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
