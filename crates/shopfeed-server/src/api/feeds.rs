use axum::{
    body::Body,
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
    Extension,
};
use futures::StreamExt;
use shopfeed_core::FeedSchema;

use crate::feed::{FeedParams, FeedRequest};
use crate::middleware::RequestId;

use super::{map_feed_error, ApiError, AppState};

const XML_FAILED: &str = "Error generating XML feed";
const CSV_FAILED: &str = "Error generating CSV feed";

pub(super) async fn google_xml(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<FeedParams>,
) -> Result<Response, ApiError> {
    buffered_xml(&state, &req_id, params, FeedSchema::GoogleXml).await
}

pub(super) async fn tiktok_xml(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<FeedParams>,
) -> Result<Response, ApiError> {
    buffered_xml(&state, &req_id, params, FeedSchema::TiktokXml).await
}

async fn buffered_xml(
    state: &AppState,
    req_id: &RequestId,
    params: FeedParams,
    schema: FeedSchema,
) -> Result<Response, ApiError> {
    let request = FeedRequest::from_params(params, schema)
        .map_err(|e| map_feed_error(&req_id.0, &e, XML_FAILED))?;

    let body = state
        .feeds
        .generate(&request)
        .await
        .map_err(|e| map_feed_error(&req_id.0, &e, XML_FAILED))?;

    Ok(([(CONTENT_TYPE, schema.content_type())], body).into_response())
}

/// CSV is streamed page by page. Once the first page has been sent a later
/// failure can only abort the transfer.
pub(super) async fn csv(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<FeedParams>,
) -> Result<Response, ApiError> {
    let schema = FeedSchema::Csv;
    let request = FeedRequest::from_params(params, schema)
        .map_err(|e| map_feed_error(&req_id.0, &e, CSV_FAILED))?;

    let feed = state
        .feeds
        .stream(request)
        .await
        .map_err(|e| map_feed_error(&req_id.0, &e, CSV_FAILED))?;

    let disposition = schema
        .attachment_name()
        .map(|name| format!("attachment; filename=\"{name}\""))
        .unwrap_or_default();

    let request_id = req_id.0;
    let body = Body::from_stream(feed.into_stream().map(move |chunk| {
        if let Err(e) = &chunk {
            tracing::error!(request_id = %request_id, error = %e, "aborting CSV transfer");
        }
        chunk
    }));

    Ok((
        [
            (CONTENT_TYPE, schema.content_type().to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}
