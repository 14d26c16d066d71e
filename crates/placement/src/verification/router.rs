use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{DocId, ReviewAction};
use super::service::ReviewService;
use crate::page::PageRequest;
use crate::repository::{RepositoryError, VerificationDocRepository};
use crate::users::domain::UserId;

pub fn verification_router<S>(service: Arc<ReviewService<S>>) -> Router
where
    S: VerificationDocRepository + 'static,
{
    Router::new()
        .route("/api/verification-docs", get(list_handler::<S>))
        .route(
            "/api/verification-docs/:doc_id/status",
            patch(review_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DocListParams {
    user_id: Option<String>,
    page: Option<usize>,
    limit: Option<usize>,
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<ReviewService<S>>>,
    Query(params): Query<DocListParams>,
) -> Response
where
    S: VerificationDocRepository + 'static,
{
    let user = params.user_id.map(UserId);
    let page = PageRequest::new(params.page, params.limit);
    match service.list(user.as_ref(), page) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn review_handler<S>(
    State(service): State<Arc<ReviewService<S>>>,
    Path(doc_id): Path<String>,
    axum::Json(action): axum::Json<ReviewAction>,
) -> Response
where
    S: VerificationDocRepository + 'static,
{
    match service.review(&DocId(doc_id), action, Utc::now()) {
        Ok(doc) => (StatusCode::OK, axum::Json(json!({ "data": doc }))).into_response(),
        Err(RepositoryError::NotFound) => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "message": "Verification document not found" })),
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: RepositoryError) -> Response {
    tracing::error!(%error, "verification request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "message": "Server error" })),
    )
        .into_response()
}
