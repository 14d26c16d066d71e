use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{PostingDraft, PostingId, PostingType};
use super::search::PostingFilter;
use super::service::PostingService;
use crate::catalog::SkillId;
use crate::page::PageRequest;
use crate::repository::{PostingRepository, RepositoryError};

pub fn posting_router<S>(service: Arc<PostingService<S>>) -> Router
where
    S: PostingRepository + 'static,
{
    Router::new()
        .route(
            "/api/postings",
            get(search_handler::<S>).post(create_handler::<S>),
        )
        .route(
            "/api/postings/:posting_id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchParams {
    search: Option<String>,
    location: Option<String>,
    skill: Option<String>,
    #[serde(rename = "type")]
    posting_type: Option<PostingType>,
    remote: Option<bool>,
    page: Option<usize>,
    limit: Option<usize>,
}

impl SearchParams {
    fn filter(&self) -> PostingFilter {
        PostingFilter {
            search: self.search.clone(),
            location: self.location.clone(),
            skill: self.skill.clone().map(SkillId),
            posting_type: self.posting_type,
            remote_only: self.remote.unwrap_or(false),
        }
    }
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<PostingService<S>>>,
    Query(params): Query<SearchParams>,
) -> Response
where
    S: PostingRepository + 'static,
{
    let page = PageRequest::new(params.page, params.limit);
    match service.search(&params.filter(), page) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<PostingService<S>>>,
    axum::Json(draft): axum::Json<PostingDraft>,
) -> Response
where
    S: PostingRepository + 'static,
{
    match service.create(draft) {
        Ok(posting) => (StatusCode::CREATED, axum::Json(json!({ "data": posting }))).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn get_handler<S>(
    State(service): State<Arc<PostingService<S>>>,
    Path(posting_id): Path<String>,
) -> Response
where
    S: PostingRepository + 'static,
{
    respond_with(service.get(&PostingId(posting_id)))
}

pub(crate) async fn update_handler<S>(
    State(service): State<Arc<PostingService<S>>>,
    Path(posting_id): Path<String>,
    axum::Json(draft): axum::Json<PostingDraft>,
) -> Response
where
    S: PostingRepository + 'static,
{
    respond_with(service.update(&PostingId(posting_id), draft))
}

pub(crate) async fn delete_handler<S>(
    State(service): State<Arc<PostingService<S>>>,
    Path(posting_id): Path<String>,
) -> Response
where
    S: PostingRepository + 'static,
{
    respond_with(service.delete(&PostingId(posting_id)))
}

fn respond_with(result: Result<super::domain::Posting, RepositoryError>) -> Response {
    match result {
        Ok(posting) => (StatusCode::OK, axum::Json(json!({ "data": posting }))).into_response(),
        Err(RepositoryError::NotFound) => (
            StatusCode::NOT_FOUND,
            axum::Json(json!({ "message": "Posting not found" })),
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: RepositoryError) -> Response {
    tracing::error!(%error, "posting request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "message": "Server error" })),
    )
        .into_response()
}
