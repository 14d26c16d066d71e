use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{ApplicationId, ApplicationStage};
use super::service::{
    ApplicationFilter, ApplicationService, ApplicationServiceError, ApplicationStore,
    SubmitRequest,
};
use crate::page::PageRequest;

/// Router builder exposing the application lifecycle over HTTP.
pub fn application_router<S>(service: Arc<ApplicationService<S>>) -> Router
where
    S: ApplicationStore + 'static,
{
    Router::new()
        .route(
            "/api/applications",
            get(list_handler::<S>).post(submit_handler::<S>),
        )
        .route("/api/applications/:application_id", get(get_handler::<S>))
        .route(
            "/api/applications/:application_id/status",
            patch(status_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListParams {
    status: Option<ApplicationStage>,
    posting_id: Option<String>,
    student_id: Option<String>,
    page: Option<usize>,
    limit: Option<usize>,
}

impl ListParams {
    fn filter(&self) -> ApplicationFilter {
        ApplicationFilter {
            status: self.status,
            posting_id: self.posting_id.clone().map(crate::postings::domain::PostingId),
            student_id: self.student_id.clone().map(crate::users::domain::UserId),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct StatusUpdate {
    status: ApplicationStage,
}

pub(crate) async fn list_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    let page = PageRequest::new(params.page, params.limit);
    match service.list(&params.filter(), page) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn submit_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.submit(request, Utc::now()) {
        Ok(application) => (
            StatusCode::CREATED,
            axum::Json(json!({ "data": application })),
        )
            .into_response(),
        Err(ApplicationServiceError::NotEligible(decision)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            axum::Json(json!({ "message": decision.reason })),
        )
            .into_response(),
        Err(ApplicationServiceError::AlreadyApplied) => (
            StatusCode::CONFLICT,
            axum::Json(json!({ "message": "You have already applied to this posting" })),
        )
            .into_response(),
        Err(
            error @ (ApplicationServiceError::PostingNotFound
            | ApplicationServiceError::StudentNotFound),
        ) => not_found(error.to_string()),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn get_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(application_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.get(&ApplicationId(application_id)) {
        Ok(application) => {
            (StatusCode::OK, axum::Json(json!({ "data": application }))).into_response()
        }
        Err(ApplicationServiceError::ApplicationNotFound) => {
            not_found("Application not found".to_string())
        }
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn status_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(application_id): Path<String>,
    axum::Json(update): axum::Json<StatusUpdate>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.transition(&ApplicationId(application_id), update.status, Utc::now()) {
        Ok(application) => {
            (StatusCode::OK, axum::Json(json!({ "data": application }))).into_response()
        }
        Err(ApplicationServiceError::ApplicationNotFound) => {
            not_found("Application not found".to_string())
        }
        Err(ApplicationServiceError::Transition(error)) => (
            StatusCode::CONFLICT,
            axum::Json(json!({ "message": error.to_string() })),
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

fn not_found(message: String) -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({ "message": message })),
    )
        .into_response()
}

fn internal_error(error: ApplicationServiceError) -> Response {
    tracing::error!(%error, "application request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "message": "Server error" })),
    )
        .into_response()
}
