use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::service::{AnalyticsError, AnalyticsService, AnalyticsStore};
use crate::users::domain::UserId;

pub fn analytics_router<S>(service: Arc<AnalyticsService<S>>) -> Router
where
    S: AnalyticsStore + 'static,
{
    Router::new()
        .route("/api/analytics/report", get(report_handler::<S>))
        .route("/api/analytics/export", get(export_handler::<S>))
        .route(
            "/api/student/:student_id/dashboard",
            get(student_dashboard_handler::<S>),
        )
        .route(
            "/api/recruiter/:recruiter_id/dashboard",
            get(recruiter_dashboard_handler::<S>),
        )
        .route(
            "/api/faculty/:faculty_id/dashboard",
            get(faculty_dashboard_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn report_handler<S>(
    State(service): State<Arc<AnalyticsService<S>>>,
) -> Response
where
    S: AnalyticsStore + 'static,
{
    match service.report() {
        Ok(report) => (StatusCode::OK, axum::Json(json!({ "data": report }))).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn export_handler<S>(
    State(service): State<Arc<AnalyticsService<S>>>,
) -> Response
where
    S: AnalyticsStore + 'static,
{
    match service.export_csv() {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"placement-report.csv\"",
                ),
            ],
            csv,
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn student_dashboard_handler<S>(
    State(service): State<Arc<AnalyticsService<S>>>,
    Path(student_id): Path<String>,
) -> Response
where
    S: AnalyticsStore + 'static,
{
    match service.student_dashboard(&UserId(student_id)) {
        Ok(dashboard) => (StatusCode::OK, axum::Json(json!({ "data": dashboard }))).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn recruiter_dashboard_handler<S>(
    State(service): State<Arc<AnalyticsService<S>>>,
    Path(recruiter_id): Path<String>,
) -> Response
where
    S: AnalyticsStore + 'static,
{
    match service.recruiter_dashboard(&UserId(recruiter_id)) {
        Ok(dashboard) => (StatusCode::OK, axum::Json(json!({ "data": dashboard }))).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn faculty_dashboard_handler<S>(
    State(service): State<Arc<AnalyticsService<S>>>,
    Path(faculty_id): Path<String>,
) -> Response
where
    S: AnalyticsStore + 'static,
{
    match service.faculty_dashboard(&UserId(faculty_id)) {
        Ok(dashboard) => (StatusCode::OK, axum::Json(json!({ "data": dashboard }))).into_response(),
        Err(error) => internal_error(error),
    }
}

fn internal_error(error: AnalyticsError) -> Response {
    tracing::error!(%error, "analytics request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "message": "Server error" })),
    )
        .into_response()
}
