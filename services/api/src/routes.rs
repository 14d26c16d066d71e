use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde_json::json;

use placement::analytics::{analytics_router, AnalyticsService};
use placement::applications::{application_router, ApplicationService, ApplicationStore};
use placement::catalog::catalog_router;
use placement::postings::{posting_router, PostingService};
use placement::repository::CatalogRepository;
use placement::users::{account_router, AccountService};
use placement::verification::{verification_router, ReviewService};

use crate::infra::AppState;

/// Assemble every feature router plus the infra endpoints over one shared
/// store.
pub(crate) fn with_portal_routes<S>(store: Arc<S>) -> axum::Router
where
    S: ApplicationStore + CatalogRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(store.clone()));
    let postings = Arc::new(PostingService::new(store.clone()));
    let applications = Arc::new(ApplicationService::new(store.clone()));
    let review = Arc::new(ReviewService::new(store.clone()));
    let analytics = Arc::new(AnalyticsService::new(store.clone()));

    account_router(accounts)
        .merge(posting_router(postings))
        .merge(application_router(applications))
        .merge(verification_router(review))
        .merge(catalog_router(store))
        .merge(analytics_router(analytics))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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
