use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use crate::page::{Paginated, Pagination};
use crate::repository::CatalogRepository;

/// Read-only lookup endpoints. Both lists are small and returned whole, with
/// the pagination block reflecting the full set.
pub fn catalog_router<S>(store: Arc<S>) -> Router
where
    S: CatalogRepository + 'static,
{
    Router::new()
        .route("/api/departments", get(departments_handler::<S>))
        .route("/api/skills", get(skills_handler::<S>))
        .with_state(store)
}

pub(crate) async fn departments_handler<S>(State(store): State<Arc<S>>) -> Response
where
    S: CatalogRepository + 'static,
{
    match store.departments() {
        Ok(departments) => whole_list(departments),
        Err(error) => unavailable(error.to_string()),
    }
}

pub(crate) async fn skills_handler<S>(State(store): State<Arc<S>>) -> Response
where
    S: CatalogRepository + 'static,
{
    match store.skills() {
        Ok(skills) => whole_list(skills),
        Err(error) => unavailable(error.to_string()),
    }
}

fn whole_list<T: serde::Serialize>(items: Vec<T>) -> Response {
    let total = items.len();
    let payload = Paginated {
        data: items,
        pagination: Pagination {
            page: 1,
            limit: total,
            total,
        },
    };
    (StatusCode::OK, axum::Json(payload)).into_response()
}

// Raw detail goes to the log, not the client.
fn unavailable(detail: String) -> Response {
    tracing::error!(%detail, "catalog lookup failed");
    let payload = json!({ "message": "Server error" });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
