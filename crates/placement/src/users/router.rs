use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Role, UserId, UserView};
use super::service::{AccountError, AccountService, Credentials, Registration};
use crate::page::PageRequest;
use crate::repository::UserRepository;

pub fn account_router<S>(service: Arc<AccountService<S>>) -> Router
where
    S: UserRepository + 'static,
{
    Router::new()
        .route("/api/auth/login", post(login_handler::<S>))
        .route("/api/auth/register", post(register_handler::<S>))
        .route("/api/users/:user_id/profile", get(profile_handler::<S>))
        .route("/api/admin/users", get(list_users_handler::<S>))
        .route("/api/admin/roles", get(roles_handler))
        .route(
            "/api/admin/users/:user_id/role",
            patch(change_role_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn login_handler<S>(
    State(service): State<Arc<AccountService<S>>>,
    axum::Json(credentials): axum::Json<Credentials>,
) -> Response
where
    S: UserRepository + 'static,
{
    match service.login(&credentials) {
        Ok(user) => ok_user(StatusCode::OK, &user),
        Err(AccountError::InvalidCredentials) => (
            StatusCode::UNAUTHORIZED,
            axum::Json(json!({ "message": "Invalid credentials" })),
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn register_handler<S>(
    State(service): State<Arc<AccountService<S>>>,
    axum::Json(registration): axum::Json<Registration>,
) -> Response
where
    S: UserRepository + 'static,
{
    match service.register(registration) {
        Ok(user) => ok_user(StatusCode::CREATED, &user),
        Err(AccountError::Duplicate) => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({ "message": "An account already exists for that email" })),
        )
            .into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn profile_handler<S>(
    State(service): State<Arc<AccountService<S>>>,
    Path(user_id): Path<String>,
) -> Response
where
    S: UserRepository + 'static,
{
    match service.profile(&UserId(user_id)) {
        Ok(user) => ok_user(StatusCode::OK, &user),
        Err(AccountError::NotFound) => user_not_found(),
        Err(error) => internal_error(error),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserListParams {
    role: Option<Role>,
    page: Option<usize>,
    limit: Option<usize>,
}

pub(crate) async fn list_users_handler<S>(
    State(service): State<Arc<AccountService<S>>>,
    Query(params): Query<UserListParams>,
) -> Response
where
    S: UserRepository + 'static,
{
    let page = PageRequest::new(params.page, params.limit);
    match service.list(params.role, page) {
        Ok(listing) => (StatusCode::OK, axum::Json(listing)).into_response(),
        Err(error) => internal_error(error),
    }
}

pub(crate) async fn roles_handler() -> Response {
    let roles: Vec<&'static str> = Role::all().into_iter().map(Role::label).collect();
    (StatusCode::OK, axum::Json(json!({ "data": roles }))).into_response()
}

#[derive(Debug, Deserialize)]
pub(crate) struct RoleChange {
    role: Role,
}

pub(crate) async fn change_role_handler<S>(
    State(service): State<Arc<AccountService<S>>>,
    Path(user_id): Path<String>,
    axum::Json(change): axum::Json<RoleChange>,
) -> Response
where
    S: UserRepository + 'static,
{
    match service.change_role(&UserId(user_id), change.role) {
        Ok(user) => ok_user(StatusCode::OK, &user),
        Err(AccountError::NotFound) => user_not_found(),
        Err(error) => internal_error(error),
    }
}

fn ok_user(status: StatusCode, user: &super::domain::User) -> Response {
    let view = UserView::from(user);
    (status, axum::Json(json!({ "data": view }))).into_response()
}

fn user_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        axum::Json(json!({ "message": "User not found" })),
    )
        .into_response()
}

fn internal_error(error: AccountError) -> Response {
    tracing::error!(%error, "account request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        axum::Json(json!({ "message": "Server error" })),
    )
        .into_response()
}
