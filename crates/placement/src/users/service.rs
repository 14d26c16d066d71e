use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Deserialize;

use super::domain::{Role, User, UserId, UserView};
use crate::page::{paginate, PageRequest, Paginated};
use crate::repository::{RepositoryError, UserRepository};

/// Registration payload. Self-registration keys the username to the email
/// address.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Account management: registration, credential check, profile lookup, and
/// the admin role-change operation.
pub struct AccountService<S> {
    store: Arc<S>,
}

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserId(format!("user-{id:04}"))
}

impl<S> AccountService<S>
where
    S: UserRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn register(&self, registration: Registration) -> Result<User, AccountError> {
        let user = User {
            id: next_user_id(),
            username: registration.email.clone(),
            email: registration.email,
            name: registration.name,
            role: registration.role,
            credential: registration.password,
            student_profile: None,
        };

        match self.store.insert_user(user) {
            Ok(stored) => Ok(stored),
            Err(RepositoryError::Duplicate) => Err(AccountError::Duplicate),
            Err(error) => Err(AccountError::Repository(error)),
        }
    }

    /// Equality-compares the stored credential. Prototype auth model; there
    /// is no hashing and no server-issued session.
    pub fn login(&self, credentials: &Credentials) -> Result<User, AccountError> {
        let user = self
            .store
            .find_by_username(&credentials.username)?
            .filter(|user| user.credential == credentials.password)
            .ok_or(AccountError::InvalidCredentials)?;
        Ok(user)
    }

    pub fn profile(&self, id: &UserId) -> Result<User, AccountError> {
        self.store
            .fetch_user(id)?
            .ok_or(AccountError::NotFound)
    }

    pub fn list(
        &self,
        role: Option<Role>,
        page: PageRequest,
    ) -> Result<Paginated<UserView>, AccountError> {
        let views = self
            .store
            .list_users()?
            .iter()
            .filter(|user| role.map_or(true, |wanted| user.role == wanted))
            .map(UserView::from)
            .collect();
        Ok(paginate(views, page))
    }

    /// The only path allowed to change an account's role.
    pub fn change_role(&self, id: &UserId, role: Role) -> Result<User, AccountError> {
        let mut user = self.store.fetch_user(id)?.ok_or(AccountError::NotFound)?;
        user.role = role;
        self.store.update_user(user.clone())?;
        Ok(user)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("an account already exists for that username or email")]
    Duplicate,
    #[error("user not found")]
    NotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
