//! Storage abstraction shared by every entity.
//!
//! The portal persists through these traits only, so handlers and services
//! can be exercised against in-memory doubles. Implementations are expected
//! to make each call one atomic step; there is no cross-entity transaction.

use crate::applications::domain::{Application, ApplicationId};
use crate::catalog::{Department, Skill};
use crate::postings::domain::{Posting, PostingId};
use crate::users::domain::{User, UserId};
use crate::verification::domain::{DocId, VerificationDoc};

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Duplicate,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

pub trait UserRepository: Send + Sync {
    /// Rejects an already-taken username or email with
    /// [`RepositoryError::Duplicate`].
    fn insert_user(&self, user: User) -> Result<User, RepositoryError>;
    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError>;
    fn update_user(&self, user: User) -> Result<(), RepositoryError>;
    fn list_users(&self) -> Result<Vec<User>, RepositoryError>;
}

pub trait PostingRepository: Send + Sync {
    fn insert_posting(&self, posting: Posting) -> Result<Posting, RepositoryError>;
    fn fetch_posting(&self, id: &PostingId) -> Result<Option<Posting>, RepositoryError>;
    fn update_posting(&self, posting: Posting) -> Result<(), RepositoryError>;
    /// Hard delete; no history is retained.
    fn delete_posting(&self, id: &PostingId) -> Result<Posting, RepositoryError>;
    fn list_postings(&self) -> Result<Vec<Posting>, RepositoryError>;
}

pub trait ApplicationRepository: Send + Sync {
    fn insert_application(&self, application: Application) -> Result<Application, RepositoryError>;
    fn fetch_application(&self, id: &ApplicationId)
        -> Result<Option<Application>, RepositoryError>;
    fn update_application(&self, application: Application) -> Result<(), RepositoryError>;
    fn list_applications(&self) -> Result<Vec<Application>, RepositoryError>;
}

pub trait VerificationDocRepository: Send + Sync {
    fn insert_doc(&self, doc: VerificationDoc) -> Result<VerificationDoc, RepositoryError>;
    fn fetch_doc(&self, id: &DocId) -> Result<Option<VerificationDoc>, RepositoryError>;
    fn update_doc(&self, doc: VerificationDoc) -> Result<(), RepositoryError>;
    fn list_docs(&self) -> Result<Vec<VerificationDoc>, RepositoryError>;
}

pub trait CatalogRepository: Send + Sync {
    fn departments(&self) -> Result<Vec<Department>, RepositoryError>;
    fn skills(&self) -> Result<Vec<Skill>, RepositoryError>;
}
