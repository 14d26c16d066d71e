use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::domain::{Posting, PostingDraft, PostingId};
use super::search::{self, PostingFilter};
use crate::page::{PageRequest, Paginated};
use crate::repository::{PostingRepository, RepositoryError};

/// CRUD plus filtered search over published postings.
pub struct PostingService<S> {
    store: Arc<S>,
}

static POSTING_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_posting_id() -> PostingId {
    let id = POSTING_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    PostingId(format!("post-{id:04}"))
}

impl<S> PostingService<S>
where
    S: PostingRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn create(&self, draft: PostingDraft) -> Result<Posting, RepositoryError> {
        self.store.insert_posting(draft.into_posting(next_posting_id()))
    }

    pub fn get(&self, id: &PostingId) -> Result<Posting, RepositoryError> {
        self.store.fetch_posting(id)?.ok_or(RepositoryError::NotFound)
    }

    /// Full replacement of every field but the id.
    pub fn update(&self, id: &PostingId, draft: PostingDraft) -> Result<Posting, RepositoryError> {
        // Existence check first so an absent id is NotFound, not an upsert.
        self.store.fetch_posting(id)?.ok_or(RepositoryError::NotFound)?;
        let replacement = draft.into_posting(id.clone());
        self.store.update_posting(replacement.clone())?;
        Ok(replacement)
    }

    pub fn delete(&self, id: &PostingId) -> Result<Posting, RepositoryError> {
        self.store.delete_posting(id)
    }

    pub fn search(
        &self,
        filter: &PostingFilter,
        page: PageRequest,
    ) -> Result<Paginated<Posting>, RepositoryError> {
        Ok(search::search(self.store.list_postings()?, filter, page))
    }
}
