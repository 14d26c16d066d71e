use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{DocId, ReviewAction, VerificationDoc};
use crate::page::{paginate, PageRequest, Paginated};
use crate::repository::{RepositoryError, VerificationDocRepository};
use crate::users::domain::UserId;

/// Faculty review over uploaded verification documents.
pub struct ReviewService<S> {
    store: Arc<S>,
}

impl<S> ReviewService<S>
where
    S: VerificationDocRepository + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Apply a faculty decision, stamping `updated_at`.
    pub fn review(
        &self,
        id: &DocId,
        action: ReviewAction,
        now: DateTime<Utc>,
    ) -> Result<VerificationDoc, RepositoryError> {
        let mut doc = self.store.fetch_doc(id)?.ok_or(RepositoryError::NotFound)?;
        doc.status = action.status;
        doc.remarks = action.remarks;
        doc.updated_at = now;
        self.store.update_doc(doc.clone())?;
        Ok(doc)
    }

    pub fn list(
        &self,
        user: Option<&UserId>,
        page: PageRequest,
    ) -> Result<Paginated<VerificationDoc>, RepositoryError> {
        let docs = self
            .store
            .list_docs()?
            .into_iter()
            .filter(|doc| user.map_or(true, |id| &doc.user_id == id))
            .collect();
        Ok(paginate(docs, page))
    }
}
