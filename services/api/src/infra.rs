use std::collections::BTreeMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;

use placement::applications::domain::{Application, ApplicationId};
use placement::catalog::{Department, Skill};
use placement::postings::domain::{Posting, PostingId};
use placement::repository::{
    ApplicationRepository, CatalogRepository, PostingRepository, RepositoryError, UserRepository,
    VerificationDocRepository,
};
use placement::users::domain::{User, UserId};
use placement::verification::domain::{DocId, VerificationDoc};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Single in-memory store backing every repository trait. BTreeMap keys keep
/// listings in insertion-id order across restarts of the same seed.
#[derive(Default)]
pub(crate) struct InMemoryStore {
    users: Mutex<BTreeMap<UserId, User>>,
    postings: Mutex<BTreeMap<PostingId, Posting>>,
    applications: Mutex<BTreeMap<ApplicationId, Application>>,
    docs: Mutex<BTreeMap<DocId, VerificationDoc>>,
    departments: Vec<Department>,
    skills: Vec<Skill>,
}

impl InMemoryStore {
    pub(crate) fn with_catalog(departments: Vec<Department>, skills: Vec<Skill>) -> Self {
        Self {
            departments,
            skills,
            ..Self::default()
        }
    }
}

impl UserRepository for InMemoryStore {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut guard = self.users.lock().expect("user mutex poisoned");
        if guard
            .values()
            .any(|existing| existing.username == user.username || existing.email == user.email)
        {
            return Err(RepositoryError::Duplicate);
        }
        guard.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        let guard = self.users.lock().expect("user mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        let guard = self.users.lock().expect("user mutex poisoned");
        Ok(guard
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    fn update_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut guard = self.users.lock().expect("user mutex poisoned");
        if guard.contains_key(&user.id) {
            guard.insert(user.id.clone(), user);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let guard = self.users.lock().expect("user mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

impl PostingRepository for InMemoryStore {
    fn insert_posting(&self, posting: Posting) -> Result<Posting, RepositoryError> {
        let mut guard = self.postings.lock().expect("posting mutex poisoned");
        if guard.contains_key(&posting.id) {
            return Err(RepositoryError::Duplicate);
        }
        guard.insert(posting.id.clone(), posting.clone());
        Ok(posting)
    }

    fn fetch_posting(&self, id: &PostingId) -> Result<Option<Posting>, RepositoryError> {
        let guard = self.postings.lock().expect("posting mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_posting(&self, posting: Posting) -> Result<(), RepositoryError> {
        let mut guard = self.postings.lock().expect("posting mutex poisoned");
        if guard.contains_key(&posting.id) {
            guard.insert(posting.id.clone(), posting);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn delete_posting(&self, id: &PostingId) -> Result<Posting, RepositoryError> {
        let mut guard = self.postings.lock().expect("posting mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)
    }

    fn list_postings(&self) -> Result<Vec<Posting>, RepositoryError> {
        let guard = self.postings.lock().expect("posting mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

impl ApplicationRepository for InMemoryStore {
    fn insert_application(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        if guard.contains_key(&application.id) {
            return Err(RepositoryError::Duplicate);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_application(&self, application: Application) -> Result<(), RepositoryError> {
        let mut guard = self.applications.lock().expect("application mutex poisoned");
        if guard.contains_key(&application.id) {
            guard.insert(application.id.clone(), application);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn list_applications(&self) -> Result<Vec<Application>, RepositoryError> {
        let guard = self.applications.lock().expect("application mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

impl VerificationDocRepository for InMemoryStore {
    fn insert_doc(&self, doc: VerificationDoc) -> Result<VerificationDoc, RepositoryError> {
        let mut guard = self.docs.lock().expect("doc mutex poisoned");
        if guard.contains_key(&doc.id) {
            return Err(RepositoryError::Duplicate);
        }
        guard.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    fn fetch_doc(&self, id: &DocId) -> Result<Option<VerificationDoc>, RepositoryError> {
        let guard = self.docs.lock().expect("doc mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update_doc(&self, doc: VerificationDoc) -> Result<(), RepositoryError> {
        let mut guard = self.docs.lock().expect("doc mutex poisoned");
        if guard.contains_key(&doc.id) {
            guard.insert(doc.id.clone(), doc);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn list_docs(&self) -> Result<Vec<VerificationDoc>, RepositoryError> {
        let guard = self.docs.lock().expect("doc mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

impl CatalogRepository for InMemoryStore {
    fn departments(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(self.departments.clone())
    }

    fn skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        Ok(self.skills.clone())
    }
}
