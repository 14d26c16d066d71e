use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::applications::domain::{Application, ApplicationId};
use crate::applications::service::{ApplicationService, SubmitRequest};
use crate::catalog::{Department, DepartmentId, Skill, SkillId};
use crate::postings::domain::{
    EligibilityRule, Posting, PostingId, PostingStatus, PostingType,
};
use crate::repository::{
    ApplicationRepository, CatalogRepository, PostingRepository, RepositoryError, UserRepository,
    VerificationDocRepository,
};
use crate::users::domain::{Role, StudentProfile, User, UserId};
use crate::verification::domain::{DocId, VerificationDoc, VerificationStatus};

/// In-memory store backing every repository trait. BTreeMap keys keep list
/// order deterministic.
#[derive(Default)]
pub(super) struct MemoryStore {
    pub users: Mutex<BTreeMap<UserId, User>>,
    pub postings: Mutex<BTreeMap<PostingId, Posting>>,
    pub applications: Mutex<BTreeMap<ApplicationId, Application>>,
    pub docs: Mutex<BTreeMap<DocId, VerificationDoc>>,
}

impl UserRepository for MemoryStore {
    fn insert_user(&self, user: User) -> Result<User, RepositoryError> {
        let mut users = self.users.lock().expect("user store poisoned");
        if users.values().any(|existing| {
            existing.username == user.username || existing.email == user.email
        }) {
            return Err(RepositoryError::Duplicate);
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    fn fetch_user(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        Ok(self.users.lock().expect("user store poisoned").get(id).cloned())
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .expect("user store poisoned")
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    fn update_user(&self, user: User) -> Result<(), RepositoryError> {
        let mut users = self.users.lock().expect("user store poisoned");
        if !users.contains_key(&user.id) {
            return Err(RepositoryError::NotFound);
        }
        users.insert(user.id.clone(), user);
        Ok(())
    }

    fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self
            .users
            .lock()
            .expect("user store poisoned")
            .values()
            .cloned()
            .collect())
    }
}

impl PostingRepository for MemoryStore {
    fn insert_posting(&self, posting: Posting) -> Result<Posting, RepositoryError> {
        let mut postings = self.postings.lock().expect("posting store poisoned");
        if postings.contains_key(&posting.id) {
            return Err(RepositoryError::Duplicate);
        }
        postings.insert(posting.id.clone(), posting.clone());
        Ok(posting)
    }

    fn fetch_posting(&self, id: &PostingId) -> Result<Option<Posting>, RepositoryError> {
        Ok(self
            .postings
            .lock()
            .expect("posting store poisoned")
            .get(id)
            .cloned())
    }

    fn update_posting(&self, posting: Posting) -> Result<(), RepositoryError> {
        let mut postings = self.postings.lock().expect("posting store poisoned");
        if !postings.contains_key(&posting.id) {
            return Err(RepositoryError::NotFound);
        }
        postings.insert(posting.id.clone(), posting);
        Ok(())
    }

    fn delete_posting(&self, id: &PostingId) -> Result<Posting, RepositoryError> {
        self.postings
            .lock()
            .expect("posting store poisoned")
            .remove(id)
            .ok_or(RepositoryError::NotFound)
    }

    fn list_postings(&self) -> Result<Vec<Posting>, RepositoryError> {
        Ok(self
            .postings
            .lock()
            .expect("posting store poisoned")
            .values()
            .cloned()
            .collect())
    }
}

impl ApplicationRepository for MemoryStore {
    fn insert_application(&self, application: Application) -> Result<Application, RepositoryError> {
        let mut applications = self.applications.lock().expect("application store poisoned");
        if applications.contains_key(&application.id) {
            return Err(RepositoryError::Duplicate);
        }
        applications.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn fetch_application(
        &self,
        id: &ApplicationId,
    ) -> Result<Option<Application>, RepositoryError> {
        Ok(self
            .applications
            .lock()
            .expect("application store poisoned")
            .get(id)
            .cloned())
    }

    fn update_application(&self, application: Application) -> Result<(), RepositoryError> {
        let mut applications = self.applications.lock().expect("application store poisoned");
        if !applications.contains_key(&application.id) {
            return Err(RepositoryError::NotFound);
        }
        applications.insert(application.id.clone(), application);
        Ok(())
    }

    fn list_applications(&self) -> Result<Vec<Application>, RepositoryError> {
        Ok(self
            .applications
            .lock()
            .expect("application store poisoned")
            .values()
            .cloned()
            .collect())
    }
}

impl VerificationDocRepository for MemoryStore {
    fn insert_doc(&self, doc: VerificationDoc) -> Result<VerificationDoc, RepositoryError> {
        let mut docs = self.docs.lock().expect("doc store poisoned");
        if docs.contains_key(&doc.id) {
            return Err(RepositoryError::Duplicate);
        }
        docs.insert(doc.id.clone(), doc.clone());
        Ok(doc)
    }

    fn fetch_doc(&self, id: &DocId) -> Result<Option<VerificationDoc>, RepositoryError> {
        Ok(self.docs.lock().expect("doc store poisoned").get(id).cloned())
    }

    fn update_doc(&self, doc: VerificationDoc) -> Result<(), RepositoryError> {
        let mut docs = self.docs.lock().expect("doc store poisoned");
        if !docs.contains_key(&doc.id) {
            return Err(RepositoryError::NotFound);
        }
        docs.insert(doc.id.clone(), doc);
        Ok(())
    }

    fn list_docs(&self) -> Result<Vec<VerificationDoc>, RepositoryError> {
        Ok(self
            .docs
            .lock()
            .expect("doc store poisoned")
            .values()
            .cloned()
            .collect())
    }
}

impl CatalogRepository for MemoryStore {
    fn departments(&self) -> Result<Vec<Department>, RepositoryError> {
        Ok(vec![Department {
            id: DepartmentId("dep-cs".to_string()),
            name: "Computer Science".to_string(),
        }])
    }

    fn skills(&self) -> Result<Vec<Skill>, RepositoryError> {
        Ok(vec![Skill {
            id: SkillId("sk-js".to_string()),
            name: "JavaScript".to_string(),
        }])
    }
}

/// Store that fails every call, for 500-path tests.
pub(super) struct UnavailableStore;

fn down<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("store offline".to_string()))
}

impl UserRepository for UnavailableStore {
    fn insert_user(&self, _: User) -> Result<User, RepositoryError> {
        down()
    }
    fn fetch_user(&self, _: &UserId) -> Result<Option<User>, RepositoryError> {
        down()
    }
    fn find_by_username(&self, _: &str) -> Result<Option<User>, RepositoryError> {
        down()
    }
    fn update_user(&self, _: User) -> Result<(), RepositoryError> {
        down()
    }
    fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        down()
    }
}

impl PostingRepository for UnavailableStore {
    fn insert_posting(&self, _: Posting) -> Result<Posting, RepositoryError> {
        down()
    }
    fn fetch_posting(&self, _: &PostingId) -> Result<Option<Posting>, RepositoryError> {
        down()
    }
    fn update_posting(&self, _: Posting) -> Result<(), RepositoryError> {
        down()
    }
    fn delete_posting(&self, _: &PostingId) -> Result<Posting, RepositoryError> {
        down()
    }
    fn list_postings(&self) -> Result<Vec<Posting>, RepositoryError> {
        down()
    }
}

impl ApplicationRepository for UnavailableStore {
    fn insert_application(&self, _: Application) -> Result<Application, RepositoryError> {
        down()
    }
    fn fetch_application(&self, _: &ApplicationId) -> Result<Option<Application>, RepositoryError> {
        down()
    }
    fn update_application(&self, _: Application) -> Result<(), RepositoryError> {
        down()
    }
    fn list_applications(&self) -> Result<Vec<Application>, RepositoryError> {
        down()
    }
}

impl VerificationDocRepository for UnavailableStore {
    fn insert_doc(&self, _: VerificationDoc) -> Result<VerificationDoc, RepositoryError> {
        down()
    }
    fn fetch_doc(&self, _: &DocId) -> Result<Option<VerificationDoc>, RepositoryError> {
        down()
    }
    fn update_doc(&self, _: VerificationDoc) -> Result<(), RepositoryError> {
        down()
    }
    fn list_docs(&self) -> Result<Vec<VerificationDoc>, RepositoryError> {
        down()
    }
}

pub(super) fn student(id: &str) -> User {
    User {
        id: UserId(id.to_string()),
        username: format!("{id}@campus.edu"),
        email: format!("{id}@campus.edu"),
        name: "Alice Zhang".to_string(),
        role: Role::Student,
        credential: "password123".to_string(),
        student_profile: Some(profile()),
    }
}

pub(super) fn profile() -> StudentProfile {
    StudentProfile {
        gpa: 3.4,
        grad_year: 2026,
        department_id: Some(DepartmentId("dep-cs".to_string())),
        program: Some("B.S. Computer Science".to_string()),
        has_accepted_offer: false,
    }
}

pub(super) fn posting(id: &str) -> Posting {
    Posting {
        id: PostingId(id.to_string()),
        title: "Software Engineer".to_string(),
        description: "Develop awesome software.".to_string(),
        posting_type: PostingType::FullTime,
        recruiter_id: UserId("user-recruiter".to_string()),
        deadline: NaiveDate::from_ymd_opt(2099, 12, 31).expect("valid date"),
        status: PostingStatus::Open,
        eligibility: EligibilityRule {
            min_gpa: 3.0,
            grad_year: vec![2025, 2026],
        },
        requires_verification: false,
        required_skills: vec![SkillId("sk-js".to_string())],
        company: "Tech Corp".to_string(),
        location: "Remote".to_string(),
        salary: "100k".to_string(),
    }
}

pub(super) fn doc(id: &str, user: &str, status: VerificationStatus) -> VerificationDoc {
    VerificationDoc {
        id: DocId(id.to_string()),
        user_id: UserId(user.to_string()),
        doc_type: "transcript".to_string(),
        document_name: "transcript.pdf".to_string(),
        url: "http://example.com/transcript.pdf".to_string(),
        status,
        remarks: None,
        updated_at: chrono::Utc::now(),
    }
}

/// Store preloaded with one open posting and one eligible student.
pub(super) fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::default();
    store
        .insert_user(student("user-0001"))
        .expect("student inserts");
    store
        .insert_posting(posting("post-0001"))
        .expect("posting inserts");
    Arc::new(store)
}

pub(super) fn submit_request(student: &str, posting: &str) -> SubmitRequest {
    SubmitRequest {
        posting_id: PostingId(posting.to_string()),
        student_id: UserId(student.to_string()),
        cover_letter: Some("I am a great fit.".to_string()),
    }
}

pub(super) fn service(store: Arc<MemoryStore>) -> ApplicationService<MemoryStore> {
    ApplicationService::new(store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
