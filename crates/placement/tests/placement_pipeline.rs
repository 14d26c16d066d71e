//! End-to-end scenarios through the public service facades: posting
//! management, application intake, lifecycle transitions, and the analytics
//! read side over the same store.

mod common {
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    use chrono::NaiveDate;

    use placement::applications::domain::{Application, ApplicationId};
    use placement::catalog::{Department, DepartmentId, Skill, SkillId};
    use placement::postings::domain::{
        EligibilityRule, Posting, PostingDraft, PostingId, PostingStatus, PostingType,
    };
    use placement::repository::{
        ApplicationRepository, CatalogRepository, PostingRepository, RepositoryError,
        UserRepository, VerificationDocRepository,
    };
    use placement::users::domain::{Role, StudentProfile, User, UserId};
    use placement::verification::domain::{DocId, VerificationDoc};

    #[derive(Default)]
    pub(super) struct MemoryStore {
        users: Mutex<BTreeMap<UserId, User>>,
        postings: Mutex<BTreeMap<PostingId, Posting>>,
        applications: Mutex<BTreeMap<ApplicationId, Application>>,
        docs: Mutex<BTreeMap<DocId, VerificationDoc>>,
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
        fn insert_application(
            &self,
            application: Application,
        ) -> Result<Application, RepositoryError> {
            let mut applications =
                self.applications.lock().expect("application store poisoned");
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
            let mut applications =
                self.applications.lock().expect("application store poisoned");
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
            Ok(vec![
                Skill {
                    id: SkillId("sk-js".to_string()),
                    name: "JavaScript".to_string(),
                },
                Skill {
                    id: SkillId("sk-react".to_string()),
                    name: "React".to_string(),
                },
            ])
        }
    }

    pub(super) fn student(id: &str, name: &str) -> User {
        User {
            id: UserId(id.to_string()),
            username: format!("{id}@campus.edu"),
            email: format!("{id}@campus.edu"),
            name: name.to_string(),
            role: Role::Student,
            credential: "password123".to_string(),
            student_profile: Some(StudentProfile {
                gpa: 3.4,
                grad_year: 2026,
                department_id: Some(DepartmentId("dep-cs".to_string())),
                program: Some("B.S. Computer Science".to_string()),
                has_accepted_offer: false,
            }),
        }
    }

    pub(super) fn draft(title: &str, skills: &[&str]) -> PostingDraft {
        PostingDraft {
            title: title.to_string(),
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
            required_skills: skills
                .iter()
                .map(|skill| SkillId((*skill).to_string()))
                .collect(),
            company: "Tech Corp".to_string(),
            location: "Remote".to_string(),
            salary: "100k".to_string(),
        }
    }
}

use std::sync::Arc;

use chrono::Utc;

use placement::analytics::AnalyticsService;
use placement::applications::domain::ApplicationStage;
use placement::applications::service::{ApplicationService, SubmitRequest};
use placement::postings::service::PostingService;
use placement::repository::UserRepository;
use placement::users::domain::UserId;

use common::{draft, student, MemoryStore};

fn submit(student: &str, posting: &placement::postings::domain::PostingId) -> SubmitRequest {
    SubmitRequest {
        posting_id: posting.clone(),
        student_id: UserId(student.to_string()),
        cover_letter: None,
    }
}

#[test]
fn full_pipeline_from_posting_to_accepted_offer() {
    let store = Arc::new(MemoryStore::default());
    store
        .insert_user(student("user-0001", "Alice Zhang"))
        .expect("student inserts");

    let postings = PostingService::new(store.clone());
    let applications = ApplicationService::new(store.clone());

    let posting = postings
        .create(draft("Software Engineer", &["sk-js", "sk-react"]))
        .expect("posting creates");

    let application = applications
        .submit(submit("user-0001", &posting.id), Utc::now())
        .expect("eligible student submits");
    assert_eq!(application.stage, ApplicationStage::Applied);

    for target in [
        ApplicationStage::UnderReview,
        ApplicationStage::Interview,
        ApplicationStage::Offered,
        ApplicationStage::Accepted,
    ] {
        applications
            .transition(&application.id, target, Utc::now())
            .expect("forward edge is legal");
    }

    let stored = applications.get(&application.id).expect("application exists");
    assert_eq!(stored.stage, ApplicationStage::Accepted);
    assert_eq!(stored.status_history.len(), 5);

    let profile = store
        .fetch_user(&UserId("user-0001".to_string()))
        .expect("fetch succeeds")
        .expect("student exists")
        .student_profile
        .expect("student has a profile");
    assert!(profile.has_accepted_offer);

    // With an accepted offer on file, a fresh submission is refused.
    let second = postings
        .create(draft("Frontend Developer", &["sk-react"]))
        .expect("posting creates");
    let refusal = applications
        .submit(submit("user-0001", &second.id), Utc::now())
        .expect_err("accepted students may not re-apply");
    assert!(refusal
        .to_string()
        .contains("You have already accepted an offer."));
}

#[test]
fn analytics_report_reflects_the_pipeline_and_is_stable() {
    let store = Arc::new(MemoryStore::default());
    store
        .insert_user(student("user-0001", "Alice Zhang"))
        .expect("student inserts");
    store
        .insert_user(student("user-0002", "Rohan Mehta"))
        .expect("student inserts");

    let postings = PostingService::new(store.clone());
    let applications = ApplicationService::new(store.clone());
    let analytics = AnalyticsService::new(store.clone());

    let first = postings
        .create(draft("Software Engineer", &["sk-js", "sk-react"]))
        .expect("posting creates");
    let second = postings
        .create(draft("Frontend Developer", &["sk-react"]))
        .expect("posting creates");

    let moving = applications
        .submit(submit("user-0001", &first.id), Utc::now())
        .expect("submission succeeds");
    applications
        .submit(submit("user-0002", &second.id), Utc::now())
        .expect("submission succeeds");
    applications
        .transition(&moving.id, ApplicationStage::UnderReview, Utc::now())
        .expect("legal edge");

    let report = analytics.report().expect("report builds");

    let funnel: Vec<(ApplicationStage, usize)> = report
        .funnel
        .iter()
        .map(|entry| (entry.stage, entry.count))
        .collect();
    assert_eq!(
        funnel,
        vec![
            (ApplicationStage::Applied, 1),
            (ApplicationStage::UnderReview, 1),
        ]
    );

    assert_eq!(report.skill_demand[0].skill, "React");
    assert_eq!(report.skill_demand[0].count, 2);
    assert_eq!(report.skill_demand[1].skill, "JavaScript");

    assert_eq!(report.pipeline_velocity.len(), 1);
    assert_eq!(
        report.pipeline_velocity[0].transition,
        "APPLIED to UNDER_REVIEW"
    );

    let replay = analytics.report().expect("report rebuilds");
    assert_eq!(
        serde_json::to_string(&report).expect("serializes"),
        serde_json::to_string(&replay).expect("serializes"),
    );
}

#[test]
fn csv_export_is_byte_identical_across_runs() {
    let store = Arc::new(MemoryStore::default());
    store
        .insert_user(student("user-0001", "Alice Zhang"))
        .expect("student inserts");

    let postings = PostingService::new(store.clone());
    let applications = ApplicationService::new(store.clone());
    let analytics = AnalyticsService::new(store.clone());

    let posting = postings
        .create(draft("Software Engineer", &["sk-js"]))
        .expect("posting creates");
    applications
        .submit(submit("user-0001", &posting.id), Utc::now())
        .expect("submission succeeds");

    let first = analytics.export_csv().expect("export succeeds");
    let second = analytics.export_csv().expect("export succeeds");
    assert_eq!(first, second);

    let text = String::from_utf8(first).expect("utf-8");
    let mut lines = text.lines();
    assert!(lines
        .next()
        .expect("header row")
        .starts_with("Application ID,Student Name,Student Email,Department"));
    let row = lines.next().expect("data row");
    assert!(row.contains("Alice Zhang"));
    assert!(row.contains("Software Engineer"));
    assert!(row.contains("Computer Science"));
    assert!(row.contains("APPLIED"));
}
