//! Demo fixtures loaded into the in-memory store at startup. Enough data to
//! exercise every screen: four role accounts, two open postings, a pending
//! and a verified document, and one application already moving through the
//! pipeline.

use chrono::{Duration, Utc};

use placement::applications::domain::{
    Application, ApplicationId, ApplicationStage, StageChange,
};
use placement::catalog::{Department, DepartmentId, Skill, SkillId};
use placement::postings::domain::{
    EligibilityRule, Posting, PostingId, PostingStatus, PostingType,
};
use placement::repository::{
    ApplicationRepository, PostingRepository, UserRepository, VerificationDocRepository,
};
use placement::users::domain::{Role, StudentProfile, User, UserId};
use placement::verification::domain::{DocId, VerificationDoc, VerificationStatus};

use crate::infra::InMemoryStore;

pub(crate) fn departments() -> Vec<Department> {
    vec![
        Department {
            id: DepartmentId("dpt1".to_string()),
            name: "Computer Science".to_string(),
        },
        Department {
            id: DepartmentId("dpt2".to_string()),
            name: "Electrical Engineering".to_string(),
        },
    ]
}

pub(crate) fn skills() -> Vec<Skill> {
    vec![
        Skill {
            id: SkillId("sk1".to_string()),
            name: "JavaScript".to_string(),
        },
        Skill {
            id: SkillId("sk2".to_string()),
            name: "React".to_string(),
        },
        Skill {
            id: SkillId("sk3".to_string()),
            name: "Node.js".to_string(),
        },
    ]
}

fn account(id: &str, name: &str, email: &str, role: Role) -> User {
    User {
        id: UserId(id.to_string()),
        username: email.to_string(),
        email: email.to_string(),
        name: name.to_string(),
        role,
        credential: "password123".to_string(),
        student_profile: None,
    }
}

pub(crate) fn seed(store: &InMemoryStore) {
    let now = Utc::now();
    let today = now.date_naive();

    let mut student = account(
        "user1",
        "Alice Student",
        "alice@campus.edu",
        Role::Student,
    );
    student.student_profile = Some(StudentProfile {
        gpa: 3.6,
        grad_year: 2026,
        department_id: Some(DepartmentId("dpt1".to_string())),
        program: Some("B.S. Computer Science".to_string()),
        has_accepted_offer: false,
    });

    let accounts = [
        student,
        account(
            "user2",
            "Frank Faculty",
            "frank@campus.edu",
            Role::Faculty,
        ),
        account(
            "user3",
            "Rita Recruiter",
            "rita@techcorp.com",
            Role::Recruiter,
        ),
        account("user4", "Ada Admin", "ada@campus.edu", Role::Admin),
    ];
    for user in accounts {
        if let Err(error) = store.insert_user(user) {
            tracing::warn!(%error, "demo user skipped");
        }
    }

    let postings = [
        Posting {
            id: PostingId("post1".to_string()),
            title: "Software Engineer".to_string(),
            description: "Develop awesome software.".to_string(),
            posting_type: PostingType::FullTime,
            recruiter_id: UserId("user3".to_string()),
            deadline: today + Duration::days(90),
            status: PostingStatus::Open,
            eligibility: EligibilityRule {
                min_gpa: 3.0,
                grad_year: vec![2025, 2026],
            },
            requires_verification: true,
            required_skills: vec![SkillId("sk1".to_string()), SkillId("sk2".to_string())],
            company: "Tech Corp".to_string(),
            location: "Remote".to_string(),
            salary: "100k".to_string(),
        },
        Posting {
            id: PostingId("post2".to_string()),
            title: "Frontend Developer".to_string(),
            description: "Build beautiful UIs.".to_string(),
            posting_type: PostingType::Internship,
            recruiter_id: UserId("user3".to_string()),
            deadline: today + Duration::days(45),
            status: PostingStatus::Open,
            eligibility: EligibilityRule {
                min_gpa: 3.5,
                grad_year: vec![2026],
            },
            requires_verification: false,
            required_skills: vec![SkillId("sk2".to_string()), SkillId("sk3".to_string())],
            company: "Design Studio".to_string(),
            location: "New York".to_string(),
            salary: "50k".to_string(),
        },
    ];
    for posting in postings {
        if let Err(error) = store.insert_posting(posting) {
            tracing::warn!(%error, "demo posting skipped");
        }
    }

    let docs = [
        VerificationDoc {
            id: DocId("doc1".to_string()),
            user_id: UserId("user1".to_string()),
            doc_type: "transcript".to_string(),
            document_name: "transcript.pdf".to_string(),
            url: "http://example.com/transcript1.pdf".to_string(),
            status: VerificationStatus::Pending,
            remarks: None,
            updated_at: now,
        },
        VerificationDoc {
            id: DocId("doc2".to_string()),
            user_id: UserId("user1".to_string()),
            doc_type: "resume".to_string(),
            document_name: "resume.pdf".to_string(),
            url: "http://example.com/resume1.pdf".to_string(),
            status: VerificationStatus::Verified,
            remarks: None,
            updated_at: now,
        },
    ];
    for doc in docs {
        if let Err(error) = store.insert_doc(doc) {
            tracing::warn!(%error, "demo document skipped");
        }
    }

    let application = Application {
        id: ApplicationId("app1".to_string()),
        posting_id: PostingId("post2".to_string()),
        student_id: UserId("user1".to_string()),
        stage: ApplicationStage::UnderReview,
        cover_letter: Some("Excited to build beautiful UIs.".to_string()),
        status_history: vec![
            StageChange {
                status: ApplicationStage::Applied,
                date: now - Duration::days(5),
            },
            StageChange {
                status: ApplicationStage::UnderReview,
                date: now - Duration::days(2),
            },
        ],
    };
    if let Err(error) = store.insert_application(application) {
        tracing::warn!(%error, "demo application skipped");
    }
}
