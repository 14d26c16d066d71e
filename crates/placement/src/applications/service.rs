use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::domain::{Application, ApplicationId, ApplicationStage, InvalidTransition};
use super::eligibility::{self, EligibilityDecision};
use crate::page::{paginate, PageRequest, Paginated};
use crate::postings::domain::PostingId;
use crate::repository::{
    ApplicationRepository, PostingRepository, RepositoryError, UserRepository,
    VerificationDocRepository,
};
use crate::users::domain::UserId;

/// Stores every entity the submission path touches: the application itself,
/// the student profile, the posting constraints, and the student's
/// verification documents.
pub trait ApplicationStore:
    ApplicationRepository + PostingRepository + UserRepository + VerificationDocRepository
{
}

impl<S> ApplicationStore for S where
    S: ApplicationRepository + PostingRepository + UserRepository + VerificationDocRepository
{
}

/// Submission payload from a student.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub posting_id: PostingId,
    pub student_id: UserId,
    #[serde(default)]
    pub cover_letter: Option<String>,
}

/// List filter; all clauses optional, combined with AND.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStage>,
    pub posting_id: Option<PostingId>,
    pub student_id: Option<UserId>,
}

impl ApplicationFilter {
    fn matches(&self, application: &Application) -> bool {
        self.status.map_or(true, |stage| application.stage == stage)
            && self
                .posting_id
                .as_ref()
                .map_or(true, |id| &application.posting_id == id)
            && self
                .student_id
                .as_ref()
                .map_or(true, |id| &application.student_id == id)
    }
}

/// Service composing the eligibility evaluator, transition table, and
/// repositories.
pub struct ApplicationService<S> {
    store: Arc<S>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<S> ApplicationService<S>
where
    S: ApplicationStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Submit a new application after running the eligibility rule chain.
    pub fn submit(
        &self,
        request: SubmitRequest,
        now: DateTime<Utc>,
    ) -> Result<Application, ApplicationServiceError> {
        let store = self.store.as_ref();

        let student = store
            .fetch_user(&request.student_id)?
            .ok_or(ApplicationServiceError::StudentNotFound)?;
        let posting = store
            .fetch_posting(&request.posting_id)?
            .ok_or(ApplicationServiceError::PostingNotFound)?;

        let already_live = store.list_applications()?.into_iter().any(|application| {
            application.student_id == request.student_id
                && application.posting_id == request.posting_id
                && application.stage != ApplicationStage::Withdrawn
        });
        if already_live {
            return Err(ApplicationServiceError::AlreadyApplied);
        }

        let docs: Vec<_> = store
            .list_docs()?
            .into_iter()
            .filter(|doc| doc.user_id == request.student_id)
            .collect();

        let decision = eligibility::evaluate(
            student.student_profile.as_ref(),
            &posting,
            &docs,
            now.date_naive(),
        );
        if !decision.allowed {
            return Err(ApplicationServiceError::NotEligible(decision));
        }

        let application = Application::submitted(
            next_application_id(),
            request.posting_id,
            request.student_id,
            request.cover_letter,
            now,
        );
        let stored = store.insert_application(application)?;
        Ok(stored)
    }

    /// Move an application to `target`, rejecting edges the transition table
    /// does not allow. Accepting an offer also marks the student's profile.
    pub fn transition(
        &self,
        id: &ApplicationId,
        target: ApplicationStage,
        now: DateTime<Utc>,
    ) -> Result<Application, ApplicationServiceError> {
        let store = self.store.as_ref();

        let mut application = store
            .fetch_application(id)?
            .ok_or(ApplicationServiceError::ApplicationNotFound)?;
        application.transition(target, now)?;
        store.update_application(application.clone())?;

        if target == ApplicationStage::Accepted {
            if let Some(mut student) = store.fetch_user(&application.student_id)? {
                if let Some(profile) = student.student_profile.as_mut() {
                    profile.has_accepted_offer = true;
                    store.update_user(student)?;
                }
            }
        }

        Ok(application)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<Application, ApplicationServiceError> {
        self.store
            .fetch_application(id)?
            .ok_or(ApplicationServiceError::ApplicationNotFound)
    }

    pub fn list(
        &self,
        filter: &ApplicationFilter,
        page: PageRequest,
    ) -> Result<Paginated<Application>, ApplicationServiceError> {
        let matched = self
            .store
            .list_applications()?
            .into_iter()
            .filter(|application| filter.matches(application))
            .collect();
        Ok(paginate(matched, page))
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error("application not found")]
    ApplicationNotFound,
    #[error("posting not found")]
    PostingNotFound,
    #[error("student not found")]
    StudentNotFound,
    #[error("an application for this posting already exists")]
    AlreadyApplied,
    #[error("not eligible: {}", .0.reason)]
    NotEligible(EligibilityDecision),
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
