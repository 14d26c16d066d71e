use std::sync::Arc;

use serde::Serialize;

use super::dashboards::{FacultyDashboard, RecruiterDashboard, StudentDashboard};
use super::{export, FunnelEntry, SkillDemandEntry, VelocityEntry};
use crate::applications::domain::ApplicationStage;
use crate::postings::domain::PostingStatus;
use crate::repository::{
    ApplicationRepository, CatalogRepository, PostingRepository, RepositoryError, UserRepository,
    VerificationDocRepository,
};
use crate::users::domain::{Role, UserId};
use crate::verification::domain::VerificationStatus;

/// Stores read by the aggregations: applications and their joins plus the
/// verification queue for the faculty view.
pub trait AnalyticsStore:
    ApplicationRepository
    + PostingRepository
    + UserRepository
    + CatalogRepository
    + VerificationDocRepository
{
}

impl<S> AnalyticsStore for S where
    S: ApplicationRepository
        + PostingRepository
        + UserRepository
        + CatalogRepository
        + VerificationDocRepository
{
}

/// Combined report served at `/api/analytics/report`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub funnel: Vec<FunnelEntry>,
    pub skill_demand: Vec<SkillDemandEntry>,
    pub pipeline_velocity: Vec<VelocityEntry>,
}

pub struct AnalyticsService<S> {
    store: Arc<S>,
}

impl<S> AnalyticsService<S>
where
    S: AnalyticsStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn report(&self) -> Result<AnalyticsReport, AnalyticsError> {
        let applications = self.store.list_applications()?;
        let postings = self.store.list_postings()?;
        let skills = self.store.skills()?;

        Ok(AnalyticsReport {
            funnel: super::placement_funnel(&applications),
            skill_demand: super::skill_demand(&postings, &skills),
            pipeline_velocity: super::pipeline_velocity(&applications),
        })
    }

    pub fn export_csv(&self) -> Result<Vec<u8>, AnalyticsError> {
        let applications = self.store.list_applications()?;
        let users = self.store.list_users()?;
        let postings = self.store.list_postings()?;
        let departments = self.store.departments()?;
        Ok(export::export_applications(
            &applications,
            &users,
            &postings,
            &departments,
        )?)
    }

    pub fn student_dashboard(&self, id: &UserId) -> Result<StudentDashboard, AnalyticsError> {
        let mine: Vec<_> = self
            .store
            .list_applications()?
            .into_iter()
            .filter(|application| &application.student_id == id)
            .collect();
        let accepted = mine
            .iter()
            .filter(|application| application.stage == ApplicationStage::Accepted)
            .count();

        Ok(StudentDashboard {
            student_id: id.clone(),
            applications: mine.len(),
            accepted_offers: accepted,
        })
    }

    pub fn recruiter_dashboard(&self, id: &UserId) -> Result<RecruiterDashboard, AnalyticsError> {
        let owned: Vec<_> = self
            .store
            .list_postings()?
            .into_iter()
            .filter(|posting| &posting.recruiter_id == id)
            .collect();
        let active = owned
            .iter()
            .filter(|posting| posting.status == PostingStatus::Open)
            .count();
        let received = self
            .store
            .list_applications()?
            .into_iter()
            .filter(|application| {
                owned
                    .iter()
                    .any(|posting| posting.id == application.posting_id)
            })
            .count();

        Ok(RecruiterDashboard {
            recruiter_id: id.clone(),
            active_postings: active,
            applications_received: received,
        })
    }

    pub fn faculty_dashboard(&self, id: &UserId) -> Result<FacultyDashboard, AnalyticsError> {
        let students = self
            .store
            .list_users()?
            .into_iter()
            .filter(|user| user.role == Role::Student)
            .count();
        let pending = self
            .store
            .list_docs()?
            .into_iter()
            .filter(|doc| doc.status == VerificationStatus::Pending)
            .count();

        Ok(FacultyDashboard {
            faculty_id: id.clone(),
            students,
            pending_verifications: pending,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] export::ExportError),
}
