use serde::Serialize;

use crate::users::domain::UserId;

/// Per-student summary counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDashboard {
    pub student_id: UserId,
    pub applications: usize,
    pub accepted_offers: usize,
}

/// Per-recruiter summary counts over the postings they own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterDashboard {
    pub recruiter_id: UserId,
    pub active_postings: usize,
    pub applications_received: usize,
}

/// Faculty-facing summary of the student body and review queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyDashboard {
    pub faculty_id: UserId,
    pub students: usize,
    pub pending_verifications: usize,
}
