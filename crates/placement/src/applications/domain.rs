use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::postings::domain::PostingId;
use crate::users::domain::UserId;

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Canonical lifecycle stage for an application.
///
/// Collapses the legacy dual `status`/`stage` fields into one enum. The wire
/// labels are the SCREAMING_SNAKE set; the serde aliases keep accepting the
/// lowercase values older clients still send (`pending` -> `APPLIED`,
/// `reviewed`/`under_review` -> `UNDER_REVIEW`, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStage {
    #[serde(alias = "pending", alias = "applied")]
    Applied,
    #[serde(alias = "reviewed", alias = "under_review")]
    UnderReview,
    #[serde(alias = "interview")]
    Interview,
    #[serde(alias = "offered")]
    Offered,
    #[serde(alias = "accepted")]
    Accepted,
    #[serde(alias = "rejected")]
    Rejected,
    #[serde(alias = "withdrawn")]
    Withdrawn,
}

impl ApplicationStage {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStage::Applied => "APPLIED",
            ApplicationStage::UnderReview => "UNDER_REVIEW",
            ApplicationStage::Interview => "INTERVIEW",
            ApplicationStage::Offered => "OFFERED",
            ApplicationStage::Accepted => "ACCEPTED",
            ApplicationStage::Rejected => "REJECTED",
            ApplicationStage::Withdrawn => "WITHDRAWN",
        }
    }

    /// Canonical funnel order; analytics emit stages in this order, never
    /// count order.
    pub const fn ordered() -> [ApplicationStage; 7] {
        [
            ApplicationStage::Applied,
            ApplicationStage::UnderReview,
            ApplicationStage::Interview,
            ApplicationStage::Offered,
            ApplicationStage::Accepted,
            ApplicationStage::Rejected,
            ApplicationStage::Withdrawn,
        ]
    }

    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            ApplicationStage::Accepted | ApplicationStage::Rejected | ApplicationStage::Withdrawn
        )
    }

    /// Allowed-edges table. Forward movement is single-step; rejection and
    /// withdrawal are reachable from any non-terminal stage; acceptance only
    /// follows an offer.
    pub const fn successors(self) -> &'static [ApplicationStage] {
        match self {
            ApplicationStage::Applied => &[
                ApplicationStage::UnderReview,
                ApplicationStage::Rejected,
                ApplicationStage::Withdrawn,
            ],
            ApplicationStage::UnderReview => &[
                ApplicationStage::Interview,
                ApplicationStage::Rejected,
                ApplicationStage::Withdrawn,
            ],
            ApplicationStage::Interview => &[
                ApplicationStage::Offered,
                ApplicationStage::Rejected,
                ApplicationStage::Withdrawn,
            ],
            ApplicationStage::Offered => &[
                ApplicationStage::Accepted,
                ApplicationStage::Rejected,
                ApplicationStage::Withdrawn,
            ],
            ApplicationStage::Accepted
            | ApplicationStage::Rejected
            | ApplicationStage::Withdrawn => &[],
        }
    }

    pub fn permits(self, target: ApplicationStage) -> Result<(), InvalidTransition> {
        if self.successors().contains(&target) {
            Ok(())
        } else {
            Err(InvalidTransition {
                from: self,
                to: target,
            })
        }
    }
}

/// Edge not present in the transition table. The update handler surfaces
/// this instead of persisting an arbitrary target stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("illegal stage transition {} -> {}", .from.label(), .to.label())]
pub struct InvalidTransition {
    pub from: ApplicationStage,
    pub to: ApplicationStage,
}

/// One append-only history entry per transition, ordered by wall-clock time.
/// The history is the source of truth for pipeline-velocity analytics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageChange {
    pub status: ApplicationStage,
    pub date: DateTime<Utc>,
}

/// A student's submission against one posting. Never hard-deleted; the only
/// student-initiated exit is the `WITHDRAWN` transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub posting_id: PostingId,
    pub student_id: UserId,
    // Serialized as `status`, the key clients already store.
    #[serde(rename = "status")]
    pub stage: ApplicationStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    pub status_history: Vec<StageChange>,
}

impl Application {
    pub fn submitted(
        id: ApplicationId,
        posting_id: PostingId,
        student_id: UserId,
        cover_letter: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            posting_id,
            student_id,
            stage: ApplicationStage::Applied,
            cover_letter,
            status_history: vec![StageChange {
                status: ApplicationStage::Applied,
                date: now,
            }],
        }
    }

    /// Move to `target` if the transition table allows it, appending to the
    /// history.
    pub fn transition(
        &mut self,
        target: ApplicationStage,
        now: DateTime<Utc>,
    ) -> Result<(), InvalidTransition> {
        self.stage.permits(target)?;
        self.stage = target;
        self.status_history.push(StageChange {
            status: target,
            date: now,
        });
        Ok(())
    }

    pub fn applied_at(&self) -> Option<DateTime<Utc>> {
        self.status_history.first().map(|change| change.date)
    }
}
