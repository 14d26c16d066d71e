use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::users::domain::UserId;

/// Identifier wrapper for uploaded verification documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

/// Student-submitted proof (transcript, resume) owned by its subject user
/// and mutated only by the faculty review action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDoc {
    pub id: DocId,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub document_name: String,
    pub url: String,
    pub status: VerificationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Faculty decision applied to a pending document.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewAction {
    pub status: VerificationStatus,
    #[serde(default)]
    pub remarks: Option<String>,
}
