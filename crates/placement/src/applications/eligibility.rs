//! Pure pre-submission eligibility check.
//!
//! Rules run in a fixed order and stop at the first failure so the refusal
//! reason shown to students is deterministic. `today` is passed in rather
//! than sampled, keeping the function referentially transparent.

use chrono::NaiveDate;
use serde::Serialize;

use crate::postings::domain::{Posting, PostingStatus};
use crate::users::domain::StudentProfile;
use crate::verification::domain::{VerificationDoc, VerificationStatus};

/// Outcome of the eligibility check. `reason` is empty when allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EligibilityDecision {
    pub allowed: bool,
    pub reason: String,
}

impl EligibilityDecision {
    fn permitted() -> Self {
        Self {
            allowed: true,
            reason: String::new(),
        }
    }

    fn refused(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }
}

pub fn evaluate(
    profile: Option<&StudentProfile>,
    posting: &Posting,
    docs: &[VerificationDoc],
    today: NaiveDate,
) -> EligibilityDecision {
    let Some(profile) = profile else {
        return EligibilityDecision::refused("Not a student.");
    };

    if profile.has_accepted_offer {
        return EligibilityDecision::refused("You have already accepted an offer.");
    }

    // A submission must land strictly before the deadline date.
    if posting.deadline <= today {
        return EligibilityDecision::refused("Application deadline has passed.");
    }

    if posting.status == PostingStatus::Closed {
        return EligibilityDecision::refused("This position is closed.");
    }

    if profile.gpa < posting.eligibility.min_gpa {
        return EligibilityDecision::refused(format!(
            "Requires minimum GPA of {}.",
            posting.eligibility.min_gpa
        ));
    }

    if !posting.eligibility.grad_year.contains(&profile.grad_year) {
        return EligibilityDecision::refused(format!(
            "Not open for your graduation year ({}).",
            profile.grad_year
        ));
    }

    if posting.requires_verification {
        // A student with no documents on file has nothing verified; the
        // empty set does not satisfy the requirement.
        let all_verified = !docs.is_empty()
            && docs
                .iter()
                .all(|doc| doc.status == VerificationStatus::Verified);
        if !all_verified {
            return EligibilityDecision::refused("Requires all documents to be verified.");
        }
    }

    EligibilityDecision::permitted()
}
