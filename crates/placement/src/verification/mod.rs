//! Verification documents and the faculty review workflow.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{DocId, ReviewAction, VerificationDoc, VerificationStatus};
pub use router::verification_router;
pub use service::ReviewService;
