//! Posting CRUD and the search/filter layer.

pub mod domain;
pub mod router;
pub mod search;
pub mod service;

pub use domain::{
    EligibilityRule, Posting, PostingDraft, PostingId, PostingStatus, PostingType,
};
pub use router::posting_router;
pub use search::PostingFilter;
pub use service::PostingService;
