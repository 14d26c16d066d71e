//! Application intake, lifecycle transitions, and eligibility rules.

pub mod domain;
pub mod eligibility;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationStage, InvalidTransition, StageChange,
};
pub use eligibility::{evaluate, EligibilityDecision};
pub use router::application_router;
pub use service::{
    ApplicationFilter, ApplicationService, ApplicationServiceError, ApplicationStore,
    SubmitRequest,
};
