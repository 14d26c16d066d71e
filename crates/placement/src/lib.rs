//! Campus placement portal: postings, applications, verification, and the
//! analytics read side. Feature modules each expose a domain model, a
//! service over the repository traits, and an axum router; the binary crate
//! wires them to a concrete store.

pub mod analytics;
pub mod applications;
pub mod catalog;
pub mod config;
pub mod error;
pub mod page;
pub mod postings;
pub mod repository;
pub mod telemetry;
pub mod users;
pub mod verification;
