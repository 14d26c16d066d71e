//! Accounts, roles, and the prototype credential check.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{Role, StudentProfile, User, UserId, UserView};
pub use router::account_router;
pub use service::{AccountError, AccountService, Credentials, Registration};
