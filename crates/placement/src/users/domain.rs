use serde::{Deserialize, Serialize};

use crate::catalog::DepartmentId;

/// Identifier wrapper for portal accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Portal roles. A role is immutable except through the explicit admin
/// role-change operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Faculty,
    Recruiter,
    Student,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Faculty => "faculty",
            Role::Recruiter => "recruiter",
            Role::Student => "student",
        }
    }

    pub const fn all() -> [Role; 4] {
        [Role::Admin, Role::Faculty, Role::Recruiter, Role::Student]
    }
}

/// Academic profile carried only by student accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub gpa: f32,
    pub grad_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<DepartmentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default)]
    pub has_accepted_offer: bool,
}

/// Stored account record. `username` and `email` are globally unique,
/// enforced by the user repository.
///
/// The credential is an opaque, equality-compared secret. Hashing and
/// server-issued sessions are a known gap of this prototype's auth model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub credential: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_profile: Option<StudentProfile>,
}

/// Outward-facing account view; never carries the stored credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_profile: Option<StudentProfile>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            student_profile: user.student_profile.clone(),
        }
    }
}
