use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::SkillId;
use crate::users::domain::UserId;

/// Identifier wrapper for published postings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostingId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingType {
    #[serde(rename = "full-time", alias = "Full-time")]
    FullTime,
    #[serde(rename = "part-time", alias = "Part-time")]
    PartTime,
    #[serde(rename = "internship", alias = "Internship")]
    Internship,
}

impl PostingType {
    pub const fn label(self) -> &'static str {
        match self {
            PostingType::FullTime => "full-time",
            PostingType::PartTime => "part-time",
            PostingType::Internship => "internship",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingStatus {
    Open,
    Closed,
}

/// Constraints a student must satisfy before applying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityRule {
    pub min_gpa: f32,
    pub grad_year: Vec<i32>,
}

/// A job or internship opening published by a recruiter. Owned by the
/// recruiter who created it; mutated by that recruiter or an admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub id: PostingId,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub posting_type: PostingType,
    pub recruiter_id: UserId,
    pub deadline: NaiveDate,
    pub status: PostingStatus,
    pub eligibility: EligibilityRule,
    pub requires_verification: bool,
    pub required_skills: Vec<SkillId>,
    pub company: String,
    pub location: String,
    pub salary: String,
}

/// Posting payload without an identifier, used for create and full update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub posting_type: PostingType,
    pub recruiter_id: UserId,
    pub deadline: NaiveDate,
    pub status: PostingStatus,
    pub eligibility: EligibilityRule,
    #[serde(default)]
    pub requires_verification: bool,
    #[serde(default)]
    pub required_skills: Vec<SkillId>,
    pub company: String,
    pub location: String,
    pub salary: String,
}

impl PostingDraft {
    pub fn into_posting(self, id: PostingId) -> Posting {
        Posting {
            id,
            title: self.title,
            description: self.description,
            posting_type: self.posting_type,
            recruiter_id: self.recruiter_id,
            deadline: self.deadline,
            status: self.status,
            eligibility: self.eligibility,
            requires_verification: self.requires_verification,
            required_skills: self.required_skills,
            company: self.company,
            location: self.location,
            salary: self.salary,
        }
    }
}
