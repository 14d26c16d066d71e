use serde::Deserialize;

use super::domain::{Posting, PostingStatus, PostingType};
use crate::catalog::SkillId;
use crate::page::{paginate, PageRequest, Paginated};

/// Boolean-AND posting filter. Every clause is optional; the search is
/// always restricted to `Open` postings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostingFilter {
    /// Case-insensitive substring over title or company.
    pub search: Option<String>,
    /// Case-insensitive substring over location.
    pub location: Option<String>,
    /// Skill-id membership in `required_skills`.
    pub skill: Option<SkillId>,
    #[serde(rename = "type")]
    pub posting_type: Option<PostingType>,
    /// Location equals "remote", case-insensitively.
    #[serde(default)]
    pub remote_only: bool,
}

impl PostingFilter {
    pub fn matches(&self, posting: &Posting) -> bool {
        if posting.status != PostingStatus::Open {
            return false;
        }

        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let title_hit = posting.title.to_lowercase().contains(&term);
            let company_hit = posting.company.to_lowercase().contains(&term);
            if !title_hit && !company_hit {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if !posting
                .location
                .to_lowercase()
                .contains(&location.to_lowercase())
            {
                return false;
            }
        }

        if let Some(skill) = &self.skill {
            if !posting.required_skills.contains(skill) {
                return false;
            }
        }

        if let Some(kind) = self.posting_type {
            if posting.posting_type != kind {
                return false;
            }
        }

        if self.remote_only && !posting.location.eq_ignore_ascii_case("remote") {
            return false;
        }

        true
    }
}

pub fn search(
    postings: Vec<Posting>,
    filter: &PostingFilter,
    page: PageRequest,
) -> Paginated<Posting> {
    let matched = postings
        .into_iter()
        .filter(|posting| filter.matches(posting))
        .collect();
    paginate(matched, page)
}
