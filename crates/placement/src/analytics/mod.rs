//! Read-only aggregations over the application and posting collections.
//!
//! Every aggregation is a pure function recomputed on demand; there is no
//! incremental maintenance. Outputs are deterministic so repeated runs over
//! unchanged input are byte-identical once serialized.

pub mod export;
pub mod router;
pub mod service;

mod dashboards;

pub use dashboards::{FacultyDashboard, RecruiterDashboard, StudentDashboard};
pub use export::export_applications;
pub use router::analytics_router;
pub use service::{AnalyticsError, AnalyticsReport, AnalyticsService};

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::applications::domain::{Application, ApplicationStage};
use crate::catalog::{Skill, SkillId};
use crate::postings::domain::Posting;

const SKILL_DEMAND_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelEntry {
    pub stage: ApplicationStage,
    pub count: usize,
}

/// Count applications per current stage, emitted in canonical stage order
/// with zero-count stages absent.
pub fn placement_funnel(applications: &[Application]) -> Vec<FunnelEntry> {
    let mut counts: HashMap<ApplicationStage, usize> = HashMap::new();
    for application in applications {
        *counts.entry(application.stage).or_default() += 1;
    }

    ApplicationStage::ordered()
        .into_iter()
        .filter_map(|stage| {
            counts
                .get(&stage)
                .map(|&count| FunnelEntry { stage, count })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillDemandEntry {
    pub skill: String,
    pub count: usize,
}

/// Tally every skill required across postings; descending by count, ties
/// broken by ascending skill id, truncated to the top ten.
pub fn skill_demand(postings: &[Posting], skills: &[Skill]) -> Vec<SkillDemandEntry> {
    let mut counts: BTreeMap<SkillId, usize> = BTreeMap::new();
    for posting in postings {
        for skill in &posting.required_skills {
            *counts.entry(skill.clone()).or_default() += 1;
        }
    }

    let mut ranked: Vec<(SkillId, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(SKILL_DEMAND_LIMIT);

    ranked
        .into_iter()
        .map(|(id, count)| SkillDemandEntry {
            skill: skills
                .iter()
                .find(|skill| skill.id == id)
                .map(|skill| skill.name.clone())
                .unwrap_or_else(|| "Unknown Skill".to_string()),
            count,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VelocityEntry {
    pub transition: String,
    pub days: f64,
}

/// Mean elapsed days per stage-to-stage transition, one decimal place,
/// bucketed by `"{FROM} to {TO}"` and emitted in bucket-name order.
/// Applications with fewer than two history entries contribute nothing.
pub fn pipeline_velocity(applications: &[Application]) -> Vec<VelocityEntry> {
    let mut buckets: BTreeMap<String, (f64, usize)> = BTreeMap::new();

    for application in applications {
        let mut history = application.status_history.clone();
        history.sort_by_key(|change| change.date);

        for pair in history.windows(2) {
            let name = format!("{} to {}", pair[0].status.label(), pair[1].status.label());
            let days = (pair[1].date - pair[0].date).num_seconds() as f64 / 86_400.0;
            let bucket = buckets.entry(name).or_insert((0.0, 0));
            bucket.0 += days;
            bucket.1 += 1;
        }
    }

    buckets
        .into_iter()
        .map(|(transition, (total_days, count))| VelocityEntry {
            transition,
            days: (total_days / count as f64 * 10.0).round() / 10.0,
        })
        .collect()
}
