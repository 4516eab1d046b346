//! Trending-score computation for the discovery feed.
//!
//! Scores are derived per response and never persisted. Both ranking passes
//! take an owned snapshot, annotate each item with its score, and return the
//! items in descending score order; ties keep their input order.

use crate::models::builder::{BuilderProjectSummary, BuilderStats, BuilderSummary};
use crate::models::project::ProjectSummary;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Projects created within this window get a flat score bonus.
pub const RECENCY_WINDOW_DAYS: i64 = 30;
pub const RECENCY_BONUS: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProject {
    #[serde(flatten)]
    pub project: ProjectSummary,
    pub trending_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedBuilder {
    #[serde(flatten)]
    pub builder: BuilderSummary,
    pub trending_score: f64,
}

/// Score and sort projects for the trending feed.
///
/// `now` is captured once by the caller so every item in a single pass is
/// judged against the same recency boundary.
pub fn rank_projects(projects: Vec<ProjectSummary>, now: DateTime<Utc>) -> Vec<RankedProject> {
    let mut ranked: Vec<RankedProject> = projects
        .into_iter()
        .map(|project| {
            let trending_score = project_score(&project, now);
            RankedProject {
                project,
                trending_score,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.trending_score.total_cmp(&a.trending_score));
    ranked
}

fn project_score(project: &ProjectSummary, now: DateTime<Utc>) -> f64 {
    let counts = project.counts;
    let recency_bonus = if now.signed_duration_since(project.created_at)
        <= Duration::days(RECENCY_WINDOW_DAYS)
    {
        RECENCY_BONUS
    } else {
        0.0
    };

    counts.follows as f64 * 0.3
        + counts.reactions as f64 * 0.2
        + counts.updates as f64 * 0.5
        + recency_bonus
}

/// Score and sort builders for the trending feed.
pub fn rank_builders(builders: Vec<BuilderSummary>) -> Vec<RankedBuilder> {
    let mut ranked: Vec<RankedBuilder> = builders
        .into_iter()
        .map(|builder| {
            let trending_score = builder_score(&builder);
            RankedBuilder {
                builder,
                trending_score,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.trending_score.total_cmp(&a.trending_score));
    ranked
}

fn builder_score(builder: &BuilderSummary) -> f64 {
    // engagement_sum re-reads per-project follows on top of the
    // total_followers aggregate; the overlap is intentional weighting.
    let engagement_sum: u64 = builder
        .projects
        .iter()
        .map(|p| p.counts.reactions + p.counts.follows)
        .sum();

    builder.stats.total_followers as f64 * 0.2
        + builder.stats.consistency_score as f64 * 0.4
        + builder.stats.community_rating * 20.0
        + engagement_sum as f64 * 0.1
}

/// Derive builder aggregates from the currently owned projects.
///
/// The consistency and rating curves are placeholder heuristics; the caps
/// and coefficients are part of the observable contract.
pub fn builder_stats(projects: &[BuilderProjectSummary]) -> BuilderStats {
    let total_followers: u64 = projects.iter().map(|p| p.counts.follows).sum();
    let total_updates: u64 = projects.iter().map(|p| p.counts.updates).sum();

    let consistency_score = (60 + total_updates * 5).min(95) as u32;
    let community_rating = round_one_decimal((3.5 + total_followers as f64 * 0.01).min(5.0));

    BuilderStats {
        total_followers,
        total_updates,
        consistency_score,
        community_rating,
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
