use crate::models::project::{EngagementCounts, ProjectStatus};
use crate::models::user::UserCard;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderProfile {
    pub id: String,
    pub user_id: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub twitter: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Per-project slice carried inside a builder summary; feeds the
/// engagement term of the builder trending score.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderProjectSummary {
    pub id: String,
    pub name: String,
    pub status: ProjectStatus,
    #[serde(default)]
    pub counts: EngagementCounts,
}

/// Aggregates recomputed from the currently owned projects on every read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderStats {
    pub total_followers: u64,
    pub total_updates: u64,
    pub consistency_score: u32,
    pub community_rating: f64,
}

/// Read-only builder snapshot consumed by the ranking engine and the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderSummary {
    pub id: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub user: UserCard,
    pub projects: Vec<BuilderProjectSummary>,
    pub stats: BuilderStats,
}
