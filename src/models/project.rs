use crate::models::user::UserCard;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

impl ProjectStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Active => "ACTIVE",
            ProjectStatus::Paused => "PAUSED",
            ProjectStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "ACTIVE" => Some(ProjectStatus::Active),
            "PAUSED" => Some(ProjectStatus::Paused),
            "COMPLETED" => Some(ProjectStatus::Completed),
            _ => None,
        }
    }
}

/// Engagement counters computed fresh from related rows at query time.
/// Absent counters deserialize as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementCounts {
    #[serde(default)]
    pub follows: u64,
    #[serde(default)]
    pub reactions: u64,
    #[serde(default)]
    pub updates: u64,
    #[serde(default)]
    pub comments: u64,
}

/// Builder projection embedded in a project summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuilderCard {
    pub id: String,
    pub full_name: String,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub user: UserCard,
}

/// Read-only project snapshot consumed by the ranking engine and the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub problem: String,
    pub solution: String,
    pub target_market: Option<String>,
    pub timeline_weeks: u32,
    pub status: ProjectStatus,
    pub created_at: DateTime<Utc>,
    pub builder: BuilderCard,
    #[serde(default)]
    pub counts: EngagementCounts,
}
