use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyUpdate {
    pub id: String,
    pub project_id: String,
    pub week_number: u32,
    pub content: String,
    pub achievements: Vec<String>,
    pub challenges: Vec<String>,
    pub next_week_goals: Vec<String>,
    pub media_urls: Vec<String>,
    pub metrics: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
