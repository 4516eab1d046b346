use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[default]
    Community,
    Builder,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Community => "COMMUNITY",
            UserRole::Builder => "BUILDER",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "COMMUNITY" => Some(UserRole::Community),
            "BUILDER" => Some(UserRole::Builder),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub wallet_address: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Slim user projection embedded in project and builder summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCard {
    pub id: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub role: UserRole,
}
