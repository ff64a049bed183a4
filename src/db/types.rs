use serde::{Deserialize, Serialize};

use crate::leaderboard::Entry;

/// A stored GitHub profile snapshot.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub contributions: i64,
    pub streak: i64,
    pub open_source_contributions: i64,
    pub joined_date: Option<chrono::NaiveDateTime>,
    pub followers: i64,
    pub following: i64,
    pub repositories: i64,
    pub stars: i64,
    pub last_updated: chrono::NaiveDateTime,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
}

/// Incoming profile fields for an upsert. Absent numeric fields are zero;
/// `last_updated` is set by the database on write.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub contributions: i64,
    pub streak: i64,
    pub open_source_contributions: i64,
    pub joined_date: Option<chrono::NaiveDateTime>,
    pub followers: i64,
    pub following: i64,
    pub repositories: i64,
    pub stars: i64,
    pub avatar_url: Option<String>,
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct LeaderboardEntryRecord {
    pub position: i32,
    pub username: String,
    pub avatar_url: Option<String>,
    pub score: i64,
}

impl From<LeaderboardEntryRecord> for Entry {
    fn from(record: LeaderboardEntryRecord) -> Self {
        Self {
            username: record.username,
            avatar_url: record.avatar_url,
            score: record.score,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BannerRecord {
    pub username: String,
    pub image_url: String,
    pub user_data: serde_json::Value,
}
