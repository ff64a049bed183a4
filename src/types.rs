use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::types::{NewUser, UserRecord};
use crate::leaderboard::Entry;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaveUserRequest {
    pub username: String,
    #[serde(default)]
    pub contributions: i64,
    #[serde(default)]
    pub streak: i64,
    #[serde(default, rename = "openSourceContributions")]
    pub open_source_contributions: i64,
    /// GitHub account creation time, RFC 3339.
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub followers: i64,
    #[serde(default)]
    pub following: i64,
    #[serde(default)]
    pub repositories: i64,
    #[serde(default)]
    pub stars: i64,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

impl From<SaveUserRequest> for NewUser {
    fn from(request: SaveUserRequest) -> Self {
        Self {
            username: request.username,
            contributions: request.contributions,
            streak: request.streak,
            open_source_contributions: request.open_source_contributions,
            joined_date: request.created_at.map(|t| t.naive_utc()),
            followers: request.followers,
            following: request.following,
            repositories: request.repositories,
            stars: request.stars,
            avatar_url: request.avatar_url,
            html_url: request.html_url,
        }
    }
}

/// A profile record as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub contributions: i64,
    pub streak: i64,
    #[serde(rename = "openSourceContributions")]
    pub open_source_contributions: i64,
    #[serde(rename = "joinedDate", skip_serializing_if = "Option::is_none")]
    pub joined_date: Option<chrono::NaiveDateTime>,
    pub followers: i64,
    pub following: i64,
    pub repositories: i64,
    pub stars: i64,
    #[serde(rename = "lastUpdated")]
    pub last_updated: chrono::NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username,
            contributions: record.contributions,
            streak: record.streak,
            open_source_contributions: record.open_source_contributions,
            joined_date: record.joined_date,
            followers: record.followers,
            following: record.following,
            repositories: record.repositories,
            stars: record.stars,
            last_updated: record.last_updated,
            avatar_url: record.avatar_url,
            html_url: record.html_url,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SaveUserResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TwinResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twin: Option<UserResponse>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BannerRequest {
    pub username: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    /// Stored opaque; no shape is enforced.
    #[serde(rename = "userData", default)]
    #[schema(value_type = Object)]
    pub user_data: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CountResponse {
    #[serde(rename = "totalUsers")]
    pub total_users: i64,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateLeaderboardRequest {
    pub username: String,
    #[serde(default)]
    pub contributions: i64,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl From<UpdateLeaderboardRequest> for Entry {
    fn from(request: UpdateLeaderboardRequest) -> Self {
        Self {
            username: request.username,
            avatar_url: request.avatar_url,
            score: request.contributions,
        }
    }
}

/// One ranked contributor as exposed over the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntryResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub username: String,
    pub contributions: i64,
}

impl From<Entry> for LeaderboardEntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            avatar_url: entry.avatar_url,
            username: entry.username,
            contributions: entry.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_request_defaults_omitted_numeric_fields_to_zero() {
        let request: SaveUserRequest =
            serde_json::from_str(r#"{"username": "octocat"}"#).unwrap();

        assert_eq!(request.username, "octocat");
        assert_eq!(request.contributions, 0);
        assert_eq!(request.streak, 0);
        assert_eq!(request.open_source_contributions, 0);
        assert_eq!(request.followers, 0);
        assert_eq!(request.stars, 0);
        assert_eq!(request.created_at, None);
        assert_eq!(request.avatar_url, None);
    }

    #[test]
    fn save_request_accepts_github_field_names() {
        let request: SaveUserRequest = serde_json::from_str(
            r#"{
                "username": "octocat",
                "contributions": 42,
                "openSourceContributions": 7,
                "created_at": "2011-01-25T18:44:36Z",
                "avatar_url": "https://github.com/octocat.png"
            }"#,
        )
        .unwrap();

        assert_eq!(request.contributions, 42);
        assert_eq!(request.open_source_contributions, 7);
        assert!(request.created_at.is_some());

        let user = NewUser::from(request);
        assert_eq!(
            user.joined_date.map(|t| t.to_string()),
            Some("2011-01-25 18:44:36".to_string())
        );
    }

    #[test]
    fn user_response_uses_api_field_names() {
        let record = UserRecord {
            username: "octocat".to_string(),
            contributions: 1,
            streak: 2,
            open_source_contributions: 3,
            joined_date: None,
            followers: 4,
            following: 5,
            repositories: 6,
            stars: 7,
            last_updated: chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc(),
            avatar_url: None,
            html_url: None,
        };

        let json = serde_json::to_value(UserResponse::from(record)).unwrap();

        assert_eq!(json["openSourceContributions"], 3);
        assert!(json.get("lastUpdated").is_some());
        // Absent optionals are omitted, not null.
        assert!(json.get("joinedDate").is_none());
        assert!(json.get("avatar_url").is_none());
    }

    #[test]
    fn banner_request_keeps_user_data_opaque() {
        let request: BannerRequest = serde_json::from_str(
            r#"{
                "username": "octocat",
                "imageUrl": "https://example.com/card.png",
                "userData": {"anything": ["goes", 1, true]}
            }"#,
        )
        .unwrap();

        assert_eq!(request.user_data["anything"][1], 1);
    }

    #[test]
    fn leaderboard_entry_maps_score_to_contributions() {
        let json = serde_json::to_value(LeaderboardEntryResponse::from(Entry {
            username: "octocat".to_string(),
            avatar_url: None,
            score: 99,
        }))
        .unwrap();

        assert_eq!(json["contributions"], 99);
        assert_eq!(json["username"], "octocat");
    }
}
