use rocket::{
    fairing::{self, AdHoc},
    Build, Rocket,
};
use rocket_db_pools::Database;
use sqlx::PgPool;

pub mod types;

use crate::leaderboard::{Entry, RankedList};

use self::types::{BannerRecord, LeaderboardEntryRecord, NewUser, UserRecord};

#[derive(Database, Clone, Debug)]
#[database("git_stats")]
pub struct DB(PgPool);

const USER_COLUMNS: &str = "username, contributions, streak, open_source_contributions, \
     joined_date, followers, following, repositories, stars, last_updated, avatar_url, html_url";

impl DB {
    /// Single-statement upsert by username. Every write replaces the full
    /// row and refreshes `last_updated`, so omitted optional fields revert
    /// to their defaults.
    pub async fn upsert_user(&self, user: &NewUser) -> anyhow::Result<UserRecord> {
        let rec = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO github_users ({USER_COLUMNS})
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, now(), $10, $11)
            ON CONFLICT (username) DO UPDATE
            SET contributions = EXCLUDED.contributions,
                streak = EXCLUDED.streak,
                open_source_contributions = EXCLUDED.open_source_contributions,
                joined_date = EXCLUDED.joined_date,
                followers = EXCLUDED.followers,
                following = EXCLUDED.following,
                repositories = EXCLUDED.repositories,
                stars = EXCLUDED.stars,
                last_updated = now(),
                avatar_url = EXCLUDED.avatar_url,
                html_url = EXCLUDED.html_url
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(user.contributions)
        .bind(user.streak)
        .bind(user.open_source_contributions)
        .bind(user.joined_date)
        .bind(user.followers)
        .bind(user.following)
        .bind(user.repositories)
        .bind(user.stars)
        .bind(&user.avatar_url)
        .bind(&user.html_url)
        .fetch_one(&self.0)
        .await?;

        Ok(rec)
    }

    pub async fn get_user(&self, username: &str) -> anyhow::Result<Option<UserRecord>> {
        let rec = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM github_users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.0)
        .await?;

        Ok(rec)
    }

    pub async fn get_recent_users(&self, limit: i64) -> anyhow::Result<Vec<UserRecord>> {
        let recs = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM github_users ORDER BY last_updated DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(&self.0)
        .await?;

        Ok(recs)
    }

    /// The most-recently-updated profile of a *different* username whose
    /// contribution count falls inside the given bounds.
    pub async fn find_twin(
        &self,
        username: &str,
        lower: f64,
        upper: f64,
    ) -> anyhow::Result<Option<UserRecord>> {
        let rec = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM github_users
            WHERE username <> $1
              AND contributions::float8 >= $2
              AND contributions::float8 <= $3
            ORDER BY last_updated DESC
            LIMIT 1
            "#
        ))
        .bind(username)
        .bind(lower)
        .bind(upper)
        .fetch_optional(&self.0)
        .await?;

        Ok(rec)
    }

    pub async fn upsert_banner(
        &self,
        username: &str,
        image_url: &str,
        user_data: &serde_json::Value,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO shared_banners (username, image_url, user_data)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO UPDATE
            SET image_url = EXCLUDED.image_url,
                user_data = EXCLUDED.user_data
            "#,
        )
        .bind(username)
        .bind(image_url)
        .bind(user_data)
        .execute(&self.0)
        .await?;

        Ok(())
    }

    pub async fn get_banner(&self, username: &str) -> anyhow::Result<Option<BannerRecord>> {
        let rec = sqlx::query_as::<_, BannerRecord>(
            "SELECT username, image_url, user_data FROM shared_banners WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.0)
        .await?;

        Ok(rec)
    }

    /// Current visit count, lazily seeding the singleton row at zero.
    pub async fn get_user_count(&self) -> anyhow::Result<i64> {
        sqlx::query("INSERT INTO visit_counter (id, count) VALUES (1, 0) ON CONFLICT (id) DO NOTHING")
            .execute(&self.0)
            .await?;

        let count = sqlx::query_scalar::<_, i64>("SELECT count FROM visit_counter WHERE id = 1")
            .fetch_one(&self.0)
            .await?;

        Ok(count)
    }

    /// Atomic increment: a single conditional upsert, so concurrent calls
    /// cannot lose updates.
    pub async fn increment_user_count(&self) -> anyhow::Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO visit_counter AS vc (id, count)
            VALUES (1, 1)
            ON CONFLICT (id) DO UPDATE SET count = vc.count + 1
            RETURNING count
            "#,
        )
        .fetch_one(&self.0)
        .await?;

        Ok(count)
    }

    pub async fn get_leaderboard(&self) -> anyhow::Result<Vec<Entry>> {
        let recs = sqlx::query_as::<_, LeaderboardEntryRecord>(
            "SELECT position, username, avatar_url, score FROM leaderboard_entries ORDER BY position",
        )
        .fetch_all(&self.0)
        .await?;

        Ok(recs.into_iter().map(Into::into).collect())
    }

    /// Applies one entry to the stored standings and persists the result.
    /// The whole read-rank-write sequence runs in one transaction behind a
    /// table lock, serializing concurrent updates.
    pub async fn update_leaderboard(
        &self,
        list: RankedList,
        incoming: Entry,
    ) -> anyhow::Result<Vec<Entry>> {
        let mut tx = self.0.begin().await?;

        sqlx::query("LOCK TABLE leaderboard_entries IN EXCLUSIVE MODE")
            .execute(tx.as_mut())
            .await?;

        let recs = sqlx::query_as::<_, LeaderboardEntryRecord>(
            "SELECT position, username, avatar_url, score FROM leaderboard_entries ORDER BY position",
        )
        .fetch_all(tx.as_mut())
        .await?;

        let mut standings: Vec<Entry> = recs.into_iter().map(Into::into).collect();
        list.apply(&mut standings, incoming);

        sqlx::query("DELETE FROM leaderboard_entries")
            .execute(tx.as_mut())
            .await?;

        for (index, entry) in standings.iter().enumerate() {
            sqlx::query(
                "INSERT INTO leaderboard_entries (position, username, avatar_url, score) \
                 VALUES ($1, $2, $3, $4)",
            )
            .bind(index as i32 + 1)
            .bind(&entry.username)
            .bind(&entry.avatar_url)
            .bind(entry.score)
            .execute(tx.as_mut())
            .await?;
        }

        tx.commit().await?;

        Ok(standings)
    }
}

async fn run_migrations(rocket: Rocket<Build>) -> fairing::Result {
    match DB::fetch(&rocket) {
        Some(db) => match sqlx::migrate!("./migrations").run(&**db).await {
            Ok(_) => Ok(rocket),
            Err(e) => {
                rocket::error!("Failed to initialize SQLx database: {}", e);
                Err(rocket)
            }
        },
        None => Err(rocket),
    }
}

pub fn stage() -> AdHoc {
    AdHoc::on_ignite("SQLx Stage", |rocket| async {
        rocket
            .attach(DB::init())
            .attach(AdHoc::try_on_ignite("SQLx Migrations", run_migrations))
    })
}
