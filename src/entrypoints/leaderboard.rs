use git_stats_server::{
    config::Settings,
    db::DB,
    error::ApiError,
    leaderboard::RankedList,
    types::{LeaderboardEntryResponse, UpdateLeaderboardRequest},
};
use rocket::{serde::json::Json, State};

#[utoipa::path(context_path = "/api", responses(
    (status = 200, description = "Current standings, highest first", body = [LeaderboardEntryResponse])
))]
#[get("/leaderboard")]
pub(super) async fn get_leaderboard(
    db: &State<DB>,
) -> Result<Json<Vec<LeaderboardEntryResponse>>, ApiError> {
    let standings = db
        .get_leaderboard()
        .await
        .map_err(|e| ApiError::internal("Error fetching leaderboard", e))?;

    Ok(Json(standings.into_iter().map(Into::into).collect()))
}

#[utoipa::path(context_path = "/api", request_body = UpdateLeaderboardRequest, responses(
    (status = 200, description = "Standings after applying the entry", body = [LeaderboardEntryResponse])
))]
#[post("/update-leaderboard", data = "<body>")]
pub(super) async fn update_leaderboard(
    body: Json<UpdateLeaderboardRequest>,
    db: &State<DB>,
    settings: &State<Settings>,
) -> Result<Json<Vec<LeaderboardEntryResponse>>, ApiError> {
    let body = body.into_inner();
    if body.username.trim().is_empty() {
        return Err(ApiError::bad_request("username is required"));
    }

    let list = RankedList::new(settings.leaderboard_size);
    let standings = db
        .update_leaderboard(list, body.into())
        .await
        .map_err(|e| ApiError::internal("Error updating leaderboard", e))?;

    Ok(Json(standings.into_iter().map(Into::into).collect()))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing leaderboard entrypoints", |rocket| async {
        rocket.mount("/api", routes![get_leaderboard, update_leaderboard])
    })
}
