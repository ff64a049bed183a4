use rocket::{fairing::AdHoc, serde::json::Json};
use utoipa::OpenApi;

pub mod banner;
pub mod counter;
pub mod leaderboard;
pub mod user;

use git_stats_server::types::{
    BannerRequest, CountResponse, ErrorResponse, LeaderboardEntryResponse, MessageResponse,
    SaveUserRequest, SaveUserResponse, TwinResponse, UpdateLeaderboardRequest, UserResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        user::save_github_user,
        user::last_users,
        user::github_user,
        user::github_twin,
        banner::save_shared_banner,
        banner::banner_data,
        counter::user_count,
        counter::increment_user,
        leaderboard::get_leaderboard,
        leaderboard::update_leaderboard,
    ),
    components(schemas(
        SaveUserRequest,
        SaveUserResponse,
        UserResponse,
        TwinResponse,
        BannerRequest,
        MessageResponse,
        CountResponse,
        UpdateLeaderboardRequest,
        LeaderboardEntryResponse,
        ErrorResponse,
    ))
)]
pub struct ApiDoc;

#[get("/")]
fn index() -> &'static str {
    "GitHub Stats Backend is running"
}

#[catch(400)]
fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Bad Request"))
}

#[catch(404)]
fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Not Found"))
}

#[catch(422)]
fn unprocessable() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid request body"))
}

#[catch(500)]
fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error"))
}

pub fn stage() -> AdHoc {
    AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket
            .mount("/", routes![index])
            .register(
                "/",
                catchers![bad_request, not_found, unprocessable, internal_error],
            )
            .attach(user::stage())
            .attach(banner::stage())
            .attach(counter::stage())
            .attach(leaderboard::stage())
    })
}
