use git_stats_server::{
    db::DB,
    error::ApiError,
    limiter::RateLimiter,
    types::CountResponse,
};
use rocket::{serde::json::Json, State};

#[utoipa::path(context_path = "/api", responses(
    (status = 200, description = "Current visit count", body = CountResponse)
))]
#[get("/user-count")]
pub(super) async fn user_count(db: &State<DB>) -> Result<Json<CountResponse>, ApiError> {
    let total_users = db
        .get_user_count()
        .await
        .map_err(|e| ApiError::internal("Error fetching user count", e))?;

    Ok(Json(CountResponse { total_users }))
}

#[utoipa::path(context_path = "/api", responses(
    (status = 200, description = "Incremented visit count", body = CountResponse)
))]
#[post("/increment-user")]
pub(super) async fn increment_user(
    db: &State<DB>,
    limiter: &State<RateLimiter>,
) -> Result<Json<CountResponse>, ApiError> {
    if !limiter.try_acquire("increment-user") {
        return Err(ApiError::TooManyRequests(
            "Too many requests, please try again later.".to_string(),
        ));
    }

    let total_users = db
        .increment_user_count()
        .await
        .map_err(|e| ApiError::internal("Error incrementing user count", e))?;

    Ok(Json(CountResponse { total_users }))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing counter entrypoints", |rocket| async {
        rocket.mount("/api", routes![user_count, increment_user])
    })
}
