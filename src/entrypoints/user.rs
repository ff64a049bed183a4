use git_stats_server::{
    config::Settings,
    db::DB,
    error::ApiError,
    types::{ErrorResponse, SaveUserRequest, SaveUserResponse, TwinResponse, UserResponse},
};
use rocket::{serde::json::Json, State};

#[utoipa::path(context_path = "/api", request_body = SaveUserRequest, responses(
    (status = 200, description = "Save or update a GitHub user snapshot", body = SaveUserResponse)
))]
#[post("/save-github-user", data = "<body>")]
pub(super) async fn save_github_user(
    body: Json<SaveUserRequest>,
    db: &State<DB>,
) -> Result<Json<SaveUserResponse>, ApiError> {
    let body = body.into_inner();
    if body.username.trim().is_empty() {
        return Err(ApiError::bad_request("username is required"));
    }

    let user = db
        .upsert_user(&body.into())
        .await
        .map_err(|e| ApiError::internal("Error saving GitHub user data", e))?;

    Ok(Json(SaveUserResponse {
        message: "GitHub user data saved successfully".to_string(),
        user: user.into(),
    }))
}

#[utoipa::path(context_path = "/api", responses(
    (status = 200, description = "The most recently updated users", body = [UserResponse])
))]
#[get("/last-5-users")]
pub(super) async fn last_users(
    db: &State<DB>,
    settings: &State<Settings>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = db
        .get_recent_users(settings.recent_users_limit)
        .await
        .map_err(|e| ApiError::internal("Error fetching users", e))?;

    Ok(Json(users.into_iter().map(Into::into).collect()))
}

#[utoipa::path(context_path = "/api", responses(
    (status = 200, description = "Stored profile for a username", body = UserResponse),
    (status = 404, description = "Unknown username", body = ErrorResponse)
))]
#[get("/github-user/<username>")]
pub(super) async fn github_user(
    username: &str,
    db: &State<DB>,
) -> Result<Json<UserResponse>, ApiError> {
    match db.get_user(username).await {
        Ok(Some(user)) => Ok(Json(user.into())),
        Ok(None) => Err(ApiError::not_found("GitHub user not found")),
        Err(e) => Err(ApiError::internal("Error fetching GitHub user data", e)),
    }
}

#[utoipa::path(context_path = "/api", responses(
    (status = 200, description = "Closest contribution twin, if any", body = TwinResponse),
    (status = 404, description = "Unknown username", body = ErrorResponse)
))]
#[get("/github-twin/<username>")]
pub(super) async fn github_twin(
    username: &str,
    db: &State<DB>,
    settings: &State<Settings>,
) -> Result<Json<TwinResponse>, ApiError> {
    let user = match db.get_user(username).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(ApiError::not_found("User not found")),
        Err(e) => return Err(ApiError::internal("Error finding GitHub twin", e)),
    };

    let (lower, upper) = settings.twin_band.bounds(user.contributions);
    let twin = db
        .find_twin(username, lower, upper)
        .await
        .map_err(|e| ApiError::internal("Error finding GitHub twin", e))?;

    Ok(Json(match twin {
        Some(twin) => TwinResponse {
            message: format!(
                "Your GitHub twin is {}! You both have around {} contributions.",
                twin.username, user.contributions
            ),
            twin: Some(twin.into()),
        },
        None => TwinResponse {
            message: "No GitHub twin found at the moment.".to_string(),
            twin: None,
        },
    }))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing user entrypoints", |rocket| async {
        rocket.mount(
            "/api",
            routes![save_github_user, last_users, github_user, github_twin],
        )
    })
}
