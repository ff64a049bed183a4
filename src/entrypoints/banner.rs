use git_stats_server::{
    db::DB,
    error::ApiError,
    share,
    types::{BannerRequest, ErrorResponse, MessageResponse},
};
use rocket::{response::content::RawHtml, serde::json::Json, State};

#[utoipa::path(context_path = "/api", request_body = BannerRequest, responses(
    (status = 200, description = "Save or update a shared banner", body = MessageResponse)
))]
#[post("/save-shared-banner", data = "<body>")]
pub(super) async fn save_shared_banner(
    body: Json<BannerRequest>,
    db: &State<DB>,
) -> Result<Json<MessageResponse>, ApiError> {
    let body = body.into_inner();
    if body.username.trim().is_empty() {
        return Err(ApiError::bad_request("username is required"));
    }

    db.upsert_banner(&body.username, &body.image_url, &body.user_data)
        .await
        .map_err(|e| ApiError::internal("Error saving shared banner", e))?;

    Ok(Json(MessageResponse::new("Shared banner saved successfully")))
}

#[utoipa::path(context_path = "/api", responses(
    (status = 200, description = "Stored banner payload for a username"),
    (status = 404, description = "Unknown username", body = ErrorResponse)
))]
#[get("/user/<username>")]
pub(super) async fn banner_data(
    username: &str,
    db: &State<DB>,
) -> Result<Json<serde_json::Value>, ApiError> {
    match db.get_banner(username).await {
        Ok(Some(banner)) => Ok(Json(banner.user_data)),
        Ok(None) => Err(ApiError::not_found("User not found")),
        Err(e) => Err(ApiError::internal("Error fetching user data", e)),
    }
}

#[derive(FromForm)]
pub(super) struct ShareQuery {
    #[field(name = "imageUrl")]
    image_url: Option<String>,
}

#[get("/share/<username>?<query..>")]
pub(super) async fn share_page(
    username: &str,
    query: ShareQuery,
    db: &State<DB>,
) -> Result<RawHtml<String>, ApiError> {
    let stats = db.get_user(username).await.map_err(|e| {
        ApiError::internal(
            "An error occurred while fetching the shared stats. Please try again.",
            e,
        )
    })?;

    let image_url = query.image_url.unwrap_or_default();

    Ok(RawHtml(share::render_share_page(
        username,
        &image_url,
        stats.as_ref(),
    )))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing banner entrypoints", |rocket| async {
        rocket.mount("/api", routes![save_shared_banner, banner_data, share_page])
    })
}
