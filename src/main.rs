#[macro_use]
extern crate rocket;

mod entrypoints;

use git_stats_server::config::{Env, Settings};
use git_stats_server::db;
use git_stats_server::limiter::RateLimiter;
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use rocket_prometheus::PrometheusMetrics;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[launch]
async fn rocket() -> _ {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().pretty());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let env = envy::from_env::<Env>().expect("Failed to load environment variables");
    let settings = Settings::from_env(env);

    let cors = CorsOptions {
        allowed_origins: AllowedOrigins::some_exact(&settings.allowed_origins),
        allowed_methods: [Method::Get, Method::Post]
            .into_iter()
            .map(From::from)
            .collect(),
        allowed_headers: AllowedHeaders::some(&["Accept", "Content-Type"]),
        ..Default::default()
    }
    .to_cors()
    .expect("Failed to build CORS fairing");

    let prometheus = PrometheusMetrics::new();

    let figment = rocket::Config::figment()
        .merge(("port", settings.port))
        .merge(("databases.git_stats.url", settings.database_url.clone()));

    let span = tracing::info_span!("Starting Rocket");
    let _enter = span.enter();

    rocket::custom(figment)
        .attach(db::stage())
        .attach(cors)
        .attach(prometheus.clone())
        .manage(RateLimiter::new(settings.increment_interval))
        .manage(settings)
        .mount("/metrics", prometheus)
        .mount(
            "/",
            SwaggerUi::new("/swagger-ui/<_..>")
                .url("/api-docs/openapi.json", entrypoints::ApiDoc::openapi()),
        )
        .attach(entrypoints::stage())
}
