use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_LEADERBOARD_CAPACITY: usize = 5;
pub const DEFAULT_RECENT_USERS_LIMIT: i64 = 5;
pub const DEFAULT_TWIN_BAND: TwinBand = TwinBand {
    lower: 0.2,
    upper: 3.5,
};

const DEFAULT_ALLOWED_ORIGINS: &[&str] =
    &["http://localhost:3000", "https://git-statss.netlify.app"];

/// Raw environment, loaded with `envy`. Everything except the database URL
/// has a default.
#[derive(Debug, Deserialize)]
pub struct Env {
    pub database_url: String,
    pub port: Option<u16>,
    /// Comma-separated exact-origin allow-list for CORS.
    pub allowed_origins: Option<String>,
    pub leaderboard_size: Option<usize>,
    pub twin_band_lower: Option<f64>,
    pub twin_band_upper: Option<f64>,
    pub recent_users_limit: Option<i64>,
    /// Minimum interval between visit-counter increments. Unset disables the
    /// limiter entirely.
    pub increment_interval_ms: Option<u64>,
}

/// Resolved settings, managed as Rocket state.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub leaderboard_size: usize,
    pub twin_band: TwinBand,
    pub recent_users_limit: i64,
    pub increment_interval: Option<Duration>,
}

impl Settings {
    pub fn from_env(env: Env) -> Self {
        let allowed_origins = match env.allowed_origins.as_deref() {
            Some(raw) => parse_origins(raw),
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        };

        Self {
            database_url: env.database_url,
            port: env.port.unwrap_or(DEFAULT_PORT),
            allowed_origins,
            leaderboard_size: env
                .leaderboard_size
                .unwrap_or(DEFAULT_LEADERBOARD_CAPACITY),
            twin_band: TwinBand {
                lower: env.twin_band_lower.unwrap_or(DEFAULT_TWIN_BAND.lower),
                upper: env.twin_band_upper.unwrap_or(DEFAULT_TWIN_BAND.upper),
            },
            recent_users_limit: env
                .recent_users_limit
                .unwrap_or(DEFAULT_RECENT_USERS_LIMIT),
            increment_interval: env.increment_interval_ms.map(Duration::from_millis),
        }
    }
}

/// Multiplicative similarity window for the twin lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwinBand {
    pub lower: f64,
    pub upper: f64,
}

impl TwinBand {
    /// Absolute contribution bounds for a reference count.
    pub fn bounds(&self, contributions: i64) -> (f64, f64) {
        let count = contributions as f64;
        (count * self.lower, count * self.upper)
    }

    pub fn contains(&self, reference: i64, candidate: i64) -> bool {
        let (lower, upper) = self.bounds(reference);
        let candidate = candidate as f64;
        candidate >= lower && candidate <= upper
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_env() -> Env {
        Env {
            database_url: "postgres://localhost/git_stats".to_string(),
            port: None,
            allowed_origins: None,
            leaderboard_size: None,
            twin_band_lower: None,
            twin_band_upper: None,
            recent_users_limit: None,
            increment_interval_ms: None,
        }
    }

    #[test]
    fn defaults() {
        let settings = Settings::from_env(minimal_env());

        assert_eq!(settings.port, 5000);
        assert_eq!(settings.leaderboard_size, 5);
        assert_eq!(settings.recent_users_limit, 5);
        assert_eq!(settings.twin_band, TwinBand { lower: 0.2, upper: 3.5 });
        assert_eq!(settings.increment_interval, None);
        assert_eq!(
            settings.allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://git-statss.netlify.app".to_string()
            ]
        );
    }

    #[test]
    fn origin_list_parsing() {
        assert_eq!(
            parse_origins("http://localhost:3000, https://example.com ,"),
            vec![
                "http://localhost:3000".to_string(),
                "https://example.com".to_string()
            ]
        );
        assert!(parse_origins(" , ").is_empty());
    }

    #[test]
    fn twin_band_window() {
        let band = DEFAULT_TWIN_BAND;

        // 250 contributions vs 100 is a ratio of 2.5, inside the window.
        assert!(band.contains(100, 250));
        // A ratio of 10 falls outside.
        assert!(!band.contains(100, 1000));
        // Bounds scale multiplicatively from the reference count.
        assert_eq!(band.bounds(100), (20.0, 350.0));
        assert_eq!(band.bounds(0), (0.0, 0.0));
    }

    #[test]
    fn overrides() {
        let settings = Settings::from_env(Env {
            port: Some(8080),
            leaderboard_size: Some(10),
            twin_band_lower: Some(0.5),
            twin_band_upper: Some(2.0),
            recent_users_limit: Some(20),
            increment_interval_ms: Some(1000),
            ..minimal_env()
        });

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.leaderboard_size, 10);
        assert_eq!(settings.twin_band, TwinBand { lower: 0.5, upper: 2.0 });
        assert_eq!(settings.recent_users_limit, 20);
        assert_eq!(
            settings.increment_interval,
            Some(Duration::from_millis(1000))
        );
    }
}
