//! Service configuration.

use std::fmt::Display;
use std::str::FromStr;

use badgeup_core::CommunityConfig;

/// One week, the default interval between leaderboard period resets.
pub const DEFAULT_PERIOD_RESET_INTERVAL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:3000").
    pub listen_addr: String,

    /// Slack incoming-webhook URL for public announcements (optional).
    pub slack_webhook_url: Option<String>,

    /// Slack signing secret used to verify slash-command requests (optional).
    pub slack_signing_secret: Option<String>,

    /// Slack app client id for the install link (optional).
    pub slack_client_id: Option<String>,

    /// OAuth redirect URI registered with Slack (optional).
    pub redirect_uri: Option<String>,

    /// API key for admin endpoints (optional; admin endpoints are disabled without it).
    pub admin_api_key: Option<String>,

    /// Seconds between automatic period resets. Zero disables the timer.
    pub period_reset_interval_seconds: u64,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Community rules.
    pub community: CommunityConfig,
}

/// Read and parse an environment variable, ignoring unparsable values.
fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key = %key, value = %raw, "Ignoring unparsable environment variable");
            None
        }
    }
}

/// Read a numeric environment variable that must be above zero.
fn env_positive<T: FromStr + PartialOrd + Default + Display>(key: &str) -> Option<T> {
    let value: T = env_parse(key)?;
    if value > T::default() {
        Some(value)
    } else {
        tracing::warn!(key = %key, value = %value, "Ignoring non-positive environment variable");
        None
    }
}

/// Read a non-empty environment variable.
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let community = CommunityConfig {
            badge_threshold: env_positive("BADGE_THRESHOLD")
                .unwrap_or(defaults.community.badge_threshold),
            best_answer_points: env_positive("BEST_ANSWER_POINTS")
                .unwrap_or(defaults.community.best_answer_points),
            kudos_points: env_positive("KUDOS_POINTS").unwrap_or(defaults.community.kudos_points),
            leaderboard_size: env_positive("LEADERBOARD_SIZE")
                .unwrap_or(defaults.community.leaderboard_size),
        };

        Self {
            listen_addr: env_string("LISTEN_ADDR").unwrap_or(defaults.listen_addr),
            slack_webhook_url: env_string("SLACK_WEBHOOK_URL"),
            slack_signing_secret: env_string("SLACK_SIGNING_SECRET"),
            slack_client_id: env_string("SLACK_CLIENT_ID"),
            redirect_uri: env_string("REDIRECT_URI"),
            admin_api_key: env_string("ADMIN_API_KEY"),
            period_reset_interval_seconds: env_parse("PERIOD_RESET_INTERVAL_SECONDS")
                .unwrap_or(defaults.period_reset_interval_seconds),
            cors_origins: env_string("CORS_ORIGINS").map_or(defaults.cors_origins, |raw| {
                raw.split(',').map(|s| s.trim().to_string()).collect()
            }),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
            community,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".into(),
            slack_webhook_url: None,
            slack_signing_secret: None,
            slack_client_id: None,
            redirect_uri: None,
            admin_api_key: None,
            period_reset_interval_seconds: DEFAULT_PERIOD_RESET_INTERVAL_SECONDS,
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 10,
            community: CommunityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_values_are_ignored() {
        std::env::set_var("BADGEUP_TEST_ZERO_POINTS", "0");
        std::env::set_var("BADGEUP_TEST_NEGATIVE_THRESHOLD", "-50");
        std::env::set_var("BADGEUP_TEST_POINTS", " 7 ");

        assert_eq!(env_positive::<i64>("BADGEUP_TEST_ZERO_POINTS"), None);
        assert_eq!(env_positive::<i64>("BADGEUP_TEST_NEGATIVE_THRESHOLD"), None);
        assert_eq!(env_positive::<usize>("BADGEUP_TEST_ZERO_POINTS"), None);
        assert_eq!(env_positive::<i64>("BADGEUP_TEST_POINTS"), Some(7));
        assert_eq!(env_positive::<i64>("BADGEUP_TEST_UNSET"), None);
    }
}
