use std::time::Duration;

use cellar_core::validation::MAX_LIST_LIMIT;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Hours between two urgency digests (default: `168`, weekly).
    pub digest_interval_hours: u64,
    /// Number of bottles listed in each digest (default: `5`).
    pub digest_top_n: usize,
    /// Activity logs older than this many days are purged (default: `180`).
    pub activity_retention_days: i64,
    /// Ranking size of `/reports/urgency` when `?limit` is omitted (default: `50`).
    pub urgency_report_limit: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                    |
    /// |---------------------------|----------------------------|
    /// | `HOST`                    | `0.0.0.0`                  |
    /// | `PORT`                    | `3000`                     |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                       |
    /// | `DIGEST_INTERVAL_HOURS`   | `168`                      |
    /// | `DIGEST_TOP_N`            | `5`                        |
    /// | `ACTIVITY_RETENTION_DAYS` | `180`                      |
    /// | `URGENCY_REPORT_LIMIT`    | `50`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let digest_interval_hours: u64 = std::env::var("DIGEST_INTERVAL_HOURS")
            .unwrap_or_else(|_| "168".into())
            .parse()
            .expect("DIGEST_INTERVAL_HOURS must be a valid u64");
        assert!(
            digest_period(digest_interval_hours).is_some(),
            "DIGEST_INTERVAL_HOURS must be positive and fit in seconds"
        );

        let digest_top_n: usize = std::env::var("DIGEST_TOP_N")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("DIGEST_TOP_N must be a valid usize");

        let activity_retention_days: i64 = std::env::var("ACTIVITY_RETENTION_DAYS")
            .unwrap_or_else(|_| "180".into())
            .parse()
            .expect("ACTIVITY_RETENTION_DAYS must be a valid i64");

        let urgency_report_limit: i64 = std::env::var("URGENCY_REPORT_LIMIT")
            .unwrap_or_else(|_| "50".into())
            .parse()
            .expect("URGENCY_REPORT_LIMIT must be a valid i64");
        assert!(
            (1..=MAX_LIST_LIMIT).contains(&urgency_report_limit),
            "URGENCY_REPORT_LIMIT must be between 1 and {MAX_LIST_LIMIT}"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            digest_interval_hours,
            digest_top_n,
            activity_retention_days,
            urgency_report_limit,
        }
    }
}

/// Period between two digests, or `None` when `interval_hours` is zero or
/// overflows when converted to seconds.
pub fn digest_period(interval_hours: u64) -> Option<Duration> {
    interval_hours
        .checked_mul(3600)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekly_digest_period() {
        assert_eq!(digest_period(168), Some(Duration::from_secs(168 * 3600)));
    }

    #[test]
    fn zero_or_overflowing_interval_is_rejected() {
        assert_eq!(digest_period(0), None);
        assert_eq!(digest_period(u64::MAX), None);
        assert_eq!(digest_period(u64::MAX / 3600 + 1), None);
        assert!(digest_period(u64::MAX / 3600).is_some());
    }
}
