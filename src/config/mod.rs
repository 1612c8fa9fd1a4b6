use rust_decimal::Decimal;
use std::env;

use crate::polymarket::data_client::{FetchLimits, DATA_API_BASE};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    // Polymarket Data API
    pub data_api_url: String,
    pub http_timeout_secs: u64,
    pub activity_page_size: u32,
    pub activity_max_pages: u32,
    pub closed_positions_page_size: u32,
    pub closed_positions_max_pages: u32,
    pub position_dust_threshold: Decimal,

    // Bearer token for /api routes; unset disables auth.
    pub api_token: Option<String>,

    // Logging
    pub log_json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        let limits = FetchLimits::default();
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            data_api_url: DATA_API_BASE.into(),
            http_timeout_secs: 20,
            activity_page_size: limits.activity_page_size,
            activity_max_pages: limits.activity_max_pages,
            closed_positions_page_size: limits.closed_page_size,
            closed_positions_max_pages: limits.closed_max_pages,
            position_dust_threshold: limits.dust_threshold,
            api_token: None,
            log_json: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            data_api_url: env::var("POLYMARKET_DATA_API_URL").unwrap_or(defaults.data_api_url),
            http_timeout_secs: parse_or("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            activity_page_size: parse_or("ACTIVITY_PAGE_SIZE", defaults.activity_page_size),
            activity_max_pages: parse_or("ACTIVITY_MAX_PAGES", defaults.activity_max_pages),
            closed_positions_page_size: parse_or(
                "CLOSED_POSITIONS_PAGE_SIZE",
                defaults.closed_positions_page_size,
            ),
            closed_positions_max_pages: parse_or(
                "CLOSED_POSITIONS_MAX_PAGES",
                defaults.closed_positions_max_pages,
            ),
            position_dust_threshold: parse_or(
                "POSITION_DUST_THRESHOLD",
                defaults.position_dust_threshold,
            ),

            api_token: env::var("API_TOKEN").ok().filter(|t| !t.is_empty()),

            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
        })
    }

    pub fn fetch_limits(&self) -> FetchLimits {
        FetchLimits {
            activity_page_size: self.activity_page_size,
            activity_max_pages: self.activity_max_pages,
            closed_page_size: self.closed_positions_page_size,
            closed_max_pages: self.closed_positions_max_pages,
            dust_threshold: self.position_dust_threshold,
        }
    }
}

/// Parse an env var, falling back to `default` when unset or malformed.
fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fetch_limits() {
        let config = AppConfig::default();
        let limits = config.fetch_limits();
        assert_eq!(limits.activity_page_size, 500);
        assert_eq!(limits.closed_max_pages, 10);
        assert_eq!(limits.dust_threshold, Decimal::ONE);
    }

    #[test]
    fn test_parse_or_fallback() {
        assert_eq!(parse_or("POLYSTATS_TEST_UNSET_VAR", 7u32), 7);
    }
}
