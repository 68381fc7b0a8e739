use std::time::Duration;

use tracing::warn;
use url::Url;

/// Relative path routed to the backend by the reverse proxy in production.
pub const PRODUCTION_API_BASE: &str = "/api";
pub const DEVELOPMENT_API_BASE: &str = "http://localhost:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Client configuration, resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub log_level: String,
    pub request_timeout: Duration,
}

impl AppConfig {
    /// Build from variables captured at compile time. A browser bundle has no
    /// process environment, so overrides are baked in by the build.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("PERSONALLEARN_API_BASE"),
            option_env!("PERSONALLEARN_LOG"),
            option_env!("PERSONALLEARN_REQUEST_TIMEOUT_SECS"),
            cfg!(not(debug_assertions)),
        )
    }

    pub fn from_values(
        api_base: Option<&str>,
        log_level: Option<&str>,
        timeout_secs: Option<&str>,
        production: bool,
    ) -> Self {
        let request_timeout = match timeout_secs.map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!("Ignoring invalid request timeout '{}'", raw);
                    DEFAULT_REQUEST_TIMEOUT
                }
            },
            None => DEFAULT_REQUEST_TIMEOUT,
        };

        Self {
            api_base: resolve_api_base(api_base, production),
            log_level: log_level
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_LOG_LEVEL)
                .to_string(),
            request_timeout,
        }
    }

    /// Anchor a relative API base (e.g. `/api`) on the page origin.
    pub fn with_origin(mut self, origin: Option<&str>) -> Self {
        self.api_base = absolute_api_base(&self.api_base, origin);
        self
    }
}

/// Explicit override, then the production default, then the development default.
pub fn resolve_api_base(explicit: Option<&str>, production: bool) -> String {
    if let Some(base) = explicit.map(str::trim).filter(|s| !s.is_empty()) {
        return base.trim_end_matches('/').to_string();
    }
    if production {
        PRODUCTION_API_BASE.to_string()
    } else {
        DEVELOPMENT_API_BASE.to_string()
    }
}

/// Absolute bases pass through untouched. Relative ones are joined onto
/// `origin`; without an origin the base is returned as given.
pub fn absolute_api_base(base: &str, origin: Option<&str>) -> String {
    if Url::parse(base).is_ok() {
        return base.to_string();
    }
    let Some(origin) = origin else {
        return base.to_string();
    };
    match Url::parse(origin).and_then(|o| o.join(base)) {
        Ok(url) => url.as_str().trim_end_matches('/').to_string(),
        Err(e) => {
            warn!("Cannot anchor API base '{}' on origin '{}': {}", base, origin, e);
            base.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_and_is_trimmed() {
        assert_eq!(
            resolve_api_base(Some("https://api.example.com/"), true),
            "https://api.example.com"
        );
        assert_eq!(resolve_api_base(Some(" /backend "), false), "/backend");
    }

    #[test]
    fn test_blank_override_is_ignored() {
        assert_eq!(resolve_api_base(Some("   "), true), PRODUCTION_API_BASE);
        assert_eq!(resolve_api_base(None, false), DEVELOPMENT_API_BASE);
    }

    #[test]
    fn test_relative_base_joined_on_origin() {
        assert_eq!(
            absolute_api_base("/api", Some("https://learn.example.com")),
            "https://learn.example.com/api"
        );
        assert_eq!(
            absolute_api_base("/api", Some("http://localhost:3000/")),
            "http://localhost:3000/api"
        );
    }

    #[test]
    fn test_absolute_base_untouched() {
        assert_eq!(
            absolute_api_base("http://localhost:8000", Some("https://other.example.com")),
            "http://localhost:8000"
        );
        assert_eq!(absolute_api_base("/api", None), "/api");
    }

    #[test]
    fn test_from_values_defaults() {
        let config = AppConfig::from_values(None, None, None, false);
        assert_eq!(config.api_base, DEVELOPMENT_API_BASE);
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn test_from_values_overrides() {
        let config = AppConfig::from_values(Some("http://10.0.0.2:9000/"), Some("debug"), Some("15"), true);
        assert_eq!(config.api_base, "http://10.0.0.2:9000");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = AppConfig::from_values(None, None, Some("soon"), true);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        let config = AppConfig::from_values(None, None, Some("0"), true);
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }
}
