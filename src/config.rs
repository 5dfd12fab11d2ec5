//! Runtime configuration for the auction desk.

use std::env;
use std::time::Duration;

pub const PRODUCTION_API_URL: &str = "https://api.cricket-auction.app/api";
pub const LOCALHOST_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Base URL every gateway endpoint is joined onto.
    pub api_base: String,
    /// Prefix for static assets when the site is hosted under a subpath.
    pub base_path: String,
    pub bind_addr: String,
    pub poll_interval: Duration,
    pub debounce: Duration,
    /// How long the sale overlay stays up before the desk moves on.
    pub celebration: Duration,
    pub bid_step: i64,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let flag = |key: &str| {
            lookup(key)
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false)
        };
        let millis = |key: &str, default: u64| {
            Duration::from_millis(
                lookup(key)
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .unwrap_or(default),
            )
        };

        let api_base = match lookup("API_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url.trim().trim_end_matches('/').to_string(),
            None if flag("USE_LOCALHOST") => LOCALHOST_API_URL.to_string(),
            None => PRODUCTION_API_URL.to_string(),
        };

        let production = lookup("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        let base_path = match lookup("BASE_PATH").filter(|v| !v.trim().is_empty()) {
            Some(path) => normalize_base_path(&path),
            None => match lookup("REPO_NAME").filter(|v| !v.trim().is_empty()) {
                Some(repo) if production => normalize_base_path(&repo),
                _ => "/".to_string(),
            },
        };

        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let bid_step = lookup("BID_STEP")
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|step| *step > 0)
            .unwrap_or(500);

        Settings {
            api_base,
            base_path,
            bind_addr,
            poll_interval: millis("POLL_INTERVAL_MS", 3000),
            debounce: millis("SEARCH_DEBOUNCE_MS", 500),
            celebration: millis("CELEBRATION_MS", 4000),
            bid_step,
        }
    }

    /// Rewrite a public asset path (`images/logo.png`, `/video/intro.mp4`)
    /// under the configured base path. Absolute URLs pass through untouched.
    pub fn asset_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") || path.starts_with("data:") {
            return path.to_string();
        }
        format!("{}{}", self.base_path, path.trim_start_matches('/'))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_production_api() {
        let s = settings(&[]);
        assert_eq!(s.api_base, PRODUCTION_API_URL);
        assert_eq!(s.base_path, "/");
        assert_eq!(s.poll_interval, Duration::from_millis(3000));
        assert_eq!(s.debounce, Duration::from_millis(500));
        assert_eq!(s.celebration, Duration::from_millis(4000));
        assert_eq!(s.bid_step, 500);
    }

    #[test]
    fn explicit_override_beats_localhost_flag() {
        let s = settings(&[("API_URL", "https://staging.example.org/api/"), ("USE_LOCALHOST", "true")]);
        assert_eq!(s.api_base, "https://staging.example.org/api");
    }

    #[test]
    fn localhost_flag_is_opt_in() {
        assert_eq!(settings(&[("USE_LOCALHOST", "true")]).api_base, LOCALHOST_API_URL);
        assert_eq!(settings(&[("USE_LOCALHOST", "no")]).api_base, PRODUCTION_API_URL);
    }

    #[test]
    fn repo_name_only_applies_in_production() {
        assert_eq!(settings(&[("REPO_NAME", "cup-site")]).base_path, "/");
        assert_eq!(
            settings(&[("REPO_NAME", "cup-site"), ("APP_ENV", "production")]).base_path,
            "/cup-site/"
        );
        assert_eq!(
            settings(&[("REPO_NAME", "cup-site"), ("BASE_PATH", "/site")]).base_path,
            "/site/"
        );
    }

    #[test]
    fn asset_urls_are_prefixed() {
        let s = settings(&[("BASE_PATH", "cup")]);
        assert_eq!(s.asset_url("/images/logo.png"), "/cup/images/logo.png");
        assert_eq!(s.asset_url("video/intro.mp4"), "/cup/video/intro.mp4");
        assert_eq!(s.asset_url("https://cdn.example.org/a.png"), "https://cdn.example.org/a.png");
    }

    #[test]
    fn bad_numbers_fall_back() {
        let s = settings(&[("POLL_INTERVAL_MS", "soon"), ("BID_STEP", "-5")]);
        assert_eq!(s.poll_interval, Duration::from_millis(3000));
        assert_eq!(s.bid_step, 500);
    }
}
