use dioxus::prelude::*;
use std::time::Duration;
use tracing::{info, warn};

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_BOOKS_API_URL: &str = "https://www.googleapis.com/books/v1";
const DEFAULT_USER_ID: &str = "user123";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Application configuration
/// In debug builds: loads a .env file first, then reads the environment
/// In release builds: reads the environment only
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the CalmVerse backend (songs, therapists, journal, chat)
    pub api_url: String,
    /// Base URL of the third-party book catalog
    pub books_api_url: String,
    /// Optional key for the book catalog
    pub books_api_key: Option<String>,
    /// Serve book search from the built-in fallback dataset
    pub use_mock_books: bool,
    /// Identity used for appointments until real authentication exists
    pub user_id: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            books_api_url: DEFAULT_BOOKS_API_URL.to_string(),
            books_api_key: None,
            use_mock_books: false,
            user_id: DEFAULT_USER_ID.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration based on build mode
    pub fn load() -> Self {
        #[cfg(debug_assertions)]
        {
            if dotenvy::dotenv().is_ok() {
                info!("Config: Dev mode activated - loaded .env file");
            } else {
                info!("Config: No .env file found, reading environment only");
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("CALMVERSE_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_url);

        let books_api_url = non_empty("CALMVERSE_BOOKS_API_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or(defaults.books_api_url);

        let use_mock_books = non_empty("CALMVERSE_USE_MOCK_BOOKS")
            .map(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
            .unwrap_or(false);

        let request_timeout = match non_empty("CALMVERSE_REQUEST_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    warn!(
                        "Config: Ignoring invalid CALMVERSE_REQUEST_TIMEOUT_SECS '{}'",
                        raw
                    );
                    defaults.request_timeout
                }
            },
            None => defaults.request_timeout,
        };

        let config = Self {
            api_url,
            books_api_url,
            books_api_key: non_empty("CALMVERSE_BOOKS_API_KEY"),
            use_mock_books,
            user_id: non_empty("CALMVERSE_USER_ID").unwrap_or(defaults.user_id),
            request_timeout,
        };

        info!("Config: API at {}", config.api_url);
        if config.use_mock_books {
            info!("Config: Book search served from the fallback dataset");
        }

        config
    }
}

/// Hook to access the configuration from components
pub fn use_config() -> Config {
    use_context::<Config>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.user_id, "user123");
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_lookup(lookup(&[
            ("CALMVERSE_API_URL", "http://api.local:9000/"),
            ("CALMVERSE_USE_MOCK_BOOKS", "TRUE"),
            ("CALMVERSE_USER_ID", "alice"),
            ("CALMVERSE_REQUEST_TIMEOUT_SECS", "3"),
        ]));

        assert_eq!(config.api_url, "http://api.local:9000");
        assert!(config.use_mock_books);
        assert_eq!(config.user_id, "alice");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let config = Config::from_lookup(lookup(&[("CALMVERSE_REQUEST_TIMEOUT_SECS", "zero")]));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }
}
