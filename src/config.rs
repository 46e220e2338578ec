use serde::Deserialize;
use std::time::Duration;

/// Environment variable prefix for all client settings (e.g. `REEL_API_URL`)
pub const ENV_PREFIX: &str = "REEL_";

/// Client configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the movies backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Base URL of the image CDN serving backdrops
    #[serde(default = "default_image_url")]
    pub image_url: String,

    /// Per-request timeout. Unset means requests may hang indefinitely.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Whether transport failures during a recommendation fetch are written
    /// to the error slot. Off by default: only remote rejections are.
    #[serde(default)]
    pub surface_transport_errors: bool,
}

fn default_api_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_image_url() -> String {
    "https://image.tmdb.org/t/p/original".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            image_url: default_image_url(),
            request_timeout_secs: None,
            surface_transport_errors: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Base URL with any trailing slash removed, ready for path joining
    pub fn api_base(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_empty() {
        let config = Config::from_vars(Vec::new()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, "http://127.0.0.1:5000");
        assert_eq!(config.request_timeout(), None);
        assert!(!config.surface_transport_errors);
    }

    #[test]
    fn test_prefixed_overrides() {
        let vars = vec![
            ("REEL_API_URL".to_string(), "http://movies.local/".to_string()),
            ("REEL_REQUEST_TIMEOUT_SECS".to_string(), "5".to_string()),
            ("REEL_SURFACE_TRANSPORT_ERRORS".to_string(), "true".to_string()),
            ("API_URL".to_string(), "http://ignored".to_string()),
        ];
        let config = Config::from_vars(vars).unwrap();
        assert_eq!(config.api_base(), "http://movies.local");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
        assert!(config.surface_transport_errors);
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let vars = vec![(
            "REEL_REQUEST_TIMEOUT_SECS".to_string(),
            "soon".to_string(),
        )];
        assert!(Config::from_vars(vars).is_err());
    }
}
