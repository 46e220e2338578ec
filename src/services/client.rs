use std::sync::Arc;

use reqwest::Url;

use crate::{
    config::Config,
    error::{ClientError, ClientResult},
    services::{
        recommendations::RecommendationSession,
        transport::{HttpTransport, Transport},
    },
};

/// Entry point for backend queries
///
/// Movie queries live in `services::movies`, account queries in
/// `services::account`. Cloning is cheap; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) config: Config,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>, config: Config) -> Self {
        Self { transport, config }
    }

    /// Builds a client over the `reqwest` transport
    pub fn from_config(config: Config) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(Arc::new(transport), config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// A recommendation session sharing this client's transport. It can serve
    /// any number of views; each [`SessionSlots`](crate::state::SessionSlots)
    /// bundle tracks its own latest dispatch.
    pub fn session(&self) -> RecommendationSession {
        RecommendationSession::new(Arc::clone(&self.transport), &self.config)
    }

    /// Absolute backend URL for `path`, with URL-encoded query parameters
    pub(crate) fn url(&self, path: &str, query: &[(&str, &str)]) -> ClientResult<String> {
        let raw = format!("{}{}", self.config.api_base(), path);
        let mut url = Url::parse(&raw)
            .map_err(|e| ClientError::InvalidInput(format!("Invalid URL {}: {}", raw, e)))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::MockTransport;

    fn client(api_url: &str) -> ApiClient {
        let config = Config {
            api_url: api_url.to_string(),
            ..Config::default()
        };
        ApiClient::new(Arc::new(MockTransport::new()), config)
    }

    #[test]
    fn test_url_encodes_query() {
        let url = client("http://127.0.0.1:5000/")
            .url("/api/account/", &[("session_id", "a b&c")])
            .unwrap();
        assert_eq!(url, "http://127.0.0.1:5000/api/account/?session_id=a+b%26c");
    }

    #[test]
    fn test_url_without_query() {
        let url = client("http://127.0.0.1:5000").url("/api/movie/7", &[]).unwrap();
        assert_eq!(url, "http://127.0.0.1:5000/api/movie/7");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = client("not a url").url("/api/movie/7", &[]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }
}
