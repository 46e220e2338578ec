use reqwest::{
    header::{CACHE_CONTROL, CONTENT_TYPE},
    Client as HttpClient, Method,
};

use crate::{
    config::Config,
    error::ClientResult,
    request_id::REQUEST_ID_HEADER,
    services::transport::{ApiRequest, RawResponse, Transport},
};

/// Permissive CORS headers the backend expects on every write request
const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Methods", "DELETE, POST, GET, OPTIONS"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type, Authorization, X-Requested-With, Origin",
    ),
];

/// `reqwest`-backed transport
#[derive(Clone, Debug)]
pub struct HttpTransport {
    http_client: HttpClient,
}

impl HttpTransport {
    /// Builds the underlying client, applying the configured timeout if any
    pub fn new(config: &Config) -> ClientResult<Self> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http_client: builder.build()?,
        })
    }

    pub fn with_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse> {
        let mut builder = self
            .http_client
            .request(request.method.clone(), &request.url)
            .header(REQUEST_ID_HEADER, request.request_id.as_str());

        if request.method != Method::GET {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .header(CACHE_CONTROL, "no-cache");
            for (name, value) in CORS_HEADERS {
                builder = builder.header(name, value);
            }
            if let Some(body) = &request.body {
                builder = builder.json(body);
            }
        }

        tracing::debug!(
            request_id = %request.request_id,
            method = %request.method,
            url = %request.url,
            "Sending backend request"
        );

        let response = builder.send().await.map_err(|e| {
            tracing::error!(
                request_id = %request.request_id,
                url = %request.url,
                error = %e,
                "Backend request did not complete"
            );
            e
        })?;

        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(
            request_id = %request.request_id,
            status = status.as_u16(),
            bytes = body.len(),
            "Backend response received"
        );

        Ok(RawResponse::new(status, body.to_vec()))
    }
}
