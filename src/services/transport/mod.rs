//! HTTP transport abstraction
//!
//! Every backend call goes through a [`Transport`], so the session and the
//! query helpers can run against the real `reqwest` client or a test double.
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    error::{ClientError, ClientResult},
    request_id::RequestId,
};

pub mod http;

pub use http::HttpTransport;

/// One outgoing backend request
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// JSON body; only sent for non-GET methods
    pub body: Option<Value>,
    pub request_id: RequestId,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            request_id: RequestId::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::DELETE, url)
    }

    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, url).with_body(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status and undecoded body of a completed request
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Convenience constructor for JSON bodies
    pub fn json_body(status: StatusCode, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or_default()
    }

    /// Decodes the body regardless of status
    pub fn json<T: DeserializeOwned>(&self, context: &str) -> ClientResult<T> {
        serde_json::from_slice(&self.body).map_err(|e| ClientError::decode(context, e))
    }
}

/// Performs backend requests
///
/// Implementations report network-level failures as `ClientError::Http` and
/// never interpret the HTTP status; callers decide what a status means.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> ClientResult<RawResponse>;
}

/// Sends a request and decodes its JSON body into `T`
///
/// The body is decoded whatever the status. A body that does not fit `T` is
/// reported as `RemoteRejected` when the status was a failure and as `Decode`
/// otherwise. Failures are logged before being returned.
pub async fn fetch_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: ApiRequest,
    context: &str,
) -> ClientResult<T> {
    let request_id = request.request_id;
    let method = request.method.clone();
    let url = request.url.clone();

    let result = transport.send(request).await.and_then(|response| {
        response.json::<T>(context).map_err(|e| {
            if response.is_success() {
                e
            } else {
                ClientError::rejected(response.status)
            }
        })
    });

    if let Err(e) = &result {
        tracing::error!(
            request_id = %request_id,
            method = %method,
            url = %url,
            error = %e,
            "Backend request failed"
        );
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, serde::Deserialize)]
    struct Named {
        name: String,
    }

    #[tokio::test]
    async fn test_fetch_json_decodes_success() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| request.method == Method::GET && request.url == "http://api/x")
            .times(1)
            .returning(|_| Ok(RawResponse::json_body(StatusCode::OK, &json!({ "name": "x" }))));

        let named: Named = fetch_json(&transport, ApiRequest::get("http://api/x"), "named")
            .await
            .unwrap();
        assert_eq!(named.name, "x");
    }

    #[tokio::test]
    async fn test_fetch_json_decodes_failure_status_when_shape_fits() {
        let mut transport = MockTransport::new();
        transport.expect_send().returning(|_| {
            Ok(RawResponse::json_body(
                StatusCode::UNAUTHORIZED,
                &json!({ "name": "still json" }),
            ))
        });

        let named: Named = fetch_json(&transport, ApiRequest::get("http://api/x"), "named")
            .await
            .unwrap();
        assert_eq!(named.name, "still json");
    }

    #[tokio::test]
    async fn test_fetch_json_rejected_when_failure_body_does_not_fit() {
        let mut transport = MockTransport::new();
        transport.expect_send().returning(|_| {
            Ok(RawResponse::json_body(
                StatusCode::NOT_FOUND,
                &json!({ "message": "Movie 1 not found." }),
            ))
        });

        let err = fetch_json::<Named>(&transport, ApiRequest::get("http://api/x"), "named")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ClientError::RemoteRejected { status, .. } if status == StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_fetch_json_decode_error_on_success_with_bad_body() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .returning(|_| Ok(RawResponse::new(StatusCode::OK, "<html></html>")));

        let err = fetch_json::<Named>(&transport, ApiRequest::get("http://api/x"), "named")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }

    #[test]
    fn test_status_text() {
        let response = RawResponse::new(StatusCode::NOT_FOUND, Vec::new());
        assert_eq!(response.status_text(), "Not Found");
        assert!(!response.is_success());
    }
}
