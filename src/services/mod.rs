pub mod account;
pub mod client;
pub mod endpoint;
pub mod movies;
pub mod recommendations;
pub mod transport;

pub use client::ApiClient;
pub use endpoint::{resolve_endpoint, resolve_strategy};
pub use movies::{contains, image_source};
pub use recommendations::{DispatchOutcome, RecommendationSession};
pub use transport::{fetch_json, ApiRequest, HttpTransport, RawResponse, Transport};
