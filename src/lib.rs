//! Client for the movie recommendations backend.
//!
//! A view holds a [`SessionSlots`] bundle and a [`StrategySlot`], and asks a
//! [`RecommendationSession`] to fill them. The [`ApiClient`] carries the
//! remaining single-call queries (movie details, favorites, deletion) and the
//! stateless helpers [`contains`] and [`image_source`].
//!
//! ```no_run
//! use reel_recs::{ApiClient, Config, RecommendationStrategy, SessionSlots, StrategySlot};
//!
//! # async fn run() -> anyhow::Result<()> {
//! reel_recs::telemetry::init();
//! let client = ApiClient::from_config(Config::from_env()?)?;
//!
//! let session = client.session();
//! let slots = SessionSlots::new();
//! let strategy = StrategySlot::new(Some(RecommendationStrategy::ExactGenre));
//!
//! session.dispatch(Some(550), &strategy, &slots, 1).await;
//! println!("{} recommendations", slots.results.get().len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod request_id;
pub mod services;
pub mod state;
pub mod telemetry;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use models::{MovieId, MovieKey, MovieRecord, RecommendationStrategy, SessionToken};
pub use services::{
    contains, image_source, resolve_endpoint, ApiClient, DispatchOutcome, RecommendationSession,
};
pub use state::{SessionSlots, Slot, StrategySlot};
