use serde::{Deserialize, Serialize};

pub mod account;
pub mod movie;
pub mod strategy;

pub use account::{Account, FavoriteRequest, FavoriteResponse, MediaType, SessionToken};
pub use movie::{
    AverageScores, Backdrop, CastMember, Genre, MovieDetails, MovieId, MovieKey, MovieRecord,
};
pub use strategy::RecommendationStrategy;

/// Backend wrapper: most endpoints nest their payload under `data`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// One page of a paginated listing
///
/// Only `results` is required; the counters are filled in when the backend
/// sends them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    pub results: Vec<T>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Paginated<T> {
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}
