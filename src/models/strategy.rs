use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::ClientError;

/// Recommendation algorithm offered by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStrategy {
    /// Movies with exactly the same set of genres
    ExactGenre,
    /// Movies whose runtime is within ten minutes
    SimilarRuntime,
    /// Movies sharing lead actors
    OverlappingActors,
}

impl RecommendationStrategy {
    pub const ALL: [RecommendationStrategy; 3] = [
        RecommendationStrategy::ExactGenre,
        RecommendationStrategy::SimilarRuntime,
        RecommendationStrategy::OverlappingActors,
    ];

    /// Human-readable label as presented in strategy pickers
    pub fn label(&self) -> &'static str {
        match self {
            RecommendationStrategy::ExactGenre => "Exact genre",
            RecommendationStrategy::SimilarRuntime => "Similar runtime (+- 10 mins)",
            RecommendationStrategy::OverlappingActors => "Overlapping actors",
        }
    }

    /// Backend path segment under /api/movie/
    pub fn endpoint(&self) -> &'static str {
        match self {
            RecommendationStrategy::ExactGenre => "similar-genre",
            RecommendationStrategy::SimilarRuntime => "similar-runtime",
            RecommendationStrategy::OverlappingActors => "overlapping-actors",
        }
    }

    /// Maps a label to a strategy, falling back to `OverlappingActors` for
    /// anything unrecognized. Use [`str::parse`] to reject unknown labels.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_else(|_| {
            tracing::warn!(
                label = %label,
                "Unrecognized recommendation strategy, falling back to overlapping actors"
            );
            RecommendationStrategy::OverlappingActors
        })
    }
}

impl FromStr for RecommendationStrategy {
    type Err = ClientError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.label() == label)
            .ok_or_else(|| {
                ClientError::InvalidInput(format!("Unknown recommendation strategy: {}", label))
            })
    }
}

impl Display for RecommendationStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
