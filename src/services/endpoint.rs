use crate::models::RecommendationStrategy;

/// Resolves a strategy label to its strategy
///
/// Total: labels other than the three known ones degrade to
/// `OverlappingActors` rather than failing.
pub fn resolve_strategy(label: &str) -> RecommendationStrategy {
    RecommendationStrategy::from_label(label)
}

/// Maps a strategy label to the backend path segment serving it
pub fn resolve_endpoint(label: &str) -> &'static str {
    resolve_strategy(label).endpoint()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels() {
        assert_eq!(resolve_endpoint("Exact genre"), "similar-genre");
        assert_eq!(
            resolve_endpoint("Similar runtime (+- 10 mins)"),
            "similar-runtime"
        );
        assert_eq!(resolve_endpoint("Overlapping actors"), "overlapping-actors");
    }

    #[test]
    fn test_unknown_labels_fall_back_to_overlapping_actors() {
        for label in ["", "exact genre", "Similar runtime", "Top rated"] {
            assert_eq!(resolve_endpoint(label), "overlapping-actors", "label {:?}", label);
        }
    }
}
