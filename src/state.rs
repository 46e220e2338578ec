use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::sync::watch;

use crate::{
    models::{MovieRecord, RecommendationStrategy},
    services::endpoint,
};

/// Shared observable value
///
/// Clones refer to the same cell, so a view and the session writing into it
/// see the same state. Observers get change notifications through
/// [`Slot::subscribe`].
#[derive(Debug)]
pub struct Slot<T> {
    tx: Arc<watch::Sender<T>>,
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Slot<T> {
    pub fn new(value: T) -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(value)),
        }
    }

    /// Replaces the value and notifies every subscriber
    pub fn set(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Reads the current value without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.tx.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.tx.subscribe()
    }
}

impl<T: Clone> Slot<T> {
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }
}

/// The strategy currently picked by the user; `None` means nothing selected
pub type StrategySlot = Slot<Option<RecommendationStrategy>>;

impl Slot<Option<RecommendationStrategy>> {
    /// Selects a strategy by its display label. An empty label clears the
    /// selection; unknown labels resolve like [`endpoint::resolve_endpoint`].
    pub fn select_label(&self, label: &str) {
        let strategy = if label.is_empty() {
            None
        } else {
            Some(endpoint::resolve_strategy(label))
        };
        self.set(strategy);
    }
}

/// Loading, error and result state of one recommendation widget
///
/// The bundle also carries the generation of the dispatch that currently owns
/// it. Staleness is decided per bundle, so one session can serve several
/// views without their dispatches superseding each other.
#[derive(Debug, Clone, Default)]
pub struct SessionSlots {
    pub loading: Slot<bool>,
    /// Empty when there is no error to show
    pub error: Slot<String>,
    pub results: Slot<Vec<MovieRecord>>,
    generation: Arc<AtomicU64>,
}

impl SessionSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn has_error(&self) -> bool {
        self.error.with(|error| !error.is_empty())
    }

    /// Claims the bundle for a new dispatch and returns its generation
    pub(crate) fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Invalidates whichever dispatch currently owns the bundle
    pub(crate) fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_value() {
        let slot = Slot::new(1);
        let view = slot.clone();
        slot.set(2);
        assert_eq!(view.get(), 2);
    }

    #[tokio::test]
    async fn test_subscriber_sees_changes() {
        let slot = Slot::new(false);
        let mut rx = slot.subscribe();

        slot.set(true);

        rx.changed().await.unwrap();
        assert!(*rx.borrow());
    }

    #[test]
    fn test_select_label() {
        let strategy = StrategySlot::default();
        assert_eq!(strategy.get(), None);

        strategy.select_label("Similar runtime (+- 10 mins)");
        assert_eq!(strategy.get(), Some(RecommendationStrategy::SimilarRuntime));

        strategy.select_label("Something else");
        assert_eq!(strategy.get(), Some(RecommendationStrategy::OverlappingActors));

        strategy.select_label("");
        assert_eq!(strategy.get(), None);
    }

    #[test]
    fn test_fresh_slots_are_idle() {
        let slots = SessionSlots::new();
        assert!(!slots.is_loading());
        assert!(!slots.has_error());
        assert!(slots.results.get().is_empty());
    }

    #[test]
    fn test_generation_is_per_bundle_and_shared_by_clones() {
        let view_a = SessionSlots::new();
        let view_b = SessionSlots::new();

        let a = view_a.begin();
        let b = view_b.begin();
        assert!(view_a.is_current(a));
        assert!(view_b.is_current(b));

        view_a.clone().invalidate();
        assert!(!view_a.is_current(a));
        assert!(view_b.is_current(b));
    }
}
