use std::sync::Arc;

use reqwest::StatusCode;
use tracing::Instrument;

use crate::{
    config::Config,
    error::{status_line, ClientError, ClientResult},
    models::{Envelope, MovieId, MovieRecord, Paginated, RecommendationStrategy},
    services::transport::{ApiRequest, Transport},
    state::{SessionSlots, StrategySlot},
};

const FAILURE_PREFIX: &str = "Failed to fetch similar movies";

/// How a dispatch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No subject or no strategy selected; state untouched
    Skipped,
    /// Results committed; holds the number of movies
    Loaded(usize),
    /// Backend answered with a failure status; message committed to the error slot
    Rejected { status: StatusCode },
    /// Network or decode failure
    Failed,
    /// A newer dispatch (or a cancel) was issued before this one settled;
    /// nothing committed
    Superseded,
}

/// Drives recommendation fetches into a view's [`SessionSlots`]
///
/// One session serves repeated dispatches, into one or several slot bundles.
/// Each dispatch claims a generation of the bundle it writes to; only the most
/// recently issued dispatch for that bundle may commit, so overlapping
/// dispatches never leave results from an older request on screen.
pub struct RecommendationSession {
    transport: Arc<dyn Transport>,
    api_url: String,
    surface_transport_errors: bool,
}

impl RecommendationSession {
    pub fn new(transport: Arc<dyn Transport>, config: &Config) -> Self {
        Self {
            transport,
            api_url: config.api_base().to_string(),
            surface_transport_errors: config.surface_transport_errors,
        }
    }

    /// URL of one page of recommendations. Page 0 is treated as page 1.
    pub fn recommendations_url(
        &self,
        strategy: RecommendationStrategy,
        subject: MovieId,
        page: u32,
    ) -> String {
        format!(
            "{}/api/movie/{}/{}?page={}",
            self.api_url,
            strategy.endpoint(),
            subject,
            page.max(1)
        )
    }

    /// Fetches one page of recommendations for `subject` with the currently
    /// selected strategy.
    ///
    /// Returns `Skipped` without touching any slot when `subject` is `None` or
    /// no strategy is selected. Otherwise `loading` goes true and `results` and
    /// `error` are cleared before the request is sent; once it settles the
    /// results or the error message are written and only then is `loading`
    /// set back to false. Dropping the returned future before it settles also
    /// sets `loading` back to false, unless a newer dispatch owns the slots.
    pub async fn dispatch(
        &self,
        subject: Option<MovieId>,
        strategy: &StrategySlot,
        slots: &SessionSlots,
        page: u32,
    ) -> DispatchOutcome {
        let Some(subject) = subject else {
            return DispatchOutcome::Skipped;
        };
        let Some(strategy) = strategy.get() else {
            return DispatchOutcome::Skipped;
        };

        let generation = slots.begin();

        slots.loading.set(true);
        slots.results.set(Vec::new());
        slots.error.set(String::new());
        let mut guard = LoadingGuard::new(slots, generation);

        let request = ApiRequest::get(self.recommendations_url(strategy, subject, page));
        let span = tracing::info_span!(
            "recommendations",
            request_id = %request.request_id,
            strategy = strategy.endpoint(),
            subject,
            page,
            generation,
        );

        let settled = self.fetch_page(request).instrument(span.clone()).await;
        guard.disarm();
        span.in_scope(|| self.commit(generation, settled, slots))
    }

    fn commit(
        &self,
        generation: u64,
        settled: ClientResult<Vec<MovieRecord>>,
        slots: &SessionSlots,
    ) -> DispatchOutcome {
        if !slots.is_current(generation) {
            tracing::debug!("Discarding stale recommendation response");
            return DispatchOutcome::Superseded;
        }

        let outcome = match settled {
            Ok(results) => {
                tracing::info!(results = results.len(), "Recommendations loaded");
                let count = results.len();
                slots.results.set(results);
                DispatchOutcome::Loaded(count)
            }
            Err(ClientError::RemoteRejected {
                status,
                status_text,
            }) => {
                let message = format!(
                    "{}: {}",
                    FAILURE_PREFIX,
                    status_line(&status, &status_text)
                );
                tracing::error!(status = status.as_u16(), "{}", message);
                slots.error.set(message);
                DispatchOutcome::Rejected { status }
            }
            Err(e) => {
                tracing::error!(error = %e, "{}", FAILURE_PREFIX);
                if self.surface_transport_errors {
                    slots.error.set(format!("{}: {}", FAILURE_PREFIX, e));
                }
                DispatchOutcome::Failed
            }
        };

        slots.loading.set(false);
        outcome
    }

    /// Invalidates any in-flight dispatch and settles `loading` to false.
    /// Results and error are left as they are.
    pub fn cancel(&self, slots: &SessionSlots) {
        slots.invalidate();
        slots.loading.set(false);
    }

    // The body must be JSON before the status is even looked at; a failure
    // status with a non-JSON body is a transport failure, not a rejection.
    async fn fetch_page(&self, request: ApiRequest) -> ClientResult<Vec<MovieRecord>> {
        let response = self.transport.send(request).await?;
        let body: serde_json::Value = response.json("recommendations")?;

        if !response.is_success() {
            return Err(ClientError::RemoteRejected {
                status: response.status,
                status_text: response.status_text().to_string(),
            });
        }

        let page: Envelope<Paginated<MovieRecord>> = serde_json::from_value(body)
            .map_err(|e| ClientError::decode("recommendations", e))?;

        Ok(page.data.results)
    }
}

/// Settles `loading` if a dispatch is dropped while its request is in flight
struct LoadingGuard<'a> {
    slots: &'a SessionSlots,
    generation: u64,
    armed: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(slots: &'a SessionSlots, generation: u64) -> Self {
        Self {
            slots,
            generation,
            armed: true,
        }
    }

    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed && self.slots.is_current(self.generation) {
            tracing::debug!(
                generation = self.generation,
                "Recommendation dispatch dropped before settling"
            );
            self.slots.loading.set(false);
        }
    }
}
