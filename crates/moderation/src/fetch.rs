//! Queue page fetching: replace/append modes behind one single-flight guard.

use heavyhire_client::service::ModerationService;
use heavyhire_client::types::ListMediaQuery;
use heavyhire_core::filters::MediaFilters;

use crate::error::QueueError;
use crate::events::ModerationEvent;
use crate::queue::ModerationQueue;

/// How a fetched page is applied to the queue view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// The view is wholly replaced (filter change or first load).
    Replace,
    /// The page is concatenated to the end of the view (pagination).
    Append,
}

/// Result of a fetch attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page was fetched and applied.
    Fetched,
    /// Another fetch was already in flight; this call did nothing.
    AlreadyInFlight,
    /// Every page is already loaded; this call did nothing.
    NoMorePages,
}

impl ModerationQueue {
    /// Fetch one page of the queue.
    ///
    /// At most one fetch runs at a time; a call that finds another fetch in
    /// flight returns [`FetchOutcome::AlreadyInFlight`] without touching the
    /// service. On a replace failure the view is cleared; on an append
    /// failure it is left as it was. Either failure is published as a
    /// [`ModerationEvent::FetchFailed`]; there are no automatic retries.
    pub async fn fetch(&self, page: u32, mode: FetchMode) -> Result<FetchOutcome, QueueError> {
        let filters = {
            let mut state = self.state.lock().await;
            if state.fetch_in_flight {
                tracing::debug!(page, ?mode, "Fetch suppressed, another fetch is in flight");
                return Ok(FetchOutcome::AlreadyInFlight);
            }
            state.fetch_in_flight = true;
            state.filters.clone()
        };

        let query = ListMediaQuery {
            page,
            limit: self.page_size,
            filters,
        };
        let result = self.service.list_media(&query).await;

        let mut state = self.state.lock().await;
        state.fetch_in_flight = false;
        match result {
            Ok(fetched) => {
                let count = fetched.items.len();
                match mode {
                    FetchMode::Replace => {
                        state.items = fetched.items;
                        state.context_groups = fetched.context_groups;
                        // The old view is gone; so is anything selected in it.
                        state.selection.clear();
                    }
                    FetchMode::Append => {
                        state.items.extend(fetched.items);
                    }
                }
                state.page = fetched.page;
                state.total_pages = fetched.total_pages;
                state.total = fetched.total;
                state.has_more = fetched.page < fetched.total_pages;
                drop(state);

                tracing::debug!(page, ?mode, count, "Queue page applied");
                self.publish(match mode {
                    FetchMode::Replace => ModerationEvent::QueueReplaced { count },
                    FetchMode::Append => ModerationEvent::QueueAppended { count },
                });
                Ok(FetchOutcome::Fetched)
            }
            Err(e) => {
                if mode == FetchMode::Replace {
                    state.items.clear();
                    state.context_groups.clear();
                    state.selection.clear();
                    state.page = 0;
                    state.total_pages = 0;
                    state.total = 0;
                }
                drop(state);

                tracing::warn!(page, ?mode, error = %e, "Queue fetch failed");
                self.publish(ModerationEvent::FetchFailed {
                    page,
                    message: e.to_string(),
                });
                Err(QueueError::Fetch { page, source: e })
            }
        }
    }

    /// Replace the active filter set and reload from the first page.
    ///
    /// Always restarts at page 1 with `has_more` reset, regardless of how
    /// much was previously loaded.
    pub async fn set_filters(&self, filters: MediaFilters) -> Result<FetchOutcome, QueueError> {
        {
            let mut state = self.state.lock().await;
            state.filters = filters;
            state.has_more = true;
        }
        self.fetch(1, FetchMode::Replace).await
    }

    /// Append the next page, if one is available and no fetch is running.
    pub async fn load_more(&self) -> Result<FetchOutcome, QueueError> {
        let next_page = {
            let state = self.state.lock().await;
            if !state.has_more {
                return Ok(FetchOutcome::NoMorePages);
            }
            if state.fetch_in_flight {
                return Ok(FetchOutcome::AlreadyInFlight);
            }
            state.page + 1
        };
        self.fetch(next_page, FetchMode::Append).await
    }
}
