//! Debounced, cancelable search coordinator
//!
//! Every keystroke replaces the pending debounce timer. When the input stays
//! quiet for the debounce window one call is issued with the next sequence
//! id. Calls are never aborted once issued; a response is applied only when
//! its sequence id is still the latest, so out-of-order responses cannot
//! overwrite newer results.

use std::sync::Arc;
use std::time::Duration;

use casedesk_common::{timeout, TimerHandle};
use casedesk_domain::{CaseSummary, SearchConfig, SearchQuery, SearchResultSet, SearchView};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::cases::ports::CaseGateway;

/// Debounce tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub debounce: Duration,
    /// Minimum trimmed length, in characters, before a call is issued
    pub min_chars: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from(&SearchConfig::default())
    }
}

impl From<&SearchConfig> for SearchSettings {
    fn from(config: &SearchConfig) -> Self {
        Self { debounce: config.debounce(), min_chars: config.min_chars }
    }
}

#[derive(Default)]
struct SearchState {
    /// Debounce timer for the latest input, if it has not fired yet
    pending: Option<TimerHandle>,
    /// Bumped on every input so a timer can tell whether it is still current
    input_generation: u64,
    /// Latest sequence id. Clearing on short input also advances it so that
    /// responses still in flight are discarded.
    latest_sequence: u64,
    view: SearchView,
}

struct Inner {
    gateway: Arc<dyn CaseGateway>,
    settings: SearchSettings,
    state: Mutex<SearchState>,
    view_tx: watch::Sender<SearchView>,
}

/// Search-as-you-type coordinator
///
/// Cheap to clone; clones share state.
#[derive(Clone)]
pub struct SearchCoordinator {
    inner: Arc<Inner>,
}

impl SearchCoordinator {
    pub fn new(gateway: Arc<dyn CaseGateway>, settings: SearchSettings) -> Self {
        let (view_tx, _) = watch::channel(SearchView::default());
        Self {
            inner: Arc::new(Inner {
                gateway,
                settings,
                state: Mutex::new(SearchState::default()),
                view_tx,
            }),
        }
    }

    /// Handle a change of the search box
    ///
    /// Never calls the service synchronously. Must be called from within a
    /// tokio runtime.
    pub fn on_input(&self, text: &str) {
        let mut state = self.inner.state.lock();

        if let Some(previous) = state.pending.take() {
            previous.cancel();
        }
        state.input_generation += 1;
        state.view.query = text.to_string();

        let trimmed = text.trim();
        if trimmed.chars().count() < self.inner.settings.min_chars {
            state.latest_sequence += 1;
            state.view.items.clear();
            state.view.searching = false;
            self.inner.publish(&state);
            return;
        }

        let generation = state.input_generation;
        let query = trimmed.to_string();
        let inner = Arc::clone(&self.inner);
        state.pending = Some(timeout(self.inner.settings.debounce, move || {
            Inner::fire(&inner, generation, query);
        }));
    }

    /// Close the result list (click outside). Pending input is unaffected.
    pub fn dismiss(&self) {
        let mut state = self.inner.state.lock();
        state.view.items.clear();
        self.inner.publish(&state);
    }

    /// Pick a result. Closes the list and returns the chosen entry.
    pub fn select(&self, id: &str) -> Option<CaseSummary> {
        let mut state = self.inner.state.lock();
        let chosen = state.view.items.iter().find(|item| item.id == id).cloned();
        state.view.items.clear();
        self.inner.publish(&state);
        chosen
    }

    /// Snapshot of what the dropdown shows
    pub fn view(&self) -> SearchView {
        self.inner.state.lock().view.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.inner.view_tx.subscribe()
    }

    /// Whether a debounce timer is waiting to fire
    pub fn has_pending_input(&self) -> bool {
        self.inner.state.lock().pending.is_some()
    }
}

impl Inner {
    /// Debounce deadline reached: issue the call for `text`
    fn fire(this: &Arc<Self>, generation: u64, text: String) {
        let query = {
            let mut state = this.state.lock();
            if state.input_generation != generation {
                return;
            }
            state.pending = None;
            state.latest_sequence += 1;
            state.view.searching = true;
            this.publish(&state);
            SearchQuery { text, sequence_id: state.latest_sequence }
        };

        debug!(sequence_id = query.sequence_id, "issuing search");
        let inner = Arc::clone(this);
        tokio::spawn(async move {
            // A failed call still settles its sequence id, with no results.
            let results = match inner.gateway.search_cases(&query.text).await {
                Ok(items) => SearchResultSet { sequence_id: query.sequence_id, items },
                Err(err) => {
                    warn!(
                        error = %err,
                        kind = err.label(),
                        sequence_id = query.sequence_id,
                        "search failed"
                    );
                    SearchResultSet::empty(query.sequence_id)
                }
            };
            inner.apply(results);
        });
    }

    fn apply(&self, results: SearchResultSet) {
        let mut state = self.state.lock();
        let sequence_id = results.sequence_id;
        if sequence_id != state.latest_sequence {
            debug!(sequence_id, latest = state.latest_sequence, "discarding stale search response");
            return;
        }

        state.view.items = results.items;
        state.view.sequence_id = sequence_id;
        state.view.searching = false;
        self.publish(&state);
    }

    fn publish(&self, state: &SearchState) {
        self.view_tx.send_replace(state.view.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use casedesk_domain::{
        CalendarEvent, Case, CaseDeskError, CaseStats, CaseUpdate, NewCalendarEvent, NewCase,
        Result,
    };

    use super::*;

    /// Gateway whose search answers with one entry echoing the query
    #[derive(Default)]
    struct EchoGateway {
        calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CaseGateway for EchoGateway {
        async fn search_cases(&self, query: &str) -> Result<Vec<CaseSummary>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().push(query.to_string());
            if query == "boom" {
                return Err(CaseDeskError::Remote { status: 500, message: "boom".into() });
            }
            Ok(vec![CaseSummary { id: query.into(), title: query.into(), file_number: String::new() }])
        }

        async fn list_cases(&self) -> Result<Vec<Case>> {
            unreachable!()
        }

        async fn get_case(&self, _id: &str) -> Result<Case> {
            unreachable!()
        }

        async fn create_case(&self, _new_case: &NewCase) -> Result<Case> {
            unreachable!()
        }

        async fn update_case(&self, _id: &str, _update: &CaseUpdate) -> Result<()> {
            unreachable!()
        }

        async fn delete_case(&self, _id: &str) -> Result<()> {
            unreachable!()
        }

        async fn case_stats(&self) -> Result<CaseStats> {
            unreachable!()
        }

        async fn list_events(&self) -> Result<Vec<CalendarEvent>> {
            unreachable!()
        }

        async fn upcoming_events(&self) -> Result<Vec<CalendarEvent>> {
            unreachable!()
        }

        async fn create_event(&self, _case_id: &str, _event: &NewCalendarEvent) -> Result<CalendarEvent> {
            unreachable!()
        }

        async fn delete_event(&self, _id: &str) -> Result<()> {
            unreachable!()
        }
    }

    fn coordinator() -> (SearchCoordinator, Arc<EchoGateway>) {
        let gateway = Arc::new(EchoGateway::default());
        (SearchCoordinator::new(gateway.clone(), SearchSettings::default()), gateway)
    }

    #[tokio::test(start_paused = true)]
    async fn input_never_calls_synchronously() {
        let (search, gateway) = coordinator();
        search.on_input("perez");

        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
        assert!(search.has_pending_input());

        tokio::time::sleep(Duration::from_millis(299)).await;
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
        assert_eq!(search.view().items[0].id, "perez");
    }

    #[tokio::test(start_paused = true)]
    async fn short_input_clears_without_calling() {
        let (search, gateway) = coordinator();
        search.on_input("gomez");
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(search.view().is_open());

        search.on_input(" g ");
        let view = search.view();
        assert!(view.items.is_empty());
        assert!(!search.has_pending_input());

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failures_show_no_results() {
        let (search, _gateway) = coordinator();
        search.on_input("boom");
        tokio::time::sleep(Duration::from_millis(350)).await;

        let view = search.view();
        assert!(view.items.is_empty());
        assert!(!view.searching);
    }

    #[tokio::test(start_paused = true)]
    async fn result_set_for_older_sequence_is_dropped() {
        let (search, _gateway) = coordinator();
        search.on_input("perez");
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(search.view().sequence_id, 1);

        let stale = SearchResultSet {
            sequence_id: 0,
            items: vec![CaseSummary { id: "old".into(), title: "old".into(), file_number: String::new() }],
        };
        search.inner.apply(stale);

        let view = search.view();
        assert_eq!(view.sequence_id, 1);
        assert_eq!(view.items[0].id, "perez");

        search.inner.apply(SearchResultSet::empty(1));
        assert!(search.view().items.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_keeps_pending_timer() {
        let (search, gateway) = coordinator();
        search.on_input("lopez");
        search.dismiss();
        assert!(search.has_pending_input());

        tokio::time::sleep(Duration::from_millis(350)).await;
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);

        let chosen = search.select("lopez");
        assert_eq!(chosen.map(|c| c.id), Some("lopez".to_string()));
        assert!(search.view().items.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn query_is_trimmed_before_sending() {
        let (search, gateway) = coordinator();
        search.on_input("  banco  ");
        tokio::time::sleep(Duration::from_millis(350)).await;

        assert_eq!(gateway.queries.lock().as_slice(), ["banco"]);
        assert_eq!(search.view().query, "  banco  ");
    }
}
