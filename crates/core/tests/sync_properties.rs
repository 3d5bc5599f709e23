//! Integration tests for the synchronization properties
//!
//! Timer-driven scenarios run on a paused tokio clock so every interleaving
//! is deterministic.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use casedesk_common::MockClock;
use casedesk_core::{
    build_month_grid, CaseGateway, CaseService, ConfirmationProtocol, CredentialSource, DeleteMessages,
    EventDeleter, IdentityApi, Navigator, ReadyGate, SearchCoordinator, SearchSettings,
    SessionGuard, SessionStore,
};
use casedesk_domain::{
    CalendarEvent, Case, CaseDeskError, CaseStats, CaseStatus, CaseSummary, CaseUpdate,
    ConfirmOutcome, Credentials, EventKind, LoginResponse, NewCalendarEvent, NewCase,
    PasswordChange, ProfileUpdate, Result, SessionState, UserIdentity,
};
use futures::future::join_all;
use parking_lot::Mutex;
use tokio::time::sleep;

// ============================================================================
// Fakes
// ============================================================================

/// Gateway with scripted search latency and counted deletes
#[derive(Default)]
struct ScriptedGateway {
    search_delays: HashMap<String, Duration>,
    searches: Mutex<Vec<String>>,
    deletes: AtomicUsize,
}

impl ScriptedGateway {
    fn with_delays(delays: &[(&str, u64)]) -> Self {
        Self {
            search_delays: delays.iter().map(|(q, ms)| ((*q).to_string(), Duration::from_millis(*ms))).collect(),
            ..Self::default()
        }
    }
}

#[async_trait]
impl CaseGateway for ScriptedGateway {
    async fn search_cases(&self, query: &str) -> Result<Vec<CaseSummary>> {
        self.searches.lock().push(query.to_string());
        if let Some(delay) = self.search_delays.get(query) {
            sleep(*delay).await;
        }
        Ok(vec![CaseSummary { id: format!("hit-{query}"), title: query.into(), file_number: String::new() }])
    }

    async fn list_cases(&self) -> Result<Vec<Case>> {
        Ok(Vec::new())
    }

    async fn get_case(&self, id: &str) -> Result<Case> {
        Err(CaseDeskError::Remote { status: 404, message: format!("{id} not found") })
    }

    async fn create_case(&self, _new_case: &NewCase) -> Result<Case> {
        Err(CaseDeskError::ValidationRejected("caratula should not be empty".into()))
    }

    async fn update_case(&self, _id: &str, _update: &CaseUpdate) -> Result<()> {
        Err(CaseDeskError::ValidationRejected("estado must be a valid enum value".into()))
    }

    async fn delete_case(&self, _id: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        sleep(Duration::from_millis(100)).await;
        Ok(())
    }

    async fn case_stats(&self) -> Result<CaseStats> {
        Ok(CaseStats::default())
    }

    async fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        Ok(Vec::new())
    }

    async fn upcoming_events(&self) -> Result<Vec<CalendarEvent>> {
        Ok(Vec::new())
    }

    async fn create_event(&self, _case_id: &str, _event: &NewCalendarEvent) -> Result<CalendarEvent> {
        Err(CaseDeskError::Network("offline".into()))
    }

    async fn delete_event(&self, _id: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        sleep(Duration::from_millis(100)).await;
        Ok(())
    }
}

#[derive(Default)]
struct MemoryStore {
    token: Mutex<Option<String>>,
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load_token(&self) -> Result<Option<String>> {
        Ok(self.token.lock().clone())
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.token.lock().take();
        Ok(())
    }
}

#[derive(Default)]
struct CountingNavigator {
    calls: AtomicUsize,
}

impl Navigator for CountingNavigator {
    fn navigate_to_login(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

struct AcceptingIdentity;

#[async_trait]
impl IdentityApi for AcceptingIdentity {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse> {
        Ok(LoginResponse { access_token: "issued".into() })
    }

    async fn current_identity(&self) -> Result<UserIdentity> {
        Ok(UserIdentity { id: "u1".into(), email: "ana@estudio.com".into(), name: None, role: None })
    }

    async fn update_profile(&self, _update: &ProfileUpdate) -> Result<()> {
        Ok(())
    }

    async fn change_password(&self, _change: &PasswordChange) -> Result<()> {
        Ok(())
    }
}

fn event(id: &str, iso: &str) -> CalendarEvent {
    CalendarEvent {
        id: id.into(),
        title: format!("Evento {id}"),
        timestamp_utc: iso.parse().unwrap(),
        kind: EventKind::Deadline,
        description: None,
        case_ref: None,
    }
}

// ============================================================================
// Search
// ============================================================================

/// Inputs spaced under the debounce window coalesce into one call
///
/// Scenario: "ab", "abc", "abcd" typed at t=0, 100, 200 ms
#[tokio::test(start_paused = true)]
async fn test_debounce_coalesces_rapid_input() {
    let gateway = Arc::new(ScriptedGateway::default());
    let search = SearchCoordinator::new(gateway.clone(), SearchSettings::default());

    search.on_input("ab");
    sleep(Duration::from_millis(100)).await;
    search.on_input("abc");
    sleep(Duration::from_millis(100)).await;
    search.on_input("abcd");

    sleep(Duration::from_millis(250)).await;
    assert!(gateway.searches.lock().is_empty());

    sleep(Duration::from_millis(100)).await;
    assert_eq!(gateway.searches.lock().as_slice(), ["abcd"]);
    assert_eq!(search.view().items[0].title, "abcd");
}

/// A slow response for an older query never overwrites newer results
///
/// Scenario: "perez" takes 1 s, "gomez" issued later answers in 10 ms
#[tokio::test(start_paused = true)]
async fn test_last_issued_wins_under_reordering() {
    let gateway = Arc::new(ScriptedGateway::with_delays(&[("perez", 1000), ("gomez", 10)]));
    let search = SearchCoordinator::new(gateway.clone(), SearchSettings::default());

    search.on_input("perez");
    sleep(Duration::from_millis(310)).await;
    assert!(search.view().searching);

    search.on_input("gomez");
    sleep(Duration::from_millis(400)).await;
    let view = search.view();
    assert_eq!(view.items[0].title, "gomez");
    let gomez_sequence = view.sequence_id;

    // "perez" lands now and must be dropped.
    sleep(Duration::from_millis(1000)).await;
    let view = search.view();
    assert_eq!(view.items[0].title, "gomez");
    assert_eq!(view.sequence_id, gomez_sequence);
    assert_eq!(gateway.searches.lock().len(), 2);
}

/// Clearing on short input also drops responses still in flight
#[tokio::test(start_paused = true)]
async fn test_short_input_discards_in_flight_response() {
    let gateway = Arc::new(ScriptedGateway::with_delays(&[("slow", 500)]));
    let search = SearchCoordinator::new(gateway.clone(), SearchSettings::default());

    search.on_input("slow");
    sleep(Duration::from_millis(310)).await;
    search.on_input("s");
    sleep(Duration::from_millis(600)).await;

    assert!(search.view().items.is_empty());
    assert_eq!(gateway.searches.lock().len(), 1);
}

// ============================================================================
// Calendar
// ============================================================================

#[test]
fn test_month_grid_day_counts() {
    let leap = build_month_grid(&[], 2024, 2, &chrono::Utc).unwrap();
    let common = build_month_grid(&[], 2023, 2, &chrono::Utc).unwrap();

    assert_eq!(leap.days().count(), 29);
    assert_eq!(common.days().count(), 28);
}

/// 2024-03-31T23:45Z is 20:45 on 31 March in Buenos Aires (UTC-3) and
/// 02:45 on 1 April in Moscow (UTC+3)
#[test]
fn test_month_boundary_bucketing_by_zone() {
    let events = vec![event("vto", "2024-03-31T23:45:00Z")];

    let buenos_aires = chrono_tz::America::Argentina::Buenos_Aires;
    let march = build_month_grid(&events, 2024, 3, &buenos_aires).unwrap();
    assert_eq!(march.day(31).unwrap().events.len(), 1);
    assert_eq!(build_month_grid(&events, 2024, 4, &buenos_aires).unwrap().event_count(), 0);

    let moscow = chrono_tz::Europe::Moscow;
    let april = build_month_grid(&events, 2024, 4, &moscow).unwrap();
    assert_eq!(april.day(1).unwrap().events.len(), 1);
    assert_eq!(build_month_grid(&events, 2024, 3, &moscow).unwrap().event_count(), 0);
}

// ============================================================================
// Confirmation protocol
// ============================================================================

fn event_protocol(gateway: Arc<ScriptedGateway>) -> ConfirmationProtocol<CalendarEvent> {
    let protocol = ConfirmationProtocol::new(
        Arc::new(EventDeleter::new(gateway)),
        Arc::new(MockClock::new()),
        Duration::from_millis(4000),
        DeleteMessages::for_events(),
    );
    protocol.set_items(vec![event("e1", "2024-04-02T12:00:00Z"), event("e2", "2024-04-03T12:00:00Z")]);
    protocol
}

/// Two confirms for the same target issue exactly one remote delete
#[tokio::test(start_paused = true)]
async fn test_double_confirm_issues_one_delete() {
    let gateway = Arc::new(ScriptedGateway::default());
    let protocol = event_protocol(gateway.clone());

    protocol.request_delete("e1").unwrap();
    let outcomes = join_all([protocol.confirm("e1"), protocol.confirm("e1")]).await;

    assert_eq!(gateway.deletes.load(Ordering::SeqCst), 1);
    assert!(outcomes.contains(&ConfirmOutcome::Deleted));
    assert!(outcomes.contains(&ConfirmOutcome::AlreadyInFlight));
    assert_eq!(protocol.items().len(), 1);
}

/// Cancelling inside the window has no remote effect and leaves the list as is
#[tokio::test(start_paused = true)]
async fn test_cancel_before_expiry_is_side_effect_free() {
    let gateway = Arc::new(ScriptedGateway::default());
    let protocol = event_protocol(gateway.clone());
    let before = protocol.items();

    protocol.request_delete("e2").unwrap();
    sleep(Duration::from_millis(1000)).await;
    assert!(protocol.cancel("e2"));
    sleep(Duration::from_millis(5000)).await;

    assert_eq!(gateway.deletes.load(Ordering::SeqCst), 0);
    assert_eq!(protocol.items(), before);
    assert_eq!(protocol.confirm("e2").await, ConfirmOutcome::NoPending);
}

// ============================================================================
// Session
// ============================================================================

/// Three concurrent authentication failures clear the token and navigate once
#[tokio::test(start_paused = true)]
async fn test_concurrent_auth_failures_navigate_once() {
    let store = Arc::new(MemoryStore { token: Mutex::new(Some("t0".into())) });
    let navigator = Arc::new(CountingNavigator::default());
    let guard = SessionGuard::new(
        store.clone(),
        navigator.clone(),
        Arc::new(MockClock::new()),
        Duration::from_millis(1500),
    );
    assert_eq!(guard.initialize(&AcceptingIdentity).await, SessionState::Ready);

    join_all([
        guard.on_auth_rejected(Some("t0")),
        guard.on_auth_rejected(Some("t0")),
        guard.on_auth_rejected(Some("t0")),
    ]).await;

    assert_eq!(guard.state(), SessionState::Unauthenticated);
    assert!(guard.bearer_token().is_none());
    assert!(store.token.lock().is_none());
    assert_eq!(navigator.calls.load(Ordering::SeqCst), 1);
}

/// Dependent calls are refused until the session is verified
#[tokio::test(start_paused = true)]
async fn test_ready_gate_blocks_until_verified() {
    let store = Arc::new(MemoryStore { token: Mutex::new(Some("t0".into())) });
    let guard = Arc::new(SessionGuard::new(
        store,
        Arc::new(CountingNavigator::default()),
        Arc::new(MockClock::new()),
        Duration::from_millis(1500),
    ));
    let gateway = Arc::new(ScriptedGateway::default());
    let gate = ReadyGate::new(gateway.clone(), guard.clone());

    assert_eq!(gate.search_cases("perez").await, Err(CaseDeskError::NotReady));
    assert!(gateway.searches.lock().is_empty());

    guard.initialize(&AcceptingIdentity).await;
    assert!(gate.search_cases("perez").await.is_ok());
}

/// Case edits are checked locally, gated, and server rejections pass through
#[tokio::test(start_paused = true)]
async fn test_case_update_rejections() {
    let store = Arc::new(MemoryStore { token: Mutex::new(Some("t0".into())) });
    let guard = Arc::new(SessionGuard::new(
        store,
        Arc::new(CountingNavigator::default()),
        Arc::new(MockClock::new()),
        Duration::ZERO,
    ));
    let gate = Arc::new(ReadyGate::new(Arc::new(ScriptedGateway::default()), guard.clone()));
    let service = CaseService::new(gate.clone(), Arc::new(MockClock::new()));
    let edit = CaseUpdate { status: Some(CaseStatus::Judgment), ..Default::default() };

    assert_eq!(gate.update_case("c1", &edit).await, Err(CaseDeskError::NotReady));

    guard.initialize(&AcceptingIdentity).await;
    assert!(matches!(
        service.update_case("c1", &CaseUpdate::default()).await,
        Err(CaseDeskError::InvalidInput(_))
    ));
    let blank_title = CaseUpdate { title: Some("  ".into()), ..Default::default() };
    assert!(matches!(
        service.update_case("c1", &blank_title).await,
        Err(CaseDeskError::InvalidInput(_))
    ));
    assert_eq!(
        service.update_case("c1", &edit).await,
        Err(CaseDeskError::ValidationRejected("estado must be a valid enum value".into()))
    );
}
