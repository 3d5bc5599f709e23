//! Confirmation protocol for destructive mutations
//!
//! Per target:
//!
//! ```text
//! Idle --request--> Pending --confirm--> InFlight --ack--> Idle (item removed)
//!                   Pending --cancel---> Idle
//!                   Pending --window---> Idle
//!                   Pending --request--> Pending (new token, fresh window)
//! ```
//!
//! The visible list is owned here and only shrinks after the service
//! acknowledged the delete. Nothing is removed optimistically.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use casedesk_common::{timeout, Clock, TimerHandle};
use casedesk_domain::{ConfirmOutcome, Notification, PendingDestructiveAction};
use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::ports::{Identified, RemoteDeleter};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Where a target currently is in the protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetState {
    Idle,
    Pending,
    InFlight,
}

/// Transitions published to UI consumers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationEvent {
    Requested(PendingDestructiveAction),
    Canceled { target_id: String },
    Expired { target_id: String },
    /// The remote delete has been issued
    Confirmed { target_id: String },
    Deleted { target_id: String },
    DeleteFailed { target_id: String, reason: String },
    Notice(Notification),
}

/// User-facing wording for one kind of item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteMessages {
    pub warning: String,
    pub success: String,
    pub failure: String,
}

impl DeleteMessages {
    pub fn for_cases() -> Self {
        Self {
            warning: "This permanently deletes the case and its documents.".into(),
            success: "Case deleted.".into(),
            failure: "Could not delete the case.".into(),
        }
    }

    pub fn for_events() -> Self {
        Self {
            warning: "This action cannot be undone.".into(),
            success: "Event deleted.".into(),
            failure: "Could not delete the event.".into(),
        }
    }

    fn prompt(&self, label: &str) -> Notification {
        Notification::info(format!("Delete \"{label}\"?")).with_description(self.warning.clone())
    }
}

struct PendingEntry {
    action: PendingDestructiveAction,
    timer: TimerHandle,
}

struct ProtocolState<T> {
    items: Vec<T>,
    pending: HashMap<String, PendingEntry>,
    in_flight: HashSet<String>,
}

struct Inner<T> {
    deleter: Arc<dyn RemoteDeleter>,
    clock: Arc<dyn Clock>,
    window: Duration,
    messages: DeleteMessages,
    state: Mutex<ProtocolState<T>>,
    events: broadcast::Sender<ConfirmationEvent>,
}

/// Confirmed deletion over a visible list of `T`
///
/// Cheap to clone; clones share state.
pub struct ConfirmationProtocol<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for ConfirmationProtocol<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> ConfirmationProtocol<T>
where
    T: Identified + Clone + Send + Sync + 'static,
{
    pub fn new(
        deleter: Arc<dyn RemoteDeleter>,
        clock: Arc<dyn Clock>,
        window: Duration,
        messages: DeleteMessages,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                deleter,
                clock,
                window,
                messages,
                state: Mutex::new(ProtocolState {
                    items: Vec::new(),
                    pending: HashMap::new(),
                    in_flight: HashSet::new(),
                }),
                events,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ConfirmationEvent> {
        self.inner.events.subscribe()
    }

    /// Replace the visible list, e.g. after a reload
    ///
    /// Pending confirmations for targets no longer listed are dropped.
    pub fn set_items(&self, items: Vec<T>) {
        let mut state = self.inner.state.lock();
        let listed: HashSet<&str> = items.iter().map(Identified::id).collect();
        state.pending.retain(|id, entry| {
            let keep = listed.contains(id.as_str());
            if !keep {
                entry.timer.cancel();
            }
            keep
        });
        state.items = items;
    }

    pub fn items(&self) -> Vec<T> {
        self.inner.state.lock().items.clone()
    }

    pub fn target_state(&self, id: &str) -> TargetState {
        let state = self.inner.state.lock();
        if state.in_flight.contains(id) {
            TargetState::InFlight
        } else if state.pending.contains_key(id) {
            TargetState::Pending
        } else {
            TargetState::Idle
        }
    }

    pub fn pending(&self, id: &str) -> Option<PendingDestructiveAction> {
        self.inner.state.lock().pending.get(id).map(|entry| entry.action.clone())
    }

    /// Ask for confirmation before deleting `id`
    ///
    /// Replaces an existing pending request for the same target (new token,
    /// fresh window). Returns `None` when `id` is not in the visible list or a
    /// delete for it is already in flight. Must be called from within a tokio
    /// runtime.
    pub fn request_delete(&self, id: &str) -> Option<PendingDestructiveAction> {
        let mut state = self.inner.state.lock();
        if state.in_flight.contains(id) {
            debug!(target_id = id, "delete already in flight, request ignored");
            return None;
        }
        let label = state.items.iter().find(|item| item.id() == id)?.label().to_string();

        let window = chrono::Duration::from_std(self.inner.window).unwrap_or(chrono::Duration::zero());
        let action = PendingDestructiveAction {
            target_id: id.to_string(),
            confirm_token: Uuid::new_v4(),
            expires_by: self.inner.clock.utc_now() + window,
        };

        let inner = Arc::clone(&self.inner);
        let target = id.to_string();
        let token = action.confirm_token;
        let timer = timeout(self.inner.window, move || inner.expire(&target, token));

        if let Some(replaced) =
            state.pending.insert(id.to_string(), PendingEntry { action: action.clone(), timer })
        {
            replaced.timer.cancel();
            debug!(target_id = id, "pending delete replaced");
        }
        drop(state);

        self.inner.emit(ConfirmationEvent::Requested(action.clone()));
        self.inner.emit(ConfirmationEvent::Notice(self.inner.messages.prompt(&label)));
        Some(action)
    }

    /// Discard a pending request without any remote effect
    pub fn cancel(&self, id: &str) -> bool {
        let removed = self.inner.state.lock().pending.remove(id);
        match removed {
            Some(entry) => {
                entry.timer.cancel();
                self.inner.emit(ConfirmationEvent::Canceled { target_id: id.to_string() });
                true
            }
            None => false,
        }
    }

    /// Issue the remote delete for a pending request
    ///
    /// The only path that reaches the service. At most one delete per target
    /// is in flight; a second confirm meanwhile returns `AlreadyInFlight`.
    pub async fn confirm(&self, id: &str) -> ConfirmOutcome {
        {
            let mut state = self.inner.state.lock();
            if state.in_flight.contains(id) {
                return ConfirmOutcome::AlreadyInFlight;
            }
            let Some(entry) = state.pending.remove(id) else {
                return ConfirmOutcome::NoPending;
            };
            entry.timer.cancel();
            if entry.action.is_expired(self.inner.clock.utc_now()) {
                drop(state);
                self.inner.emit(ConfirmationEvent::Expired { target_id: id.to_string() });
                return ConfirmOutcome::NoPending;
            }
            state.in_flight.insert(id.to_string());
        }
        self.inner.emit(ConfirmationEvent::Confirmed { target_id: id.to_string() });

        let result = self.inner.deleter.delete(id).await;

        let mut state = self.inner.state.lock();
        state.in_flight.remove(id);
        match result {
            Ok(()) => {
                state.items.retain(|item| item.id() != id);
                drop(state);
                info!(target_id = id, "delete confirmed by service");
                self.inner.emit(ConfirmationEvent::Deleted { target_id: id.to_string() });
                self.inner.emit(ConfirmationEvent::Notice(Notification::success(
                    self.inner.messages.success.clone(),
                )));
                ConfirmOutcome::Deleted
            }
            Err(err) => {
                drop(state);
                warn!(target_id = id, error = %err, kind = err.label(), "delete failed");
                let reason = err.to_string();
                self.inner.emit(ConfirmationEvent::DeleteFailed {
                    target_id: id.to_string(),
                    reason: reason.clone(),
                });
                self.inner.emit(ConfirmationEvent::Notice(Notification::error(
                    self.inner.messages.failure.clone(),
                )));
                ConfirmOutcome::Failed(reason)
            }
        }
    }
}

impl<T> Inner<T> {
    /// Window elapsed. Only the request that armed this timer is discarded.
    fn expire(&self, target: &str, token: Uuid) {
        let mut state = self.state.lock();
        let current = state.pending.get(target).map(|entry| entry.action.confirm_token);
        if current != Some(token) {
            return;
        }
        state.pending.remove(target);
        drop(state);

        debug!(target_id = target, "pending delete expired");
        self.emit(ConfirmationEvent::Expired { target_id: target.to_string() });
    }

    fn emit(&self, event: ConfirmationEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
