//! Session guard
//!
//! Holds the session token in memory, verifies it once per load and turns any
//! authentication failure into a single trip to the login surface.
//!
//! State machine:
//!
//! ```text
//! Initializing --(no token)------------------------> Unauthenticated
//! Initializing --(identity ok, floor elapsed)------> Ready
//! Initializing --(identity failed, floor elapsed)--> Unauthenticated
//! Ready        --(401 / sign_out)------------------> Unauthenticated
//! Unauthenticated --(sign_in)----------------------> Ready
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use casedesk_common::Clock;
use casedesk_domain::{
    CaseDeskError, Credentials, PasswordChange, ProfileUpdate, Result, Session, SessionState,
    UserIdentity,
};
use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, instrument, warn};

use super::ports::{CredentialSource, IdentityApi, Navigator, SessionStore};

/// Owner of the session token and of the session state
pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
    clock: Arc<dyn Clock>,
    min_loading: Duration,
    session: RwLock<Option<Session>>,
    identity: RwLock<Option<UserIdentity>>,
    state_tx: watch::Sender<SessionState>,
    /// Single-shot latch: set once the login surface has been requested
    navigated: AtomicBool,
}

impl SessionGuard {
    /// Create a guard in the `Initializing` state
    pub fn new(
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
        min_loading: Duration,
    ) -> Self {
        let (state_tx, _) = watch::channel(SessionState::Initializing);
        Self {
            store,
            navigator,
            clock,
            min_loading,
            session: RwLock::new(None),
            identity: RwLock::new(None),
            state_tx,
            navigated: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state_tx.borrow()
    }

    pub fn is_ready(&self) -> bool {
        self.state() == SessionState::Ready
    }

    /// Watch state transitions
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state_tx.subscribe()
    }

    /// Identity verified during bootstrap or sign-in
    pub fn identity(&self) -> Option<UserIdentity> {
        self.identity.read().clone()
    }

    /// Current token. The transport is the only intended reader.
    pub fn token(&self) -> Option<String> {
        self.session.read().as_ref().map(|s| s.token.clone())
    }

    /// When the current session was established locally
    pub fn session_started_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        self.session.read().as_ref().map(|s| s.issued_at)
    }

    /// Bootstrap verification, run once per application load
    ///
    /// Without a persisted token the guard goes straight to
    /// `Unauthenticated`. Otherwise one identity call is made and its outcome
    /// is held until the loading floor has elapsed since the start.
    #[instrument(skip(self, identity_api))]
    pub async fn initialize(&self, identity_api: &dyn IdentityApi) -> SessionState {
        let started = Instant::now();

        let token = match self.store.load_token().await {
            Ok(token) => token.filter(|t| !t.trim().is_empty()),
            Err(err) => {
                warn!(error = %err, "failed to read persisted session token");
                None
            }
        };

        let Some(token) = token else {
            debug!("no persisted session token");
            self.invalidate().await;
            return self.state();
        };

        *self.session.write() = Some(Session::new(token, self.clock.utc_now()));
        let verification = identity_api.current_identity().await;

        sleep_until(started + self.min_loading).await;

        match verification {
            Ok(user) if self.session.read().is_some() => {
                info!(user_id = %user.id, "session verified");
                *self.identity.write() = Some(user);
                self.navigated.store(false, Ordering::SeqCst);
                self.state_tx.send_replace(SessionState::Ready);
            }
            Ok(_) => {
                debug!("session dropped while verifying");
                self.invalidate().await;
            }
            Err(err) => {
                // Failures are uniform: expired, network and decode errors all
                // end on the login surface.
                warn!(error = %err, kind = err.label(), "session verification failed");
                self.invalidate().await;
            }
        }

        self.state()
    }

    /// Exchange credentials for a token and establish a `Ready` session
    #[instrument(skip(self, identity_api, credentials), fields(email = %credentials.email))]
    pub async fn sign_in(
        &self,
        identity_api: &dyn IdentityApi,
        credentials: &Credentials,
    ) -> Result<UserIdentity> {
        let response = identity_api.login(credentials).await?;
        if response.access_token.trim().is_empty() {
            return Err(CaseDeskError::Decode("login response carried an empty token".into()));
        }

        self.store.save_token(&response.access_token).await?;
        *self.session.write() = Some(Session::new(response.access_token, self.clock.utc_now()));

        match identity_api.current_identity().await {
            Ok(user) => {
                info!(user_id = %user.id, "signed in");
                *self.identity.write() = Some(user.clone());
                self.navigated.store(false, Ordering::SeqCst);
                self.state_tx.send_replace(SessionState::Ready);
                Ok(user)
            }
            Err(err) => {
                // Still on the login surface, so no navigation.
                self.drop_session().await;
                self.state_tx.send_replace(SessionState::Unauthenticated);
                Err(err)
            }
        }
    }

    /// Edit the signed-in user's profile and refresh the held identity
    #[instrument(skip(self, identity_api, update))]
    pub async fn update_profile(
        &self,
        identity_api: &dyn IdentityApi,
        update: &ProfileUpdate,
    ) -> Result<UserIdentity> {
        self.ensure_ready()?;
        identity_api.update_profile(update).await?;

        let user = identity_api.current_identity().await?;
        if self.is_ready() {
            *self.identity.write() = Some(user.clone());
        }
        info!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    /// Change the password. The form is validated before anything is sent.
    #[instrument(skip(self, identity_api, change))]
    pub async fn change_password(
        &self,
        identity_api: &dyn IdentityApi,
        change: &PasswordChange,
    ) -> Result<()> {
        change.validate()?;
        self.ensure_ready()?;
        identity_api.change_password(change).await?;
        info!("password changed");
        Ok(())
    }

    /// Explicit logout
    pub async fn sign_out(&self) {
        info!("signing out");
        self.invalidate().await;
    }

    /// Revoke the session and request the login surface
    ///
    /// Idempotent: concurrent callers produce one state change and at most one
    /// navigation.
    pub async fn invalidate(&self) {
        let previous = self.state_tx.send_replace(SessionState::Unauthenticated);
        if previous == SessionState::Unauthenticated {
            return;
        }

        debug!(previous = %previous, "invalidating session");
        self.drop_session().await;

        if !self.navigated.swap(true, Ordering::SeqCst) {
            self.navigator.navigate_to_login();
        }
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            Err(CaseDeskError::NotReady)
        }
    }

    async fn drop_session(&self) {
        self.session.write().take();
        self.identity.write().take();
        if let Err(err) = self.store.clear().await {
            warn!(error = %err, "failed to clear persisted session token");
        }
    }
}

#[async_trait]
impl CredentialSource for SessionGuard {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }

    async fn on_auth_rejected(&self, attached: Option<&str>) {
        let current = self.token();
        if current.as_deref() != attached {
            debug!("ignoring rejection of a superseded token");
            return;
        }
        if self.state() == SessionState::Initializing {
            // Bootstrap decides the outcome once the loading floor has
            // elapsed; only the credentials are dropped here.
            self.drop_session().await;
            return;
        }
        self.invalidate().await;
    }
}
