//! Application context - dependency injection container

use std::sync::Arc;

use casedesk_common::{Clock, SystemClock};
use casedesk_core::{
    CaseDeleter, CaseGateway, CaseService, ConfirmationProtocol, DeleteMessages, EventDeleter,
    IdentityApi, ReadyGate, SearchCoordinator, SearchSettings, SessionGuard, SessionStore,
};
use casedesk_domain::{
    CalendarEvent, Case, CaseDeskError, Config, Credentials, PasswordChange, ProfileUpdate, Result,
    SessionState, SessionStoreKind, UserIdentity,
};
use casedesk_infra::{
    ApiClient, ApiClientConfig, ChannelNavigator, FileSessionStore, HttpCaseGateway,
    KeychainSessionStore, NavigationRequest,
};
use tokio::sync::mpsc::UnboundedReceiver;

/// Application context - holds every component and its wiring
pub struct AppContext {
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub guard: Arc<SessionGuard>,
    /// Ungated gateway for the identity calls, which the guard gates itself
    identity: Arc<HttpCaseGateway>,
    /// Gateway that refuses calls until the session is `Ready`
    pub cases: Arc<dyn CaseGateway>,
    pub case_service: Arc<CaseService>,
    pub search: SearchCoordinator,
    pub case_deletions: ConfirmationProtocol<Case>,
    pub event_deletions: ConfirmationProtocol<CalendarEvent>,
}

impl AppContext {
    /// Build the context with the token store selected by `config`
    ///
    /// Returns the context and the stream of navigation requests emitted by
    /// the session guard.
    ///
    /// # Errors
    /// Returns `CaseDeskError::Config` for an invalid base URL and
    /// `CaseDeskError::Storage` if the keychain cannot be opened.
    pub fn new(config: Config) -> Result<(Self, UnboundedReceiver<NavigationRequest>)> {
        let store: Arc<dyn SessionStore> = match config.session.store {
            SessionStoreKind::File => Arc::new(FileSessionStore::new(&config.session.path)),
            SessionStoreKind::Keychain => Arc::new(KeychainSessionStore::new()?),
        };
        Self::with_store(config, store)
    }

    /// Build the context around an explicit token store
    ///
    /// # Errors
    /// Returns `CaseDeskError::Config` for an invalid base URL.
    pub fn with_store(
        config: Config,
        store: Arc<dyn SessionStore>,
    ) -> Result<(Self, UnboundedReceiver<NavigationRequest>)> {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let (navigator, navigation) = ChannelNavigator::new();

        let guard = Arc::new(SessionGuard::new(
            store,
            Arc::new(navigator),
            clock.clone(),
            config.session.min_loading(),
        ));

        let client = ApiClient::new(ApiClientConfig::from(&config.api), guard.clone())
            .map_err(CaseDeskError::from)?;
        let identity = Arc::new(HttpCaseGateway::new(Arc::new(client)));

        let cases: Arc<dyn CaseGateway> = Arc::new(ReadyGate::new(identity.clone(), guard.clone()));
        let case_service = Arc::new(CaseService::new(cases.clone(), clock.clone()));
        let search = SearchCoordinator::new(cases.clone(), SearchSettings::from(&config.search));

        let window = config.confirmation.window();
        let case_deletions = ConfirmationProtocol::new(
            Arc::new(CaseDeleter::new(cases.clone())),
            clock.clone(),
            window,
            DeleteMessages::for_cases(),
        );
        let event_deletions = ConfirmationProtocol::new(
            Arc::new(EventDeleter::new(cases.clone())),
            clock.clone(),
            window,
            DeleteMessages::for_events(),
        );

        tracing::info!(
            base_url = %config.api.base_url,
            store = ?config.session.store,
            "application context created"
        );

        let context = Self {
            config,
            clock,
            guard,
            identity,
            cases,
            case_service,
            search,
            case_deletions,
            event_deletions,
        };
        Ok((context, navigation))
    }

    /// Run the bootstrap verification once
    pub async fn initialize(&self) -> SessionState {
        self.guard.initialize(self.identity_api()).await
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<UserIdentity> {
        self.guard.sign_in(self.identity_api(), credentials).await
    }

    pub async fn sign_out(&self) {
        self.guard.sign_out().await;
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserIdentity> {
        self.guard.update_profile(self.identity_api(), update).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        self.guard.change_password(self.identity_api(), change).await
    }

    fn identity_api(&self) -> &dyn IdentityApi {
        self.identity.as_ref()
    }
}
