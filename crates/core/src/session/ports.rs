//! Port interfaces for session management
//!
//! These traits define the boundaries between the session guard and the
//! infrastructure that stores tokens, talks to the service and moves the user
//! between screens.

use async_trait::async_trait;
use casedesk_domain::{
    Credentials, LoginResponse, PasswordChange, ProfileUpdate, Result, UserIdentity,
};

/// Persistent storage for the session token (a single key)
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the persisted token, if any
    async fn load_token(&self) -> Result<Option<String>>;

    /// Persist a token, replacing any previous one
    async fn save_token(&self, token: &str) -> Result<()>;

    /// Remove the persisted token. Removing a missing token is not an error.
    async fn clear(&self) -> Result<()>;
}

/// Sends the user to the login surface
pub trait Navigator: Send + Sync {
    fn navigate_to_login(&self);
}

/// Authentication endpoints of the remote service
#[async_trait]
pub trait IdentityApi: Send + Sync {
    /// Exchange credentials for a token
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Identity behind the token currently attached by the transport
    async fn current_identity(&self) -> Result<UserIdentity>;

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()>;

    /// Rejections (e.g. a wrong current password) come back as
    /// `ValidationRejected`
    async fn change_password(&self, change: &PasswordChange) -> Result<()>;
}

/// Read side of the session used by the transport
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Token to attach as `Authorization: Bearer`, if one is held
    fn bearer_token(&self) -> Option<String>;

    /// Called once per call the service rejected with 401
    ///
    /// `attached` is the token the rejected request carried. A rejection for
    /// a token other than the current one refers to a revoked session.
    async fn on_auth_rejected(&self, attached: Option<&str>);
}
