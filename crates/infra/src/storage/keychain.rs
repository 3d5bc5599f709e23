//! OS keychain token store
use std::sync::Arc;

use async_trait::async_trait;
use casedesk_core::SessionStore;
use casedesk_domain::constants::SESSION_TOKEN_KEY;
use casedesk_domain::{CaseDeskError, Result};
use keyring::Entry;

use crate::errors::InfraError;

pub const SERVICE_NAME: &str = "com.casedesk.client";

/// Stores the token in the platform keychain under `SERVICE_NAME` / `token`
///
/// Keychain calls block, so they run on the blocking pool.
#[derive(Clone)]
pub struct KeychainSessionStore {
    entry: Arc<Entry>,
}

impl KeychainSessionStore {
    pub fn new() -> Result<Self> {
        Self::with_service(SERVICE_NAME)
    }

    pub fn with_service(service: &str) -> Result<Self> {
        let entry = Entry::new(service, SESSION_TOKEN_KEY)
            .map_err(|e| CaseDeskError::from(InfraError::from(e)))?;
        Ok(Self { entry: Arc::new(entry) })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Entry) -> std::result::Result<T, keyring::Error> + Send + 'static,
    {
        let entry = Arc::clone(&self.entry);
        tokio::task::spawn_blocking(move || op(&entry))
            .await
            .map_err(|e| CaseDeskError::Internal(format!("keychain task failed: {e}")))?
            .map_err(|e| InfraError::from(e).into())
    }
}

#[async_trait]
impl SessionStore for KeychainSessionStore {
    async fn load_token(&self) -> Result<Option<String>> {
        self.blocking(|entry| match entry.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(err) => Err(err),
        })
        .await
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        let token = token.to_string();
        self.blocking(move |entry| entry.set_password(&token)).await
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(err),
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trip_with_mock_backend() {
        keyring::set_default_credential_builder(keyring::mock::default_credential_builder());
        let store = KeychainSessionStore::with_service("casedesk-test").unwrap();

        assert_eq!(store.load_token().await.unwrap(), None);
        store.save_token("jwt").await.unwrap();
        assert_eq!(store.load_token().await.unwrap().as_deref(), Some("jwt"));

        store.clear().await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.load_token().await.unwrap(), None);
    }
}
