//! JSON file token store

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use casedesk_core::SessionStore;
use casedesk_domain::constants::SESSION_TOKEN_KEY;
use casedesk_domain::{CaseDeskError, Result};
use tracing::debug;

use crate::errors::InfraError;

/// Stores the token as `{"token": "..."}` in a JSON file
///
/// Writes go to a sibling temp file first and are renamed into place.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn storage_err(err: impl Into<InfraError>) -> CaseDeskError {
    err.into().into()
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load_token(&self) -> Result<Option<String>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(storage_err(err)),
        };

        let entries: BTreeMap<String, String> = serde_json::from_str(&contents).map_err(storage_err)?;
        Ok(entries.get(SESSION_TOKEN_KEY).cloned())
    }

    async fn save_token(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(storage_err)?;
        }

        let entries = BTreeMap::from([(SESSION_TOKEN_KEY, token)]);
        let contents = serde_json::to_vec(&entries).map_err(storage_err)?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, contents).await.map_err(storage_err)?;
        tokio::fs::rename(&temp, &self.path).await.map_err(storage_err)?;

        debug!(path = %self.path.display(), "session token saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "session token cleared");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(storage_err(err)),
        }
    }
}
