//! Port interfaces for confirmed deletes

use async_trait::async_trait;
use casedesk_domain::{CalendarEvent, Case, CaseSummary, Result};

/// Items held in a list that supports confirmed deletion
pub trait Identified {
    fn id(&self) -> &str;

    /// Human label used in confirmation prompts
    fn label(&self) -> &str {
        self.id()
    }
}

impl Identified for Case {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

impl Identified for CaseSummary {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

impl Identified for CalendarEvent {
    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> &str {
        &self.title
    }
}

/// Issues the remote delete for a confirmed target
#[async_trait]
pub trait RemoteDeleter: Send + Sync {
    async fn delete(&self, id: &str) -> Result<()>;
}
