//! `RemoteDeleter` adapters over the case gateway

use std::sync::Arc;

use async_trait::async_trait;
use casedesk_domain::Result;

use super::ports::RemoteDeleter;
use crate::cases::ports::CaseGateway;

/// Deletes cases (`DELETE /causas/{id}`)
pub struct CaseDeleter {
    gateway: Arc<dyn CaseGateway>,
}

impl CaseDeleter {
    pub fn new(gateway: Arc<dyn CaseGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RemoteDeleter for CaseDeleter {
    async fn delete(&self, id: &str) -> Result<()> {
        self.gateway.delete_case(id).await
    }
}

/// Deletes calendar events (`DELETE /causas/eventos/{id}`)
pub struct EventDeleter {
    gateway: Arc<dyn CaseGateway>,
}

impl EventDeleter {
    pub fn new(gateway: Arc<dyn CaseGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl RemoteDeleter for EventDeleter {
    async fn delete(&self, id: &str) -> Result<()> {
        self.gateway.delete_event(id).await
    }
}
