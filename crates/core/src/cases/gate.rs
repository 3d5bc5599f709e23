//! Readiness gate
//!
//! Dependent components must not reach the service before the session guard
//! has verified the session. [`ReadyGate`] wraps a gateway and rejects every
//! call with `NotReady` until then.

use std::sync::Arc;

use async_trait::async_trait;
use casedesk_domain::{
    CalendarEvent, Case, CaseDeskError, CaseStats, CaseSummary, CaseUpdate, NewCalendarEvent, NewCase,
    Result,
};
use tracing::debug;

use super::ports::CaseGateway;
use crate::session::SessionGuard;

pub struct ReadyGate {
    inner: Arc<dyn CaseGateway>,
    guard: Arc<SessionGuard>,
}

impl ReadyGate {
    pub fn new(inner: Arc<dyn CaseGateway>, guard: Arc<SessionGuard>) -> Self {
        Self { inner, guard }
    }

    fn ensure_ready(&self, operation: &'static str) -> Result<()> {
        if self.guard.is_ready() {
            Ok(())
        } else {
            debug!(operation, state = %self.guard.state(), "call rejected before session is ready");
            Err(CaseDeskError::NotReady)
        }
    }
}

#[async_trait]
impl CaseGateway for ReadyGate {
    async fn search_cases(&self, query: &str) -> Result<Vec<CaseSummary>> {
        self.ensure_ready("search_cases")?;
        self.inner.search_cases(query).await
    }

    async fn list_cases(&self) -> Result<Vec<Case>> {
        self.ensure_ready("list_cases")?;
        self.inner.list_cases().await
    }

    async fn get_case(&self, id: &str) -> Result<Case> {
        self.ensure_ready("get_case")?;
        self.inner.get_case(id).await
    }

    async fn create_case(&self, new_case: &NewCase) -> Result<Case> {
        self.ensure_ready("create_case")?;
        self.inner.create_case(new_case).await
    }

    async fn update_case(&self, id: &str, update: &CaseUpdate) -> Result<()> {
        self.ensure_ready("update_case")?;
        self.inner.update_case(id, update).await
    }

    async fn delete_case(&self, id: &str) -> Result<()> {
        self.ensure_ready("delete_case")?;
        self.inner.delete_case(id).await
    }

    async fn case_stats(&self) -> Result<CaseStats> {
        self.ensure_ready("case_stats")?;
        self.inner.case_stats().await
    }

    async fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        self.ensure_ready("list_events")?;
        self.inner.list_events().await
    }

    async fn upcoming_events(&self) -> Result<Vec<CalendarEvent>> {
        self.ensure_ready("upcoming_events")?;
        self.inner.upcoming_events().await
    }

    async fn create_event(&self, case_id: &str, event: &NewCalendarEvent) -> Result<CalendarEvent> {
        self.ensure_ready("create_event")?;
        self.inner.create_event(case_id, event).await
    }

    async fn delete_event(&self, id: &str) -> Result<()> {
        self.ensure_ready("delete_event")?;
        self.inner.delete_event(id).await
    }
}
