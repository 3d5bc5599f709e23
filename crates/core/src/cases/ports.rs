//! Port interfaces for the case-management service
//!
//! Implementations attach credentials and map transport failures into
//! `CaseDeskError`; callers only see domain types.

use async_trait::async_trait;
use casedesk_domain::{
    CalendarEvent, Case, CaseStats, CaseSummary, CaseUpdate, NewCalendarEvent, NewCase, Result,
};

/// Remote case and calendar operations
#[async_trait]
pub trait CaseGateway: Send + Sync {
    /// Full-text search over case titles and file numbers
    async fn search_cases(&self, query: &str) -> Result<Vec<CaseSummary>>;

    async fn list_cases(&self) -> Result<Vec<Case>>;

    async fn get_case(&self, id: &str) -> Result<Case>;

    /// Create a case. Server-side validation failures come back as
    /// `ValidationRejected` with the server's message.
    async fn create_case(&self, new_case: &NewCase) -> Result<Case>;

    /// Partial edit of a case. Rejections come back as `ValidationRejected`.
    async fn update_case(&self, id: &str, update: &CaseUpdate) -> Result<()>;

    async fn delete_case(&self, id: &str) -> Result<()>;

    /// Dashboard counters
    async fn case_stats(&self) -> Result<CaseStats>;

    /// Every event across all cases, each carrying its owning case
    async fn list_events(&self) -> Result<Vec<CalendarEvent>>;

    /// Events due soon, as selected by the service
    async fn upcoming_events(&self) -> Result<Vec<CalendarEvent>>;

    async fn create_event(&self, case_id: &str, event: &NewCalendarEvent) -> Result<CalendarEvent>;

    async fn delete_event(&self, id: &str) -> Result<()>;
}
