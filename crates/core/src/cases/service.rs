//! Case service - dashboard, detail and creation flows

use std::sync::Arc;

use casedesk_common::Clock;
use casedesk_domain::{
    CalendarEvent, Case, CaseDeskError, CaseStats, CaseUpdate, MonthGrid, NewCalendarEvent, NewCase,
    Result, YearMonth,
};
use chrono::TimeZone;
use tracing::{info, instrument};

use super::activity;
use super::ports::CaseGateway;
use crate::calendar::{build_month_grid, sort_chronologically};

/// Everything the dashboard shows, fetched together
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub stats: CaseStats,
    /// Ordered from longest to shortest without review
    pub cases: Vec<Case>,
    pub upcoming: Vec<CalendarEvent>,
}

/// Case flows built on top of the gateway
pub struct CaseService {
    gateway: Arc<dyn CaseGateway>,
    clock: Arc<dyn Clock>,
}

impl CaseService {
    pub fn new(gateway: Arc<dyn CaseGateway>, clock: Arc<dyn Clock>) -> Self {
        Self { gateway, clock }
    }

    /// Load stats, cases and upcoming events concurrently
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> Result<Dashboard> {
        let (stats, cases, mut upcoming) = tokio::try_join!(
            self.gateway.case_stats(),
            self.gateway.list_cases(),
            self.gateway.upcoming_events(),
        )?;

        let now = self.clock.utc_now();
        let cases = activity::by_inactivity(&cases, now).into_iter().cloned().collect();
        sort_chronologically(&mut upcoming);

        Ok(Dashboard { stats, cases, upcoming })
    }

    /// Case detail with its agenda in chronological order
    #[instrument(skip(self))]
    pub async fn case_detail(&self, id: &str) -> Result<Case> {
        let mut case = self.gateway.get_case(id).await?;
        sort_chronologically(&mut case.events);
        Ok(case)
    }

    #[instrument(skip(self, new_case), fields(title = %new_case.title))]
    pub async fn create_case(&self, new_case: &NewCase) -> Result<Case> {
        let case = self.gateway.create_case(new_case).await?;
        info!(case_id = %case.id, "case created");
        Ok(case)
    }

    /// Apply an edit and return the case as the service now stores it
    #[instrument(skip(self, update))]
    pub async fn update_case(&self, id: &str, update: &CaseUpdate) -> Result<Case> {
        if update.is_empty() {
            return Err(CaseDeskError::InvalidInput("no fields to update".into()));
        }
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(CaseDeskError::InvalidInput("caratula must not be empty".into()));
        }

        self.gateway.update_case(id, update).await?;
        info!(case_id = %id, "case updated");
        self.case_detail(id).await
    }

    #[instrument(skip(self, event), fields(kind = %event.kind))]
    pub async fn schedule_event(&self, case_id: &str, event: &NewCalendarEvent) -> Result<CalendarEvent> {
        let created = self.gateway.create_event(case_id, event).await?;
        info!(event_id = %created.id, "event scheduled");
        Ok(created)
    }

    /// Month grid over every event of every case, bucketed in `tz`
    #[instrument(skip(self, tz), fields(month = %month))]
    pub async fn month_agenda<Tz: TimeZone>(&self, month: YearMonth, tz: &Tz) -> Result<MonthGrid> {
        let events = self.gateway.list_events().await?;
        build_month_grid(&events, month.year, month.month, tz)
    }
}
