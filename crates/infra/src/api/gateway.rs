//! HTTP implementation of the identity and case ports

use std::sync::Arc;

use async_trait::async_trait;
use casedesk_core::{CaseGateway, IdentityApi};
use casedesk_domain::{
    CalendarEvent, Case, CaseStats, CaseSummary, CaseUpdate, Credentials, LoginResponse,
    NewCalendarEvent, NewCase, PasswordChange, ProfileUpdate, Result, UserIdentity,
};
use tracing::instrument;

use super::client::ApiClient;

const CASES: &str = "causas";
const EVENTS: &str = "eventos";
const ME: [&str; 2] = ["users", "me"];

/// Maps the service's REST endpoints onto the core ports
#[derive(Clone)]
pub struct HttpCaseGateway {
    client: Arc<ApiClient>,
}

impl HttpCaseGateway {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityApi for HttpCaseGateway {
    #[instrument(skip(self, credentials))]
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        Ok(self.client.post_anonymous(&["auth", "login"], credentials).await?)
    }

    #[instrument(skip(self))]
    async fn current_identity(&self) -> Result<UserIdentity> {
        Ok(self.client.get(&ME).await?)
    }

    #[instrument(skip(self, update))]
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<()> {
        Ok(self.client.patch(&ME, update).await?)
    }

    #[instrument(skip(self, change))]
    async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        Ok(self.client.post_unit(&["users", "me", "password"], change).await?)
    }
}

#[async_trait]
impl CaseGateway for HttpCaseGateway {
    #[instrument(skip(self, query))]
    async fn search_cases(&self, query: &str) -> Result<Vec<CaseSummary>> {
        Ok(self.client.get_with_query(&[CASES, "search"], &[("q", query)]).await?)
    }

    #[instrument(skip(self))]
    async fn list_cases(&self) -> Result<Vec<Case>> {
        Ok(self.client.get(&[CASES]).await?)
    }

    #[instrument(skip(self))]
    async fn get_case(&self, id: &str) -> Result<Case> {
        Ok(self.client.get(&[CASES, id]).await?)
    }

    #[instrument(skip(self, new_case))]
    async fn create_case(&self, new_case: &NewCase) -> Result<Case> {
        Ok(self.client.post(&[CASES], new_case).await?)
    }

    #[instrument(skip(self, update))]
    async fn update_case(&self, id: &str, update: &CaseUpdate) -> Result<()> {
        Ok(self.client.patch(&[CASES, id], update).await?)
    }

    #[instrument(skip(self))]
    async fn delete_case(&self, id: &str) -> Result<()> {
        Ok(self.client.delete(&[CASES, id]).await?)
    }

    #[instrument(skip(self))]
    async fn case_stats(&self) -> Result<CaseStats> {
        Ok(self.client.get(&[CASES, "stats", "general"]).await?)
    }

    #[instrument(skip(self))]
    async fn list_events(&self) -> Result<Vec<CalendarEvent>> {
        Ok(self.client.get(&[CASES, EVENTS, "todos"]).await?)
    }

    #[instrument(skip(self))]
    async fn upcoming_events(&self) -> Result<Vec<CalendarEvent>> {
        Ok(self.client.get(&[CASES, EVENTS, "proximos"]).await?)
    }

    #[instrument(skip(self, event))]
    async fn create_event(&self, case_id: &str, event: &NewCalendarEvent) -> Result<CalendarEvent> {
        Ok(self.client.post(&[CASES, case_id, EVENTS], event).await?)
    }

    #[instrument(skip(self))]
    async fn delete_event(&self, id: &str) -> Result<()> {
        Ok(self.client.delete(&[CASES, EVENTS, id]).await?)
    }
}
