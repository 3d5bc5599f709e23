//! API client (transport adapter)
//!
//! Attaches the bearer token held by the session guard, reports rejected
//! credentials back to it and maps responses into [`ApiError`].

use std::sync::Arc;
use std::time::Duration;

use casedesk_common::{ErrorClassification, ErrorSeverity};
use casedesk_core::CredentialSource;
use casedesk_domain::ApiConfig;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use super::errors::ApiError;
use crate::http::HttpClient;

/// Configuration for API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL for the service (e.g., "http://localhost:3000/api")
    pub base_url: String,
    /// Timeout for API requests
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self::from(&ApiConfig::default())
    }
}

impl From<&ApiConfig> for ApiClientConfig {
    fn from(config: &ApiConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout(),
            user_agent: format!("casedesk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Whether a request carries the session's credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Bearer,
    /// Login: a 401 means wrong credentials, not an expired session
    Anonymous,
}

/// HTTP transport for the case-management service
pub struct ApiClient {
    http_client: HttpClient,
    credentials: Arc<dyn CredentialSource>,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Config` if the base URL is invalid or the HTTP
    /// client cannot be created
    pub fn new(config: ApiClientConfig, credentials: Arc<dyn CredentialSource>) -> Result<Self, ApiError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| ApiError::Config(format!("Invalid base URL '{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!("Base URL cannot carry paths: {}", config.base_url)));
        }

        let http_client = HttpClient::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HttpClient: {}", e)))?;

        Ok(Self { http_client, credentials, base_url })
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Execute a GET request against `segments` below the base URL
    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        self.get_with_query(segments, &[]).await
    }

    /// Execute a GET request with query parameters (encoded by the client)
    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let response =
            self.execute(Method::GET, segments, query, None, AuthMode::Bearer).await?;
        Self::decode(response).await
    }

    /// Execute a POST request with a JSON body
    pub async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<R, ApiError> {
        let body = Self::encode(body)?;
        let response =
            self.execute(Method::POST, segments, &[], Some(body), AuthMode::Bearer).await?;
        Self::decode(response).await
    }

    /// POST without credentials. A 401 here does not touch the session.
    pub async fn post_anonymous<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> Result<R, ApiError> {
        let body = Self::encode(body)?;
        let response =
            self.execute(Method::POST, segments, &[], Some(body), AuthMode::Anonymous).await?;
        Self::decode(response).await
    }

    /// Execute a PATCH request with a JSON body. Any response body is ignored.
    pub async fn patch<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<(), ApiError> {
        let body = Self::encode(body)?;
        self.execute(Method::PATCH, segments, &[], Some(body), AuthMode::Bearer).await?;
        Ok(())
    }

    /// POST whose response body is ignored
    pub async fn post_unit<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<(), ApiError> {
        let body = Self::encode(body)?;
        self.execute(Method::POST, segments, &[], Some(body), AuthMode::Bearer).await?;
        Ok(())
    }

    /// Execute a DELETE request. Any response body is ignored.
    pub async fn delete(&self, segments: &[&str]) -> Result<(), ApiError> {
        self.execute(Method::DELETE, segments, &[], None, AuthMode::Bearer).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(method = %method, path = %segments.join("/")))]
    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, &str)],
        body: Option<serde_json::Value>,
        auth: AuthMode,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(segments)?;

        let mut request = self.http_client.request(method, url);
        let attached = match auth {
            AuthMode::Bearer => self.credentials.bearer_token(),
            AuthMode::Anonymous => None,
        };
        if let Some(token) = &attached {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = self.http_client.send(request).await.map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            debug!(%status, "request successful");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = Self::map_status_error(status, &body);

        if status == StatusCode::UNAUTHORIZED && auth == AuthMode::Bearer {
            info!("credentials rejected by service");
            self.credentials.on_auth_rejected(attached.as_deref()).await;
        } else if err.severity() >= ErrorSeverity::Error {
            error!(%status, error = %err, "request failed");
        } else {
            warn!(%status, error = %err, "request failed");
        }

        Err(err)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Config(format!("Base URL cannot carry paths: {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn encode<B: Serialize + ?Sized>(body: &B) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(body)
            .map_err(|e| ApiError::Config(format!("Failed to serialize body: {}", e)))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))?;

        // 204/205 and empty bodies decode as JSON null
        if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT || bytes.is_empty() {
            return serde_json::from_value(serde_json::Value::Null).map_err(|_| {
                ApiError::Decode(format!("Empty response ({}) where a body was expected", status.as_u16()))
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn map_status_error(status: StatusCode, body: &str) -> ApiError {
        let message = server_message(body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_string());
        let code = status.as_u16();

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(message),
            s if s.is_server_error() => ApiError::Server { status: code, message },
            _ => ApiError::Client { status: code, message },
        }
    }
}

/// Human-readable message from an error body
///
/// Accepts `{"message": "..."}`, `{"message": ["...", "..."]}` and
/// `{"error": "..."}`; anything else is used as plain text.
fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    match value.get("message").or_else(|| value.get("error")) {
        Some(serde_json::Value::String(message)) => Some(message.clone()),
        Some(serde_json::Value::Array(parts)) => {
            let parts: Vec<&str> = parts.iter().filter_map(serde_json::Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join("; "))
        }
        _ => Some(trimmed.to_string()),
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<ApiClientConfig>,
    credentials: Option<Arc<dyn CredentialSource>>,
}

impl ApiClientBuilder {
    /// Set the API configuration
    pub fn config(mut self, config: ApiClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the credential source (normally the session guard)
    pub fn credentials(mut self, credentials: Arc<dyn CredentialSource>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if required fields are missing or client creation fails
    pub fn build(self) -> Result<ApiClient, ApiError> {
        let config = self.config.unwrap_or_default();
        let credentials = self
            .credentials
            .ok_or_else(|| ApiError::Config("Credential source not set".to_string()))?;

        ApiClient::new(config, credentials)
    }
}
