//! HTTP client for the local Garmin bridge.
//!
//! This module provides a reqwest-based implementation of the
//! [`HealthDataSource`](crate::HealthDataSource) trait.

use crate::config::{Config, Credentials};
use crate::payload::HealthPayload;
use crate::session::Session;
use crate::{HealthDataSource, HealthError, HealthRecord, ServiceStatus};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Client for the Garmin bridge using reqwest.
#[derive(Debug)]
pub struct ReqwestBridgeClient {
    base_url: String,
    credentials: Option<Credentials>,
    session_ttl: chrono::Duration,
    session: RwLock<Session>,
    client: reqwest::Client,
}

impl ReqwestBridgeClient {
    /// Create a client for a bridge that needs no login.
    ///
    /// # Arguments
    /// * `base_url` - Root URL of the bridge (e.g., "http://localhost:3001")
    pub fn new(base_url: &str) -> Self {
        Self::from_config(&Config {
            base_url: base_url.to_string(),
            ..Config::default()
        })
    }

    /// Create a client from configuration.
    ///
    /// With credentials configured the client starts with an expired session and
    /// [`HealthDataSource::reauthenticate`] must be called before the first fetch.
    pub fn from_config(config: &Config) -> Self {
        let session = if config.credentials.is_some() {
            Session::expired()
        } else {
            Session::anonymous()
        };
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            credentials: config.credentials.clone(),
            session_ttl: chrono::Duration::try_seconds(config.session_ttl_secs)
                .unwrap_or(chrono::Duration::MAX),
            session: RwLock::new(session),
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Snapshot of the current session.
    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    /// Build a GET request carrying the session token when there is one.
    async fn get_request(&self, url: &str) -> reqwest::RequestBuilder {
        let req = self.client.get(url);
        let session = self.session.read().await;
        match session.bearer() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Handle a response, converting status codes to appropriate errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, HealthError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(self.error_from_response(resp).await);
        }
        let text = resp.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| {
            let body_snippet: String = text.chars().take(256).collect();
            HealthError::Decode(format!("{e} - body: {body_snippet}"))
        })
    }

    /// Extract error information from a failed response.
    async fn error_from_response(&self, resp: reqwest::Response) -> HealthError {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let body_snippet: String = body.chars().take(256).collect();
        let message = if body_snippet.is_empty() {
            status.canonical_reason().unwrap_or_default().to_string()
        } else {
            body_snippet
        };

        match status.as_u16() {
            404 => HealthError::NotFound(message),
            401 | 403 => HealthError::Auth(message),
            code => HealthError::from_status(code, message),
        }
    }
}

#[derive(serde::Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(serde::Deserialize)]
struct LoginResponse {
    token: String,
}

#[async_trait]
impl HealthDataSource for ReqwestBridgeClient {
    async fn fetch_health_record(&self, date: NaiveDate) -> Result<HealthRecord, HealthError> {
        if self.session.read().await.is_expired() {
            return Err(HealthError::SessionExpired);
        }
        let url = format!("{}/garmin-data", self.base_url);
        let day = date.format("%Y-%m-%d").to_string();
        debug!(%url, date = %day, "fetching health record");

        let resp = self
            .get_request(&url)
            .await
            .query(&[("date", day.as_str())])
            .send()
            .await?;
        let payload: HealthPayload = self.handle_response(resp).await?;
        payload.into_record(date)
    }

    async fn check_connection(&self) -> Result<ServiceStatus, HealthError> {
        let url = format!("{}/health", self.base_url);
        let resp = self.get_request(&url).await.send().await?;
        self.handle_response(resp).await
    }

    async fn session_expired(&self) -> bool {
        self.session.read().await.is_expired()
    }

    async fn reauthenticate(&self) -> Result<(), HealthError> {
        let Some(creds) = &self.credentials else {
            *self.session.write().await = Session::anonymous();
            return Ok(());
        };

        let url = format!("{}/login", self.base_url);
        info!(username = %creds.username, "logging into Garmin bridge");
        let body = LoginRequest {
            username: &creds.username,
            password: creds.password.expose_secret(),
        };
        let resp = self.client.post(&url).json(&body).send().await?;
        let login: LoginResponse = self.handle_response(resp).await?;
        if login.token.is_empty() {
            return Err(HealthError::Auth("bridge returned an empty token".into()));
        }

        *self.session.write().await = Session::authenticated(
            SecretString::new(login.token.into()),
            Utc::now(),
            self.session_ttl,
        );
        info!("logged into Garmin bridge");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_trailing_slash() {
        let client = ReqwestBridgeClient::new("http://localhost:3001/");
        assert_eq!(client.base_url(), "http://localhost:3001");
    }

    #[tokio::test]
    async fn anonymous_client_is_ready_to_fetch() {
        let client = ReqwestBridgeClient::new("http://localhost:3001");
        assert!(!client.session_expired().await);
    }

    #[tokio::test]
    async fn credentialed_client_needs_login_first() {
        let config = Config {
            credentials: Some(Credentials {
                username: "runner".into(),
                password: SecretString::new("pw".into()),
            }),
            ..Config::default()
        };
        let client = ReqwestBridgeClient::from_config(&config);
        assert!(client.session_expired().await);
        let err = client
            .fetch_health_record(NaiveDate::from_ymd_opt(2025, 6, 27).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, HealthError::SessionExpired));
    }

    #[tokio::test]
    async fn out_of_range_ttl_does_not_panic() {
        let config = Config {
            session_ttl_secs: i64::MAX,
            ..Config::default()
        };
        let client = ReqwestBridgeClient::from_config(&config);
        assert_eq!(client.session_ttl, chrono::Duration::MAX);
        assert!(!client.session_expired().await);
    }
}
