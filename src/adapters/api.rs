use crate::domain::model::{Blocklist, LogEntry};
use crate::domain::ports::{BlocklistDirectory, LogSource};
use crate::utils::error::{AuditError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.nextdns.io";

// The API answers 403 to default library user agents, so we always send our own.
const USER_AGENT: &str = concat!("blocklist-audit/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
struct Envelope<T> {
    data: Vec<T>,
}

/// Read-only client for the two NextDNS endpoints this tool needs: the
/// blocked-query log and the profile's subscribed blocklist metadata.
#[derive(Debug, Clone)]
pub struct NextDnsClient {
    client: Client,
    base_url: String,
    api_key: String,
    profile_id: String,
    limit: usize,
}

impl NextDnsClient {
    pub fn new(base_url: String, api_key: String, profile_id: String, limit: usize) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            profile_id,
            limit,
        }
    }

    pub fn profile_id(&self) -> &str {
        &self.profile_id
    }

    async fn get_data<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        let response = Self::check_status(response).await?;

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        match status {
            s if s.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AuditError::AuthError {
                status: status.as_u16(),
            }),
            _ => {
                let body = response.text().await.unwrap_or_default();
                let snippet: String = body.chars().take(200).collect();
                Err(AuditError::ApiStatusError {
                    status: status.as_u16(),
                    body: snippet,
                })
            }
        }
    }
}

#[async_trait]
impl LogSource for NextDnsClient {
    async fn fetch_blocked(&self) -> Result<Vec<LogEntry>> {
        let url = format!(
            "{}/profiles/{}/logs?status=blocked&limit={}",
            self.base_url, self.profile_id, self.limit
        );
        self.get_data(&url).await
    }
}

#[async_trait]
impl BlocklistDirectory for NextDnsClient {
    async fn subscribed_blocklists(&self) -> Result<Vec<Blocklist>> {
        let url = format!(
            "{}/profiles/{}/privacy/blocklists",
            self.base_url, self.profile_id
        );
        self.get_data(&url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> NextDnsClient {
        NextDnsClient::new(
            server.base_url(),
            "test-key".to_string(),
            "abc123".to_string(),
            1000,
        )
    }

    #[tokio::test]
    async fn test_fetch_blocked_sends_key_and_user_agent() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/profiles/abc123/logs")
                .query_param("status", "blocked")
                .query_param("limit", "1000")
                .header("X-Api-Key", "test-key")
                .header("User-Agent", USER_AGENT);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "data": [
                        {"domain": "ads.example.com", "reasons": [{"id": "oisd", "name": "OISD"}]},
                        {"domain": "tracker.example.net", "reasons": [{"id": "oisd"}, {"id": "easylist"}]}
                    ]
                }));
        });

        let entries = client_for(&server).fetch_blocked().await.unwrap();

        mock.assert();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].domain, "ads.example.com");
        assert_eq!(entries[0].reasons[0].id, "oisd");
        assert_eq!(entries[1].reasons.len(), 2);
    }

    #[tokio::test]
    async fn test_forbidden_maps_to_auth_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/profiles/abc123/logs");
            then.status(403);
        });

        let err = client_for(&server).fetch_blocked().await.unwrap_err();
        assert!(matches!(err, AuditError::AuthError { status: 403 }));
    }

    #[tokio::test]
    async fn test_server_error_carries_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/profiles/abc123/logs");
            then.status(500).body("upstream exploded");
        });

        let err = client_for(&server).fetch_blocked().await.unwrap_err();
        match err {
            AuditError::ApiStatusError { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("upstream exploded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_subscribed_blocklists_parses_metadata() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/profiles/abc123/privacy/blocklists")
                .header("X-Api-Key", "test-key");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "data": [
                        {"id": "oisd", "name": "OISD", "entries": 212345,
                         "updatedOn": "2026-08-01T12:00:00Z"},
                        {"id": "stale-list"}
                    ]
                }));
        });

        let lists = client_for(&server).subscribed_blocklists().await.unwrap();

        mock.assert();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].id, "oisd");
        assert_eq!(lists[0].entries, Some(212345));
        assert!(lists[0].updated_on.is_some());
        assert!(lists[1].updated_on.is_none());
    }
}
