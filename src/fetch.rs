// src/fetch.rs

//! Client for the Red Hat AppStream lifecycle API.
//!
//! Access requires exchanging an offline token for a short-lived access
//! token at the Red Hat SSO endpoint, then calling the roadmap app-streams
//! endpoint with a bearer header. Only the `fetch` command uses this module;
//! the evaluation core never touches the network.

use crate::error::{Error, Result};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Red Hat SSO token endpoint
pub const SSO_TOKEN_URL: &str =
    "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token";

/// OAuth client id registered for the subscription management API
pub const SSO_CLIENT_ID: &str = "rhsm-api";

/// AppStream lifecycle endpoint
pub const APPSTREAMS_URL: &str = "https://console.redhat.com/api/roadmap/v1/lifecycle/app-streams";

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for SSO login and lifecycle data retrieval
pub struct AppStreamClient {
    client: Client,
}

impl AppStreamClient {
    /// Create a new client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Exchange an offline token for an access token via Red Hat SSO
    pub fn login(&self, offline_access_token: &str) -> Result<String> {
        if offline_access_token.is_empty() {
            return Err(Error::Http("OFFLINE_ACCESS_TOKEN is empty".to_string()));
        }

        let payload = [
            ("grant_type", "refresh_token"),
            ("client_id", SSO_CLIENT_ID),
            ("refresh_token", offline_access_token),
        ];

        let response = self
            .client
            .post(SSO_TOKEN_URL)
            .form(&payload)
            .send()
            .map_err(|e| Error::Http(format!("login request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::Http(format!("failed to read login response: {e}")))?;

        if !status.is_success() {
            return Err(Error::Http(format!("login failed (HTTP {status}): {body}")));
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| Error::Http(format!("invalid login response: {e}")))?;

        match data.get("access_token").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => {
                debug!("access token acquired (prefix): {}...", &token[..token.len().min(12)]);
                Ok(token.to_string())
            }
            _ => Err(Error::Http("login response missing access_token".to_string())),
        }
    }

    /// Fetch the raw AppStream lifecycle payload
    pub fn get_appstreams(&self, access_token: &str) -> Result<Value> {
        let response = self
            .client
            .get(APPSTREAMS_URL)
            .bearer_auth(access_token)
            .header("Content-Type", "application/json")
            .send()
            .map_err(|e| Error::Http(format!("appstreams request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| Error::Http(format!("failed to read appstreams response: {e}")))?;

        if !status.is_success() {
            return Err(Error::Http(format!(
                "appstreams request failed (HTTP {status}): {body}"
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Http(format!("invalid appstreams response: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_rejects_empty_offline_token() {
        let client = AppStreamClient::new().unwrap();
        let err = client.login("").unwrap_err();
        assert!(err.to_string().contains("OFFLINE_ACCESS_TOKEN"));
    }
}
