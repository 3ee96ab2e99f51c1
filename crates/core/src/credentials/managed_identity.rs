use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::config::CredentialsConfig;
use super::traits::{CredentialError, TokenCredential};
use super::types::AccessToken;

/// Instance metadata service token endpoint.
const IMDS_TOKEN_ENDPOINT: &str = "http://169.254.169.254/metadata/identity/oauth2/token";
const IMDS_API_VERSION: &str = "2019-08-01";

/// Credential backed by the platform's managed identity.
///
/// Tokens are fetched from the instance metadata service, which is only
/// reachable from inside the hosting environment. The `Metadata: true`
/// header is required by the service to reject forwarded requests.
pub struct ManagedIdentityCredential {
    client: Client,
    endpoint: String,
    resource: String,
    client_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_on: Option<String>,
}

impl ManagedIdentityCredential {
    pub fn new(config: &CredentialsConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint: IMDS_TOKEN_ENDPOINT.to_string(),
            resource: config.resource.clone(),
            client_id: config.client_id.clone(),
        }
    }

    /// Override the metadata endpoint (used against local stand-ins).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    fn build_token_url(&self) -> String {
        let mut url = format!(
            "{}?api-version={}&resource={}",
            self.endpoint.trim_end_matches('/'),
            IMDS_API_VERSION,
            urlencoding::encode(&self.resource)
        );

        if let Some(client_id) = &self.client_id {
            url.push_str(&format!("&client_id={}", urlencoding::encode(client_id)));
        }

        url
    }
}

#[async_trait]
impl TokenCredential for ManagedIdentityCredential {
    fn provider_name(&self) -> &str {
        "managed_identity"
    }

    async fn get_token(&self) -> Result<AccessToken, CredentialError> {
        let url = self.build_token_url();
        debug!(resource = %self.resource, "Requesting managed identity token");

        let response = self
            .client
            .get(&url)
            .header("Metadata", "true")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CredentialError::Timeout
                } else {
                    CredentialError::Unreachable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CredentialError::Rejected(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| CredentialError::MalformedResponse(e.to_string()))?;

        if token_response.access_token.is_empty() {
            return Err(CredentialError::MalformedResponse(
                "empty access_token".to_string(),
            ));
        }

        let expires_at = token_response
            .expires_on
            .as_deref()
            .and_then(parse_expires_on);

        Ok(AccessToken {
            token: token_response.access_token,
            expires_at,
        })
    }
}

/// The metadata service reports expiry as unix seconds in a string field.
fn parse_expires_on(raw: &str) -> Option<DateTime<Utc>> {
    let secs = raw.trim().parse::<i64>().ok()?;
    DateTime::<Utc>::from_timestamp(secs, 0)
}
