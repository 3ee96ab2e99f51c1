use serde::{Deserialize, Serialize};

/// Credential acquisition configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CredentialsConfig {
    /// Which credential provider to use
    pub provider: CredentialProvider,

    /// OAuth resource the token is requested for
    #[serde(default = "default_resource")]
    pub resource: String,

    /// User-assigned managed identity to request a token for (optional)
    #[serde(default)]
    pub client_id: Option<String>,

    /// Fixed bearer token, required when `provider` is `static_token`
    #[serde(default)]
    pub token: Option<String>,

    /// Timeout for token endpoint requests in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialProvider {
    /// Platform-managed identity resolved through the instance metadata service
    ManagedIdentity,
    /// Fixed token from configuration, for emulators and tests
    StaticToken,
}

fn default_resource() -> String {
    "https://storage.azure.com/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl CredentialsConfig {
    pub fn managed_identity() -> Self {
        Self {
            provider: CredentialProvider::ManagedIdentity,
            resource: default_resource(),
            client_id: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn static_token(token: impl Into<String>) -> Self {
        Self {
            provider: CredentialProvider::StaticToken,
            resource: default_resource(),
            client_id: None,
            token: Some(token.into()),
            timeout_secs: default_timeout_secs(),
        }
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
