use async_trait::async_trait;

use super::traits::{CredentialError, TokenCredential};
use super::types::AccessToken;

/// Credential that hands out a fixed token from configuration.
///
/// Meant for storage emulators and local development where no metadata
/// service exists.
pub struct StaticTokenCredential {
    token: String,
}

impl StaticTokenCredential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenCredential for StaticTokenCredential {
    fn provider_name(&self) -> &str {
        "static_token"
    }

    async fn get_token(&self) -> Result<AccessToken, CredentialError> {
        Ok(AccessToken::new(self.token.clone()))
    }
}
