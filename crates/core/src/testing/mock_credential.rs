//! Mock credential for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::credentials::{AccessToken, CredentialError, TokenCredential};

/// Mock implementation of the TokenCredential trait.
///
/// Provides controllable behavior for testing:
/// - Serve a configurable fixed token
/// - Count how many times a token was issued
/// - Inject a one-shot error
#[derive(Debug)]
pub struct MockCredential {
    /// Token served to callers.
    token: Arc<RwLock<String>>,
    /// Number of successful issues.
    issued: Arc<RwLock<usize>>,
    /// If set, the next request will fail with this error.
    next_error: Arc<RwLock<Option<CredentialError>>>,
}

impl Default for MockCredential {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCredential {
    /// Create a new mock credential serving `"mock-token"`.
    pub fn new() -> Self {
        Self {
            token: Arc::new(RwLock::new("mock-token".to_string())),
            issued: Arc::new(RwLock::new(0)),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Change the token served to callers.
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = token.into();
    }

    /// Number of tokens issued so far.
    pub async fn issue_count(&self) -> usize {
        *self.issued.read().await
    }

    /// Configure the next request to fail with the given error.
    pub async fn set_next_error(&self, error: CredentialError) {
        *self.next_error.write().await = Some(error);
    }
}

#[async_trait]
impl TokenCredential for MockCredential {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn get_token(&self) -> Result<AccessToken, CredentialError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }

        *self.issued.write().await += 1;
        Ok(AccessToken::new(self.token.read().await.clone()))
    }
}
