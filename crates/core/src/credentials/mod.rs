//! Credential acquisition for storage access.
//!
//! A [`TokenCredential`] produces bearer tokens for blob requests. The
//! managed identity provider talks to the instance metadata service; the
//! static provider serves a fixed token for emulators and tests. Which one
//! runs is decided once at startup and injected into the relay pipeline.

mod config;
mod managed_identity;
mod static_token;
mod traits;
mod types;

pub use config::*;
pub use managed_identity::*;
pub use static_token::*;
pub use traits::*;
pub use types::*;

use std::sync::Arc;

/// Factory function to create a credential from config
pub fn create_credential(
    config: &CredentialsConfig,
) -> Result<Arc<dyn TokenCredential>, CredentialError> {
    match config.provider {
        CredentialProvider::ManagedIdentity => {
            Ok(Arc::new(ManagedIdentityCredential::new(config)))
        }
        CredentialProvider::StaticToken => {
            let token = config.token.clone().ok_or_else(|| {
                CredentialError::ConfigurationError(
                    "token must be set when using static_token provider".to_string(),
                )
            })?;
            Ok(Arc::new(StaticTokenCredential::new(token)))
        }
    }
}
