pub mod config;
pub mod credentials;
pub mod metrics;
pub mod relay;
pub mod storage;
pub mod testing;
pub mod transcoder;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig,
};
pub use credentials::{
    create_credential, AccessToken, CredentialError, CredentialProvider, CredentialsConfig,
    ManagedIdentityCredential, StaticTokenCredential, TokenCredential,
};
pub use relay::{
    RelayError, RelayPipeline, RelayRequest, RelaySummary, Workspace, OUTPUT_OBJECT_NAME,
    SUCCESS_MESSAGE,
};
pub use storage::{
    AzureBlobClient, BlobLocator, BlobStore, ContainerLocator, LocatorError, StorageConfig,
    StorageError,
};
pub use transcoder::{TranscodeRunner, TranscoderConfig, TranscoderError};
