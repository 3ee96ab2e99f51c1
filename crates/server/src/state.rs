use ferryman_core::{Config, RelayPipeline, SanitizedConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    pipeline: RelayPipeline,
}

impl AppState {
    pub fn new(config: Config, pipeline: RelayPipeline) -> Self {
        Self { config, pipeline }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn pipeline(&self) -> &RelayPipeline {
        &self.pipeline
    }
}
