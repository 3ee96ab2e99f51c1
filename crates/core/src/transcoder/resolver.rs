use std::path::PathBuf;
use tracing::debug;

use super::config::TranscoderConfig;
use super::error::TranscoderError;

/// Locate the transcoding binary.
///
/// Locations are tried in order: `bin/{name}` under the working directory,
/// the configured deployment path, a `PATH` walk (when enabled), then the
/// configured system paths. The first regular file wins; executability is
/// left for the launch to discover.
pub fn resolve_binary(config: &TranscoderConfig) -> Result<PathBuf, TranscoderError> {
    let mut searched: Vec<String> = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        let local = cwd.join("bin").join(&config.binary_name);
        if local.is_file() {
            debug!(binary = %local.display(), "Resolved transcoder from working directory");
            return Ok(local);
        }
        searched.push(local.display().to_string());
    }

    if config.deployment_path.is_file() {
        debug!(binary = %config.deployment_path.display(), "Resolved transcoder from deployment path");
        return Ok(config.deployment_path.clone());
    }
    searched.push(config.deployment_path.display().to_string());

    if config.search_path {
        if let Some(found) = search_in_path(&config.binary_name) {
            debug!(binary = %found.display(), "Resolved transcoder from PATH");
            return Ok(found);
        }
        searched.push("$PATH".to_string());
    }

    for candidate in &config.system_paths {
        if candidate.is_file() {
            debug!(binary = %candidate.display(), "Resolved transcoder from system path");
            return Ok(candidate.clone());
        }
        searched.push(candidate.display().to_string());
    }

    Err(TranscoderError::binary_missing(
        config.binary_name.clone(),
        &searched,
    ))
}

fn search_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
