use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::warn;

/// Fixed file names inside a workspace; the transcoder needs real extensions
/// to pick container formats.
const INPUT_FILE_NAME: &str = "input.mp4";
const OUTPUT_FILE_NAME: &str = "output.mp4";

/// Scratch directory for one relay run.
///
/// Holds exactly two slots, the downloaded input and the transcoded output.
/// The directory is removed on [`close`](Workspace::close); dropping without
/// closing removes it too, but silently.
#[derive(Debug)]
pub struct Workspace {
    dir: TempDir,
    input_path: PathBuf,
    output_path: PathBuf,
}

impl Workspace {
    /// Create a uniquely named workspace, under `root` when given, otherwise
    /// under the system temp directory.
    pub fn create(root: Option<&Path>, relay_id: &str) -> std::io::Result<Self> {
        let prefix = format!("relay-{}-", relay_id);
        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix);

        let dir = match root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };

        let input_path = dir.path().join(INPUT_FILE_NAME);
        let output_path = dir.path().join(OUTPUT_FILE_NAME);

        Ok(Self {
            dir,
            input_path,
            output_path,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Remove the workspace. Failures are logged, never propagated; a stale
    /// scratch directory must not turn a finished relay into an error.
    pub fn close(self) {
        let path = self.dir.path().display().to_string();
        if let Err(e) = self.dir.close() {
            warn!(workspace = %path, error = %e, "Failed to remove workspace");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_gives_slots_inside_workspace() {
        let workspace = Workspace::create(None, "abc123").unwrap();
        assert!(workspace.path().exists());
        assert!(workspace.input_path().starts_with(workspace.path()));
        assert!(workspace.output_path().starts_with(workspace.path()));
        assert!(workspace.input_path().ends_with("input.mp4"));
        assert!(workspace.output_path().ends_with("output.mp4"));
    }

    #[test]
    fn test_create_under_custom_root() {
        let root = TempDir::new().unwrap();
        let workspace = Workspace::create(Some(root.path()), "abc123").unwrap();
        assert!(workspace.path().starts_with(root.path()));
        let name = workspace
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .to_string();
        assert!(name.starts_with("relay-abc123-"));
    }

    #[test]
    fn test_workspaces_never_collide() {
        let root = TempDir::new().unwrap();
        let first = Workspace::create(Some(root.path()), "same-id").unwrap();
        let second = Workspace::create(Some(root.path()), "same-id").unwrap();
        assert_ne!(first.path(), second.path());
    }

    #[test]
    fn test_close_removes_directory() {
        let root = TempDir::new().unwrap();
        let workspace = Workspace::create(Some(root.path()), "abc123").unwrap();
        let path = workspace.path().to_path_buf();
        std::fs::write(workspace.input_path(), b"payload").unwrap();

        workspace.close();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_directory() {
        let root = TempDir::new().unwrap();
        let path = {
            let workspace = Workspace::create(Some(root.path()), "abc123").unwrap();
            workspace.path().to_path_buf()
        };
        assert!(!path.exists());
    }
}
