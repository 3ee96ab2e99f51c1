use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::debug;

use super::command::build_transcode_args;
use super::config::TranscoderConfig;
use super::error::TranscoderError;
use super::resolver;

/// Runs the transcoding binary over a local input/output file pair.
pub struct TranscodeRunner {
    config: TranscoderConfig,
}

impl TranscodeRunner {
    pub fn new(config: TranscoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Locate the configured binary without running it.
    pub fn resolve_binary(&self) -> Result<PathBuf, TranscoderError> {
        resolver::resolve_binary(&self.config)
    }

    /// Run one transcode to completion.
    ///
    /// The process gets no stdin and its stderr is captured for the failure
    /// report. Runs outliving the configured timeout are killed.
    pub async fn run(
        &self,
        binary: &Path,
        input: &Path,
        instruction: &str,
        output: &Path,
    ) -> Result<(), TranscoderError> {
        let args = build_transcode_args(input, instruction, output)?;
        debug!(binary = %binary.display(), ?args, "Launching transcoder");
        let start = Instant::now();

        let mut child = Command::new(binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TranscoderError::launch_failed(binary.to_path_buf(), e))?;

        let mut stderr = child.stderr.take().expect("stderr should be captured");

        let timeout_duration = Duration::from_secs(self.config.run_timeout_secs);
        let result = timeout(timeout_duration, async {
            let mut stderr_output = String::new();
            stderr.read_to_string(&mut stderr_output).await?;
            let status = child.wait().await?;
            Ok::<(std::process::ExitStatus, String), std::io::Error>((status, stderr_output))
        })
        .await;

        match result {
            Ok(Ok((status, stderr_output))) => {
                if !status.success() {
                    return Err(TranscoderError::execution_failed(
                        status.code(),
                        &stderr_output,
                    ));
                }
            }
            Ok(Err(e)) => return Err(TranscoderError::Io(e)),
            Err(_) => {
                // Kill the process on timeout
                let _ = child.kill().await;
                return Err(TranscoderError::Timeout {
                    timeout_secs: self.config.run_timeout_secs,
                });
            }
        }

        // Verify the binary actually produced something
        tokio::fs::metadata(output)
            .await
            .map_err(|_| TranscoderError::OutputMissing {
                path: output.to_path_buf(),
            })?;

        debug!(
            binary = %binary.display(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Transcoder finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn runner_with_timeout(timeout_secs: u64) -> TranscodeRunner {
        TranscodeRunner::new(TranscoderConfig::default().with_run_timeout_secs(timeout_secs))
    }

    /// Executable stand-in for the real binary. Receives the usual
    /// `-i <input> ... <output>` argv, so `$2` is the input and the last
    /// argument is the output.
    #[cfg(unix)]
    fn write_fake_transcoder(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("fake-transcoder");
        let script = format!(
            "#!/bin/sh\nin=$2\nfor last in \"$@\"; do :; done\n{}\n",
            body
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    fn prepare_io(dir: &TempDir) -> (PathBuf, PathBuf) {
        let input = dir.path().join("input.mp4");
        let output = dir.path().join("output.mp4");
        std::fs::write(&input, b"payload").unwrap();
        (input, output)
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_success_with_output_file() {
        let dir = TempDir::new().unwrap();
        let (input, output) = prepare_io(&dir);
        let binary = write_fake_transcoder(dir.path(), r#"cp "$in" "$last""#);

        let runner = runner_with_timeout(30);
        let result = runner
            .run(&binary, &input, r#"-vf "scale=1280:720""#, &output)
            .await;

        assert!(result.is_ok(), "unexpected error: {:?}", result);
        assert_eq!(std::fs::read(&output).unwrap(), b"payload");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_nonzero_exit_reports_stderr() {
        let dir = TempDir::new().unwrap();
        let (input, output) = prepare_io(&dir);
        let binary =
            write_fake_transcoder(dir.path(), r#"echo "boom: unrecognized option" >&2; exit 3"#);

        let runner = runner_with_timeout(30);
        let result = runner.run(&binary, &input, "-an", &output).await;

        match result {
            Err(TranscoderError::ExecutionFailed {
                exit_code,
                diagnostic,
            }) => {
                assert_eq!(exit_code, Some(3));
                assert!(diagnostic.contains("boom: unrecognized option"));
            }
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_missing_output_is_an_error() {
        let dir = TempDir::new().unwrap();
        let (input, output) = prepare_io(&dir);
        let binary = write_fake_transcoder(dir.path(), "exit 0");

        let runner = runner_with_timeout(30);
        let result = runner.run(&binary, &input, "", &output).await;

        assert!(matches!(result, Err(TranscoderError::OutputMissing { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_timeout_kills_process() {
        let dir = TempDir::new().unwrap();
        let (input, output) = prepare_io(&dir);
        let binary = write_fake_transcoder(dir.path(), "sleep 30");

        let runner = runner_with_timeout(1);
        let start = Instant::now();
        let result = runner.run(&binary, &input, "", &output).await;

        assert!(matches!(
            result,
            Err(TranscoderError::Timeout { timeout_secs: 1 })
        ));
        // Must come back near the timeout, not after the sleep
        assert!(start.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_run_launch_failure() {
        let dir = TempDir::new().unwrap();
        let (input, output) = prepare_io(&dir);

        let runner = runner_with_timeout(30);
        let result = runner
            .run(Path::new("/nonexistent/transcoder"), &input, "", &output)
            .await;

        assert!(matches!(result, Err(TranscoderError::LaunchFailed { .. })));
    }

    #[tokio::test]
    async fn test_run_rejects_unterminated_quote_before_spawning() {
        let runner = runner_with_timeout(30);
        let result = runner
            .run(
                Path::new("/bin/sh"),
                Path::new("/in.mp4"),
                "-vf 'oops",
                Path::new("/out.mp4"),
            )
            .await;

        assert!(matches!(result, Err(TranscoderError::UnterminatedQuote)));
    }
}
