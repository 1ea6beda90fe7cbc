//! Configuration test and service reload.

use std::process::{Output, Stdio};

use tokio::process::Command;
use tracing::{debug, error, info};

use crate::config::AppConfig;
use crate::error::ReloadError;

/// Tests the nginx configuration and reloads the service only if the test passes.
pub async fn test_and_reload(config: &AppConfig) -> Result<(), ReloadError> {
    let output = run_captured(&config.test_command).await?;
    if !output.status.success() {
        let combined = combined_output(&output);
        error!(command = %config.test_command.join(" "), "Configuration test failed");
        return Err(ReloadError::ConfigTestFailed {
            code: output.status.code().unwrap_or(-1),
            output: combined,
        });
    }

    println!("✓ Nginx configuration test passed");

    let output = run_captured(&config.reload_command).await?;
    if !output.status.success() {
        let combined = combined_output(&output);
        error!(command = %config.reload_command.join(" "), "Service reload failed");
        return Err(ReloadError::ReloadFailed {
            code: output.status.code().unwrap_or(-1),
            output: combined,
        });
    }

    info!("Service reloaded");
    println!("✓ Nginx reloaded successfully");
    Ok(())
}

/// Runs a command to completion with no stdin, capturing stdout and stderr.
async fn run_captured(argv: &[String]) -> Result<Output, ReloadError> {
    let (program, args) = argv.split_first().ok_or_else(|| ReloadError::SpawnFailed {
        command: String::new(),
        message: "empty command".to_string(),
    })?;

    let mut cmd = Command::new(program);
    cmd.args(args);

    debug!(cmd = ?cmd, "Running command");

    let output = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| ReloadError::SpawnFailed {
            command: argv.join(" "),
            message: e.to_string(),
        })?;

    Ok(output)
}

/// Stdout followed by stderr.
fn combined_output(output: &Output) -> String {
    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    fn config_with(test: Vec<String>, reload: Vec<String>) -> AppConfig {
        AppConfig {
            test_command: test,
            reload_command: reload,
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn reload_runs_after_passing_test() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("reloaded");
        let config = config_with(
            argv(&["true"]),
            vec!["touch".to_string(), marker.display().to_string()],
        );

        test_and_reload(&config).await.unwrap();
        assert!(marker.exists());
    }

    #[tokio::test]
    async fn failed_test_never_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("reloaded");
        let config = config_with(
            argv(&["sh", "-c", "echo 'unexpected \"}\" in site.conf'; echo 'test failed' >&2; exit 1"]),
            vec!["touch".to_string(), marker.display().to_string()],
        );

        let err = test_and_reload(&config).await.unwrap_err();
        match err {
            ReloadError::ConfigTestFailed { code, output } => {
                assert_eq!(code, 1);
                assert!(output.contains("unexpected \"}\" in site.conf"));
                assert!(output.contains("test failed"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!marker.exists());
    }

    #[tokio::test]
    async fn failed_reload_surfaces_output() {
        let config = config_with(
            argv(&["true"]),
            argv(&["sh", "-c", "echo 'nginx.service is not active' >&2; exit 3"]),
        );

        let err = test_and_reload(&config).await.unwrap_err();
        assert!(matches!(
            err,
            ReloadError::ReloadFailed { code: 3, ref output } if output.contains("not active")
        ));
    }

    #[tokio::test]
    async fn missing_binary_is_spawn_failure() {
        let config = config_with(argv(&["conf-mover-no-such-binary"]), argv(&["true"]));

        let err = test_and_reload(&config).await.unwrap_err();
        assert!(matches!(err, ReloadError::SpawnFailed { ref command, .. } if command == "conf-mover-no-such-binary"));
    }
}
