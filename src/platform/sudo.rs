//! Privilege escalation through `sudo`
//!
//! SECURITY: The password is written to sudo's stdin and never appears in the
//! argument list, the environment, or any log line.

use crate::constants::{SHELL_BIN, SUDO_BIN};
use crate::core::PrivilegeEscalator;
use crate::models::SecureString;
use crate::utils::EscalationError;
use async_trait::async_trait;
use std::process::{Output, Stdio};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Runs shell command strings as root with `sudo -S -k`
///
/// `-k` drops sudo's own timestamp so every run validates the supplied
/// password, and `-p ''` keeps sudo's prompt out of the captured output.
pub struct SudoEscalator {
    sudo_bin: String,
}

impl SudoEscalator {
    pub fn new() -> Self {
        Self {
            sudo_bin: SUDO_BIN.to_string(),
        }
    }

    fn args(command: &str) -> [&str; 7] {
        ["-S", "-k", "-p", "", SHELL_BIN, "-c", command]
    }
}

impl Default for SudoEscalator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PrivilegeEscalator for SudoEscalator {
    async fn run(&self, command: &str, password: &SecureString) -> Result<(), EscalationError> {
        let mut child = Command::new(&self.sudo_bin)
            .args(Self::args(command))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| EscalationError::Init(format!("Failed to start sudo: {}", e)))?;

        let Some(mut stdin) = child.stdin.take() else {
            return Err(EscalationError::Init("Failed to open sudo stdin".to_string()));
        };
        let written = async {
            stdin.write_all(password.as_str().as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            stdin.shutdown().await
        }
        .await;
        drop(stdin);

        // sudo may exit before reading stdin; its status decides the outcome
        if let Err(error) = written {
            tracing::debug!(%error, "sudo closed stdin early");
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| EscalationError::Init(format!("Failed to wait for sudo: {}", e)))?;

        if output.status.success() {
            tracing::debug!("Privileged command succeeded");
            Ok(())
        } else {
            let detail = combined_output(&output);
            tracing::debug!(status = ?output.status.code(), "Privileged command failed");
            Err(EscalationError::Rejected(detail))
        }
    }
}

/// Stdout followed by stderr, trimmed
fn combined_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    match (stdout.trim(), stderr.trim()) {
        ("", "") => match output.status.code() {
            Some(code) => format!("exit status {}", code),
            None => "terminated by signal".to_string(),
        },
        (out, "") => out.to_string(),
        ("", err) => err.to_string(),
        (out, err) => format!("{}\n{}", out, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_never_in_arguments() {
        let args = SudoEscalator::args("/usr/sbin/networksetup -setdnsservers 'Wi-Fi' Empty");
        assert_eq!(&args[..4], &["-S", "-k", "-p", ""]);
        assert_eq!(args[4], SHELL_BIN);
        assert_eq!(args[5], "-c");
        assert!(args[6].contains("-setdnsservers"));
    }

    #[tokio::test]
    async fn missing_sudo_is_init_error() {
        let escalator = SudoEscalator {
            sudo_bin: "/nonexistent/sudo".into(),
        };
        let err = escalator
            .run("true", &SecureString::new("pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, EscalationError::Init(_)));
    }

    #[tokio::test]
    async fn combined_output_joins_both_streams() {
        let output = Command::new(SHELL_BIN)
            .args(["-c", "echo out; echo err >&2; exit 1"])
            .output()
            .await
            .unwrap();
        assert_eq!(combined_output(&output), "out\nerr");
    }

    #[tokio::test]
    async fn silent_failure_reports_exit_status() {
        let output = Command::new(SHELL_BIN)
            .args(["-c", "exit 4"])
            .output()
            .await
            .unwrap();
        assert_eq!(combined_output(&output), "exit status 4");
    }
}
