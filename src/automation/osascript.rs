use super::{AutomationChannel, ChannelReply};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

pub const DEFAULT_OSASCRIPT: &str = "/usr/bin/osascript";

/// Runs each script through a fresh `osascript -e` child process.
#[derive(Debug, Clone)]
pub struct OsascriptChannel {
    program: PathBuf,
    timeout: Duration,
}

impl OsascriptChannel {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl Default for OsascriptChannel {
    fn default() -> Self {
        Self::new(DEFAULT_OSASCRIPT, Duration::from_secs(5))
    }
}

impl AutomationChannel for OsascriptChannel {
    async fn send(&self, script: &str) -> ChannelReply {
        let child = Command::new(&self.program)
            .arg("-e")
            .arg(script)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let child = match child {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(program = %self.program.display(), err = %e, "failed to spawn automation channel");
                return ChannelReply::new("", e.to_string(), -1);
            }
        };

        // Dropping the pending future drops the child, and kill_on_drop terminates it.
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => ChannelReply::new(
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr),
                output.status.code().unwrap_or(-1),
            ),
            Ok(Err(e)) => {
                tracing::warn!(err = %e, "automation channel wait failed");
                ChannelReply::new("", e.to_string(), -1)
            }
            Err(_) => {
                tracing::warn!(timeout_ms = self.timeout.as_millis() as u64, "automation channel timed out, child killed");
                ChannelReply::timed_out()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_reports_failure_instead_of_panicking() {
        let channel = OsascriptChannel::new(
            "/nonexistent/musictui-osascript",
            Duration::from_millis(200),
        );
        let reply = channel.send("return 1").await;
        assert_eq!(reply.exit_code, -1);
        assert!(reply.stdout.is_empty());
        assert!(!reply.stderr.is_empty());
    }
}
