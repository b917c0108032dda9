//! Automation round-trip failures

/// Remediation text shown when the OS refuses automation access.
pub const PERMISSION_HINT: &str = "Permission denied. Enable Automation for your terminal in System Settings > Privacy & Security > Automation.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    /// The channel did not answer within its timeout and was killed.
    #[error("automation channel timed out")]
    TimedOut,

    #[error("{PERMISSION_HINT}")]
    PermissionDenied,

    /// Nonzero exit or unexpected stderr output.
    #[error("script failed (exit {code}): {stderr}")]
    Script { code: i32, stderr: String },
}
