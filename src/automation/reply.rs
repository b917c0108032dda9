use crate::error::Failure;

pub const TIMEOUT_STDERR: &str = "AppleScript timed out";

/// Sentinel replies shared by the query scripts.
pub const NOT_RUNNING: &str = "NOT_RUNNING";
pub const STOPPED: &str = "STOPPED";
pub const UNKNOWN: &str = "UNKNOWN";
pub const END: &str = "END";
/// Prefix of an error caught inside a script's own `try` block.
pub const ERR_PREFIX: &str = "ERR:";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelReply {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl ChannelReply {
    pub fn new(stdout: impl AsRef<str>, stderr: impl AsRef<str>, exit_code: i32) -> Self {
        Self {
            stdout: stdout.as_ref().trim().to_owned(),
            stderr: stderr.as_ref().trim().to_owned(),
            exit_code,
        }
    }

    pub fn ok(stdout: impl AsRef<str>) -> Self {
        Self::new(stdout, "", 0)
    }

    pub fn timed_out() -> Self {
        Self::new("", TIMEOUT_STDERR, -1)
    }
}

pub fn is_permission_denied(stderr: &str) -> bool {
    let lowered = stderr.to_lowercase();
    ["not authorized", "not authorised", "not permitted"]
        .iter()
        .any(|p| lowered.contains(p))
}

/// Classifies a reply, yielding its stdout when the round-trip succeeded.
pub fn check(reply: &ChannelReply) -> Result<&str, Failure> {
    if is_permission_denied(&reply.stderr) {
        return Err(Failure::PermissionDenied);
    }
    if reply.exit_code == -1 && reply.stderr == TIMEOUT_STDERR {
        return Err(Failure::TimedOut);
    }
    if reply.exit_code != 0 || !reply.stderr.is_empty() {
        return Err(Failure::Script {
            code: reply.exit_code,
            stderr: reply.stderr.clone(),
        });
    }
    Ok(&reply.stdout)
}

/// A script that trapped its own error and reported it on stdout.
pub fn trapped_error(out: &str) -> Option<Failure> {
    out.starts_with(ERR_PREFIX).then(|| Failure::Script {
        code: 0,
        stderr: out.to_owned(),
    })
}

/// Locale-tolerant number parsing for values AppleScript coerces to text.
///
/// A comma is a decimal separator only when no period is present; otherwise commas are
/// thousands separators. Anything left that is not a digit, `.` or `-` is dropped, and
/// text that still does not parse yields `0.0`.
pub fn parse_number(raw: &str) -> f64 {
    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }
    let normalized = if text.contains(',') && !text.contains('.') {
        text.replace(',', ".")
    } else {
        text.replace(',', "")
    };
    let filtered: String = normalized
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '-'))
        .collect();
    filtered.parse::<f64>().unwrap_or(0.0)
}
