//! The automation command channel: one script in, `(stdout, stderr, exit_code)` out.

mod osascript;
pub mod reply;
mod script;
mod scripted;

use std::future::Future;

pub use osascript::{DEFAULT_OSASCRIPT, OsascriptChannel};
pub use reply::{ChannelReply, check, parse_number};
pub use script::{Scripts, escape};
pub use scripted::ScriptedChannel;

/// Transport to the external application.
///
/// Implementations must bound every call by their own timeout and report it as
/// [`ChannelReply::timed_out`]; callers never cancel an in-flight call.
pub trait AutomationChannel: Send + Sync + 'static {
    fn send(&self, script: &str) -> impl Future<Output = ChannelReply> + Send;
}
