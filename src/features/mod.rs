//! Fetchers and command issuers: one automation round-trip each, mapped to typed results.

pub mod diagnostics;
pub mod fetch;
pub mod queue;
pub mod tracks;
pub mod transport;
pub mod up_next;
pub mod volume;

use crate::automation::{AutomationChannel, Scripts, check};
use crate::error::Failure;

/// A channel paired with the scripts for one target application.
#[derive(Debug)]
pub struct Remote<C> {
    channel: C,
    scripts: Scripts,
}

impl<C: AutomationChannel> Remote<C> {
    pub fn new(channel: C, scripts: Scripts) -> Self {
        Self { channel, scripts }
    }

    pub fn scripts(&self) -> &Scripts {
        &self.scripts
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Sends `script` and returns its trimmed stdout if the round-trip succeeded.
    pub async fn run(&self, script: &str) -> Result<String, Failure> {
        let reply = self.channel.send(script).await;
        let out = check(&reply).map(str::to_owned);
        if let Err(e) = &out {
            tracing::debug!(err = %e, "automation round-trip failed");
        }
        out
    }
}
