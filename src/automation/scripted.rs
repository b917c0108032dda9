use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use super::{AutomationChannel, ChannelReply};

#[derive(Debug, Default)]
struct Inner {
    replies: HashMap<String, VecDeque<ChannelReply>>,
    delays: HashMap<String, Duration>,
    sent: Vec<String>,
}

/// In-process channel answering from a table of canned replies.
///
/// Each script maps to a queue; replies are consumed in order and the last one repeats.
/// Unknown scripts answer with empty stdout and exit 0. Every script sent is recorded.
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    inner: Mutex<Inner>,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_inner<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        let mut inner = self.inner.lock().unwrap_or_else(|p| p.into_inner());
        f(&mut inner)
    }

    pub fn respond(&self, script: impl Into<String>, reply: ChannelReply) -> &Self {
        self.with_inner(|inner| {
            inner
                .replies
                .entry(script.into())
                .or_default()
                .push_back(reply);
        });
        self
    }

    pub fn respond_ok(&self, script: impl Into<String>, stdout: &str) -> &Self {
        self.respond(script, ChannelReply::ok(stdout))
    }

    /// Holds every reply to `script` back for `delay`.
    pub fn delay(&self, script: impl Into<String>, delay: Duration) -> &Self {
        self.with_inner(|inner| {
            inner.delays.insert(script.into(), delay);
        });
        self
    }

    pub fn sent(&self) -> Vec<String> {
        self.with_inner(|inner| inner.sent.clone())
    }

    pub fn sent_count(&self, script: &str) -> usize {
        self.with_inner(|inner| inner.sent.iter().filter(|s| *s == script).count())
    }

    fn next_reply(&self, script: &str) -> (ChannelReply, Option<Duration>) {
        self.with_inner(|inner| {
            inner.sent.push(script.to_owned());
            let delay = inner.delays.get(script).copied();
            let reply = match inner.replies.get_mut(script) {
                Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
                Some(queue) => queue.front().cloned().unwrap_or_default(),
                None => ChannelReply::ok(""),
            };
            (reply, delay)
        })
    }
}

impl AutomationChannel for ScriptedChannel {
    async fn send(&self, script: &str) -> ChannelReply {
        let (reply, delay) = self.next_reply(script);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_queue_then_repeats_last() {
        let channel = ScriptedChannel::new();
        channel.respond_ok("a", "1").respond_ok("a", "2");
        assert_eq!(channel.send("a").await.stdout, "1");
        assert_eq!(channel.send("a").await.stdout, "2");
        assert_eq!(channel.send("a").await.stdout, "2");
        assert_eq!(channel.send("b").await, ChannelReply::ok(""));
        assert_eq!(channel.sent_count("a"), 3);
    }
}
