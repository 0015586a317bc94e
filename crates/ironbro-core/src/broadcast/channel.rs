//! In-process publish/subscribe channels keyed by topic
//!
//! Stand-in for the browser's same-origin broadcast channel: every handle
//! opened on a topic sees the posts of every other handle, never its own.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tracing::warn;
use uuid::Uuid;

use super::message::ChannelMessage;

/// Topic used for theme changes
pub const THEME_CHANNEL: &str = "theme_channel";
const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
struct Envelope {
    origin: Uuid,
    message: ChannelMessage,
}

/// Registry of topics for one origin
#[derive(Debug, Clone)]
pub struct ChannelHub {
    topics: Arc<Mutex<HashMap<String, broadcast::Sender<Envelope>>>>,
    capacity: usize,
}

impl Default for ChannelHub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ChannelHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            topics: Arc::new(Mutex::new(HashMap::new())),
            capacity: capacity.max(1),
        }
    }

    pub fn open(&self, topic: &str) -> ChannelHandle {
        let mut topics = self.topics.lock();
        let sender = topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone();
        ChannelHandle {
            topic: topic.to_string(),
            origin: Uuid::new_v4(),
            receiver: sender.subscribe(),
            sender,
        }
    }
}

/// One tab's end of a topic
#[derive(Debug)]
pub struct ChannelHandle {
    topic: String,
    origin: Uuid,
    sender: broadcast::Sender<Envelope>,
    receiver: broadcast::Receiver<Envelope>,
}

impl ChannelHandle {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn post(&self, message: ChannelMessage) {
        let envelope = Envelope {
            origin: self.origin,
            message,
        };
        // Only our own receiver may be listening; that is not an error
        let _ = self.sender.send(envelope);
    }

    /// Next message from another handle, without blocking
    pub fn try_recv(&mut self) -> Option<ChannelMessage> {
        loop {
            match self.receiver.try_recv() {
                Ok(envelope) if envelope.origin == self.origin => continue,
                Ok(envelope) => return Some(envelope.message),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(
                        "ChannelHandle: '{}' lagged, {} message(s) lost",
                        self.topic, skipped
                    );
                    continue;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_do_not_hear_themselves() {
        let hub = ChannelHub::default();
        let mut a = hub.open(THEME_CHANNEL);
        let mut b = hub.open(THEME_CHANNEL);

        a.post(ChannelMessage::theme_change("red", 1));
        assert_eq!(a.try_recv(), None);
        assert_eq!(b.try_recv(), Some(ChannelMessage::theme_change("red", 1)));
        assert_eq!(b.try_recv(), None);
    }

    #[test]
    fn test_topics_are_isolated() {
        let hub = ChannelHub::default();
        let a = hub.open(THEME_CHANNEL);
        let mut other = hub.open("accent_channel");
        a.post(ChannelMessage::theme_change("red", 1));
        assert_eq!(other.try_recv(), None);
    }

    #[test]
    fn test_lagged_receiver_keeps_newest() {
        let hub = ChannelHub::new(2);
        let a = hub.open(THEME_CHANNEL);
        let mut b = hub.open(THEME_CHANNEL);
        for ts in 1..=4 {
            a.post(ChannelMessage::theme_change("red", ts));
        }
        let mut seen = Vec::new();
        while let Some(ChannelMessage::ThemeChange { timestamp, .. }) = b.try_recv() {
            seen.push(timestamp);
        }
        assert_eq!(seen, vec![3, 4]);
    }
}
