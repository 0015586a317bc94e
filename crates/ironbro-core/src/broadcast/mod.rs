//! Cross-tab theme change propagation
//!
//! Last-write-wins by sender timestamp, not by arrival order.

mod channel;
mod message;

use tracing::debug;

pub use channel::{ChannelHandle, ChannelHub, THEME_CHANNEL};
pub use message::ChannelMessage;

/// Accepted remote change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteChange {
    pub theme: String,
    pub timestamp: i64,
}

pub struct ChangeBroadcaster {
    channel: Option<ChannelHandle>,
    last_applied: i64,
}

impl ChangeBroadcaster {
    /// `channel` is `None` where cross-tab messaging is unsupported
    pub fn new(channel: Option<ChannelHandle>, last_applied: i64) -> Self {
        Self {
            channel,
            last_applied,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.channel.is_some()
    }

    pub fn last_applied(&self) -> i64 {
        self.last_applied
    }

    /// Announce a local change; a no-op without a channel
    pub fn broadcast(&mut self, theme: &str, timestamp: i64) {
        self.last_applied = self.last_applied.max(timestamp);
        if let Some(channel) = &self.channel {
            debug!("ChangeBroadcaster: posting '{}' @ {}", theme, timestamp);
            channel.post(ChannelMessage::theme_change(theme, timestamp));
        }
    }

    /// Accept a message only when it is strictly newer than the last applied one
    pub fn accept(&mut self, message: &ChannelMessage) -> Option<RemoteChange> {
        match message {
            ChannelMessage::ThemeChange { theme, timestamp } => {
                if *timestamp <= self.last_applied {
                    debug!(
                        "ChangeBroadcaster: dropping stale '{}' @ {} (last {})",
                        theme, timestamp, self.last_applied
                    );
                    return None;
                }
                self.last_applied = *timestamp;
                Some(RemoteChange {
                    theme: theme.clone(),
                    timestamp: *timestamp,
                })
            }
        }
    }

    /// Drain pending messages, returning the accepted ones in arrival order
    pub fn poll(&mut self) -> Vec<RemoteChange> {
        let mut messages = Vec::new();
        if let Some(channel) = self.channel.as_mut() {
            while let Some(message) = channel.try_recv() {
                messages.push(message);
            }
        }
        messages.iter().filter_map(|m| self.accept(m)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_order_delivery_keeps_newest() {
        let mut receiver = ChangeBroadcaster::new(None, 0);
        let newer = ChannelMessage::theme_change("green", 2_000);
        let older = ChannelMessage::theme_change("red", 1_000);

        assert_eq!(
            receiver.accept(&newer),
            Some(RemoteChange {
                theme: "green".to_string(),
                timestamp: 2_000
            })
        );
        assert_eq!(receiver.accept(&older), None);
        assert_eq!(receiver.last_applied(), 2_000);
    }

    #[test]
    fn test_equal_timestamp_is_stale() {
        let mut receiver = ChangeBroadcaster::new(None, 500);
        assert_eq!(receiver.accept(&ChannelMessage::theme_change("red", 500)), None);
    }

    #[test]
    fn test_without_channel_everything_is_noop() {
        let mut broadcaster = ChangeBroadcaster::new(None, 0);
        assert!(!broadcaster.is_connected());
        broadcaster.broadcast("red", 10);
        assert!(broadcaster.poll().is_empty());
        assert_eq!(broadcaster.last_applied(), 10);
    }

    #[test]
    fn test_poll_between_tabs() {
        let hub = ChannelHub::default();
        let mut sender = ChangeBroadcaster::new(Some(hub.open(THEME_CHANNEL)), 0);
        let mut receiver = ChangeBroadcaster::new(Some(hub.open(THEME_CHANNEL)), 0);

        sender.broadcast("brosquad-cyan", 2);
        sender.broadcast("blue", 1);
        let accepted = receiver.poll();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].theme, "brosquad-cyan");
        assert!(sender.poll().is_empty());
    }

    #[test]
    fn test_own_broadcast_guards_against_older_remote() {
        let mut tab = ChangeBroadcaster::new(None, 0);
        tab.broadcast("red", 3_000);
        assert_eq!(tab.accept(&ChannelMessage::theme_change("blue", 2_500)), None);
    }
}
