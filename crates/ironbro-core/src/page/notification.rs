//! Toast notifications with auto-dismiss

use super::Page;

/// Delay before the `show` class is added
const SHOW_DELAY_MS: i64 = 10;
/// How long a notification stays visible
const VISIBLE_MS: i64 = 3_000;
/// Fade-out before removal
const FADE_MS: i64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    Pending,
    Shown,
    Hiding,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub created_at: i64,
    pub phase: NotificationPhase,
}

impl Notification {
    fn phase_at(&self, now: i64) -> Option<NotificationPhase> {
        let age = now - self.created_at;
        if age >= VISIBLE_MS + FADE_MS {
            None
        } else if age >= VISIBLE_MS {
            Some(NotificationPhase::Hiding)
        } else if age >= SHOW_DELAY_MS {
            Some(NotificationPhase::Shown)
        } else {
            Some(NotificationPhase::Pending)
        }
    }
}

impl Page {
    pub fn show_notification(&mut self, message: impl Into<String>, now: i64) {
        self.notifications.push(Notification {
            message: message.into(),
            created_at: now,
            phase: NotificationPhase::Pending,
        });
    }

    /// Advance notification timers, dropping the expired ones
    pub(super) fn tick_notifications(&mut self, now: i64) {
        self.notifications.retain_mut(|n| match n.phase_at(now) {
            Some(phase) => {
                n.phase = phase;
                true
            }
            None => false,
        });
    }

    pub fn visible_notifications(&self) -> Vec<&str> {
        self.notifications
            .iter()
            .filter(|n| n.phase == NotificationPhase::Shown)
            .map(|n| n.message.as_str())
            .collect()
    }
}
