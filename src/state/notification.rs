//! Transient user-facing messages.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A message shown to the user until replaced, dismissed or (for successes)
/// expired.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
    issued_at: Instant,
}

/// Single-slot channel shared by every component. Posting a message replaces
/// whatever was showing.
///
#[derive(Debug)]
pub struct NotificationChannel {
    current: Option<Notification>,
    issued: u64,
    success_ttl: Duration,
}

impl NotificationChannel {
    pub fn new(success_ttl: Duration) -> Self {
        NotificationChannel {
            current: None,
            issued: 0,
            success_ttl,
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.post(NotificationKind::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.post(NotificationKind::Error, message.into());
    }

    fn post(&mut self, kind: NotificationKind, message: String) {
        self.issued += 1;
        self.current = Some(Notification {
            id: self.issued,
            kind,
            message,
            issued_at: Instant::now(),
        });
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current_at(Instant::now())
    }

    /// Return the visible notification at the given instant. Errors never
    /// expire.
    ///
    pub fn current_at(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| !self.is_expired(n, now))
    }

    /// Drop an expired success message.
    ///
    pub fn expire(&mut self, now: Instant) {
        if let Some(notification) = &self.current {
            if self.is_expired(notification, now) {
                self.current = None;
            }
        }
    }

    /// Number of notifications posted so far.
    ///
    pub fn issued(&self) -> u64 {
        self.issued
    }

    fn is_expired(&self, notification: &Notification, now: Instant) -> bool {
        notification.kind == NotificationKind::Success
            && now.saturating_duration_since(notification.issued_at) >= self.success_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_replaces_previous() {
        let mut channel = NotificationChannel::new(Duration::from_secs(3));
        channel.success("Expense added successfully!");
        channel.error("Failed to fetch expenses");

        let current = channel.current().unwrap();
        assert_eq!(current.kind, NotificationKind::Error);
        assert_eq!(current.message, "Failed to fetch expenses");
        assert_eq!(current.id, 2);
        assert_eq!(channel.issued(), 2);
    }

    #[test]
    fn test_success_expires() {
        let mut channel = NotificationChannel::new(Duration::from_secs(3));
        channel.success("Saved");
        let now = Instant::now();
        assert!(channel.current_at(now).is_some());
        assert!(channel
            .current_at(now + Duration::from_secs(4))
            .is_none());

        channel.expire(now + Duration::from_secs(4));
        assert!(channel.current().is_none());
    }

    #[test]
    fn test_error_stays_until_dismissed() {
        let mut channel = NotificationChannel::new(Duration::from_secs(3));
        channel.error("Duplicate name");
        let later = Instant::now() + Duration::from_secs(3600);
        channel.expire(later);
        assert!(channel.current_at(later).is_some());

        channel.dismiss();
        assert!(channel.current().is_none());
        assert_eq!(channel.issued(), 1);
    }
}
