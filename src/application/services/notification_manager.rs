use std::collections::VecDeque;
use std::time::Duration;

use crate::domain::{Notification, NotificationLevel};

/// Queue of toasts; only the front one is visible.
#[derive(Debug)]
pub struct NotificationManager {
    queue: VecDeque<Notification>,
    default_duration: Duration,
    enabled: bool,
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

impl NotificationManager {
    #[must_use]
    pub fn new(default_duration: Duration) -> Self {
        Self {
            queue: VecDeque::new(),
            default_duration,
            enabled: true,
        }
    }

    /// Errors are still queued when toasts are disabled.
    #[must_use]
    pub const fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) {
        if !self.enabled && level != NotificationLevel::Error {
            return;
        }
        let notification =
            Notification::new(level, title, message).with_duration(self.default_duration);
        self.queue.push_back(notification);
    }

    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Success, title, message);
    }

    pub fn warn(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Warn, title, message);
    }

    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(NotificationLevel::Error, title, message);
    }

    /// Starts the front toast's timer and drops it once expired.
    pub fn tick(&mut self) {
        let Some(front) = self.queue.front_mut() else {
            return;
        };
        front.mark_displayed();
        if front.is_expired() {
            self.queue.pop_front();
            if let Some(next) = self.queue.front_mut() {
                next.mark_displayed();
            }
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&Notification> {
        self.queue.front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_queue_order() {
        let mut manager = NotificationManager::default();
        manager.success("Added", "Widget added");
        manager.warn("Missing", "Widget not found");

        assert_eq!(manager.current().unwrap().title, "Added");

        manager.tick();
        manager.queue.front_mut().unwrap().displayed_at =
            Some(Instant::now().checked_sub(Duration::from_secs(10)).unwrap());
        manager.tick();

        assert_eq!(manager.current().unwrap().title, "Missing");
        assert!(manager.current().unwrap().displayed_at.is_some());
    }

    #[test]
    fn test_disabled_keeps_errors_only() {
        let mut manager = NotificationManager::default().enabled(false);
        manager.success("Added", "Widget added");
        manager.error("Save failed", "disk full");

        assert_eq!(manager.len(), 1);
        assert_eq!(manager.current().unwrap().level, NotificationLevel::Error);
    }
}
