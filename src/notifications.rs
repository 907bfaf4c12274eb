//! Transient notifications ("toasts").
//!
//! Each notification is a small state machine:
//!
//! ```text
//! Created --show_delay--> Shown --display--> Hiding --removal--> Removed
//! ```
//!
//! All notifications share one [`TimerQueue`]. Transitions never cancel
//! each other, so concurrent notifications proceed independently.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::formatting::escape_html;
use crate::scheduler::TimerQueue;
use crate::traits::{DocumentSurface, NotificationId};

/// Finished notifications kept for inspection; older ones are dropped
pub const RETIRED_CAPACITY: usize = 32;

/// Severity only selects the icon and style class, never the timing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
    Warning,
}

impl Severity {
    /// Style class appended after `notification`
    pub fn class_name(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }

    /// Icon name; warnings share the info icon
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Success => "check-circle",
            Severity::Error => "exclamation-circle",
            Severity::Info | Severity::Warning => "info-circle",
        }
    }
}

/// Lifecycle phase of one notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Phase {
    Created,
    Shown,
    Hiding,
    Removed,
}

impl Phase {
    fn next(&self) -> Option<Phase> {
        match self {
            Phase::Created => Some(Phase::Shown),
            Phase::Shown => Some(Phase::Hiding),
            Phase::Hiding => Some(Phase::Removed),
            Phase::Removed => None,
        }
    }
}

/// Delays between lifecycle phases, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationTimings {
    pub show_delay_ms: u64,
    pub display_ms: u64,
    pub removal_ms: u64,
}

impl Default for NotificationTimings {
    fn default() -> Self {
        Self {
            show_delay_ms: 100,
            display_ms: 3000,
            removal_ms: 300,
        }
    }
}

impl NotificationTimings {
    /// Delay spent in `phase` before the next transition
    fn delay_after(&self, phase: Phase) -> Duration {
        let ms = match phase {
            Phase::Created => self.show_delay_ms,
            Phase::Shown => self.display_ms,
            Phase::Hiding => self.removal_ms,
            Phase::Removed => 0,
        };
        Duration::from_millis(ms)
    }

    /// Time from creation to removal
    pub fn total(&self) -> Duration {
        Duration::from_millis(self.show_delay_ms + self.display_ms + self.removal_ms)
    }
}

/// One notification and the phases it went through
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub phase: Phase,
    /// Every phase entered, with the deadline at which it was entered
    pub history: Vec<(Phase, Duration)>,
}

impl Notification {
    /// Markup placed inside the notification element
    pub fn inner_html(&self) -> String {
        format!(
            "<i class=\"fas fa-{}\"></i><span>{}</span>",
            self.severity.icon(),
            escape_html(&self.message)
        )
    }

    fn class_for(&self, phase: Phase) -> String {
        match phase {
            Phase::Shown => format!("notification {} show", self.severity.class_name()),
            _ => format!("notification {}", self.severity.class_name()),
        }
    }
}

/// Owner of every live notification and the scheduler that drives them
#[derive(Debug, Default)]
pub struct NotificationQueue {
    timings: NotificationTimings,
    live: Vec<Notification>,
    retired: Vec<Notification>,
    timers: TimerQueue<NotificationId>,
    next_id: NotificationId,
}

impl NotificationQueue {
    pub fn new(timings: NotificationTimings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    pub fn timings(&self) -> &NotificationTimings {
        &self.timings
    }

    /// Creates and appends a notification, scheduling its first transition
    pub fn notify(
        &mut self,
        surface: &mut dyn DocumentSurface,
        message: &str,
        severity: Severity,
        now: Duration,
    ) -> NotificationId {
        let id = self.next_id;
        self.next_id += 1;

        let notification = Notification {
            id,
            message: message.to_string(),
            severity,
            phase: Phase::Created,
            history: vec![(Phase::Created, now)],
        };
        surface.append_notification(id, &notification.class_for(Phase::Created), &notification.inner_html());
        self.timers.schedule_at(now + self.timings.delay_after(Phase::Created), id);
        self.live.push(notification);

        debug!(id, severity = severity.class_name(), "notification created");
        id
    }

    /// Advances every transition due at or before `now`, in deadline order.
    ///
    /// Returns the number of transitions applied.
    pub fn tick(&mut self, surface: &mut dyn DocumentSurface, now: Duration) -> usize {
        let mut applied = 0;
        while let Some((deadline, id)) = self.timers.pop_due(now) {
            let Some(index) = self.live.iter().position(|n| n.id == id) else {
                continue;
            };
            let Some(phase) = self.live[index].phase.next() else {
                continue;
            };

            let notification = &mut self.live[index];
            notification.phase = phase;
            notification.history.push((phase, deadline));
            applied += 1;

            match phase {
                Phase::Shown | Phase::Hiding => {
                    surface.set_notification_class(id, &notification.class_for(phase));
                    self.timers.schedule_at(deadline + self.timings.delay_after(phase), id);
                }
                Phase::Removed => {
                    surface.remove_notification(id);
                    let finished = self.live.remove(index);
                    if self.retired.len() == RETIRED_CAPACITY {
                        self.retired.remove(0);
                    }
                    self.retired.push(finished);
                }
                Phase::Created => {}
            }
            debug!(id, ?phase, "notification transition");
        }
        applied
    }

    /// Notifications that have not been removed yet
    pub fn live(&self) -> &[Notification] {
        &self.live
    }

    /// The most recent notifications that completed their lifecycle, oldest first
    pub fn retired(&self) -> &[Notification] {
        &self.retired
    }

    /// Deadline of the next pending transition, if any
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_icons_per_severity() {
        assert_eq!(Severity::Success.icon(), "check-circle");
        assert_eq!(Severity::Error.icon(), "exclamation-circle");
        assert_eq!(Severity::Info.icon(), "info-circle");
        assert_eq!(Severity::Warning.icon(), "info-circle");
    }

    #[test]
    fn test_phase_timing() {
        let mut doc = MemoryDocument::new();
        let mut queue = NotificationQueue::new(NotificationTimings::default());
        let id = queue.notify(&mut doc, "hola", Severity::Success, ms(0));

        assert_eq!(doc.notification(id).map(|n| n.class.as_str()), Some("notification success"));

        queue.tick(&mut doc, ms(99));
        assert_eq!(queue.live()[0].phase, Phase::Created);

        queue.tick(&mut doc, ms(100));
        assert_eq!(queue.live()[0].phase, Phase::Shown);
        assert_eq!(doc.notification(id).map(|n| n.class.as_str()), Some("notification success show"));

        queue.tick(&mut doc, ms(3100));
        assert_eq!(queue.live()[0].phase, Phase::Hiding);
        assert_eq!(doc.notification(id).map(|n| n.class.as_str()), Some("notification success"));

        queue.tick(&mut doc, ms(3399));
        assert_eq!(queue.live().len(), 1);
        queue.tick(&mut doc, ms(3400));
        assert!(queue.live().is_empty());
        assert!(doc.notification(id).is_none());
    }

    #[test]
    fn test_late_tick_replays_full_sequence() {
        let mut doc = MemoryDocument::new();
        let mut queue = NotificationQueue::new(NotificationTimings::default());
        queue.notify(&mut doc, "x", Severity::Info, ms(10));

        assert_eq!(queue.tick(&mut doc, ms(60_000)), 3);
        let retired = &queue.retired()[0];
        assert_eq!(
            retired.history,
            vec![
                (Phase::Created, ms(10)),
                (Phase::Shown, ms(110)),
                (Phase::Hiding, ms(3110)),
                (Phase::Removed, ms(3410)),
            ]
        );
        assert_eq!(doc.removed_notifications(), 1);
    }

    #[test]
    fn test_concurrent_notifications_are_independent() {
        let mut doc = MemoryDocument::new();
        let mut queue = NotificationQueue::new(NotificationTimings::default());
        queue.notify(&mut doc, "a", Severity::Info, ms(0));
        queue.notify(&mut doc, "b", Severity::Error, ms(1000));

        queue.tick(&mut doc, ms(3400));
        assert_eq!(queue.retired().len(), 1);
        assert_eq!(queue.retired()[0].message, "a");
        assert_eq!(queue.live().len(), 1);

        queue.tick(&mut doc, ms(4400));
        assert_eq!(queue.retired().len(), 2);
        assert_eq!(queue.next_deadline(), None);
    }

    #[test]
    fn test_retired_history_is_bounded() {
        let mut doc = MemoryDocument::new();
        let mut queue = NotificationQueue::default();
        let mut now = ms(0);
        for i in 0..(RETIRED_CAPACITY * 4) {
            queue.notify(&mut doc, &format!("toast {i}"), Severity::Info, now);
            now += ms(5000);
            queue.tick(&mut doc, now);
            assert!(queue.retired().len() <= RETIRED_CAPACITY);
        }

        assert!(queue.live().is_empty());
        assert_eq!(queue.retired().len(), RETIRED_CAPACITY);
        assert_eq!(queue.retired()[0].message, format!("toast {}", RETIRED_CAPACITY * 3));
        let last = RETIRED_CAPACITY * 4 - 1;
        assert_eq!(queue.retired()[RETIRED_CAPACITY - 1].message, format!("toast {last}"));
    }

    #[test]
    fn test_message_is_escaped() {
        let mut doc = MemoryDocument::new();
        let mut queue = NotificationQueue::default();
        let id = queue.notify(&mut doc, "<b>1 & 2</b>", Severity::Warning, ms(0));
        let html = doc.notification(id).map(|n| n.inner_html.clone()).unwrap_or_default();
        assert!(html.contains("&lt;b&gt;1 &amp; 2&lt;&#x2f;b&gt;"));
        assert!(html.contains("fa-info-circle"));
    }
}
