//! Debounce coordination for rapid edits.

use std::time::{Duration, Instant};

use fieldguard_model::FieldId;

/// The single outstanding deferred evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCheck {
    /// The most recently edited field.
    pub field: FieldId,
    /// When the quiet period elapses.
    pub due_at: Instant,
}

/// One debounce slot shared across every watched field.
///
/// A new edit anywhere supersedes whatever was pending, so rapid edits to
/// two different fields inside the window leave only the last one to be
/// evaluated; the other field's pending check is silently dropped. This is
/// an intentional simplification, not a per-field guarantee.
#[derive(Debug, Default)]
pub struct Debouncer {
    pending: Option<PendingCheck>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supersede any pending check with one for `field`.
    pub fn schedule(&mut self, field: FieldId, now: Instant, delay: Duration) {
        self.pending = Some(PendingCheck {
            field,
            due_at: now + delay,
        });
    }

    pub fn pending(&self) -> Option<PendingCheck> {
        self.pending
    }

    /// Take the pending check if its quiet period has elapsed by `now`.
    pub fn take_due(&mut self, now: Instant) -> Option<FieldId> {
        match self.pending {
            Some(check) if now >= check.due_at => {
                self.pending = None;
                Some(check.field)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
