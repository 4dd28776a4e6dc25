//! The engine instance owning history, config, and the debounce slot.

use std::collections::BTreeSet;
use std::time::Instant;

use fieldguard_model::{Effect, EngineConfig, FieldId, VisualState};

use crate::debounce::Debouncer;
use crate::deriver::derive_level;
use crate::detector;
use crate::feed::MutationFeed;
use crate::history::History;
use crate::page::PageView;
use crate::submit::{self, SubmissionOutcome};

/// Single engine instance for one page session.
///
/// All shared mutable state (history, config, the pending check, the
/// attachment markers) lives here and is only touched from the handler
/// methods below; the engine assumes a single-threaded, event-driven host.
/// Side effects are queued and drained via [`Engine::drain_effects`].
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    history: History,
    debouncer: Debouncer,
    attached: BTreeSet<FieldId>,
    effects: Vec<Effect>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of distinct normalized values seen so far.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Queued effects, in application order. Leaves the queue empty.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // --- attachment -----------------------------------------------------

    /// Scan the whole page and mark any unattached fields.
    ///
    /// Returns the fields the host must now subscribe for edit events.
    /// Attachment markers are kept for the session and never cleared, so
    /// repeated scans never double-subscribe. Run once at startup, and
    /// again after every mutation batch that added nodes.
    pub fn scan_attachments(&mut self, page: &impl PageView) -> Vec<FieldId> {
        let newly: Vec<FieldId> = page
            .fields()
            .into_iter()
            .filter(|field| self.attached.insert(*field))
            .collect();
        if !newly.is_empty() {
            tracing::debug!(count = newly.len(), "attached new fields");
        }
        newly
    }

    /// Drain the mutation feed, rescanning after any batch with added
    /// nodes. Returns every newly attached field.
    pub fn pump_feed(
        &mut self,
        feed: &mut impl MutationFeed,
        page: &impl PageView,
    ) -> Vec<FieldId> {
        let mut newly = Vec::new();
        while let Some(batch) = feed.poll_batch() {
            if batch.added_nodes == 0 {
                continue;
            }
            newly.extend(self.scan_attachments(page));
        }
        newly
    }

    // --- edit handling --------------------------------------------------

    /// Record a raw edit on a watched field, superseding any pending check
    /// regardless of which field it was scheduled for.
    pub fn handle_edit(&mut self, field: FieldId, now: Instant) {
        self.debouncer
            .schedule(field, now, self.config.debounce_delay());
    }

    /// When the host should next call [`Engine::fire_due`], if anything is
    /// pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.pending().map(|check| check.due_at)
    }

    /// Run the deferred evaluation if its quiet period has elapsed.
    ///
    /// Returns the evaluated field, or `None` when nothing was due.
    pub fn fire_due(&mut self, page: &impl PageView, now: Instant) -> Option<FieldId> {
        let field = self.debouncer.take_due(now)?;
        self.evaluate(page, field);
        Some(field)
    }

    /// Duplicate detector then URL-to-level deriver on one field.
    ///
    /// Returns true when the field's value was flagged as a duplicate.
    pub fn evaluate(&mut self, page: &impl PageView, field: FieldId) -> bool {
        let duplicate = detector::check(
            field,
            page,
            &self.config,
            &mut self.history,
            &mut self.effects,
        );
        derive_level(field, page, &self.config, &mut self.effects);
        duplicate
    }

    // --- submission -----------------------------------------------------

    /// Re-check the whole form at submit time.
    ///
    /// `fields` must be the form's text-capable fields in document order.
    /// Bypasses the debouncer and the running history; see
    /// [`SubmissionOutcome`]. Does nothing when submit checking is toggled
    /// off.
    pub fn validate_submission(
        &mut self,
        page: &impl PageView,
        fields: &[FieldId],
    ) -> SubmissionOutcome {
        if !self.config.check_on_submit {
            return SubmissionOutcome::default();
        }
        submit::validate(fields, page, &self.config, &mut self.effects)
    }

    // --- control commands ----------------------------------------------

    /// Flip case sensitivity and clear the history in one step, so stale
    /// normalized forms never linger across the toggle.
    pub fn set_case_sensitive(&mut self, enable: bool) {
        self.config.case_sensitive = enable;
        self.history.clear();
        tracing::debug!(case_sensitive = enable, "case sensitivity toggled, history cleared");
    }

    pub fn set_check_on_submit(&mut self, enable: bool) {
        self.config.check_on_submit = enable;
    }

    pub fn set_notifications_enabled(&mut self, enable: bool) {
        self.config.notifications_enabled = enable;
    }

    /// Empty the history and reset every field on the page to the neutral
    /// visual state.
    pub fn clear_history(&mut self, page: &impl PageView) {
        self.history.clear();
        for field in page.fields() {
            self.effects.push(Effect::SetVisual {
                field,
                state: VisualState::Normal,
            });
        }
        self.notify("History cleared");
    }

    fn notify(&mut self, message: impl Into<String>) {
        if self.config.notifications_enabled {
            self.effects.push(Effect::Notify {
                message: message.into(),
            });
        }
    }
}
