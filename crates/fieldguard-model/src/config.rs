//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tunable settings read by every engine component.
///
/// Mutated only through the explicit toggle commands on the engine; no
/// component writes to it during normal evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Quiet period after the last edit before a field is evaluated.
    pub debounce_delay_ms: u64,

    /// Background color for fields flagged as duplicates.
    pub highlight_color: String,

    /// Background color for the neutral state. An empty string means
    /// "revert to the stylesheet default".
    pub normal_color: String,

    /// Emit user-visible notices for duplicates, blocked submissions, and
    /// history clears.
    pub notifications_enabled: bool,

    /// Re-validate the whole form when it is submitted.
    pub check_on_submit: bool,

    /// Compare values without case folding. Toggling this clears the
    /// running history, since prior normalized forms become stale.
    pub case_sensitive: bool,

    /// Rendered width (px) above which a field holds checkable content.
    /// A width exactly at the threshold is a level field.
    pub width_threshold_px: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce_delay_ms: 500,
            highlight_color: "#ff6b6b".to_string(),
            normal_color: String::new(),
            notifications_enabled: true,
            check_on_submit: true,
            case_sensitive: true,
            width_threshold_px: 150.0,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The debounce quiet period as a [`Duration`].
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    #[must_use]
    pub fn with_debounce_delay_ms(mut self, millis: u64) -> Self {
        self.debounce_delay_ms = millis;
        self
    }

    #[must_use]
    pub fn with_case_sensitive(mut self, enable: bool) -> Self {
        self.case_sensitive = enable;
        self
    }

    #[must_use]
    pub fn with_check_on_submit(mut self, enable: bool) -> Self {
        self.check_on_submit = enable;
        self
    }

    #[must_use]
    pub fn with_notifications(mut self, enable: bool) -> Self {
        self.notifications_enabled = enable;
        self
    }

    #[must_use]
    pub fn with_width_threshold_px(mut self, threshold: f64) -> Self {
        self.width_threshold_px = threshold;
        self
    }
}
