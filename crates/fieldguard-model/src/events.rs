//! Outbound effects the engine queues for the host surface.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::field::{FieldId, VisualState};

/// A side effect for the host page or control surface.
///
/// The engine never mutates the page directly; it queues effects and the
/// host drains and applies them after each call. Effects are ordered: the
/// host must apply them in the order they were queued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Render `state` for the field.
    SetVisual { field: FieldId, state: VisualState },

    /// Overwrite the field's value.
    SetValue { field: FieldId, value: String },

    /// Re-dispatch an input notification on the field so third-party
    /// listeners (e.g. a framework's own binding) observe a programmatic
    /// write. Emitted after every value the engine writes itself.
    FieldChanged { field: FieldId },

    /// Flash the derived-value background on the field, reverting to the
    /// prior background after `revert_after`. The revert timer is owned by
    /// the host and always fires; it is harmless if the field changed in
    /// the meantime.
    PulseDerived {
        field: FieldId,
        revert_after: Duration,
    },

    /// Show a user-visible notice.
    Notify { message: String },
}
