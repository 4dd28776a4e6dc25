//! Width-based field classification.

use fieldguard_model::{EngineConfig, FieldRole};

/// Widths at or below this are treated as hidden.
pub const HIDDEN_WIDTH_PX: f64 = 1.0;

/// Classify a field by its current rendered width.
///
/// Wide fields hold duplicate-checkable content; narrow ones receive the
/// derived level. Hidden (near-zero width) fields are ignored entirely:
/// they are never checked and never written to, only reset to the neutral
/// visual state when re-evaluated.
///
/// The threshold boundary is inclusive on the level side: a width exactly
/// at `width_threshold_px` is a level field.
pub fn classify(width: f64, config: &EngineConfig) -> FieldRole {
    if width <= HIDDEN_WIDTH_PX {
        FieldRole::Ignored
    } else if width > config.width_threshold_px {
        FieldRole::Content
    } else {
        FieldRole::Level
    }
}
