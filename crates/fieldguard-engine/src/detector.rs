//! Duplicate detection against the running history.

use fieldguard_model::{Effect, EngineConfig, FieldId, FieldRole, VisualState};

use crate::classify::classify;
use crate::history::{History, normalize};
use crate::page::PageView;

/// Check one field against the running history.
///
/// Returns true when the field's normalized value was already seen. Fields
/// that do not classify as content are reset to the neutral state and
/// report not-duplicate without touching history; so do empty or
/// whitespace-only values. A value found in history marks the field and
/// does not re-insert, so a repeated edit back to a flagged value leaves
/// set membership unchanged.
pub(crate) fn check(
    field: FieldId,
    page: &dyn PageView,
    config: &EngineConfig,
    history: &mut History,
    effects: &mut Vec<Effect>,
) -> bool {
    if classify(page.field_width(field), config) != FieldRole::Content {
        effects.push(Effect::SetVisual {
            field,
            state: VisualState::Normal,
        });
        return false;
    }

    let raw = page.field_value(field);
    let normalized = normalize(&raw, config.case_sensitive);
    if normalized.trim().is_empty() {
        effects.push(Effect::SetVisual {
            field,
            state: VisualState::Normal,
        });
        return false;
    }

    if history.contains(&normalized) {
        tracing::debug!(%field, "duplicate value detected");
        effects.push(Effect::SetVisual {
            field,
            state: VisualState::Highlighted,
        });
        if config.notifications_enabled {
            effects.push(Effect::Notify {
                message: format!("Duplicate content detected: \"{raw}\""),
            });
        }
        true
    } else {
        effects.push(Effect::SetVisual {
            field,
            state: VisualState::Normal,
        });
        history.insert(normalized);
        false
    }
}
