//! Whole-form re-validation at submit time.

use std::collections::BTreeSet;

use fieldguard_model::{Effect, EngineConfig, FieldId, FieldRole, VisualState};

use crate::classify::classify;
use crate::history::normalize;
use crate::page::PageView;

/// Result of a submit-time scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionOutcome {
    /// True when the host must prevent the default submit action.
    pub block: bool,
    /// Fields flagged as within-form repeats, in document order. Only the
    /// second and later occurrences of a value appear here; the first
    /// occurrence is left unmarked.
    pub flagged: Vec<FieldId>,
}

/// Forward scan of the form's fields with a transient seen-set.
///
/// The set is scoped to this single call and independent of the running
/// history: a value already seen during typing is not a submission-time
/// duplicate unless it also repeats within this form. Non-content fields
/// are reset to the neutral state and skipped.
pub(crate) fn validate(
    fields: &[FieldId],
    page: &dyn PageView,
    config: &EngineConfig,
    effects: &mut Vec<Effect>,
) -> SubmissionOutcome {
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut outcome = SubmissionOutcome::default();

    for &field in fields {
        if classify(page.field_width(field), config) != FieldRole::Content {
            effects.push(Effect::SetVisual {
                field,
                state: VisualState::Normal,
            });
            continue;
        }
        let normalized = normalize(&page.field_value(field), config.case_sensitive);
        if !normalized.trim().is_empty() && seen.contains(&normalized) {
            effects.push(Effect::SetVisual {
                field,
                state: VisualState::Highlighted,
            });
            outcome.block = true;
            outcome.flagged.push(field);
        } else {
            seen.insert(normalized);
        }
    }

    if outcome.block {
        tracing::debug!(flagged = outcome.flagged.len(), "submission blocked");
        if config.notifications_enabled {
            effects.push(Effect::Notify {
                message: "Form contains duplicate content, please review".to_string(),
            });
        }
    }
    outcome
}
