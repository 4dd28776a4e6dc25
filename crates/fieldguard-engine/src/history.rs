//! Seen-value history for duplicate detection.

use std::collections::BTreeSet;

/// Normalize a raw field value into the duplicate-comparison key.
///
/// Only case is folded (when comparisons are case-insensitive); whitespace
/// is preserved, so `"a "` and `"a"` are distinct values. Emptiness is
/// judged on the trimmed form by callers.
pub fn normalize(raw: &str, case_sensitive: bool) -> String {
    if case_sensitive {
        raw.to_string()
    } else {
        raw.to_lowercase()
    }
}

/// Normalized values seen across the whole page since engine start or the
/// last explicit clear.
///
/// Insert-only during typing: editing a field away from a value never
/// removes it, so a once-seen value stays blocked for the rest of the
/// session. Cleared by the clear command and by any case-sensitivity
/// toggle, which invalidates prior normalization.
#[derive(Debug, Clone, Default)]
pub struct History {
    seen: BTreeSet<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, normalized: &str) -> bool {
        self.seen.contains(normalized)
    }

    /// Insert a normalized value; returns false if it was already present.
    pub fn insert(&mut self, normalized: String) -> bool {
        self.seen.insert(normalized)
    }

    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
