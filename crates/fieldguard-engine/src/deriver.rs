//! URL path-depth derivation for paired level fields.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;

use fieldguard_model::{Effect, EngineConfig, FieldId, FieldRole};

use crate::classify::classify;
use crate::page::PageView;

/// How long the derived-value flash stays before the host reverts it.
const DERIVED_PULSE: Duration = Duration::from_millis(1000);

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://").expect("valid scheme regex"));

/// Count path segments below the host part of a URL-like string.
///
/// A leading `http://` or `https://` scheme is stripped, then one trailing
/// slash, then the remaining `/` occurrences are counted:
/// `example.com` → 0, `example.com/a` → 1, `example.com/a/` → 1,
/// `example.com/a/b` → 2. Scheme-less and otherwise malformed text still
/// produces a best-effort count.
pub fn path_depth(url: &str) -> usize {
    let trimmed = url.trim();
    let without_scheme = SCHEME_RE.replace(trimmed, "");
    let path = without_scheme
        .strip_suffix('/')
        .unwrap_or(&without_scheme);
    path.matches('/').count()
}

/// Derive the path depth of `field`'s value into its row's first level
/// field.
///
/// The content classification is re-verified here rather than trusted from
/// the caller. Missing row, no content fields, or no level fields in the
/// row are all no-ops. An empty URL clears the level field instead of
/// writing 0, so the derived value never goes stale when the source is
/// erased. Idempotent: deriving twice from the same URL writes the same
/// level.
pub(crate) fn derive_level(
    field: FieldId,
    page: &dyn PageView,
    config: &EngineConfig,
    effects: &mut Vec<Effect>,
) {
    if classify(page.field_width(field), config) != FieldRole::Content {
        return;
    }
    let Some(row) = page.row_of(field) else {
        return;
    };

    let mut content_fields = Vec::new();
    let mut level_fields = Vec::new();
    for candidate in page.fields_in_row(row) {
        match classify(page.field_width(candidate), config) {
            FieldRole::Content => content_fields.push(candidate),
            FieldRole::Level => level_fields.push(candidate),
            FieldRole::Ignored => {}
        }
    }
    if content_fields.is_empty() || level_fields.is_empty() {
        return;
    }
    let target = level_fields[0];

    let raw = page.field_value(field);
    let url = raw.trim();
    if url.is_empty() {
        effects.push(Effect::SetValue {
            field: target,
            value: String::new(),
        });
        effects.push(Effect::FieldChanged { field: target });
        return;
    }

    let level = path_depth(url);
    tracing::debug!(%field, %target, level, "derived level from url");
    effects.push(Effect::SetValue {
        field: target,
        value: level.to_string(),
    });
    effects.push(Effect::FieldChanged { field: target });
    effects.push(Effect::PulseDerived {
        field: target,
        revert_after: DERIVED_PULSE,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_depth_table() {
        assert_eq!(path_depth("https://a.com"), 0);
        assert_eq!(path_depth("https://a.com/"), 0);
        assert_eq!(path_depth("http://a.com/x"), 1);
        assert_eq!(path_depth("a.com/x"), 1);
        assert_eq!(path_depth("a.com/x/y/"), 2);
        assert_eq!(path_depth("example.com/a/b"), 2);
    }

    #[test]
    fn test_path_depth_tolerates_odd_input() {
        assert_eq!(path_depth("   "), 0);
        assert_eq!(path_depth("not a url"), 0);
        assert_eq!(path_depth("https:///"), 0);
        // Only one trailing slash is stripped
        assert_eq!(path_depth("a.com/x//"), 2);
    }
}
