use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a text-capable field on the page.
///
/// Assigned by the host when it first reports a field; the engine treats it
/// as opaque.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FieldId(pub u64);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}

/// Identifier for the nearest row-like grouping around a field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row#{}", self.0)
    }
}

/// Kind of text-capable form control the engine watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Single-line text input.
    #[default]
    Text,
    /// Email input.
    Email,
    /// Multi-line text area.
    TextArea,
}

/// Role a field plays in duplicate checking and level derivation.
///
/// Derived from the field's current rendered width on every evaluation and
/// never cached: the host page can resize fields at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldRole {
    /// Wide enough to hold duplicate-checkable content (URL-like text).
    Content,
    /// Narrow input that receives the derived path-depth integer.
    Level,
    /// Hidden or near-zero width; excluded from checking entirely.
    Ignored,
}

/// Visual state the host should render for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualState {
    /// Neutral background (the configured normal color).
    #[default]
    Normal,
    /// Duplicate highlight (the configured highlight color).
    Highlighted,
}
