//! Serializable descriptions of a page and of timed edit scripts.
//!
//! A [`PageSnapshot`] captures the text-capable fields of a form the way the
//! host sees them: grouped into rows, each with a rendered width and a
//! current value. The CLI harness and tests build in-memory pages from it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::FieldKind;

/// A page's text-capable fields, grouped by row, in document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSnapshot {
    pub rows: Vec<RowSnapshot>,
}

/// One row-like grouping of fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub fields: Vec<FieldSnapshot>,
}

/// A single text-capable field as rendered by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSnapshot {
    /// Host-side name, unique within the snapshot.
    pub name: String,
    /// Control kind; defaults to a single-line text input.
    #[serde(default)]
    pub kind: FieldKind,
    /// Rendered width in pixels. Zero means hidden.
    pub width: f64,
    /// Current raw value.
    #[serde(default)]
    pub value: String,
}

impl PageSnapshot {
    /// Check structural invariants: unique field names, finite non-negative
    /// widths.
    pub fn validate(&self) -> Result<()> {
        let mut names = BTreeSet::new();
        for field in self.iter_fields() {
            if !names.insert(field.name.as_str()) {
                return Err(ModelError::DuplicateFieldName(field.name.clone()));
            }
            if !field.width.is_finite() || field.width < 0.0 {
                return Err(ModelError::InvalidWidth {
                    name: field.name.clone(),
                    width: field.width,
                });
            }
        }
        Ok(())
    }

    /// All fields in document order.
    pub fn iter_fields(&self) -> impl Iterator<Item = &FieldSnapshot> {
        self.rows.iter().flat_map(|row| row.fields.iter())
    }

    pub fn field_count(&self) -> usize {
        self.rows.iter().map(|row| row.fields.len()).sum()
    }
}

/// A timed sequence of edits against a page, replayed through the debounce
/// coordinator with a virtual clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditScript {
    pub page: PageSnapshot,
    pub edits: Vec<EditEvent>,
}

/// One raw edit event: the field's value after the keystroke burst and the
/// time it arrived, in milliseconds from script start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditEvent {
    pub field: String,
    pub value: String,
    pub at_ms: u64,
}

impl EditScript {
    /// Validate the page and check every edit references a known field.
    pub fn validate(&self) -> Result<()> {
        self.page.validate()?;
        let names: BTreeSet<&str> = self
            .page
            .iter_fields()
            .map(|field| field.name.as_str())
            .collect();
        for edit in &self.edits {
            if !names.contains(edit.field.as_str()) {
                return Err(ModelError::UnknownField(edit.field.clone()));
            }
        }
        Ok(())
    }
}
