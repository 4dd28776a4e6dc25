//! In-memory page implementation for tests and the CLI harness.

use std::collections::HashMap;

use fieldguard_model::{
    Effect, FieldId, FieldKind, PageSnapshot, RowId, VisualState,
};

use crate::page::PageView;

#[derive(Debug, Clone)]
struct FieldRecord {
    id: FieldId,
    name: Option<String>,
    row: Option<RowId>,
    #[allow(dead_code)]
    kind: FieldKind,
    width: f64,
    value: String,
    visual: VisualState,
}

/// A mutable page model holding fields in document order.
///
/// Hosts the engine in tests and in the CLI, standing in for the live DOM:
/// the harness mutates it directly (typing, reflow, row insertion) and
/// applies engine effects back onto it with [`MemoryPage::apply`].
#[derive(Debug, Default)]
pub struct MemoryPage {
    fields: Vec<FieldRecord>,
    by_name: HashMap<String, FieldId>,
    next_field: u64,
    next_row: u64,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a page from a snapshot, assigning ids in document order.
    pub fn from_snapshot(snapshot: &PageSnapshot) -> Self {
        let mut page = Self::new();
        for row_snapshot in &snapshot.rows {
            let row = page.add_row();
            for field in &row_snapshot.fields {
                page.add_named_field(
                    Some(row),
                    &field.name,
                    field.kind,
                    field.width,
                    &field.value,
                );
            }
        }
        page
    }

    pub fn add_row(&mut self) -> RowId {
        let row = RowId(self.next_row);
        self.next_row += 1;
        row
    }

    /// Append a field in document order.
    pub fn add_field(
        &mut self,
        row: Option<RowId>,
        kind: FieldKind,
        width: f64,
        value: &str,
    ) -> FieldId {
        self.insert_field(row, None, kind, width, value)
    }

    /// Append a field with a host-side name for lookups.
    pub fn add_named_field(
        &mut self,
        row: Option<RowId>,
        name: &str,
        kind: FieldKind,
        width: f64,
        value: &str,
    ) -> FieldId {
        self.insert_field(row, Some(name.to_string()), kind, width, value)
    }

    fn insert_field(
        &mut self,
        row: Option<RowId>,
        name: Option<String>,
        kind: FieldKind,
        width: f64,
        value: &str,
    ) -> FieldId {
        let id = FieldId(self.next_field);
        self.next_field += 1;
        if let Some(name) = &name {
            self.by_name.insert(name.clone(), id);
        }
        self.fields.push(FieldRecord {
            id,
            name,
            row,
            kind,
            width,
            value: value.to_string(),
            visual: VisualState::Normal,
        });
        id
    }

    pub fn field_by_name(&self, name: &str) -> Option<FieldId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, field: FieldId) -> Option<&str> {
        self.record(field)?.name.as_deref()
    }

    pub fn set_value(&mut self, field: FieldId, value: &str) {
        if let Some(record) = self.record_mut(field) {
            record.value = value.to_string();
        }
    }

    pub fn set_width(&mut self, field: FieldId, width: f64) {
        if let Some(record) = self.record_mut(field) {
            record.width = width;
        }
    }

    pub fn value(&self, field: FieldId) -> &str {
        self.record(field).map(|r| r.value.as_str()).unwrap_or("")
    }

    pub fn visual(&self, field: FieldId) -> VisualState {
        self.record(field).map(|r| r.visual).unwrap_or_default()
    }

    /// Apply engine effects to the page.
    ///
    /// Visual changes and programmatic writes land on the field records;
    /// pulses and change notifications have no in-memory representation.
    /// Returns the notification messages, in order, for the harness to
    /// surface.
    pub fn apply(&mut self, effects: &[Effect]) -> Vec<String> {
        let mut notices = Vec::new();
        for effect in effects {
            match effect {
                Effect::SetVisual { field, state } => {
                    if let Some(record) = self.record_mut(*field) {
                        record.visual = *state;
                    }
                }
                Effect::SetValue { field, value } => {
                    if let Some(record) = self.record_mut(*field) {
                        record.value = value.clone();
                    }
                }
                Effect::Notify { message } => notices.push(message.clone()),
                Effect::FieldChanged { .. } | Effect::PulseDerived { .. } => {}
            }
        }
        notices
    }

    fn record(&self, field: FieldId) -> Option<&FieldRecord> {
        self.fields.iter().find(|r| r.id == field)
    }

    fn record_mut(&mut self, field: FieldId) -> Option<&mut FieldRecord> {
        self.fields.iter_mut().find(|r| r.id == field)
    }
}

impl PageView for MemoryPage {
    fn fields(&self) -> Vec<FieldId> {
        self.fields.iter().map(|r| r.id).collect()
    }

    fn field_width(&self, field: FieldId) -> f64 {
        self.record(field).map(|r| r.width).unwrap_or(0.0)
    }

    fn field_value(&self, field: FieldId) -> String {
        self.record(field)
            .map(|r| r.value.clone())
            .unwrap_or_default()
    }

    fn row_of(&self, field: FieldId) -> Option<RowId> {
        self.record(field)?.row
    }

    fn fields_in_row(&self, row: RowId) -> Vec<FieldId> {
        self.fields
            .iter()
            .filter(|r| r.row == Some(row))
            .map(|r| r.id)
            .collect()
    }
}
