//! Read-side abstraction over the host page.

use fieldguard_model::{FieldId, RowId};

/// Read access to the live page.
///
/// Widths and values are re-read on every evaluation; the engine caches
/// nothing about layout because the host can reflow fields at any time.
/// Implementations must answer for unknown ids as if the field were a
/// hidden, empty, rowless field (zero width, empty value, no row) — the
/// engine treats the page as untrusted and degrades to no-ops.
pub trait PageView {
    /// Every text-capable field currently on the page, in document order.
    fn fields(&self) -> Vec<FieldId>;

    /// Current rendered width in pixels; 0.0 when hidden or unknown.
    fn field_width(&self, field: FieldId) -> f64;

    /// Current raw value; empty when unknown.
    fn field_value(&self, field: FieldId) -> String;

    /// The nearest enclosing row grouping, if any.
    fn row_of(&self, field: FieldId) -> Option<RowId>;

    /// Fields inside `row`, in document order.
    fn fields_in_row(&self, row: RowId) -> Vec<FieldId>;
}
