//! Shared data model for the fieldguard engine and its hosts.
//!
//! The engine never touches the host page directly. It reads field state
//! through an abstract page view (defined in `fieldguard-engine`) and queues
//! [`Effect`] values for the host to apply. Everything that crosses that
//! boundary lives here.

mod config;
mod error;
mod events;
mod field;
mod snapshot;

pub use config::EngineConfig;
pub use error::{ModelError, Result};
pub use events::Effect;
pub use field::{FieldId, FieldKind, FieldRole, RowId, VisualState};
pub use snapshot::{EditEvent, EditScript, FieldSnapshot, PageSnapshot, RowSnapshot};
