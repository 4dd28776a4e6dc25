//! Field-classification, duplicate-detection, and level-derivation engine.
//!
//! The engine watches text-capable fields of a host form, flags values
//! repeated across the page, and writes a URL path-depth integer into the
//! narrow "level" field paired with each wide "content" field.
//!
//! ## Flow
//!
//! 1. The host feeds page mutations through a [`MutationFeed`]; the engine
//!    answers with the fields to subscribe ([`Engine::pump_feed`]).
//! 2. Raw edit events arrive via [`Engine::handle_edit`] and are coalesced
//!    by a single shared debounce slot.
//! 3. When the page goes quiet, [`Engine::fire_due`] runs the duplicate
//!    detector and the URL-to-level deriver on the last-edited field.
//! 4. Submit events bypass the debouncer entirely and go through
//!    [`Engine::validate_submission`], which uses a transient per-call
//!    seen-set independent of the running history.
//!
//! Side effects (highlights, programmatic writes, notices) are queued as
//! [`fieldguard_model::Effect`] values and drained by the host; the engine
//! reads the page only through the [`PageView`] trait.

mod classify;
mod debounce;
mod deriver;
mod detector;
mod engine;
mod feed;
mod history;
pub mod memory;
mod page;
mod submit;

pub use classify::{HIDDEN_WIDTH_PX, classify};
pub use debounce::{Debouncer, PendingCheck};
pub use deriver::path_depth;
pub use engine::Engine;
pub use feed::{MutationBatch, MutationFeed, QueuedFeed};
pub use history::{History, normalize};
pub use page::PageView;
pub use submit::SubmissionOutcome;
