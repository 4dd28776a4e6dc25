//! Integration tests for the engine: detection, derivation, debounce, and
//! control commands.

use std::time::{Duration, Instant};

use fieldguard_engine::memory::MemoryPage;
use fieldguard_engine::{Engine, MutationBatch, QueuedFeed};
use fieldguard_model::{Effect, EngineConfig, FieldId, FieldKind, VisualState};

const WIDE: f64 = 400.0;
const NARROW: f64 = 80.0;

/// One row with a wide content field and a narrow level field.
fn add_row_pair(page: &mut MemoryPage, value: &str) -> (FieldId, FieldId) {
    let row = page.add_row();
    let content = page.add_field(Some(row), FieldKind::Text, WIDE, value);
    let level = page.add_field(Some(row), FieldKind::Text, NARROW, "");
    (content, level)
}

#[test]
fn test_first_occurrence_unmarked_second_flagged() {
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "https://a.com/x");
    let (b, _) = add_row_pair(&mut page, "https://a.com/x");
    let mut engine = Engine::new(EngineConfig::default());

    assert!(!engine.evaluate(&page, a));
    page.apply(&engine.drain_effects());
    assert_eq!(page.visual(a), VisualState::Normal);

    assert!(engine.evaluate(&page, b));
    let effects = engine.drain_effects();
    let notices = page.apply(&effects);
    assert_eq!(page.visual(b), VisualState::Highlighted);
    assert_eq!(notices.len(), 1);
    assert!(notices[0].contains("https://a.com/x"));
    // The raw, non-normalized value appears in the notice
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn test_recheck_of_unchanged_value_does_not_double_insert() {
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "same");
    let mut engine = Engine::new(EngineConfig::default());

    assert!(!engine.evaluate(&page, a));
    // Re-evaluating the same field flags it against its own earlier insert,
    // but history membership is unchanged.
    assert!(engine.evaluate(&page, a));
    assert!(engine.evaluate(&page, a));
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn test_empty_and_whitespace_values_never_enter_history() {
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "");
    let (b, _) = add_row_pair(&mut page, "   ");
    let mut engine = Engine::new(EngineConfig::default());

    assert!(!engine.evaluate(&page, a));
    assert!(!engine.evaluate(&page, b));
    assert_eq!(engine.history_len(), 0);
    page.apply(&engine.drain_effects());
    assert_eq!(page.visual(a), VisualState::Normal);
    assert_eq!(page.visual(b), VisualState::Normal);
}

#[test]
fn test_narrow_field_is_reset_and_skipped() {
    let mut page = MemoryPage::new();
    let row = page.add_row();
    let narrow = page.add_field(Some(row), FieldKind::Text, NARROW, "dup");
    let mut engine = Engine::new(EngineConfig::default());

    assert!(!engine.evaluate(&page, narrow));
    assert_eq!(engine.history_len(), 0);
    page.apply(&engine.drain_effects());
    assert_eq!(page.visual(narrow), VisualState::Normal);
}

#[test]
fn test_non_ascii_values_are_handled() {
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "例え.com/ページ");
    let (b, _) = add_row_pair(&mut page, "例え.com/ページ");
    let mut engine = Engine::new(EngineConfig::default());

    assert!(!engine.evaluate(&page, a));
    assert!(engine.evaluate(&page, b));
}

#[test]
fn test_level_derivation_writes_depth_and_pulses() {
    let mut page = MemoryPage::new();
    let (content, level) = add_row_pair(&mut page, "https://a.com/x/y");
    let mut engine = Engine::new(EngineConfig::default());

    engine.evaluate(&page, content);
    let effects = engine.drain_effects();
    assert!(effects.iter().any(|e| matches!(
        e,
        Effect::SetValue { field, value } if *field == level && value == "2"
    )));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::FieldChanged { field } if *field == level)));
    assert!(effects
        .iter()
        .any(|e| matches!(e, Effect::PulseDerived { field, .. } if *field == level)));
    page.apply(&effects);
    assert_eq!(page.value(level), "2");
}

#[test]
fn test_level_derivation_is_idempotent() {
    let mut page = MemoryPage::new();
    let (content, level) = add_row_pair(&mut page, "a.com/x");
    let mut engine = Engine::new(EngineConfig::default());

    engine.evaluate(&page, content);
    page.apply(&engine.drain_effects());
    engine.evaluate(&page, content);
    page.apply(&engine.drain_effects());
    assert_eq!(page.value(level), "1");
}

#[test]
fn test_erasing_url_clears_level_field() {
    let mut page = MemoryPage::new();
    let (content, level) = add_row_pair(&mut page, "a.com/x");
    let mut engine = Engine::new(EngineConfig::default());

    engine.evaluate(&page, content);
    page.apply(&engine.drain_effects());
    assert_eq!(page.value(level), "1");

    page.set_value(content, "");
    engine.evaluate(&page, content);
    page.apply(&engine.drain_effects());
    assert_eq!(page.value(level), "");
}

#[test]
fn test_derivation_without_row_or_level_field_is_noop() {
    let mut page = MemoryPage::new();
    // Rowless content field
    let rowless = page.add_field(None, FieldKind::Text, WIDE, "a.com/x");
    // Row with only content fields
    let row = page.add_row();
    let unpaired = page.add_field(Some(row), FieldKind::Text, WIDE, "a.com/x/y");
    let mut engine = Engine::new(EngineConfig::default());

    engine.evaluate(&page, rowless);
    engine.evaluate(&page, unpaired);
    let effects = engine.drain_effects();
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::SetValue { .. })));
}

#[test]
fn test_hidden_sibling_is_not_a_level_target() {
    let mut page = MemoryPage::new();
    let row = page.add_row();
    let content = page.add_field(Some(row), FieldKind::Text, WIDE, "a.com/x");
    let hidden = page.add_field(Some(row), FieldKind::Text, 0.0, "");
    let level = page.add_field(Some(row), FieldKind::Text, NARROW, "");
    let mut engine = Engine::new(EngineConfig::default());

    engine.evaluate(&page, content);
    page.apply(&engine.drain_effects());
    assert_eq!(page.value(hidden), "");
    assert_eq!(page.value(level), "1");
}

#[test]
fn test_debounce_coalesces_to_last_edited_field() {
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "a.com/1");
    let (b, _) = add_row_pair(&mut page, "a.com/2");
    let mut engine = Engine::new(EngineConfig::default());
    let start = Instant::now();

    engine.handle_edit(a, start);
    engine.handle_edit(b, start + Duration::from_millis(100));

    // Nothing due before B's quiet period elapses, even past A's deadline
    assert_eq!(engine.fire_due(&page, start + Duration::from_millis(500)), None);
    assert_eq!(
        engine.fire_due(&page, start + Duration::from_millis(600)),
        Some(b)
    );
    // A's pending check was silently dropped: only B's value is in history
    assert_eq!(engine.history_len(), 1);
    assert_eq!(engine.fire_due(&page, start + Duration::from_secs(5)), None);
}

#[test]
fn test_next_deadline_tracks_latest_edit() {
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "a.com");
    let mut engine = Engine::new(EngineConfig::default().with_debounce_delay_ms(200));
    let start = Instant::now();

    assert_eq!(engine.next_deadline(), None);
    engine.handle_edit(a, start);
    assert_eq!(
        engine.next_deadline(),
        Some(start + Duration::from_millis(200))
    );
    engine.fire_due(&page, start + Duration::from_millis(200));
    assert_eq!(engine.next_deadline(), None);
}

#[test]
fn test_case_toggle_clears_history_atomically() {
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "Foo");
    let (b, _) = add_row_pair(&mut page, "foo");
    let (c, _) = add_row_pair(&mut page, "foo");
    let mut engine = Engine::new(EngineConfig::default());

    engine.evaluate(&page, a);
    engine.set_case_sensitive(false);
    // History was cleared on the toggle, so "foo" is not flagged...
    assert!(!engine.evaluate(&page, b));
    // ...but a second "foo" afterward is.
    assert!(engine.evaluate(&page, c));
}

#[test]
fn test_case_insensitive_matches_across_casing() {
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "Foo");
    let (b, _) = add_row_pair(&mut page, "FOO");
    let mut engine = Engine::new(EngineConfig::default().with_case_sensitive(false));

    assert!(!engine.evaluate(&page, a));
    assert!(engine.evaluate(&page, b));
}

#[test]
fn test_clear_history_resets_every_field() {
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "dup");
    let (b, _) = add_row_pair(&mut page, "dup");
    let mut engine = Engine::new(EngineConfig::default());

    engine.evaluate(&page, a);
    engine.evaluate(&page, b);
    page.apply(&engine.drain_effects());
    assert_eq!(page.visual(b), VisualState::Highlighted);

    engine.clear_history(&page);
    let notices = page.apply(&engine.drain_effects());
    assert_eq!(engine.history_len(), 0);
    assert_eq!(page.visual(b), VisualState::Normal);
    assert_eq!(notices, vec!["History cleared".to_string()]);

    // The once-flagged value is checkable again after the clear
    assert!(!engine.evaluate(&page, a));
}

#[test]
fn test_notifications_toggle_suppresses_notices() {
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "dup");
    let (b, _) = add_row_pair(&mut page, "dup");
    let mut engine = Engine::new(EngineConfig::default());
    engine.set_notifications_enabled(false);

    engine.evaluate(&page, a);
    assert!(engine.evaluate(&page, b));
    let effects = engine.drain_effects();
    assert!(!effects.iter().any(|e| matches!(e, Effect::Notify { .. })));
    // The highlight still lands even with notices off
    page.apply(&effects);
    assert_eq!(page.visual(b), VisualState::Highlighted);
}

#[test]
fn test_history_survives_edit_away() {
    // A value once seen stays blocked for the session even after the field
    // that produced it moves on to something else.
    let mut page = MemoryPage::new();
    let (a, _) = add_row_pair(&mut page, "first");
    let (b, _) = add_row_pair(&mut page, "first");
    let mut engine = Engine::new(EngineConfig::default());

    engine.evaluate(&page, a);
    page.set_value(a, "second");
    engine.evaluate(&page, a);
    assert_eq!(engine.history_len(), 2);
    assert!(engine.evaluate(&page, b));
}

#[test]
fn test_role_is_recomputed_after_reflow() {
    // Widths are re-read on every evaluation, so a field that the page
    // widens later becomes checkable without re-attachment.
    let mut page = MemoryPage::new();
    let row = page.add_row();
    let field = page.add_field(Some(row), FieldKind::Text, NARROW, "value");
    let mut engine = Engine::new(EngineConfig::default());

    assert!(!engine.evaluate(&page, field));
    assert_eq!(engine.history_len(), 0);

    page.set_width(field, WIDE);
    assert!(!engine.evaluate(&page, field));
    assert_eq!(engine.history_len(), 1);
}

#[test]
fn test_scan_attachments_is_idempotent() {
    let mut page = MemoryPage::new();
    let (a, level_a) = add_row_pair(&mut page, "");
    let mut engine = Engine::new(EngineConfig::default());

    let first = engine.scan_attachments(&page);
    assert_eq!(first, vec![a, level_a]);
    assert!(engine.scan_attachments(&page).is_empty());

    let (b, level_b) = add_row_pair(&mut page, "");
    assert_eq!(engine.scan_attachments(&page), vec![b, level_b]);
}

#[test]
fn test_pump_feed_rescans_only_on_added_nodes() {
    let mut page = MemoryPage::new();
    let (a, level_a) = add_row_pair(&mut page, "");
    let mut engine = Engine::new(EngineConfig::default());
    let mut feed = QueuedFeed::new();

    // Startup scan before observation begins
    assert_eq!(engine.scan_attachments(&page), vec![a, level_a]);

    // Attribute-only batches do not trigger a rescan
    let (b, level_b) = add_row_pair(&mut page, "");
    feed.push(MutationBatch { added_nodes: 0 });
    assert!(engine.pump_feed(&mut feed, &page).is_empty());

    // One batch may cover many insertions
    feed.push(MutationBatch { added_nodes: 3 });
    assert_eq!(engine.pump_feed(&mut feed, &page), vec![b, level_b]);
    assert!(engine.pump_feed(&mut feed, &page).is_empty());
}
