//! Command implementations: each returns a plain result struct the report
//! layer renders.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Serialize;

use fieldguard_engine::memory::MemoryPage;
use fieldguard_engine::{Engine, PageView, classify, path_depth};
use fieldguard_model::{
    EditScript, Effect, EngineConfig, FieldId, FieldRole, PageSnapshot, VisualState,
};

/// A flagged or evaluated field, by host-side name.
#[derive(Debug, Clone, Serialize)]
pub struct FieldReport {
    pub name: String,
    pub value: String,
}

/// A derived level written into a narrow field.
#[derive(Debug, Clone, Serialize)]
pub struct LevelReport {
    pub name: String,
    pub level: String,
}

/// Result of simulating sequential entry of a snapshot's values.
#[derive(Debug, Serialize)]
pub struct CheckResult {
    pub duplicates: Vec<FieldReport>,
    pub levels: Vec<LevelReport>,
    pub notices: Vec<String>,
    pub history_len: usize,
}

/// Result of submit-time validation.
#[derive(Debug, Serialize)]
pub struct ValidateResult {
    pub blocked: bool,
    pub flagged: Vec<FieldReport>,
    pub notices: Vec<String>,
}

/// One debounced evaluation performed during a replay.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub field: String,
    pub at_ms: u64,
    pub duplicate: bool,
}

/// Result of replaying a timed edit script through the debouncer.
#[derive(Debug, Serialize)]
pub struct ReplayResult {
    pub evaluations: Vec<EvaluationReport>,
    /// Edits whose pending check was superseded before it could fire.
    pub coalesced_edits: usize,
    pub notices: Vec<String>,
}

/// Simulate typing the snapshot's values field by field.
///
/// Runs the startup attachment scan, then evaluates every attached field in
/// document order (detector then deriver), exactly as the engine would after
/// each field's debounce window elapsed.
pub fn run_check(snapshot: &PageSnapshot, config: EngineConfig) -> Result<CheckResult> {
    snapshot.validate().context("invalid page snapshot")?;
    let mut page = MemoryPage::from_snapshot(snapshot);
    let mut engine = Engine::new(config);

    let attached = engine.scan_attachments(&page);
    tracing::info!(fields = attached.len(), "attached snapshot fields");

    let mut duplicates = Vec::new();
    let mut notices = Vec::new();
    for field in attached {
        let duplicate = engine.evaluate(&page, field);
        notices.extend(page.apply(&engine.drain_effects()));
        if duplicate {
            duplicates.push(field_report(&page, field));
        }
    }

    let levels = collect_levels(&page, engine.config());
    Ok(CheckResult {
        duplicates,
        levels,
        notices,
        history_len: engine.history_len(),
    })
}

/// Run submit-time validation over the whole snapshot.
pub fn run_validate(snapshot: &PageSnapshot, config: EngineConfig) -> Result<ValidateResult> {
    snapshot.validate().context("invalid page snapshot")?;
    let mut page = MemoryPage::from_snapshot(snapshot);
    let mut engine = Engine::new(config);

    let fields = page.fields();
    let outcome = engine.validate_submission(&page, &fields);
    let notices = page.apply(&engine.drain_effects());
    tracing::info!(blocked = outcome.block, flagged = outcome.flagged.len(), "validated form");

    let flagged = outcome
        .flagged
        .iter()
        .map(|&field| field_report(&page, field))
        .collect();
    Ok(ValidateResult {
        blocked: outcome.block,
        flagged,
        notices,
    })
}

/// Replay a timed edit script through the shared debounce slot.
pub fn run_replay(script: &EditScript, config: EngineConfig) -> Result<ReplayResult> {
    script.validate().context("invalid edit script")?;
    let mut page = MemoryPage::from_snapshot(&script.page);
    let mut engine = Engine::new(config);
    engine.scan_attachments(&page);

    let base = Instant::now();
    let mut edits = script.edits.clone();
    edits.sort_by_key(|edit| edit.at_ms);

    let mut evaluations = Vec::new();
    let mut notices = Vec::new();
    for edit in &edits {
        let now = base + Duration::from_millis(edit.at_ms);
        // Fire anything whose quiet period elapsed before this edit arrived
        fire_elapsed(&mut engine, &mut page, now, base, &mut evaluations, &mut notices);

        let field = page
            .field_by_name(&edit.field)
            .expect("script validated against the page");
        page.set_value(field, &edit.value);
        engine.handle_edit(field, now);
    }
    // Let the final quiet period elapse
    if let Some(deadline) = engine.next_deadline() {
        fire_elapsed(
            &mut engine,
            &mut page,
            deadline,
            base,
            &mut evaluations,
            &mut notices,
        );
    }

    let coalesced = edits.len().saturating_sub(evaluations.len());
    Ok(ReplayResult {
        evaluations,
        coalesced_edits: coalesced,
        notices,
    })
}

/// Print-friendly path depth for one URL.
pub fn run_depth(url: &str) -> usize {
    path_depth(url)
}

fn fire_elapsed(
    engine: &mut Engine,
    page: &mut MemoryPage,
    now: Instant,
    base: Instant,
    evaluations: &mut Vec<EvaluationReport>,
    notices: &mut Vec<String>,
) {
    while let Some(deadline) = engine.next_deadline() {
        if deadline > now {
            break;
        }
        let Some(field) = engine.fire_due(&*page, deadline) else {
            break;
        };
        let effects = engine.drain_effects();
        let duplicate = effects.iter().any(|effect| {
            matches!(
                effect,
                Effect::SetVisual { field: target, state: VisualState::Highlighted }
                    if *target == field
            )
        });
        notices.extend(page.apply(&effects));
        evaluations.push(EvaluationReport {
            field: page
                .name_of(field)
                .map(ToString::to_string)
                .unwrap_or_else(|| field.to_string()),
            at_ms: deadline.duration_since(base).as_millis() as u64,
            duplicate,
        });
    }
}

fn field_report(page: &MemoryPage, field: FieldId) -> FieldReport {
    FieldReport {
        name: page
            .name_of(field)
            .map(ToString::to_string)
            .unwrap_or_else(|| field.to_string()),
        value: page.field_value(field),
    }
}

fn collect_levels(page: &MemoryPage, config: &EngineConfig) -> Vec<LevelReport> {
    page.fields()
        .into_iter()
        .filter(|&field| classify(page.field_width(field), config) == FieldRole::Level)
        .filter(|&field| !page.value(field).is_empty())
        .map(|field| LevelReport {
            name: page
                .name_of(field)
                .map(ToString::to_string)
                .unwrap_or_else(|| field.to_string()),
            level: page.value(field).to_string(),
        })
        .collect()
}
