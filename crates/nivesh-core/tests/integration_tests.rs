//! Integration tests for nivesh-core
//!
//! These tests exercise the full reconcile workflow against the in-memory
//! store: seed state, run, inspect what actually got inserted.

use chrono::NaiveDate;

use nivesh_core::models::{AUTO_NOTE, SKIP_NOTE};
use nivesh_core::reconcile::{self, DEFAULT_EPF_AMOUNT};
use nivesh_core::{MemoryStore, Month};

const USER: &str = "user-1";

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

async fn run(store: &MemoryStore, today: NaiveDate) -> reconcile::ReconcileOutcome {
    reconcile::run(store, USER, today, None, DEFAULT_EPF_AMOUNT).await
}

// =============================================================================
// Reconcile Workflow Tests
// =============================================================================

#[tokio::test]
async fn test_fresh_month_after_both_triggers() {
    let store = MemoryStore::new();
    let plan_id = store.seed_plan("Index Fund", 5000.0, d(2026, 6, 1), None);

    let outcome = run(&store, d(2026, 8, 26)).await;

    assert!(outcome.checked);
    let epf = outcome.epf.expect("EPF contribution inserted");
    assert_eq!(epf.date, d(2026, 8, 5));
    assert_eq!(epf.amount, DEFAULT_EPF_AMOUNT);
    assert_eq!(epf.notes.as_deref(), Some(AUTO_NOTE));

    assert_eq!(outcome.investments.len(), 1);
    let sip = &outcome.investments[0];
    assert_eq!(sip.sip_plan_id, Some(plan_id));
    assert_eq!(sip.amount, 5000.0);
    assert_eq!(sip.date, d(2026, 8, 25));
}

#[tokio::test]
async fn test_before_epf_trigger_inserts_nothing() {
    let store = MemoryStore::new();
    store.seed_plan("Index Fund", 5000.0, d(2026, 6, 1), None);

    let outcome = run(&store, d(2026, 8, 4)).await;

    assert!(outcome.checked);
    assert!(outcome.is_empty());
    assert!(store.contributions().is_empty());
    assert!(store.investments().is_empty());
}

#[tokio::test]
async fn test_between_triggers_inserts_only_epf() {
    let store = MemoryStore::new();
    store.seed_plan("Index Fund", 5000.0, d(2026, 6, 1), None);

    let outcome = run(&store, d(2026, 8, 6)).await;

    assert!(outcome.epf.is_some());
    assert!(outcome.investments.is_empty());
}

#[tokio::test]
async fn test_second_run_inserts_zero_rows() {
    let store = MemoryStore::new();
    store.seed_plan("Index Fund", 5000.0, d(2026, 6, 1), None);

    let first = run(&store, d(2026, 8, 26)).await;
    assert!(!first.is_empty());

    let second = run(&store, d(2026, 8, 26)).await;
    assert!(second.checked);
    assert!(second.is_empty());

    assert_eq!(store.contributions().len(), 1);
    assert_eq!(store.investments().len(), 1);
}

#[tokio::test]
async fn test_skip_then_reconcile_adds_no_sip() {
    let store = MemoryStore::new();
    let plan_id = store.seed_plan("Index Fund", 5000.0, d(2026, 6, 1), None);

    // User skips on the 10th, ahead of the day-25 check
    let markers = reconcile::skip_month(&store, USER, d(2026, 8, 10)).await;
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].amount, 0.0);
    assert_eq!(markers[0].notes.as_deref(), Some(SKIP_NOTE));
    assert_eq!(markers[0].sip_plan_id, Some(plan_id));

    let outcome = run(&store, d(2026, 8, 26)).await;
    assert!(outcome.investments.is_empty(), "skip marker satisfies the month");
    // Only the marker exists
    assert_eq!(store.investments().len(), 1);
}

#[tokio::test]
async fn test_skip_is_idempotent() {
    let store = MemoryStore::new();
    store.seed_plan("Index Fund", 5000.0, d(2026, 6, 1), None);

    let first = reconcile::skip_month(&store, USER, d(2026, 8, 10)).await;
    assert_eq!(first.len(), 1);
    let second = reconcile::skip_month(&store, USER, d(2026, 8, 11)).await;
    assert!(second.is_empty());
}

#[tokio::test]
async fn test_multiple_plans_one_already_covered() {
    let store = MemoryStore::new();
    let covered = store.seed_plan("Index Fund", 5000.0, d(2026, 1, 1), None);
    let uncovered = store.seed_plan("Debt Fund", 3000.0, d(2026, 7, 1), None);
    store.seed_investment(Some(covered), d(2026, 8, 25), 5000.0, None);
    store.seed_contribution(d(2026, 8, 5), 1800.0);

    let outcome = run(&store, d(2026, 8, 28)).await;

    assert!(outcome.epf.is_none());
    assert_eq!(outcome.investments.len(), 1);
    assert_eq!(outcome.investments[0].sip_plan_id, Some(uncovered));
}

#[tokio::test]
async fn test_plan_starting_next_month_is_ignored() {
    let store = MemoryStore::new();
    store.seed_plan("Index Fund", 5000.0, d(2026, 9, 1), None);
    store.seed_contribution(d(2026, 8, 5), 1800.0);

    let outcome = run(&store, d(2026, 8, 28)).await;
    assert!(outcome.is_empty());
}

#[tokio::test]
async fn test_last_reconciled_marker_short_circuits_run() {
    let store = MemoryStore::new();
    store.seed_plan("Index Fund", 5000.0, d(2026, 6, 1), None);

    let marker = Some(Month::from_date(d(2026, 8, 1)));
    let outcome =
        reconcile::run(&store, USER, d(2026, 8, 26), marker, DEFAULT_EPF_AMOUNT).await;

    assert!(outcome.checked);
    assert!(outcome.is_empty());
    assert!(store.contributions().is_empty());
}

// =============================================================================
// Failure Degradation Tests
// =============================================================================

#[tokio::test]
async fn test_read_failure_degrades_to_no_inserts() {
    let store = MemoryStore::new();
    store.seed_plan("Index Fund", 5000.0, d(2026, 6, 1), None);
    store.set_fail_reads(true);

    let outcome = run(&store, d(2026, 8, 26)).await;

    assert!(!outcome.checked, "failed reads leave the month unverified");
    assert!(outcome.is_empty());
    assert!(store.contributions().is_empty());
    assert!(store.investments().is_empty());
}

#[tokio::test]
async fn test_write_failure_is_swallowed() {
    let store = MemoryStore::new();
    store.seed_plan("Index Fund", 5000.0, d(2026, 6, 1), None);
    store.set_fail_writes(true);

    let outcome = run(&store, d(2026, 8, 26)).await;

    // Checks completed, inserts failed, nothing raised
    assert!(outcome.checked);
    assert!(outcome.is_empty());

    // Backend recovers: the next pass inserts normally
    store.set_fail_writes(false);
    let retry = run(&store, d(2026, 8, 27)).await;
    assert!(retry.epf.is_some());
    assert_eq!(retry.investments.len(), 1);
}

#[tokio::test]
async fn test_skip_read_failure_inserts_nothing() {
    let store = MemoryStore::new();
    store.seed_plan("Index Fund", 5000.0, d(2026, 6, 1), None);
    store.set_fail_reads(true);

    let markers = reconcile::skip_month(&store, USER, d(2026, 8, 10)).await;
    assert!(markers.is_empty());
    assert!(store.investments().is_empty());
}
