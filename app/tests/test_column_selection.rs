//! FILENAME: tests/test_column_selection.rs
//! Integration tests for selection and apply commands.

mod common;

use app_lib::{
    apply_configuration, get_applied_configuration, get_configuration_version,
    get_selection_view, set_baseline_metric, set_date_aggregation, set_primary_dimension,
    set_primary_metric, toggle_dimension, toggle_metric, AppError, SelectionError,
};
use common::TestHarness;
use engine::{Column, DateAggregation};

// ============================================================================
// TOGGLE TESTS
// ============================================================================

#[tokio::test]
async fn test_metric_then_dimension_is_never_in_both() {
    let harness = TestHarness::with_sales_columns().await;

    assert!(toggle_metric(&harness.state, "rev").unwrap());
    assert!(toggle_dimension(&harness.state, "rev").unwrap());

    let view = get_selection_view(&harness.state);
    assert!(view.metrics.is_empty());
    assert_eq!(view.dimensions, vec![Column::measure("rev")]);
}

#[tokio::test]
async fn test_available_excludes_selected_columns() {
    let harness = TestHarness::with_sales_columns().await;
    toggle_metric(&harness.state, "rev").unwrap();
    toggle_dimension(&harness.state, "region").unwrap();

    let view = get_selection_view(&harness.state);
    let names: Vec<&str> = view.available.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["prior", "order date"]);
}

#[tokio::test]
async fn test_date_column_is_classified() {
    let harness = TestHarness::with_sales_columns().await;

    let view = get_selection_view(&harness.state);
    assert!(view.available.contains(&Column::date("order date")));
}

#[tokio::test]
async fn test_deselect_clears_primary_before_apply() {
    let harness = TestHarness::with_sales_columns().await;
    toggle_metric(&harness.state, "rev").unwrap();
    set_primary_metric(&harness.state, "rev").unwrap();
    toggle_metric(&harness.state, "rev").unwrap();

    let config = apply_configuration(&harness.state).unwrap();
    assert_eq!(config.primary_metric(), None);
    assert!(config.metrics().is_empty());
}

#[tokio::test]
async fn test_designating_unselected_column_fails() {
    let harness = TestHarness::with_sales_columns().await;

    let err = set_baseline_metric(&harness.state, "prior").unwrap_err();
    assert!(matches!(
        err,
        AppError::Selection(SelectionError::NotAMetric(ref name)) if name == "prior"
    ));
    assert!(!err.is_retryable());
}

// ============================================================================
// APPLY TESTS
// ============================================================================

#[tokio::test]
async fn test_apply_snapshot_is_not_affected_by_later_edits() {
    let harness = TestHarness::with_sales_columns().await;
    harness.apply_region_rev_prior();

    let applied = get_applied_configuration(&harness.state).unwrap();
    toggle_metric(&harness.state, "rev").unwrap();

    assert_eq!(get_applied_configuration(&harness.state), Some(applied.clone()));
    assert_eq!(applied.primary_metric(), Some(&Column::measure("rev")));
}

#[tokio::test]
async fn test_later_apply_supersedes_wholesale() {
    let harness = TestHarness::with_sales_columns().await;
    harness.apply_region_rev_prior();

    toggle_metric(&harness.state, "prior").unwrap();
    set_date_aggregation(&harness.state, "weekly").unwrap();
    apply_configuration(&harness.state).unwrap();

    let applied = get_applied_configuration(&harness.state).unwrap();
    assert_eq!(applied.metrics(), &[Column::measure("rev")]);
    assert_eq!(applied.baseline_metric(), None);
    assert_eq!(applied.date_aggregation(), Some(DateAggregation::Weekly));
    assert_eq!(get_configuration_version(&harness.state), 2);
}

#[tokio::test]
async fn test_concurrent_applies_keep_version_with_configuration() {
    let harness = TestHarness::with_sales_columns().await;
    harness.apply_region_rev_prior();
    let state = &harness.state;

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(move || {
                for _ in 0..25 {
                    apply_configuration(state).unwrap();
                }
            });
        }
    });

    assert_eq!(get_configuration_version(state), 101);
    let applied = state.applied.lock().unwrap().clone().unwrap();
    assert_eq!(applied.version, 101);
    assert_eq!(Some(applied.configuration), get_applied_configuration(state));
}

#[tokio::test]
async fn test_date_aggregation_parse_and_clear() {
    let harness = TestHarness::with_sales_columns().await;

    assert_eq!(
        set_date_aggregation(&harness.state, "MONTHLY").unwrap(),
        Some(DateAggregation::Monthly)
    );
    assert_eq!(set_date_aggregation(&harness.state, "").unwrap(), None);
    assert!(matches!(
        set_date_aggregation(&harness.state, "hourly"),
        Err(AppError::DateAggregation(_))
    ));
}

#[tokio::test]
async fn test_selection_view_lists_date_options() {
    let harness = TestHarness::with_sales_columns().await;
    set_primary_dimension(&harness.state, "region").unwrap_err();

    let view = get_selection_view(&harness.state);
    assert_eq!(view.date_aggregation_options.len(), 5);
    assert_eq!(view.date_aggregation_options[0], DateAggregation::Daily);
    assert_eq!(view.primary_dimension, None);
}
