use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::input::EvalTable;

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("camelbird_report_test_{}_{}", std::process::id(), id));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn build_table(weights: Option<Vec<f64>>) -> EvalTable {
    let groups = [1, 1, 1, 1, 0, 0, 1, 1, 0, 0]
        .iter()
        .map(|g: &u8| g.to_string())
        .collect();
    EvalTable {
        source: PathBuf::from("preds.tsv"),
        y_true: vec![1, 1, 1, 1, 1, 1, 0, 0, 0, 0],
        y_pred: vec![0, 1, 1, 1, 1, 1, 0, 1, 0, 1],
        groups,
        weights,
    }
}

#[test]
fn test_build_summary_all_metrics() {
    let table = build_table(None);
    let summary = build_summary(&table, MetricKind::all(), Some(Aggregate::Ratio)).unwrap();

    assert_eq!(summary.reference_group, "0");
    assert_eq!(summary.comparison_group, "1");
    assert_eq!(summary.groups.len(), 2);
    assert_eq!(summary.groups[0].rows, 4);
    assert_eq!(summary.groups[1].tpr, Some(0.75));

    assert_eq!(summary.metrics.len(), 3);
    let eo = &summary.metrics[0];
    assert_eq!(eo.metric, MetricKind::EqualOpportunity);
    assert_eq!(eo.aggregated, Some(0.75));
    assert_eq!(eo.per_group[1].rate, Some(0.75));
    assert!(eo.error.is_none());

    let odds = &summary.metrics[1];
    assert_eq!(odds.per_group[0].tpr, Some(1.0));
    assert_eq!(odds.per_group[0].fpr, Some(0.5));
}

#[test]
fn test_build_summary_without_aggregate() {
    let table = build_table(None);
    let summary = build_summary(&table, &[MetricKind::DemographicParity], None).unwrap();
    assert_eq!(summary.metrics.len(), 1);
    assert_eq!(summary.metrics[0].aggregated, None);
    assert_eq!(summary.metrics[0].per_group[0].rate, Some(0.75));
}

#[test]
fn test_build_summary_keeps_undefined_metric_as_error() {
    let table = EvalTable {
        source: PathBuf::from("preds.tsv"),
        y_true: vec![1, 1, 1, 0],
        y_pred: vec![1, 0, 1, 0],
        groups: vec!["a".into(), "a".into(), "b".into(), "b".into()],
        weights: None,
    };
    let summary = build_summary(&table, MetricKind::all(), Some(Aggregate::Difference)).unwrap();
    let eo = &summary.metrics[0];
    assert!(eo.error.is_none());
    assert_eq!(eo.aggregated, Some(-0.5));
    let odds = &summary.metrics[1];
    assert!(odds.error.as_deref().unwrap().contains("group a"));
    assert!(odds.per_group.is_empty());
    assert_eq!(summary.groups[0].fpr, None);
}

#[test]
fn test_build_summary_rejects_structural_errors() {
    let mut table = build_table(None);
    table.groups[0] = "2".to_string();
    let err = build_summary(&table, MetricKind::all(), None).unwrap_err();
    assert_eq!(err, FairnessError::GroupCardinality { found: 3 });
}

#[test]
fn test_weighted_summary() {
    let mut weights = vec![1.0; 10];
    weights[0] = 2.0;
    let table = build_table(Some(weights));
    let summary =
        build_summary(&table, &[MetricKind::EqualOpportunity], Some(Aggregate::Difference))
            .unwrap();
    assert!(summary.input.weighted);
    assert!((summary.metrics[0].aggregated.unwrap() - 0.40).abs() < 1e-12);
    assert_eq!(summary.groups[1].weight, 7.0);
}

#[test]
fn test_groups_tsv_marks_undefined_rates() {
    let groups = vec![GroupStats {
        group: "a\tb".to_string(),
        rows: 2,
        weight: 2.0,
        positives: 2.0,
        negatives: 0.0,
        tpr: Some(0.5),
        fpr: None,
        selection_rate: Some(0.5),
    }];
    let tsv = tsv::render_groups_tsv(&groups);
    let lines: Vec<&str> = tsv.lines().collect();
    assert_eq!(
        lines[0],
        "group\trows\tweight\tpositives\tnegatives\ttpr\tfpr\tselection_rate"
    );
    assert_eq!(
        lines[1],
        "a b\t2\t2.000000\t2.000000\t0.000000\t0.500000\tNA\t0.500000"
    );
}

#[test]
fn test_write_reports_creates_files() {
    let dir = make_temp_dir().join("nested");
    let summary = build_summary(&build_table(None), MetricKind::all(), Some(Aggregate::Ratio))
        .unwrap();
    write_reports(&summary, &dir).unwrap();

    let json = std::fs::read_to_string(dir.join("summary.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["aggregate"], "ratio");
    assert_eq!(value["tool"]["name"], "camelbird");
    assert_eq!(value["metrics"][2]["metric"], "demographic_parity");
    assert!(value["metrics"][0].get("error").is_none());

    let tsv = std::fs::read_to_string(dir.join("groups.tsv")).unwrap();
    assert_eq!(tsv.lines().count(), 3);
    let report = std::fs::read_to_string(dir.join("report.txt")).unwrap();
    assert!(report.starts_with("Group Fairness Report"));
}

#[test]
fn test_build_summary_equal_odds_ratio_without_false_positives() {
    let table = EvalTable {
        source: PathBuf::from("preds.tsv"),
        y_true: vec![1, 0, 1, 0],
        y_pred: vec![1, 0, 1, 0],
        groups: vec!["a".into(), "a".into(), "b".into(), "b".into()],
        weights: None,
    };
    let summary = build_summary(&table, &[MetricKind::EqualOdds], Some(Aggregate::Ratio)).unwrap();
    assert!(summary.metrics[0].error.is_none());
    assert_eq!(summary.metrics[0].aggregated, Some(1.0));
}

#[test]
fn test_format_rate() {
    assert_eq!(format_rate(Some(0.25)), "0.250000");
    assert_eq!(format_rate(None), "NA");
}
