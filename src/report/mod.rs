use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::input::EvalTable;
use crate::metrics::{
    Aggregate, Confusion, FairnessError, GroupScores, MetricKind, confusion_by_group,
    demographic_parity, equal_odds, equal_opportunity,
};

pub mod json;
pub mod text;
pub mod tsv;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMeta {
    pub path: String,
    pub n_rows: usize,
    pub weighted: bool,
}

/// Confusion counts and every rate for one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupStats {
    pub group: String,
    pub rows: usize,
    pub weight: f64,
    pub positives: f64,
    pub negatives: f64,
    pub tpr: Option<f64>,
    pub fpr: Option<f64>,
    pub selection_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupValue {
    pub group: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tpr: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fpr: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricResult {
    pub metric: MetricKind,
    pub per_group: Vec<GroupValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregated: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub tool: ToolMeta,
    pub input: InputMeta,
    pub aggregate: Option<Aggregate>,
    pub reference_group: String,
    pub comparison_group: String,
    pub groups: Vec<GroupStats>,
    pub metrics: Vec<MetricResult>,
}

/// Computes the requested metrics over `table`.
///
/// Structural problems (shape, labels, weights, group count) abort the run.
/// A metric that is undefined for this data is kept with its error message
/// so the remaining metrics still get reported.
pub fn build_summary(
    table: &EvalTable,
    metrics: &[MetricKind],
    aggregate: Option<Aggregate>,
) -> Result<Summary, FairnessError> {
    let y_true = table.y_true.as_slice();
    let y_pred = table.y_pred.as_slice();
    let a = table.groups.as_slice();
    let weights = table.weights();

    let partition = confusion_by_group(y_true, y_pred, a, weights)?;
    let groups = partition
        .iter()
        .map(|(group, counts)| group_stats(group, counts))
        .collect::<Vec<_>>();

    let mut results = Vec::with_capacity(metrics.len());
    for &kind in metrics {
        let computed = match kind {
            MetricKind::EqualOpportunity => equal_opportunity(y_true, y_pred, a, None, weights)
                .and_then(|s| single_rate(s.groups(), aggregate)),
            MetricKind::DemographicParity => demographic_parity(y_true, y_pred, a, None, weights)
                .and_then(|s| single_rate(s.groups(), aggregate)),
            MetricKind::EqualOdds => {
                equal_odds(y_true, y_pred, a, None, weights).and_then(|s| match s.groups() {
                    Some(scores) => {
                        let per_group: Vec<GroupValue> = scores
                            .iter()
                            .map(|(g, r)| GroupValue {
                                group: g.clone(),
                                rate: None,
                                tpr: Some(r.tpr),
                                fpr: Some(r.fpr),
                            })
                            .collect();
                        let aggregated = aggregate.map(|m| scores.aggregate(m)).transpose()?;
                        Ok((per_group, aggregated))
                    }
                    None => Ok((Vec::new(), None)),
                })
            }
        };

        let result = match computed {
            Ok((per_group, aggregated)) => MetricResult {
                metric: kind,
                per_group,
                aggregated,
                error: None,
            },
            Err(err) => {
                tracing::warn!("{} not reported: {}", kind, err);
                MetricResult {
                    metric: kind,
                    per_group: Vec::new(),
                    aggregated: None,
                    error: Some(err.to_string()),
                }
            }
        };
        results.push(result);
    }

    Ok(Summary {
        tool: ToolMeta {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        input: InputMeta {
            path: table.source.display().to_string(),
            n_rows: table.n_rows(),
            weighted: table.weights.is_some(),
        },
        aggregate,
        reference_group: groups[0].group.clone(),
        comparison_group: groups[1].group.clone(),
        groups,
        metrics: results,
    })
}

type Computed = (Vec<GroupValue>, Option<f64>);

fn single_rate(
    scores: Option<&GroupScores<String>>,
    aggregate: Option<Aggregate>,
) -> Result<Computed, FairnessError> {
    let Some(scores) = scores else {
        return Ok((Vec::new(), None));
    };
    let per_group = scores
        .iter()
        .map(|(g, v)| GroupValue {
            group: g.clone(),
            rate: Some(*v),
            tpr: None,
            fpr: None,
        })
        .collect();
    let aggregated = aggregate.map(|m| scores.aggregate(m)).transpose()?;
    Ok((per_group, aggregated))
}

fn group_stats(group: &str, counts: &Confusion) -> GroupStats {
    GroupStats {
        group: group.to_string(),
        rows: counts.rows,
        weight: counts.total(),
        positives: counts.positives(),
        negatives: counts.negatives(),
        tpr: counts.true_positive_rate(),
        fpr: counts.false_positive_rate(),
        selection_rate: counts.selection_rate(),
    }
}

pub fn write_reports(summary: &Summary, out_dir: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
        path: out_dir.display().to_string(),
        source,
    })?;

    let summary_path = out_dir.join("summary.json");
    write_text(&summary_path, &json::render_summary_json(summary)?)?;

    let groups_path = out_dir.join("groups.tsv");
    write_text(&groups_path, &tsv::render_groups_tsv(&summary.groups))?;

    let report_path = out_dir.join("report.txt");
    write_text(&report_path, &text::render_report_text(summary))?;

    tracing::info!("reports written to {}", out_dir.display());
    Ok(())
}

fn write_text(path: &Path, contents: &str) -> Result<(), ReportError> {
    let io_err = |source: std::io::Error| ReportError::Io {
        path: path.display().to_string(),
        source,
    };
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    w.write_all(contents.as_bytes()).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}

pub fn format_f64_6(v: f64) -> String {
    format!("{:.6}", v)
}

pub fn format_rate(v: Option<f64>) -> String {
    v.map(format_f64_6).unwrap_or_else(|| "NA".to_string())
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
