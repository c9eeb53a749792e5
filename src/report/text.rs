use crate::metrics::{Aggregate, MetricKind};
use crate::report::{MetricResult, Summary, format_f64_6, format_rate};

/// Distance from parity above which a metric is called out in the report.
const DIFFERENCE_TOLERANCE: f64 = 0.1;
/// Four-fifths rule.
const RATIO_TOLERANCE: f64 = 0.8;

pub fn render_report_text(summary: &Summary) -> String {
    let mut out = String::new();

    out.push_str("Group Fairness Report\n");
    out.push_str("=====================\n\n");

    out.push_str("1. Input\n");
    out.push_str(&format!("Source: {}\n", summary.input.path));
    out.push_str(&format!("Rows: {}\n", summary.input.n_rows));
    out.push_str(&format!(
        "Sample weights: {}\n",
        if summary.input.weighted { "yes" } else { "no" }
    ));
    out.push_str(&format!(
        "Reference group: {}\nComparison group: {}\n",
        summary.reference_group, summary.comparison_group
    ));
    match summary.aggregate {
        Some(mode) => out.push_str(&format!("Aggregation: {}\n\n", describe(mode))),
        None => out.push_str("Aggregation: none (per-group rates only)\n\n"),
    }

    out.push_str("2. Group rates\n");
    for g in &summary.groups {
        out.push_str(&format!(
            "{}: rows={}, tpr={}, fpr={}, selection_rate={}\n",
            g.group,
            g.rows,
            format_rate(g.tpr),
            format_rate(g.fpr),
            format_rate(g.selection_rate)
        ));
    }
    out.push('\n');

    out.push_str("3. Fairness metrics\n");
    for m in &summary.metrics {
        out.push_str(&render_metric(m, summary.aggregate));
    }

    out
}

fn describe(mode: Aggregate) -> &'static str {
    match mode {
        Aggregate::Difference => "difference (reference - comparison)",
        Aggregate::Ratio => "ratio (comparison / reference)",
    }
}

fn render_metric(m: &MetricResult, aggregate: Option<Aggregate>) -> String {
    let mut out = format!("{}:\n", label(m.metric));
    if let Some(err) = &m.error {
        out.push_str(&format!("  not computed: {}\n", err));
        return out;
    }
    for v in &m.per_group {
        match (v.rate, v.tpr, v.fpr) {
            (Some(rate), _, _) => {
                out.push_str(&format!("  {}: {}\n", v.group, format_f64_6(rate)));
            }
            (None, tpr, fpr) => {
                out.push_str(&format!(
                    "  {}: tpr={}, fpr={}\n",
                    v.group,
                    format_rate(tpr),
                    format_rate(fpr)
                ));
            }
        }
    }
    if let (Some(value), Some(mode)) = (m.aggregated, aggregate) {
        out.push_str(&format!(
            "  {}: {} ({})\n",
            mode,
            format_f64_6(value),
            verdict(value, mode)
        ));
    }
    out
}

fn label(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::EqualOpportunity => "Equal opportunity (true-positive rate)",
        MetricKind::EqualOdds => "Equal odds (true- and false-positive rate)",
        MetricKind::DemographicParity => "Demographic parity (selection rate)",
    }
}

fn verdict(value: f64, mode: Aggregate) -> &'static str {
    let within = match mode {
        Aggregate::Difference => value.abs() <= DIFFERENCE_TOLERANCE,
        Aggregate::Ratio => (RATIO_TOLERANCE..=1.0 / RATIO_TOLERANCE).contains(&value),
    };
    if within {
        "within tolerance"
    } else {
        "disparity"
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/text.rs"]
mod tests;
