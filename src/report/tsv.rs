use crate::report::{GroupStats, format_f64_6, format_rate};

pub fn render_groups_tsv(groups: &[GroupStats]) -> String {
    let header = [
        "group",
        "rows",
        "weight",
        "positives",
        "negatives",
        "tpr",
        "fpr",
        "selection_rate",
    ]
    .join("\t");

    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    for g in groups {
        let row = [
            sanitize(&g.group),
            g.rows.to_string(),
            format_f64_6(g.weight),
            format_f64_6(g.positives),
            format_f64_6(g.negatives),
            format_rate(g.tpr),
            format_rate(g.fpr),
            format_rate(g.selection_rate),
        ];
        out.push_str(&row.join("\t"));
        out.push('\n');
    }
    out
}

fn sanitize(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}
