use crate::report::{ReportError, Summary};

pub fn render_summary_json(summary: &Summary) -> Result<String, ReportError> {
    let mut out = serde_json::to_string_pretty(summary)?;
    out.push('\n');
    Ok(out)
}
