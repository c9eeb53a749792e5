use std::io::BufRead;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod reader;

use reader::open_maybe_gz;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("missing column '{column}' in header of {path}")]
    MissingColumn { column: String, path: String },
    #[error("parse error in {path} at line {line}: {msg}")]
    Parse {
        path: String,
        line: usize,
        msg: String,
    },
    #[error("input table {0} has no data rows")]
    Empty(String),
}

/// Header names of the columns to read. Matching is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub y_true: String,
    pub y_pred: String,
    pub group: String,
    pub weight: Option<String>,
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            y_true: "y_true".to_string(),
            y_pred: "y_pred".to_string(),
            group: "group".to_string(),
            weight: None,
        }
    }
}

/// Column-oriented evaluation data, rows aligned across every vector.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalTable {
    pub source: PathBuf,
    pub y_true: Vec<u8>,
    pub y_pred: Vec<u8>,
    pub groups: Vec<String>,
    pub weights: Option<Vec<f64>>,
}

impl EvalTable {
    pub fn n_rows(&self) -> usize {
        self.y_true.len()
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    y_true: usize,
    y_pred: usize,
    group: usize,
    weight: Option<usize>,
}

impl ColumnIndex {
    fn max(&self) -> usize {
        let mut max = self.y_true.max(self.y_pred).max(self.group);
        if let Some(w) = self.weight {
            max = max.max(w);
        }
        max
    }
}

pub fn load_table(path: &Path, spec: &ColumnSpec) -> Result<EvalTable, InputError> {
    let reader = open_maybe_gz(path)?;
    let table = parse_table(reader, spec, path)?;
    tracing::info!(
        "loaded {} rows from {} (weights: {})",
        table.n_rows(),
        path.display(),
        if table.weights.is_some() { "yes" } else { "no" }
    );
    Ok(table)
}

pub fn parse_table<R: BufRead>(
    mut reader: R,
    spec: &ColumnSpec,
    path: &Path,
) -> Result<EvalTable, InputError> {
    let origin = path.display().to_string();
    let io_err = |source: std::io::Error| InputError::Io {
        path: origin.clone(),
        source,
    };

    let mut buf = String::new();
    let mut line_no = 0usize;

    // Skip leading blank lines; the first non-empty line is the header.
    let header_cols: Vec<String> = loop {
        buf.clear();
        let read = reader.read_line(&mut buf).map_err(io_err)?;
        if read == 0 {
            return Err(InputError::Empty(origin.clone()));
        }
        line_no += 1;
        let line = buf.trim_end();
        if !line.is_empty() {
            break line.split('\t').map(|s| s.trim().to_string()).collect();
        }
    };

    let find = |name: &str| -> Result<usize, InputError> {
        find_column(&header_cols, name).ok_or_else(|| InputError::MissingColumn {
            column: name.to_string(),
            path: origin.clone(),
        })
    };
    let columns = ColumnIndex {
        y_true: find(&spec.y_true)?,
        y_pred: find(&spec.y_pred)?,
        group: find(&spec.group)?,
        weight: spec.weight.as_deref().map(find).transpose()?,
    };

    let mut y_true = Vec::new();
    let mut y_pred = Vec::new();
    let mut groups = Vec::new();
    let mut weights = columns.weight.map(|_| Vec::new());

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf).map_err(io_err)?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
        let parse_err = |msg: String| InputError::Parse {
            path: origin.clone(),
            line: line_no,
            msg,
        };
        if fields.len() <= columns.max() {
            return Err(parse_err(format!(
                "expected at least {} fields, found {}",
                columns.max() + 1,
                fields.len()
            )));
        }

        y_true.push(parse_label(fields[columns.y_true]).ok_or_else(|| {
            parse_err(format!(
                "invalid label '{}' in column {}",
                fields[columns.y_true], spec.y_true
            ))
        })?);
        y_pred.push(parse_label(fields[columns.y_pred]).ok_or_else(|| {
            parse_err(format!(
                "invalid label '{}' in column {}",
                fields[columns.y_pred], spec.y_pred
            ))
        })?);

        let group = fields[columns.group];
        if group.is_empty() {
            return Err(parse_err(format!("empty value in column {}", spec.group)));
        }
        groups.push(group.to_string());

        if let (Some(idx), Some(out)) = (columns.weight, weights.as_mut()) {
            let value = fields[idx].parse::<f64>().map_err(|_| {
                parse_err(format!("invalid weight '{}'", fields[idx]))
            })?;
            out.push(value);
        }
    }

    if y_true.is_empty() {
        return Err(InputError::Empty(origin));
    }

    Ok(EvalTable {
        source: path.to_path_buf(),
        y_true,
        y_pred,
        groups,
        weights,
    })
}

fn find_column(header: &[String], name: &str) -> Option<usize> {
    let mut found = None;
    for (idx, col) in header.iter().enumerate() {
        if col.eq_ignore_ascii_case(name) {
            if found.is_some() {
                tracing::warn!("duplicate column '{}' in header; using the first", name);
                break;
            }
            found = Some(idx);
        }
    }
    found
}

pub fn parse_label(value: &str) -> Option<u8> {
    match value.to_ascii_lowercase().as_str() {
        "0" | "false" => Some(0),
        "1" | "true" => Some(1),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
