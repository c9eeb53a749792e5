use std::collections::BTreeMap;

use crate::metrics::error::{FairnessError, Result};

/// Weighted confusion counts for one group of the sensitive attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Confusion {
    pub true_pos: f64,
    pub false_neg: f64,
    pub false_pos: f64,
    pub true_neg: f64,
    pub rows: usize,
}

impl Confusion {
    pub fn record(&mut self, truth: bool, pred: bool, weight: f64) {
        match (truth, pred) {
            (true, true) => self.true_pos += weight,
            (true, false) => self.false_neg += weight,
            (false, true) => self.false_pos += weight,
            (false, false) => self.true_neg += weight,
        }
        self.rows += 1;
    }

    pub fn positives(&self) -> f64 {
        self.true_pos + self.false_neg
    }

    pub fn negatives(&self) -> f64 {
        self.false_pos + self.true_neg
    }

    pub fn total(&self) -> f64 {
        self.positives() + self.negatives()
    }

    /// TP / (TP + FN), `None` when the group has no positive weight.
    pub fn true_positive_rate(&self) -> Option<f64> {
        rate(self.true_pos, self.positives())
    }

    /// FP / (FP + TN), `None` when the group has no negative weight.
    pub fn false_positive_rate(&self) -> Option<f64> {
        rate(self.false_pos, self.negatives())
    }

    /// Share of the group predicted positive, regardless of ground truth.
    pub fn selection_rate(&self) -> Option<f64> {
        rate(self.true_pos + self.false_pos, self.total())
    }
}

fn rate(num: f64, denom: f64) -> Option<f64> {
    if denom > 0.0 { Some(num / denom) } else { None }
}

/// Checks shapes, label encoding and weights without computing anything.
pub fn validate_inputs<G>(
    y_true: &[u8],
    y_pred: &[u8],
    a: &[G],
    sample_weight: Option<&[f64]>,
) -> Result<()> {
    if y_true.len() != y_pred.len() || y_true.len() != a.len() {
        return Err(FairnessError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
            groups: a.len(),
        });
    }
    if y_true.is_empty() {
        return Err(FairnessError::EmptyInput);
    }
    check_binary("y_true", y_true)?;
    check_binary("y_pred", y_pred)?;

    if let Some(weights) = sample_weight {
        if weights.len() != y_true.len() {
            return Err(FairnessError::WeightLengthMismatch {
                expected: y_true.len(),
                found: weights.len(),
            });
        }
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(FairnessError::InvalidWeight { index, value });
            }
        }
    }
    Ok(())
}

fn check_binary(array: &'static str, labels: &[u8]) -> Result<()> {
    match labels.iter().position(|&v| v > 1) {
        Some(index) => Err(FairnessError::NonBinaryLabel {
            array,
            index,
            value: labels[index],
        }),
        None => Ok(()),
    }
}

/// Partitions rows by group value and accumulates weighted confusion counts.
///
/// Groups come back in ascending order, so the first entry is always the
/// reference group used by aggregation.
pub fn confusion_by_group<G: Ord + Clone>(
    y_true: &[u8],
    y_pred: &[u8],
    a: &[G],
    sample_weight: Option<&[f64]>,
) -> Result<Vec<(G, Confusion)>> {
    validate_inputs(y_true, y_pred, a, sample_weight)?;

    let mut by_group: BTreeMap<&G, Confusion> = BTreeMap::new();
    for (i, group) in a.iter().enumerate() {
        let weight = sample_weight.map_or(1.0, |w| w[i]);
        by_group
            .entry(group)
            .or_default()
            .record(y_true[i] == 1, y_pred[i] == 1, weight);
    }

    if by_group.len() != 2 {
        return Err(FairnessError::GroupCardinality {
            found: by_group.len(),
        });
    }
    if by_group.values().any(|counts| !counts.total().is_finite()) {
        return Err(FairnessError::WeightOverflow);
    }

    Ok(by_group
        .into_iter()
        .map(|(group, counts)| (group.clone(), counts))
        .collect())
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/confusion.rs"]
mod tests;
