use std::fmt::Display;

use crate::metrics::aggregate::{Aggregate, GroupScores, OddsRates, Score};
use crate::metrics::confusion::{Confusion, confusion_by_group};
use crate::metrics::error::{FairnessError, Result};

pub const EQUAL_OPPORTUNITY: &str = "equal_opportunity";
pub const EQUAL_ODDS: &str = "equal_odds";
pub const DEMOGRAPHIC_PARITY: &str = "demographic_parity";

/// Scores every group with `metric`, failing if any group leaves it
/// undefined.
pub fn score_groups<G, F>(
    y_true: &[u8],
    y_pred: &[u8],
    a: &[G],
    sample_weight: Option<&[f64]>,
    name: &'static str,
    metric: F,
) -> Result<GroupScores<G>>
where
    G: Ord + Clone + Display,
    F: Fn(&Confusion) -> Option<f64>,
{
    let groups = confusion_by_group(y_true, y_pred, a, sample_weight)?;
    let mut entries = Vec::with_capacity(groups.len());
    for (group, counts) in groups {
        let value = metric(&counts).ok_or_else(|| FairnessError::UndefinedRate {
            metric: name,
            group: group.to_string(),
        })?;
        entries.push((group, value));
    }
    Ok(GroupScores::new(name, entries))
}

/// Equal opportunity: compares true-positive rates (recall) across groups.
///
/// With `aggregate` unset the per-group rates are returned. A group without
/// positive ground-truth rows yields [`FairnessError::UndefinedRate`].
pub fn equal_opportunity<G>(
    y_true: &[u8],
    y_pred: &[u8],
    a: &[G],
    aggregate: Option<Aggregate>,
    sample_weight: Option<&[f64]>,
) -> Result<Score<G>>
where
    G: Ord + Clone + Display,
{
    let scores = score_groups(
        y_true,
        y_pred,
        a,
        sample_weight,
        EQUAL_OPPORTUNITY,
        Confusion::true_positive_rate,
    )?;
    finish(scores, aggregate)
}

/// Equal odds: compares both true-positive and false-positive rates.
///
/// Each group needs positive and negative ground-truth rows. Aggregation
/// reports the component furthest from parity.
pub fn equal_odds<G>(
    y_true: &[u8],
    y_pred: &[u8],
    a: &[G],
    aggregate: Option<Aggregate>,
    sample_weight: Option<&[f64]>,
) -> Result<Score<G, OddsRates>>
where
    G: Ord + Clone + Display,
{
    let groups = confusion_by_group(y_true, y_pred, a, sample_weight)?;
    let mut entries = Vec::with_capacity(groups.len());
    for (group, counts) in groups {
        let undefined = || FairnessError::UndefinedRate {
            metric: EQUAL_ODDS,
            group: group.to_string(),
        };
        let tpr = counts.true_positive_rate().ok_or_else(undefined)?;
        let fpr = counts.false_positive_rate().ok_or_else(undefined)?;
        entries.push((group, OddsRates { tpr, fpr }));
    }
    let scores = GroupScores::new(EQUAL_ODDS, entries);
    match aggregate {
        None => Ok(Score::Groups(scores)),
        Some(mode) => Ok(Score::Aggregated(scores.aggregate(mode)?)),
    }
}

/// Demographic parity: compares positive-prediction rates.
///
/// `y_true` takes part in shape validation only.
pub fn demographic_parity<G>(
    y_true: &[u8],
    y_pred: &[u8],
    a: &[G],
    aggregate: Option<Aggregate>,
    sample_weight: Option<&[f64]>,
) -> Result<Score<G>>
where
    G: Ord + Clone + Display,
{
    let scores = score_groups(
        y_true,
        y_pred,
        a,
        sample_weight,
        DEMOGRAPHIC_PARITY,
        Confusion::selection_rate,
    )?;
    finish(scores, aggregate)
}

fn finish<G: Display>(scores: GroupScores<G>, aggregate: Option<Aggregate>) -> Result<Score<G>> {
    match aggregate {
        None => Ok(Score::Groups(scores)),
        Some(mode) => Ok(Score::Aggregated(scores.aggregate(mode)?)),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/classification.rs"]
mod tests;
