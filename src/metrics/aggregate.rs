use std::fmt::{self, Display};
use std::str::FromStr;

use serde::Serialize;

use crate::metrics::error::{FairnessError, Result};

/// How the two group rates are folded into one score.
///
/// Groups are ordered by ascending value; the first one is the reference.
/// `Difference` is `reference - comparison`, `Ratio` is
/// `comparison / reference`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Difference,
    Ratio,
}

impl Aggregate {
    pub fn as_str(self) -> &'static str {
        match self {
            Aggregate::Difference => "difference",
            Aggregate::Ratio => "ratio",
        }
    }

    fn apply(self, metric: &'static str, reference: (&str, f64), comparison: f64) -> Result<f64> {
        match self {
            Aggregate::Difference => Ok(reference.1 - comparison),
            Aggregate::Ratio => {
                // Equal rates are parity, including two groups at zero.
                if reference.1 == comparison {
                    return Ok(1.0);
                }
                if reference.1 == 0.0 {
                    return Err(FairnessError::ZeroReferenceRate {
                        metric,
                        group: reference.0.to_string(),
                    });
                }
                let ratio = comparison / reference.1;
                if !ratio.is_finite() {
                    return Err(FairnessError::ZeroReferenceRate {
                        metric,
                        group: reference.0.to_string(),
                    });
                }
                Ok(ratio)
            }
        }
    }

    /// Distance from parity, used to pick the worse of several components.
    fn disparity(self, value: f64) -> f64 {
        match self {
            Aggregate::Difference => value.abs(),
            Aggregate::Ratio => value.ln().abs(),
        }
    }
}

impl FromStr for Aggregate {
    type Err = FairnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "difference" | "diff" => Ok(Aggregate::Difference),
            "ratio" => Ok(Aggregate::Ratio),
            _ => Err(FairnessError::UnknownAggregate(s.to_string())),
        }
    }
}

impl Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True- and false-positive rate of one group, as compared by equal odds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OddsRates {
    pub tpr: f64,
    pub fpr: f64,
}

/// Per-group values in ascending group order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupScores<G, V = f64> {
    metric: &'static str,
    entries: Vec<(G, V)>,
}

impl<G, V> GroupScores<G, V> {
    pub(crate) fn new(metric: &'static str, entries: Vec<(G, V)>) -> Self {
        Self { metric, entries }
    }

    pub fn metric(&self) -> &'static str {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&G, &V)> {
        self.entries.iter().map(|(g, v)| (g, v))
    }

    pub fn groups(&self) -> impl Iterator<Item = &G> {
        self.entries.iter().map(|(g, _)| g)
    }

    pub fn into_entries(self) -> Vec<(G, V)> {
        self.entries
    }

    pub fn map<W>(&self, f: impl Fn(&V) -> W) -> GroupScores<G, W>
    where
        G: Clone,
    {
        GroupScores {
            metric: self.metric,
            entries: self.entries.iter().map(|(g, v)| (g.clone(), f(v))).collect(),
        }
    }
}

impl<G: Ord, V> GroupScores<G, V> {
    pub fn get(&self, group: &G) -> Option<&V> {
        self.entries
            .binary_search_by(|(g, _)| g.cmp(group))
            .ok()
            .map(|idx| &self.entries[idx].1)
    }
}

impl<G: Display, V> GroupScores<G, V> {
    fn pair(&self) -> Result<(&(G, V), &(G, V))> {
        match self.entries.as_slice() {
            [reference, comparison] => Ok((reference, comparison)),
            other => Err(FairnessError::GroupCardinality { found: other.len() }),
        }
    }
}

impl<G: Display> GroupScores<G, f64> {
    pub fn aggregate(&self, mode: Aggregate) -> Result<f64> {
        let ((ref_group, ref_rate), (_, cmp_rate)) = self.pair()?;
        mode.apply(
            self.metric,
            (&ref_group.to_string(), *ref_rate),
            *cmp_rate,
        )
    }
}

impl<G: Display + Clone> GroupScores<G, OddsRates> {
    pub fn true_positive_rates(&self) -> GroupScores<G, f64> {
        self.map(|r| r.tpr)
    }

    pub fn false_positive_rates(&self) -> GroupScores<G, f64> {
        self.map(|r| r.fpr)
    }

    /// Aggregates both components and keeps whichever is further from
    /// parity; ties go to the true-positive rate.
    pub fn aggregate(&self, mode: Aggregate) -> Result<f64> {
        let tpr = self.true_positive_rates().aggregate(mode)?;
        let fpr = self.false_positive_rates().aggregate(mode)?;
        if mode.disparity(fpr) > mode.disparity(tpr) {
            Ok(fpr)
        } else {
            Ok(tpr)
        }
    }
}

/// Result of a fairness metric call: per-group values when no aggregation
/// was requested, a single number otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum Score<G, V = f64> {
    Groups(GroupScores<G, V>),
    Aggregated(f64),
}

impl<G, V> Score<G, V> {
    pub fn aggregated(&self) -> Option<f64> {
        match self {
            Score::Aggregated(v) => Some(*v),
            Score::Groups(_) => None,
        }
    }

    pub fn groups(&self) -> Option<&GroupScores<G, V>> {
        match self {
            Score::Groups(g) => Some(g),
            Score::Aggregated(_) => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/aggregate.rs"]
mod tests;
