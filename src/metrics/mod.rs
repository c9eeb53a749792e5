//! Group-fairness metrics for binary classifiers.
//!
//! Every metric partitions rows by the sensitive attribute, computes one
//! rate per group and optionally folds the two rates into a single score
//! (see [`Aggregate`] for the group ordering contract).

pub mod aggregate;
pub mod classification;
pub mod confusion;
pub mod error;

pub use aggregate::{Aggregate, GroupScores, OddsRates, Score};
pub use classification::{demographic_parity, equal_odds, equal_opportunity, score_groups};
pub use confusion::{Confusion, confusion_by_group, validate_inputs};
pub use error::FairnessError;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    EqualOpportunity,
    EqualOdds,
    DemographicParity,
}

impl MetricKind {
    pub fn all() -> &'static [MetricKind] {
        &[
            MetricKind::EqualOpportunity,
            MetricKind::EqualOdds,
            MetricKind::DemographicParity,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            MetricKind::EqualOpportunity => classification::EQUAL_OPPORTUNITY,
            MetricKind::EqualOdds => classification::EQUAL_ODDS,
            MetricKind::DemographicParity => classification::DEMOGRAPHIC_PARITY,
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "equal_opportunity" => Ok(MetricKind::EqualOpportunity),
            "equal_odds" => Ok(MetricKind::EqualOdds),
            "demographic_parity" => Ok(MetricKind::DemographicParity),
            _ => Err(format!(
                "unknown metric '{s}' (use equal-opportunity|equal-odds|demographic-parity)"
            )),
        }
    }
}
