use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FairnessError {
    #[error("input arrays are empty")]
    EmptyInput,

    #[error("length mismatch: y_true={y_true}, y_pred={y_pred}, groups={groups}")]
    LengthMismatch {
        y_true: usize,
        y_pred: usize,
        groups: usize,
    },

    #[error("sample_weight has length {found}, expected {expected}")]
    WeightLengthMismatch { expected: usize, found: usize },

    #[error("invalid sample weight {value} at index {index} (must be finite and >= 0)")]
    InvalidWeight { index: usize, value: f64 },

    #[error("non-binary value {value} in {array} at index {index} (expected 0 or 1)")]
    NonBinaryLabel {
        array: &'static str,
        index: usize,
        value: u8,
    },

    #[error("sensitive attribute has {found} distinct groups; exactly 2 are supported")]
    GroupCardinality { found: usize },

    #[error("{metric} is undefined for group {group}: denominator is zero")]
    UndefinedRate { metric: &'static str, group: String },

    #[error("{metric} ratio is undefined: reference group {group} has a rate of zero")]
    ZeroReferenceRate { metric: &'static str, group: String },

    #[error("sum of sample weights in a group overflows f64")]
    WeightOverflow,

    #[error("unknown aggregate '{0}' (use difference|ratio)")]
    UnknownAggregate(String),
}

pub type Result<T> = std::result::Result<T, FairnessError>;
