//! CamelBird: group-fairness metrics for binary classifier predictions.
//!
//! ```
//! use camelbird::metrics::{Aggregate, equal_opportunity};
//!
//! let y_true = [1, 1, 1, 1, 1, 1, 0, 0, 0, 0];
//! let y_pred = [0, 1, 1, 1, 1, 1, 0, 1, 0, 1];
//! let a = [1, 1, 1, 1, 0, 0, 1, 1, 0, 0];
//!
//! let ratio = equal_opportunity(&y_true, &y_pred, &a, Some(Aggregate::Ratio), None)
//!     .unwrap()
//!     .aggregated()
//!     .unwrap();
//! assert_eq!(ratio, 0.75);
//! ```

pub mod error;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod report;

pub use error::{Error, Result};
