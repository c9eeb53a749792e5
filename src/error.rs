use thiserror::Error;

use crate::input::InputError;
use crate::metrics::FairnessError;
use crate::report::ReportError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Fairness(#[from] FairnessError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

pub type Result<T> = std::result::Result<T, Error>;
