use infl_core::{GridDims, InflError};
use infl_sched::SchedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FieldError {
    #[error("field computed for grid {got} but the publisher now expects {expected}")]
    GridMismatch { expected: GridDims, got: GridDims },

    #[error("field generation {generation} is not newer than published generation {published}")]
    StaleField { generation: u64, published: u64 },

    #[error(transparent)]
    Core(#[from] InflError),

    #[error("scheduler error: {0}")]
    Sched(#[from] SchedError),
}

pub type FieldResult<T> = Result<T, FieldError>;
