use infl_core::InflError;
use infl_field::FieldError;
use infl_sched::SchedError;
use infl_steer::SteerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] InflError),

    #[error("scheduler error: {0}")]
    Sched(#[from] SchedError),

    #[error("field error: {0}")]
    Field(#[from] FieldError),

    #[error("steering error: {0}")]
    Steer(#[from] SteerError),
}

pub type EngineResult<T> = Result<T, EngineError>;
