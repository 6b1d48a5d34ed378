use infl_sched::SchedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SteerError {
    #[error("time step must be finite, got {0}")]
    InvalidDt(f32),

    #[error("base speed must be finite, got {0}")]
    InvalidSpeed(f32),

    #[error("scheduler error: {0}")]
    Sched(#[from] SchedError),
}

pub type SteerResult<T> = Result<T, SteerError>;
