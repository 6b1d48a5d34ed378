use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedError {
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("chunk length must be at least 1")]
    ZeroChunk,

    #[error("background job ended without producing a result")]
    JobLost,
}

pub type SchedResult<T> = Result<T, SchedError>;
