//! `infl-sched` — parallel scheduler for the influence field engine.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`scheduler`]   | `Scheduler` (dedicated Rayon pool), `JobStats`             |
//! | [`job`]         | `JobHandle<T>` for background jobs on the same pool        |
//! | [`error`]       | `SchedError`, `SchedResult<T>`                             |
//!
//! # Execution model
//!
//! Every parallel call is a fork-join barrier: it returns only after all of
//! its chunks have finished, so the caller observes fully written output.
//! There is no ordering guarantee between chunks or indices.
//!
//! ```text
//! for_each_chunk_mut(data, chunk_len, body)
//!   data ─┬─ chunk 0 ─▶ body(0, &mut data[0..c])      ┐
//!         ├─ chunk 1 ─▶ body(1, &mut data[c..2c])     ├─ join ─▶ JobStats
//!         └─ chunk k ─▶ body(k, &mut data[kc..])      ┘
//! ```
//!
//! Long computations that should overlap with the caller go through
//! [`Scheduler::spawn`] instead, which returns a [`JobHandle`].  Dropping an
//! unjoined handle blocks until the job finishes, so anything the job owns
//! outlives the work that uses it.

pub mod error;
pub mod job;
pub mod scheduler;

#[cfg(test)]
mod tests;

pub use error::{SchedError, SchedResult};
pub use job::JobHandle;
pub use scheduler::{JobStats, Scheduler};
