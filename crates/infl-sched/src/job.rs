//! `JobHandle<T>` — completion handle for a background job.
//!
//! The job runs on the scheduler's pool and sends its outcome (value or
//! captured panic) over a one-shot channel.  The handle owns the receiving
//! end:
//!
//! | Call            | Effect                                              |
//! |-----------------|-----------------------------------------------------|
//! | `is_finished()` | Non-blocking poll                                   |
//! | `join()`        | Block, return the value, re-raise a job panic        |
//! | drop            | Block until the job finishes, discard the outcome   |

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread;

use rayon::ThreadPool;
use tracing::warn;

use crate::{SchedError, SchedResult};

/// Handle to a job started with [`Scheduler::spawn`][crate::Scheduler::spawn].
#[must_use = "dropping a JobHandle blocks until the job finishes"]
pub struct JobHandle<T> {
    rx:       Option<Receiver<thread::Result<T>>>,
    finished: Arc<AtomicBool>,
}

impl<T: Send + 'static> JobHandle<T> {
    pub(crate) fn spawn_on<F>(pool: &ThreadPool, job: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        let (tx, rx)  = mpsc::sync_channel(1);
        let finished  = Arc::new(AtomicBool::new(false));
        let done_flag = Arc::clone(&finished);

        pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job));
            // The receiver may already be gone if the handle was leaked.
            let _ = tx.send(outcome);
            done_flag.store(true, Ordering::Release);
        });

        Self { rx: Some(rx), finished }
    }
}

impl<T> JobHandle<T> {
    /// `true` once the job has produced its outcome.  Never blocks.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Block until the job finishes and return its value.
    ///
    /// If the job panicked, the panic resumes on the calling thread.
    pub fn join(mut self) -> SchedResult<T> {
        let Some(rx) = self.rx.take() else {
            return Err(SchedError::JobLost);
        };
        match rx.recv() {
            Ok(Ok(value))  => Ok(value),
            Ok(Err(cause)) => panic::resume_unwind(cause),
            Err(_)         => Err(SchedError::JobLost),
        }
    }
}

impl<T> Drop for JobHandle<T> {
    fn drop(&mut self) {
        let Some(rx) = self.rx.take() else { return };
        if let Ok(Err(_)) = rx.recv() {
            warn!("background job panicked and its handle was dropped without join");
        }
    }
}

impl<T> std::fmt::Debug for JobHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobHandle")
            .field("finished", &self.is_finished())
            .finish()
    }
}
