//! `Scheduler` — a dedicated Rayon pool plus fork-join helpers.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use crate::{JobHandle, SchedError, SchedResult};

// ── JobStats ──────────────────────────────────────────────────────────────────

/// What a completed fork-join call did.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct JobStats {
    /// Number of work items (indices or elements).
    pub work:    usize,
    /// Number of chunks the work was split into.  `0` when `work == 0`.
    pub chunks:  usize,
    /// Wall time from dispatch to join.
    pub elapsed: Duration,
}

impl fmt::Display for JobStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} items in {} chunks, {:.3} ms",
            self.work,
            self.chunks,
            self.elapsed.as_secs_f64() * 1e3
        )
    }
}

// ── Scheduler ─────────────────────────────────────────────────────────────────

/// Worker pool shared by the field and steering phases.
///
/// Cloning is cheap and every clone dispatches onto the same pool.
#[derive(Clone)]
pub struct Scheduler {
    pool:      Arc<ThreadPool>,
    chunk_len: usize,
}

impl Scheduler {
    /// Build a pool with `num_threads` workers (`None` = one per logical
    /// core).  `chunk_len` is the index-chunk size used by
    /// [`for_each_index`](Self::for_each_index).
    pub fn new(num_threads: Option<usize>, chunk_len: usize) -> SchedResult<Self> {
        if chunk_len == 0 {
            return Err(SchedError::ZeroChunk);
        }
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("infl-worker-{i}"));
        if let Some(n) = num_threads {
            builder = builder.num_threads(n);
        }
        let pool = builder.build()?;
        debug!(threads = pool.current_num_threads(), chunk_len, "scheduler pool ready");
        Ok(Self { pool: Arc::new(pool), chunk_len })
    }

    #[inline]
    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    #[inline]
    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// Run `body(i)` for every `i` in `[0, work)`, `chunk_len` indices per
    /// task, and block until all have run.
    ///
    /// `body` only gets shared access to whatever it captures; writes go
    /// through [`for_each_chunk_mut`](Self::for_each_chunk_mut).
    pub fn for_each_index<F>(&self, work: usize, body: F) -> JobStats
    where
        F: Fn(usize) + Send + Sync,
    {
        if work == 0 {
            return JobStats::default();
        }
        let chunk_len = self.chunk_len;
        let chunks    = work.div_ceil(chunk_len);
        let started   = Instant::now();

        self.pool.install(|| {
            (0..chunks).into_par_iter().for_each(|c| {
                let start = c * chunk_len;
                let end   = (start + chunk_len).min(work);
                for i in start..end {
                    body(i);
                }
            });
        });

        JobStats { work, chunks, elapsed: started.elapsed() }
    }

    /// Split `data` into consecutive `chunk_len`-sized partitions (the last
    /// one may be shorter) and run `body(chunk_index, partition)` on each in
    /// parallel.  Blocks until every partition is done.
    ///
    /// Element `j` of partition `k` is `data[k * chunk_len + j]`.
    pub fn for_each_chunk_mut<T, F>(
        &self,
        data:      &mut [T],
        chunk_len: usize,
        body:      F,
    ) -> SchedResult<JobStats>
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        if chunk_len == 0 {
            return Err(SchedError::ZeroChunk);
        }
        let work = data.len();
        if work == 0 {
            return Ok(JobStats::default());
        }
        let chunks  = work.div_ceil(chunk_len);
        let started = Instant::now();

        self.pool.install(|| {
            data.par_chunks_mut(chunk_len)
                .enumerate()
                .for_each(|(k, part)| body(k, part));
        });

        Ok(JobStats { work, chunks, elapsed: started.elapsed() })
    }

    /// Start `job` on the pool without waiting for it.
    ///
    /// The job may itself call the fork-join helpers; those run on the same
    /// pool.  A panic inside `job` is captured and re-raised by
    /// [`JobHandle::join`].
    pub fn spawn<T, F>(&self, job: F) -> JobHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        JobHandle::spawn_on(&self.pool, job)
    }
}

impl fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("threads", &self.num_threads())
            .field("chunk_len", &self.chunk_len)
            .finish()
    }
}
