//! Unit tests for infl-sched.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use crate::{SchedError, Scheduler};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn sched(threads: usize, chunk_len: usize) -> Scheduler {
    Scheduler::new(Some(threads), chunk_len).unwrap()
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use super::*;

    #[test]
    fn explicit_thread_count() {
        let s = sched(3, 16);
        assert_eq!(s.num_threads(), 3);
        assert_eq!(s.chunk_len(), 16);
    }

    #[test]
    fn zero_chunk_rejected() {
        assert!(matches!(Scheduler::new(Some(1), 0), Err(SchedError::ZeroChunk)));
    }

    #[test]
    fn clones_share_pool() {
        let a = sched(2, 4);
        let b = a.clone();
        assert_eq!(a.num_threads(), b.num_threads());
    }
}

// ── for_each_index ────────────────────────────────────────────────────────────

#[cfg(test)]
mod for_each_index {
    use super::*;

    #[test]
    fn every_index_visited_once() {
        let s    = sched(4, 7);
        let hits: Vec<AtomicUsize> = (0..1000).map(|_| AtomicUsize::new(0)).collect();
        let stats = s.for_each_index(hits.len(), |i| {
            hits[i].fetch_add(1, Ordering::Relaxed);
        });
        assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
        assert_eq!(stats.work, 1000);
        assert_eq!(stats.chunks, 143); // ceil(1000 / 7)
    }

    #[test]
    fn zero_work_is_noop() {
        let s     = sched(2, 8);
        let calls = AtomicUsize::new(0);
        let stats = s.for_each_index(0, |_| {
            calls.fetch_add(1, Ordering::Relaxed);
        });
        assert_eq!(calls.load(Ordering::Relaxed), 0);
        assert_eq!(stats.chunks, 0);
        assert_eq!(stats.work, 0);
    }

    #[test]
    fn work_smaller_than_chunk() {
        let s   = sched(2, 64);
        let sum = AtomicUsize::new(0);
        let stats = s.for_each_index(5, |i| {
            sum.fetch_add(i, Ordering::Relaxed);
        });
        assert_eq!(sum.load(Ordering::Relaxed), 10);
        assert_eq!(stats.chunks, 1);
    }
}

// ── for_each_chunk_mut ────────────────────────────────────────────────────────

#[cfg(test)]
mod for_each_chunk_mut {
    use super::*;

    #[test]
    fn partitions_are_disjoint_and_cover() {
        let s        = sched(4, 1);
        let mut data = vec![usize::MAX; 103];
        let stats = s
            .for_each_chunk_mut(&mut data, 10, |k, part| {
                for (j, v) in part.iter_mut().enumerate() {
                    *v = k * 10 + j;
                }
            })
            .unwrap();
        for (i, v) in data.iter().enumerate() {
            assert_eq!(*v, i);
        }
        assert_eq!(stats.chunks, 11);
        assert_eq!(stats.work, 103);
    }

    #[test]
    fn last_partition_is_short() {
        let s        = sched(2, 1);
        let mut data = vec![0u32; 25];
        let lens: Vec<AtomicUsize> = (0..3).map(|_| AtomicUsize::new(0)).collect();
        s.for_each_chunk_mut(&mut data, 10, |k, part| {
            lens[k].store(part.len(), Ordering::Relaxed);
        })
        .unwrap();
        let lens: Vec<usize> = lens.iter().map(|l| l.load(Ordering::Relaxed)).collect();
        assert_eq!(lens, vec![10, 10, 5]);
    }

    #[test]
    fn empty_slice_is_noop() {
        let s = sched(1, 1);
        let mut data: Vec<f32> = Vec::new();
        let stats = s.for_each_chunk_mut(&mut data, 4, |_, _| panic!("no chunks")).unwrap();
        assert_eq!(stats.chunks, 0);
    }

    #[test]
    fn zero_chunk_len_errors() {
        let s        = sched(1, 1);
        let mut data = vec![0u8; 4];
        let result   = s.for_each_chunk_mut(&mut data, 0, |_, _| {});
        assert!(matches!(result, Err(SchedError::ZeroChunk)));
    }
}

// ── Background jobs ───────────────────────────────────────────────────────────

#[cfg(test)]
mod jobs {
    use super::*;

    #[test]
    fn join_returns_value() {
        let s      = sched(2, 1);
        let handle = s.spawn(|| (1..=10).sum::<u32>());
        assert_eq!(handle.join().unwrap(), 55);
    }

    #[test]
    fn job_can_use_fork_join_on_same_pool() {
        let s     = sched(1, 1);
        let inner = s.clone();
        let handle = s.spawn(move || {
            let mut data = vec![0u32; 64];
            inner
                .for_each_chunk_mut(&mut data, 8, |k, part| part.fill(k as u32))
                .unwrap();
            data
        });
        let data = handle.join().unwrap();
        assert_eq!(data[0], 0);
        assert_eq!(data[63], 7);
    }

    #[test]
    fn is_finished_eventually_true() {
        let s      = sched(1, 1);
        let handle = s.spawn(|| 7);
        while !handle.is_finished() {
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(handle.join().unwrap(), 7);
    }

    #[test]
    fn drop_joins_unfinished_job() {
        let s    = sched(1, 1);
        let done = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&done);
        let handle = s.spawn(move || {
            std::thread::sleep(Duration::from_millis(20));
            flag.store(true, Ordering::SeqCst);
        });
        drop(handle);
        assert!(done.load(Ordering::SeqCst));
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn join_reraises_panic() {
        let s      = sched(1, 1);
        let handle = s.spawn(|| -> u32 { panic!("boom") });
        let _ = handle.join();
    }
}
