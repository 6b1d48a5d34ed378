//! Driving a kernel over the whole grid.
//!
//! The scratch buffer is partitioned into `chunk_len`-cell chunks (one column
//! by default) and handed to the scheduler.  Each task converts its flat cell
//! indices back to `(x, y)` and writes only its own partition.

use infl_core::{GridDims, Unit, UnitLayout};
use infl_sched::{JobHandle, JobStats, Scheduler};

use crate::buffer::{ComputedField, ScratchField};
use crate::kernel::{FieldKernel, Kernel};
use crate::{FieldResult, UnitSoa, UnitSource};

/// Fill `out` with the field of `units` over `grid`.
///
/// `out.len()` must equal `grid.cell_count()`.  An empty unit set writes
/// zeros without dispatching any work.
pub fn compute_into<K, U>(
    scheduler: &Scheduler,
    kernel:    K,
    units:     &U,
    grid:      GridDims,
    chunk_len: usize,
    out:       &mut [f32],
) -> FieldResult<JobStats>
where
    K: FieldKernel,
    U: UnitSource + ?Sized,
{
    debug_assert_eq!(out.len(), grid.cell_count());

    if units.is_empty() {
        out.fill(0.0);
        return Ok(JobStats { work: out.len(), ..JobStats::default() });
    }

    let stats = scheduler.for_each_chunk_mut(out, chunk_len, |k, part| {
        let base = k * chunk_len;
        for (j, cell) in part.iter_mut().enumerate() {
            let (x, y) = grid.coords(base + j);
            *cell = kernel.point(units, x as f32, y as f32);
        }
    })?;
    Ok(stats)
}

// ── FieldComputer ─────────────────────────────────────────────────────────────

/// Kernel, unit layout and chunking for field computation.
///
/// Holds the SoA unit arrays between calls so their capacity is reused.
#[derive(Clone, Debug)]
pub struct FieldComputer {
    kernel:    Kernel,
    layout:    UnitLayout,
    /// Cells per task; `None` means one column.
    chunk_len: Option<usize>,
    soa:       UnitSoa,
}

impl FieldComputer {
    pub fn new(kernel: Kernel, layout: UnitLayout, chunk_len: Option<usize>) -> Self {
        Self { kernel, layout, chunk_len, soa: UnitSoa::new() }
    }

    #[inline]
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    #[inline]
    pub fn layout(&self) -> UnitLayout {
        self.layout
    }

    /// Compute `units` into `scratch`.  Blocks until every chunk is written.
    pub fn compute(
        &mut self,
        scheduler: &Scheduler,
        units:     &[Unit],
        scratch:   ScratchField,
    ) -> FieldResult<ComputedField> {
        let mut buffer = scratch.buffer;
        let grid       = buffer.grid;
        let chunk_len  = self.chunk_len.unwrap_or(grid.rows as usize);

        let stats = match self.layout {
            UnitLayout::Soa => {
                self.soa.rebuild(units);
                dispatch(scheduler, self.kernel, &self.soa, grid, chunk_len, &mut buffer.values)?
            }
            UnitLayout::Aos => {
                dispatch(scheduler, self.kernel, units, grid, chunk_len, &mut buffer.values)?
            }
        };

        Ok(ComputedField { buffer, stats })
    }
}

/// Match the kernel once so the per-cell loop is monomorphised.
fn dispatch<U: UnitSource + ?Sized>(
    scheduler: &Scheduler,
    kernel:    Kernel,
    units:     &U,
    grid:      GridDims,
    chunk_len: usize,
    out:       &mut [f32],
) -> FieldResult<JobStats> {
    match kernel {
        Kernel::Scalar(k) => compute_into(scheduler, k, units, grid, chunk_len, out),
        Kernel::Lanes4(k) => compute_into(scheduler, k, units, grid, chunk_len, out),
        Kernel::Lanes8(k) => compute_into(scheduler, k, units, grid, chunk_len, out),
    }
}

// ── FieldJob ──────────────────────────────────────────────────────────────────

/// A field computation running in the background.
///
/// Dropping the job without joining waits for it and discards the result.
#[derive(Debug)]
#[must_use = "a FieldJob must be joined to obtain its field"]
pub struct FieldJob {
    handle: JobHandle<FieldResult<ComputedField>>,
}

impl FieldJob {
    /// Start computing `units` into `scratch` on the scheduler's pool.
    ///
    /// The job gets its own copy of `computer` (and so its own SoA arrays).
    pub fn spawn(
        scheduler: &Scheduler,
        computer:  &FieldComputer,
        units:     Vec<Unit>,
        scratch:   ScratchField,
    ) -> Self {
        let mut computer = computer.clone();
        let pool         = scheduler.clone();
        let handle = scheduler.spawn(move || computer.compute(&pool, &units, scratch));
        Self { handle }
    }

    /// `true` once the computation has finished.  Never blocks.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the computation and take the finished field.
    pub fn join(self) -> FieldResult<ComputedField> {
        self.handle.join()?
    }
}
