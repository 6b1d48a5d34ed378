//! Field buffers and their ownership states.
//!
//! A buffer moves through three states, each its own type:
//!
//! ```text
//! FieldPublisher::begin_compute ─▶ ScratchField   exclusively owned, being written
//! FieldComputer::compute        ─▶ ComputedField  complete, not yet visible
//! FieldPublisher::publish       ─▶ FieldSnapshot  shared, immutable
//! ```
//!
//! Only the compute path turns a `ScratchField` into a `ComputedField`, so a
//! half-written buffer can never be published, and a snapshot's values cannot
//! change while any reader holds it.

use std::ops::Deref;
use std::sync::Arc;

use infl_core::GridDims;
use infl_sched::JobStats;

/// A dense `rows * cols` field in column-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldBuffer {
    pub(crate) grid:       GridDims,
    pub(crate) generation: u64,
    pub(crate) values:     Vec<f32>,
}

impl FieldBuffer {
    pub(crate) fn zeroed(grid: GridDims, generation: u64) -> Self {
        Self { grid, generation, values: vec![0.0; grid.cell_count()] }
    }

    #[inline]
    pub fn grid(&self) -> GridDims {
        self.grid
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at `(x, y)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.grid.checked_index(x, y).map(|i| self.values[i])
    }
}

// ── ScratchField ──────────────────────────────────────────────────────────────

/// A buffer handed out for one computation pass.  Never aliases the published
/// buffer.
#[derive(Debug)]
pub struct ScratchField {
    pub(crate) buffer: FieldBuffer,
}

impl ScratchField {
    #[inline]
    pub fn grid(&self) -> GridDims {
        self.buffer.grid
    }

    /// Generation this buffer will carry once published.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.buffer.generation
    }
}

// ── ComputedField ─────────────────────────────────────────────────────────────

/// A fully computed buffer waiting to be published.
#[derive(Debug)]
pub struct ComputedField {
    pub(crate) buffer: FieldBuffer,
    pub(crate) stats:  JobStats,
}

impl ComputedField {
    #[inline]
    pub fn grid(&self) -> GridDims {
        self.buffer.grid
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.buffer.generation
    }

    /// Read the values before publishing.
    #[inline]
    pub fn values(&self) -> &[f32] {
        &self.buffer.values
    }

    /// How the scheduler split the computation and how long it took.
    #[inline]
    pub fn stats(&self) -> JobStats {
        self.stats
    }
}

// ── FieldSnapshot ─────────────────────────────────────────────────────────────

/// Shared read-only view of a published field.
///
/// Cloning bumps a reference count.  The buffer stays alive (and unchanged)
/// until the last clone is dropped, however many publishes happen meanwhile.
#[derive(Clone, Debug)]
pub struct FieldSnapshot(pub(crate) Arc<FieldBuffer>);

impl FieldSnapshot {
    pub(crate) fn new(buffer: FieldBuffer) -> Self {
        Self(Arc::new(buffer))
    }

    #[inline]
    pub fn grid(&self) -> GridDims {
        self.0.grid
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.0.generation
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<f32> {
        self.0.get(x, y)
    }

    /// `true` if both snapshots share the same buffer.
    #[inline]
    pub fn ptr_eq(&self, other: &FieldSnapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for FieldSnapshot {
    type Target = [f32];

    #[inline]
    fn deref(&self) -> &[f32] {
        &self.0.values
    }
}
