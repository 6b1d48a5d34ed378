//! Double-buffered field publication.
//!
//! The publisher owns one shared slot holding the current [`FieldSnapshot`].
//! Publishing replaces the slot's `Arc` under a write lock held only for the
//! swap itself; readers clone the `Arc` under a read lock and then read with
//! no lock at all.
//!
//! # Buffer recycling
//!
//! After a swap the previous snapshot is unwrapped with `Arc::try_unwrap`.  If
//! nothing else holds it, its `Vec` becomes the next scratch buffer; the
//! steady state therefore ping-pongs between two allocations.  If a reader
//! still holds it, the reader keeps it and the next `begin_compute` allocates
//! a fresh zeroed buffer.
//!
//! # Generations
//!
//! The initial all-zero snapshot is generation 0.  Each `begin_compute` hands
//! out the next generation, and `publish` only accepts a field newer than the
//! one in the slot, so a slow background computation can never overwrite a
//! newer result.

use std::sync::Arc;

use infl_core::GridDims;
use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::buffer::{ComputedField, FieldBuffer, FieldSnapshot, ScratchField};
use crate::{FieldError, FieldResult};

// ── FieldReader ───────────────────────────────────────────────────────────────

/// Cloneable read handle for threads that do not own the publisher.
#[derive(Clone, Debug)]
pub struct FieldReader {
    slot: Arc<RwLock<FieldSnapshot>>,
}

impl FieldReader {
    /// The most recently published snapshot.
    #[inline]
    pub fn read(&self) -> FieldSnapshot {
        self.slot.read().clone()
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.slot.read().generation()
    }
}

// ── FieldPublisher ────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct FieldPublisher {
    slot:            Arc<RwLock<FieldSnapshot>>,
    /// Reclaimed buffer for the next scratch, if any.
    spare:           Option<Vec<f32>>,
    /// Grid of the most recent `begin_compute`.
    grid:            GridDims,
    next_generation: u64,
}

impl FieldPublisher {
    /// Publisher whose initial snapshot is an all-zero field over `grid`.
    pub fn new(grid: GridDims) -> Self {
        let initial = FieldSnapshot::new(FieldBuffer::zeroed(grid, 0));
        Self {
            slot:            Arc::new(RwLock::new(initial)),
            spare:           Some(vec![0.0; grid.cell_count()]),
            grid,
            next_generation: 1,
        }
    }

    /// Grid that new scratch buffers are sized for.
    #[inline]
    pub fn grid(&self) -> GridDims {
        self.grid
    }

    /// Hand out an exclusively owned scratch buffer for `grid`.
    ///
    /// A grid different from the previous call drops the recycled buffer;
    /// the published buffer is replaced on the next successful publish.
    /// Scratch contents are unspecified; the kernel overwrites every cell.
    pub fn begin_compute(&mut self, grid: GridDims) -> ScratchField {
        if grid != self.grid {
            debug!(from = %self.grid, to = %grid, "field grid changed; reallocating");
            self.grid  = grid;
            self.spare = None;
        }

        let cells  = grid.cell_count();
        let values = match self.spare.take() {
            Some(v) if v.len() == cells => v,
            _ => {
                debug!(cells, "no reclaimed field buffer; allocating");
                vec![0.0; cells]
            }
        };

        let generation = self.next_generation;
        self.next_generation += 1;

        ScratchField { buffer: FieldBuffer { grid, generation, values } }
    }

    /// Make `field` the published snapshot and return it.
    ///
    /// Rejects a field computed for a grid other than the current one, and a
    /// field not newer than the published snapshot.  A rejected field's
    /// buffer is recycled as the next scratch.
    pub fn publish(&mut self, field: ComputedField) -> FieldResult<FieldSnapshot> {
        let buffer = field.buffer;
        debug_assert_eq!(buffer.values.len(), buffer.grid.cell_count());

        if buffer.grid != self.grid {
            warn!(expected = %self.grid, got = %buffer.grid, "rejected field for old grid");
            return Err(FieldError::GridMismatch { expected: self.grid, got: buffer.grid });
        }

        let published = self.slot.read().generation();
        if buffer.generation <= published {
            warn!(generation = buffer.generation, published, "rejected stale field");
            let generation = buffer.generation;
            self.recycle(buffer);
            return Err(FieldError::StaleField { generation, published });
        }

        let snapshot = FieldSnapshot::new(buffer);
        let previous = std::mem::replace(&mut *self.slot.write(), snapshot.clone());
        let previous_generation = previous.generation();

        match Arc::try_unwrap(previous.0) {
            Ok(old) => self.recycle(old),
            Err(_)  => debug!(
                generation = previous_generation,
                "previous field still held by a reader; not recycled"
            ),
        }
        Ok(snapshot)
    }

    /// The most recently published snapshot.
    #[inline]
    pub fn read(&self) -> FieldSnapshot {
        self.slot.read().clone()
    }

    /// A read handle that can be moved to another thread.
    pub fn reader(&self) -> FieldReader {
        FieldReader { slot: Arc::clone(&self.slot) }
    }

    /// `true` if `begin_compute` will reuse a buffer instead of allocating.
    #[inline]
    pub fn has_spare(&self) -> bool {
        self.spare.as_ref().is_some_and(|v| v.len() == self.grid.cell_count())
    }

    fn recycle(&mut self, buffer: FieldBuffer) {
        if buffer.grid == self.grid && self.spare.is_none() {
            self.spare = Some(buffer.values);
        }
    }
}
