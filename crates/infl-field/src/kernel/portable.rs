//! Portable lane-array kernel body.
//!
//! Plain `[f32; L]` accumulators with no intrinsics.  Used by the batched
//! kernels when their hardware path is unavailable; the fixed-width inner loop
//! is simple enough for the compiler to vectorise on its own.

use crate::UnitSource;

use super::remainder;

#[inline(always)]
pub(crate) fn point<const L: usize, U: UnitSource + ?Sized>(units: &U, x: f32, y: f32) -> f32 {
    let full    = units.len() / L;
    let mut acc = [0.0f32; L];

    for b in 0..full {
        let batch = units.batch::<L>(b * L);
        for lane in 0..L {
            let dx = x - batch.xs[lane];
            let dy = y - batch.ys[lane];
            acc[lane] += batch.infs[lane] / (1.0 + (dx * dx + dy * dy).sqrt());
        }
    }

    acc.iter().sum::<f32>() + remainder(units, full * L, x, y)
}
