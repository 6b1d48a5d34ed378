//! Field kernels.
//!
//! Every kernel evaluates, for one cell `(x, y)`,
//!
//! ```text
//! field[x, y] = Σ_u  u.influence / (1 + sqrt((x - u.x)² + (y - u.y)²))
//! ```
//!
//! | Kernel          | Batch | Hardware path                     | Fallback        |
//! |-----------------|-------|-----------------------------------|-----------------|
//! | `ScalarKernel`  | 1     | none                              | n/a             |
//! | `Lanes4Kernel`  | 4     | SSE (x86_64), NEON (aarch64)      | portable lanes  |
//! | `Lanes8Kernel`  | 8     | AVX, AVX+FMA (x86_64)             | portable lanes  |
//!
//! Batched kernels sum `N / L` full batches lane-wise, reduce the lanes
//! horizontally, then add the last `N mod L` units one at a time.
//!
//! The set is closed, so dispatch goes through the [`Kernel`] enum rather than
//! trait objects.  The variant is picked once by [`Kernel::select`].

mod lanes4;
mod lanes8;
mod portable;
mod scalar;

use std::fmt;

use infl_core::{KernelChoice, Precision};

use crate::{Capabilities, UnitSource};

pub use lanes4::Lanes4Kernel;
pub use lanes8::Lanes8Kernel;
pub use scalar::ScalarKernel;

/// One implementation of the per-cell field sum.
pub trait FieldKernel: Copy + Send + Sync {
    /// Short lowercase name for logs and benchmark ids.
    fn name(&self) -> &'static str;

    /// Units consumed per vector step.
    fn lanes(&self) -> usize;

    /// Field value at `(x, y)`.
    fn point<U: UnitSource + ?Sized>(&self, units: &U, x: f32, y: f32) -> f32;
}

/// Contribution of a single unit.  Shared by the scalar kernel and every
/// remainder loop.
#[inline(always)]
pub(crate) fn contribution(x: f32, y: f32, ux: f32, uy: f32, influence: f32) -> f32 {
    let dx = x - ux;
    let dy = y - uy;
    influence / (1.0 + (dx * dx + dy * dy).sqrt())
}

/// Scalar tail: units `start..len` one at a time.
#[inline(always)]
pub(crate) fn remainder<U: UnitSource + ?Sized>(units: &U, start: usize, x: f32, y: f32) -> f32 {
    let mut sum = 0.0;
    for i in start..units.len() {
        let (ux, uy, inf) = units.unit(i);
        sum += contribution(x, y, ux, uy, inf);
    }
    sum
}

// ── Kernel ────────────────────────────────────────────────────────────────────

/// The selected kernel.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Kernel {
    Scalar(ScalarKernel),
    Lanes4(Lanes4Kernel),
    Lanes8(Lanes8Kernel),
}

impl Kernel {
    /// Resolve `choice` against `caps`.
    ///
    /// `Auto` takes `Lanes8` when AVX is present, else `Lanes4` when 128-bit
    /// vectors are, else `Scalar`.  Explicit choices are always honoured; a
    /// batched kernel without its hardware path runs the portable form.
    pub fn select(caps: Capabilities, choice: KernelChoice, precision: Precision) -> Kernel {
        let choice = match choice {
            KernelChoice::Auto if caps.avx()     => KernelChoice::Lanes8,
            KernelChoice::Auto if caps.simd128() => KernelChoice::Lanes4,
            KernelChoice::Auto                   => KernelChoice::Scalar,
            explicit                             => explicit,
        };
        match choice {
            KernelChoice::Lanes8 => Kernel::Lanes8(Lanes8Kernel::new(caps, precision)),
            KernelChoice::Lanes4 => Kernel::Lanes4(Lanes4Kernel::new(caps, precision)),
            _                    => Kernel::Scalar(ScalarKernel),
        }
    }

    /// Which hardware path the kernel runs, e.g. `"avx+fma"` or `"portable"`.
    pub fn path(&self) -> &'static str {
        match self {
            Kernel::Scalar(_) => "scalar",
            Kernel::Lanes4(k) => k.path(),
            Kernel::Lanes8(k) => k.path(),
        }
    }
}

impl FieldKernel for Kernel {
    fn name(&self) -> &'static str {
        match self {
            Kernel::Scalar(k) => k.name(),
            Kernel::Lanes4(k) => k.name(),
            Kernel::Lanes8(k) => k.name(),
        }
    }

    fn lanes(&self) -> usize {
        match self {
            Kernel::Scalar(k) => k.lanes(),
            Kernel::Lanes4(k) => k.lanes(),
            Kernel::Lanes8(k) => k.lanes(),
        }
    }

    #[inline]
    fn point<U: UnitSource + ?Sized>(&self, units: &U, x: f32, y: f32) -> f32 {
        match self {
            Kernel::Scalar(k) => k.point(units, x, y),
            Kernel::Lanes4(k) => k.point(units, x, y),
            Kernel::Lanes8(k) => k.point(units, x, y),
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.path())
    }
}
