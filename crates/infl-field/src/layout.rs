//! Unit data layouts consumed by the field kernels.
//!
//! Kernels are generic over [`UnitSource`], so the same loop body runs on
//! either layout:
//!
//! | Layout     | Type        | Batch load                                  |
//! |------------|-------------|---------------------------------------------|
//! | AoS        | `[Unit]`    | Gather `L` strided fields into lane arrays  |
//! | SoA        | `UnitSoa`   | Copy `L` contiguous values per array        |
//!
//! Coordinates are converted to `f32` once, at load, so every kernel does its
//! arithmetic in single precision.

use infl_core::Unit;

/// `L` consecutive units split into lane arrays.
#[derive(Copy, Clone, Debug)]
pub struct Batch<const L: usize> {
    pub xs:   [f32; L],
    pub ys:   [f32; L],
    pub infs: [f32; L],
}

/// Read access to a unit set, one unit or one lane batch at a time.
pub trait UnitSource: Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(x, y, influence)` of unit `i`.
    fn unit(&self, i: usize) -> (f32, f32, f32);

    /// Units `start .. start + L`.  The caller guarantees `start + L <= len()`.
    fn batch<const L: usize>(&self, start: usize) -> Batch<L>;
}

// ── Array of structures ───────────────────────────────────────────────────────

impl UnitSource for [Unit] {
    #[inline]
    fn len(&self) -> usize {
        <[Unit]>::len(self)
    }

    #[inline]
    fn unit(&self, i: usize) -> (f32, f32, f32) {
        let u = &self[i];
        (u.x as f32, u.y as f32, u.influence)
    }

    #[inline]
    fn batch<const L: usize>(&self, start: usize) -> Batch<L> {
        let mut b = Batch { xs: [0.0; L], ys: [0.0; L], infs: [0.0; L] };
        for (lane, u) in self[start..start + L].iter().enumerate() {
            b.xs[lane]   = u.x as f32;
            b.ys[lane]   = u.y as f32;
            b.infs[lane] = u.influence;
        }
        b
    }
}

// ── Structure of arrays ───────────────────────────────────────────────────────

/// Parallel coordinate and influence arrays.
///
/// Held by the engine across ticks and refilled with [`rebuild`](Self::rebuild)
/// whenever a new unit set arrives, so the three vectors only grow.
#[derive(Clone, Debug, Default)]
pub struct UnitSoa {
    pub xs:        Vec<f32>,
    pub ys:        Vec<f32>,
    pub influence: Vec<f32>,
}

impl UnitSoa {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_units(units: &[Unit]) -> Self {
        let mut soa = Self::new();
        soa.rebuild(units);
        soa
    }

    /// Replace the contents with `units`, keeping the existing allocations.
    pub fn rebuild(&mut self, units: &[Unit]) {
        self.xs.clear();
        self.ys.clear();
        self.influence.clear();
        self.xs.extend(units.iter().map(|u| u.x as f32));
        self.ys.extend(units.iter().map(|u| u.y as f32));
        self.influence.extend(units.iter().map(|u| u.influence));
    }

    /// Smallest capacity among the three arrays.
    pub fn capacity(&self) -> usize {
        self.xs.capacity().min(self.ys.capacity()).min(self.influence.capacity())
    }
}

impl UnitSource for UnitSoa {
    #[inline]
    fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    fn unit(&self, i: usize) -> (f32, f32, f32) {
        (self.xs[i], self.ys[i], self.influence[i])
    }

    #[inline]
    fn batch<const L: usize>(&self, start: usize) -> Batch<L> {
        let end = start + L;
        let mut b = Batch { xs: [0.0; L], ys: [0.0; L], infs: [0.0; L] };
        b.xs.copy_from_slice(&self.xs[start..end]);
        b.ys.copy_from_slice(&self.ys[start..end]);
        b.infs.copy_from_slice(&self.influence[start..end]);
        b
    }
}
