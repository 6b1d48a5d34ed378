//! Bulk random unit generation.
//!
//! Each call produces a fresh unit set for both sides:
//!
//! 1. Side A count and side B count are drawn independently from
//!    `[min_per_side, max_per_side)`.
//! 2. Side A units are emitted first, then side B.
//! 3. Every unit gets a position in `[0, cols - 1) × [0, rows - 1)` and a
//!    magnitude in `[min_influence, max_influence)`; side B magnitudes are
//!    negated.
//!
//! The exclusive upper position bound keeps units off the last row and column.
//! Grids one cell wide collapse that range to `{0}`.

use crate::{GridDims, InflError, InflResult, SimRng, Team, Unit};

/// Parameters for [`generate_units`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitGenConfig {
    /// Inclusive lower bound of units per side.
    pub min_per_side: u32,
    /// Exclusive upper bound of units per side.
    pub max_per_side: u32,
    /// Inclusive lower bound of influence magnitude.
    pub min_influence: f32,
    /// Exclusive upper bound of influence magnitude.
    pub max_influence: f32,
}

impl UnitGenConfig {
    /// Seed that reproduces the reference unit layout used for benchmarking.
    pub const DETERMINISTIC_SEED: u64 = 118_355_416;

    pub fn validate(&self) -> InflResult<()> {
        if self.min_per_side >= self.max_per_side {
            return Err(InflError::Config(format!(
                "units per side range [{}, {}) is empty",
                self.min_per_side, self.max_per_side
            )));
        }
        let finite = self.min_influence.is_finite() && self.max_influence.is_finite();
        if !finite || self.min_influence < 0.0 || self.min_influence >= self.max_influence {
            return Err(InflError::Config(format!(
                "influence range [{}, {}) must be finite, non-negative and non-empty",
                self.min_influence, self.max_influence
            )));
        }
        Ok(())
    }
}

impl Default for UnitGenConfig {
    fn default() -> Self {
        Self {
            min_per_side:  10,
            max_per_side:  20,
            min_influence: 1.0,
            max_influence: 5.0,
        }
    }
}

/// Generate a new unit set.  `config` must have passed
/// [`UnitGenConfig::validate`].
pub fn generate_units(config: &UnitGenConfig, grid: GridDims, rng: &mut SimRng) -> Vec<Unit> {
    let mut units = Vec::new();
    generate_units_into(&mut units, config, grid, rng);
    units
}

/// Like [`generate_units`], but clears and refills `out` so its allocation is
/// reused across regenerations.
pub fn generate_units_into(
    out:    &mut Vec<Unit>,
    config: &UnitGenConfig,
    grid:   GridDims,
    rng:    &mut SimRng,
) {
    let count_a = rng.gen_range(config.min_per_side..config.max_per_side);
    let count_b = rng.gen_range(config.min_per_side..config.max_per_side);

    out.clear();
    out.reserve((count_a + count_b) as usize);

    let x_end = (grid.cols as i32 - 1).max(1);
    let y_end = (grid.rows as i32 - 1).max(1);

    for (team, count) in [(Team::A, count_a), (Team::B, count_b)] {
        for _ in 0..count {
            let x = rng.gen_range(0..x_end);
            let y = rng.gen_range(0..y_end);
            let magnitude = rng.gen_range(config.min_influence..config.max_influence);
            out.push(Unit::new(x, y, magnitude * team.sign()));
        }
    }
}
