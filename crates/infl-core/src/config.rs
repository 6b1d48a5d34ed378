//! Engine configuration.
//!
//! Typically built in code by the driver, or loaded from a JSON/TOML file
//! when the `serde` feature is enabled, then passed to `EngineBuilder`.

use std::fmt;

use crate::{GridDims, InflError, InflResult, UnitGenConfig};

// ── Kernel selection ──────────────────────────────────────────────────────────

/// Which field kernel implementation to run.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KernelChoice {
    /// Widest kernel the capability probe reports as supported.
    #[default]
    Auto,
    /// One unit at a time.  The numerical reference.
    Scalar,
    /// 4-wide batches.
    Lanes4,
    /// 8-wide batches, fused multiply-add when available.
    Lanes8,
}

/// How unit data is laid out for the kernel.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitLayout {
    /// Parallel `xs`/`ys`/`influence` arrays; contiguous vector loads.
    #[default]
    Soa,
    /// The `&[Unit]` slice as given; lanes are gathered per batch.
    Aos,
}

/// Speed/precision trade-off for the vector kernels.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Precision {
    /// Full square root and division.
    #[default]
    Exact,
    /// Hardware reciprocal-sqrt and reciprocal estimates
    /// (max relative error 1.5·2⁻¹² each).  Scalar and portable paths ignore
    /// this and stay exact.
    Approximate,
}

impl fmt::Display for KernelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KernelChoice::Auto   => "auto",
            KernelChoice::Scalar => "scalar",
            KernelChoice::Lanes4 => "lanes4",
            KernelChoice::Lanes8 => "lanes8",
        })
    }
}

impl fmt::Display for UnitLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UnitLayout::Soa => "soa",
            UnitLayout::Aos => "aos",
        })
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Precision::Exact       => "exact",
            Precision::Approximate => "approximate",
        })
    }
}

// ── EngineConfig ──────────────────────────────────────────────────────────────

/// Top-level engine configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Field dimensions.  Default 320 × 320.
    pub grid: GridDims,

    /// Root RNG seed for unit generation and agent spawning.
    pub seed: u64,

    /// Worker thread count for the Rayon pool.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Cells per field task.  `None` schedules one column (`rows` cells) per
    /// task.
    pub field_chunk_len: Option<usize>,

    /// Agents per steering task.
    pub agent_chunk_len: usize,

    /// Base agent speed in cells per second.  `<= 0` freezes all agents.
    pub base_speed: f32,

    pub kernel: KernelChoice,
    pub layout: UnitLayout,
    pub precision: Precision,

    /// Parameters for `Engine::generate_units`.
    pub units: UnitGenConfig,
}

impl EngineConfig {
    /// Check every field.  Called by `EngineBuilder::build`.
    pub fn validate(&self) -> InflResult<()> {
        self.grid.validate()?;
        self.units.validate()?;

        if self.num_threads == Some(0) {
            return Err(InflError::Config("num_threads must be at least 1".into()));
        }
        if self.field_chunk_len == Some(0) {
            return Err(InflError::Config("field_chunk_len must be at least 1".into()));
        }
        if self.agent_chunk_len == 0 {
            return Err(InflError::Config("agent_chunk_len must be at least 1".into()));
        }
        if !self.base_speed.is_finite() {
            return Err(InflError::Config(format!(
                "base_speed must be finite, got {}",
                self.base_speed
            )));
        }
        Ok(())
    }

    /// Cells per field task after applying the one-column default.
    #[inline]
    pub fn effective_field_chunk_len(&self) -> usize {
        self.field_chunk_len.unwrap_or(self.grid.rows as usize)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid:            GridDims::DEFAULT,
            seed:            UnitGenConfig::DETERMINISTIC_SEED,
            num_threads:     None,
            field_chunk_len: None,
            agent_chunk_len: 1024,
            base_speed:      2.0,
            kernel:          KernelChoice::Auto,
            layout:          UnitLayout::Soa,
            precision:       Precision::Exact,
            units:           UnitGenConfig::default(),
        }
    }
}
