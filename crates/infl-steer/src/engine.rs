//! `SteeringEngine` — runs the intent and apply passes over every agent.

use std::fmt;

use infl_agent::AgentStore;
use infl_field::FieldSnapshot;
use infl_sched::{JobStats, Scheduler};
use tracing::{debug, warn};

use crate::{Heading, SteerError, SteerResult, steer_agent};

// ── StepReport ────────────────────────────────────────────────────────────────

/// Outcome of one steering step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Agents processed.
    pub agents:   usize,
    /// Agents whose position changed.
    pub moved:    usize,
    /// In-grid agents that stayed put (local optimum or zero speed).
    pub stayed:   usize,
    /// Agents skipped because their cell was off the grid.
    pub stranded: usize,
    /// Generation of the field that was read.
    pub field_generation: u64,
    pub intent:   JobStats,
    pub apply:    JobStats,
}

impl StepReport {
    /// Combined wall time of both passes.
    pub fn elapsed(&self) -> std::time::Duration {
        self.intent.elapsed + self.apply.elapsed
    }
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} agents: {} moved, {} stayed, {} stranded ({:.3} ms)",
            self.agents,
            self.moved,
            self.stayed,
            self.stranded,
            self.elapsed().as_secs_f64() * 1e3
        )
    }
}

// ── SteeringEngine ────────────────────────────────────────────────────────────

/// Owns the per-agent headings buffer between steps.
///
/// The buffer is sized for a particular [`AgentStore::revision`] and resized
/// once whenever the revision (or agent count) changes; steps with an
/// unchanged population reuse it untouched.
#[derive(Debug)]
pub struct SteeringEngine {
    headings:  Vec<Heading>,
    sized_for: Option<u64>,
    chunk_len: usize,
    resizes:   u64,
}

impl SteeringEngine {
    /// `chunk_len` agents per scheduler task; must be at least 1.
    pub fn new(chunk_len: usize) -> Self {
        Self { headings: Vec::new(), sized_for: None, chunk_len, resizes: 0 }
    }

    /// Headings from the most recent step, indexed by `AgentId`.
    #[inline]
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    /// How many times the headings buffer has been resized.
    #[inline]
    pub fn resize_count(&self) -> u64 {
        self.resizes
    }

    fn prepare(&mut self, agents: &AgentStore) {
        let n = agents.len();
        if self.sized_for == Some(agents.revision()) && self.headings.len() == n {
            return;
        }
        debug!(agents = n, revision = agents.revision(), "resizing steering buffers");
        self.headings.clear();
        self.headings.resize(n, Heading::default());
        self.sized_for = Some(agents.revision());
        self.resizes += 1;
    }

    /// Steer every agent in `agents` one step of `dt` seconds over `field`.
    ///
    /// Blocks until both passes finish.  With no agents this does nothing.
    pub fn step(
        &mut self,
        scheduler:  &Scheduler,
        agents:     &mut AgentStore,
        field:      &FieldSnapshot,
        dt:         f32,
        base_speed: f32,
    ) -> SteerResult<StepReport> {
        if !dt.is_finite() {
            return Err(SteerError::InvalidDt(dt));
        }
        if !base_speed.is_finite() {
            return Err(SteerError::InvalidSpeed(base_speed));
        }

        let mut report = StepReport {
            agents:           agents.len(),
            field_generation: field.generation(),
            ..StepReport::default()
        };
        if agents.is_empty() {
            return Ok(report);
        }
        self.prepare(agents);

        let chunk_len = self.chunk_len;
        let grid      = field.grid();
        let values: &[f32] = field;

        // ── Pass 1: intent ────────────────────────────────────────────────
        {
            let positions = &agents.positions;
            let teams     = &agents.teams;
            report.intent = scheduler.for_each_chunk_mut(&mut self.headings, chunk_len, |k, part| {
                let base = k * chunk_len;
                for (j, heading) in part.iter_mut().enumerate() {
                    let i = base + j;
                    *heading = steer_agent(values, grid, positions[i], teams[i], base_speed);
                }
            })?;
        }

        // ── Pass 2: apply ─────────────────────────────────────────────────
        {
            let headings = &self.headings;
            report.apply = scheduler.for_each_chunk_mut(&mut agents.positions, chunk_len, |k, part| {
                let base = k * chunk_len;
                for (j, position) in part.iter_mut().enumerate() {
                    headings[base + j].apply(position, dt);
                }
            })?;
        }

        for h in &self.headings {
            if h.stranded {
                report.stranded += 1;
            } else if h.moves() && dt != 0.0 {
                report.moved += 1;
            } else {
                report.stayed += 1;
            }
        }

        if report.stranded > 0 {
            warn!(stranded = report.stranded, grid = %grid, "agents outside the field were not moved");
        }
        debug!(%report, "steering step");
        Ok(report)
    }
}
