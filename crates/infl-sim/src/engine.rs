//! The `Engine` struct and its tick loop.

use std::time::Instant;

use infl_agent::{AgentStore, Position, spawn_circle, spawn_random};
use infl_core::{
    AgentId, EngineConfig, GridDims, SimRng, Team, TickClock, Unit, generate_units_into,
};
use infl_field::{
    Capabilities, ComputedField, FieldComputer, FieldJob, FieldPublisher, FieldReader,
    FieldSnapshot, Kernel,
};
use infl_sched::Scheduler;
use infl_steer::{SteerError, SteeringEngine, SteeringParams, StepReport};
use tracing::debug;

use crate::{EngineObserver, EngineResult, TickReport};

/// Stream offsets for [`SimRng::child`].
pub(crate) const UNIT_STREAM:  u64 = 0;
pub(crate) const SPAWN_STREAM: u64 = 1;

// ── Engine ────────────────────────────────────────────────────────────────────

/// The influence field engine.
///
/// `Engine` owns everything a tick touches and drives the three-phase loop:
///
/// 1. **Compute**: the selected kernel fills a scratch buffer from the unit
///    set, in parallel over cell chunks.
/// 2. **Publish**: the completed buffer becomes the snapshot readers see;
///    the previous one is recycled as the next scratch when nobody holds it.
/// 3. **Steer**: every agent picks a heading from the snapshot (intent pass)
///    and then moves (apply pass).
///
/// The phases can also be driven one at a time through
/// [`compute_field`](Self::compute_field), [`publish_field`](Self::publish_field)
/// and [`step_agents`](Self::step_agents).
///
/// Create via [`EngineBuilder`][crate::EngineBuilder].
pub struct Engine {
    /// Tick counter and accumulated simulated time.
    pub clock: TickClock,

    /// Agent state (SoA arrays).  Structural changes made directly here are
    /// picked up through the store revision on the next step.
    pub agents: AgentStore,

    pub(crate) config:    EngineConfig,
    pub(crate) caps:      Capabilities,
    pub(crate) scheduler: Scheduler,
    pub(crate) computer:  FieldComputer,
    pub(crate) publisher: FieldPublisher,
    pub(crate) steering:  SteeringEngine,
    pub(crate) params:    SteeringParams,

    /// Stream for `generate_units`.
    pub(crate) unit_rng:  SimRng,
    /// Stream for the agent spawners.
    pub(crate) spawn_rng: SimRng,

    /// Most recently generated unit set; its allocation is reused.
    pub(crate) units:     Vec<Unit>,
}

impl Engine {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Grid the next field will be computed for.
    #[inline]
    pub fn grid(&self) -> GridDims {
        self.publisher.grid()
    }

    #[inline]
    pub fn kernel(&self) -> Kernel {
        self.computer.kernel()
    }

    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.caps
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Steering buffers, for inspecting the last step's headings.
    pub fn steering(&self) -> &SteeringEngine {
        &self.steering
    }

    /// Unit set from the last [`generate_units`](Self::generate_units).
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Current base speed in cells per second.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.params.base_speed
    }

    // ── Field ─────────────────────────────────────────────────────────────

    /// Compute the field of `units` over `grid`, blocking until done.
    ///
    /// A `grid` different from the current one reallocates the field buffers.
    pub fn compute_field(&mut self, units: &[Unit], grid: GridDims) -> EngineResult<ComputedField> {
        grid.validate()?;
        let scratch = self.publisher.begin_compute(grid);
        Ok(self.computer.compute(&self.scheduler, units, scratch)?)
    }

    /// Start the same computation as [`compute_field`](Self::compute_field)
    /// in the background.  Join the returned job before publishing.
    pub fn spawn_field_job(&mut self, units: Vec<Unit>, grid: GridDims) -> EngineResult<FieldJob> {
        grid.validate()?;
        let scratch = self.publisher.begin_compute(grid);
        Ok(FieldJob::spawn(&self.scheduler, &self.computer, units, scratch))
    }

    /// Make `field` the published snapshot.
    pub fn publish_field(&mut self, field: ComputedField) -> EngineResult<FieldSnapshot> {
        Ok(self.publisher.publish(field)?)
    }

    /// The most recently published snapshot (all zeros before the first
    /// publish).
    pub fn read_field(&self) -> FieldSnapshot {
        self.publisher.read()
    }

    /// A read handle for another thread, e.g. a renderer.
    pub fn field_reader(&self) -> FieldReader {
        self.publisher.reader()
    }

    /// Replace the engine's unit set with a freshly generated one and return
    /// it.
    pub fn generate_units(&mut self) -> &[Unit] {
        let grid = self.grid();
        generate_units_into(&mut self.units, &self.config.units, grid, &mut self.unit_rng);
        debug!(units = self.units.len(), "generated unit set");
        &self.units
    }

    // ── Agents ────────────────────────────────────────────────────────────

    /// Steer every agent one step of `dt` seconds over `field` at the
    /// current speed.
    pub fn step_agents(&mut self, field: &FieldSnapshot, dt: f32) -> EngineResult<StepReport> {
        let report = self.steering.step(
            &self.scheduler,
            &mut self.agents,
            field,
            dt,
            self.params.base_speed,
        )?;
        Ok(report)
    }

    pub fn spawn_agent(&mut self, position: Position, team: Team) -> AgentId {
        self.agents.spawn(position, team)
    }

    /// Spawn `count` agents on random cells.  Returns the number spawned.
    pub fn spawn_agents_random(&mut self, count: usize) -> usize {
        let grid = self.grid();
        spawn_random(&mut self.agents, count, grid, &mut self.spawn_rng)
    }

    /// Spawn a disc of agents around `center`.  Returns the number spawned.
    pub fn spawn_agents_circle(&mut self, center: Position, radius: u32) -> usize {
        let grid = self.grid();
        spawn_circle(&mut self.agents, center, radius, grid, &mut self.spawn_rng)
    }

    pub fn clear_agents(&mut self) {
        self.agents.clear();
    }

    // ── Speed commands ────────────────────────────────────────────────────

    /// Set the base speed.  `<= 0` freezes every agent.
    pub fn set_speed(&mut self, speed: f32) -> EngineResult<()> {
        if !speed.is_finite() {
            return Err(SteerError::InvalidSpeed(speed).into());
        }
        self.params.set_speed(speed);
        Ok(())
    }

    /// Add `delta` to the base speed, clamping at zero.  Returns the new
    /// speed.
    pub fn adjust_speed(&mut self, delta: f32) -> f32 {
        self.params.adjust_speed(delta)
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run one full tick: compute `units` over the current grid, publish,
    /// then steer every agent by `dt` seconds.
    pub fn tick<O: EngineObserver>(
        &mut self,
        units:    &[Unit],
        dt:       f32,
        observer: &mut O,
    ) -> EngineResult<TickReport> {
        if !dt.is_finite() {
            return Err(SteerError::InvalidDt(dt).into());
        }
        let now  = self.clock.current_tick;
        let grid = self.grid();
        observer.on_tick_start(now);

        // ── Phase 1: compute ──────────────────────────────────────────────
        let started  = Instant::now();
        let computed = self.compute_field(units, grid)?;
        let compute  = started.elapsed();
        let field    = computed.stats();
        debug!(tick = %now, units = units.len(), %field, "field computed");

        // ── Phase 2: publish ──────────────────────────────────────────────
        let started  = Instant::now();
        let snapshot = self.publish_field(computed)?;
        let publish  = started.elapsed();
        debug!(tick = %now, generation = snapshot.generation(), "field published");
        observer.on_field_published(now, &snapshot);

        // ── Phase 3: steer ────────────────────────────────────────────────
        let steer = self.step_agents(&snapshot, dt)?;
        observer.on_agents_stepped(now, &self.agents, &steer);

        let report = TickReport {
            tick: now,
            units: units.len(),
            field_generation: snapshot.generation(),
            compute,
            field,
            publish,
            steer,
        };
        // Released before the next publish so its buffer can be recycled.
        drop(snapshot);

        self.clock.advance(dt);
        debug!(%report, "tick complete");
        observer.on_tick_end(now, &report);
        Ok(report)
    }

    /// Run `n` ticks of `dt` seconds over the engine's own unit set (see
    /// [`generate_units`](Self::generate_units)).
    pub fn run_ticks<O: EngineObserver>(
        &mut self,
        n:        u64,
        dt:       f32,
        observer: &mut O,
    ) -> EngineResult<()> {
        let units = std::mem::take(&mut self.units);
        let result = (0..n).try_for_each(|_| self.tick(&units, dt, observer).map(|_| ()));
        self.units = units;
        result
    }
}
