//! Fluent builder for constructing an [`Engine`].

use infl_agent::AgentStore;
use infl_core::{EngineConfig, SimRng, TickClock};
use infl_field::{Capabilities, FieldComputer, FieldPublisher, Kernel};
use infl_sched::Scheduler;
use infl_steer::{SteeringEngine, SteeringParams};
use tracing::info;

use crate::engine::{SPAWN_STREAM, UNIT_STREAM};
use crate::{Engine, EngineResult};

/// Fluent builder for [`Engine`].
///
/// # Optional inputs (have defaults)
///
/// | Method                | Default                          |
/// |-----------------------|----------------------------------|
/// | `.agents(store)`      | Empty `AgentStore`               |
/// | `.capabilities(caps)` | `Capabilities::detect()`         |
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(EngineConfig::default())
///     .agents(store)
///     .build()?;
/// let units = engine.generate_units().to_vec();
/// engine.tick(&units, 1.0 / 60.0, &mut NoopObserver)?;
/// ```
pub struct EngineBuilder {
    config: EngineConfig,
    agents: Option<AgentStore>,
    caps:   Option<Capabilities>,
}

impl EngineBuilder {
    pub fn new(config: EngineConfig) -> Self {
        Self { config, agents: None, caps: None }
    }

    /// Start with an existing agent population.
    pub fn agents(mut self, agents: AgentStore) -> Self {
        self.agents = Some(agents);
        self
    }

    /// Override the capability probe, e.g. with
    /// [`Capabilities::portable`] to force the portable kernel paths.
    pub fn capabilities(mut self, caps: Capabilities) -> Self {
        self.caps = Some(caps);
        self
    }

    /// Validate the config, start the worker pool, select the kernel and
    /// return a ready-to-run [`Engine`].
    pub fn build(self) -> EngineResult<Engine> {
        let config = self.config;
        config.validate()?;

        let caps      = self.caps.unwrap_or_else(Capabilities::detect);
        let kernel    = Kernel::select(caps, config.kernel, config.precision);
        let scheduler = Scheduler::new(config.num_threads, config.agent_chunk_len)?;

        info!(
            grid    = %config.grid,
            kernel  = %kernel,
            caps    = %caps,
            layout  = %config.layout,
            threads = scheduler.num_threads(),
            "engine ready"
        );

        let mut root  = SimRng::new(config.seed);
        let unit_rng  = root.child(UNIT_STREAM);
        let spawn_rng = root.child(SPAWN_STREAM);

        Ok(Engine {
            clock:     TickClock::new(),
            agents:    self.agents.unwrap_or_default(),
            computer:  FieldComputer::new(kernel, config.layout, config.field_chunk_len),
            publisher: FieldPublisher::new(config.grid),
            steering:  SteeringEngine::new(config.agent_chunk_len),
            params:    SteeringParams::new(config.base_speed),
            units:     Vec::new(),
            unit_rng,
            spawn_rng,
            scheduler,
            caps,
            config,
        })
    }
}
