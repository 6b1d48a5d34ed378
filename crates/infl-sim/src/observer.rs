//! Engine observer trait for progress reporting and data collection.

use infl_agent::AgentStore;
use infl_core::Tick;
use infl_field::FieldSnapshot;
use infl_steer::StepReport;

use crate::TickReport;

/// Callbacks invoked by [`Engine::tick`][crate::Engine::tick] at each phase
/// boundary.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — frame timer
///
/// ```rust,ignore
/// struct FrameTimer;
///
/// impl EngineObserver for FrameTimer {
///     fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
///         println!("{tick}: {}", report);
///     }
/// }
/// ```
pub trait EngineObserver {
    /// Called at the very start of each tick, before the field is computed.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the new field is published and before agents move.
    ///
    /// A renderer can upload `field` here.  Holding on to the snapshot past
    /// the callback keeps its buffer from being recycled, so the next tick
    /// allocates a fresh one.
    fn on_field_published(&mut self, _tick: Tick, _field: &FieldSnapshot) {}

    /// Called after every agent has been steered.
    fn on_agents_stepped(&mut self, _tick: Tick, _agents: &AgentStore, _report: &StepReport) {}

    /// Called at the end of each tick with its timings.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}
}

/// An [`EngineObserver`] that does nothing.
pub struct NoopObserver;

impl EngineObserver for NoopObserver {}
