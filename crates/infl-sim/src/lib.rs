//! `infl-sim` — the engine context object for the influence field engine.
//!
//! # Tick loop
//!
//! ```text
//! tick(units, dt):
//!   ① Compute  — kernel fills a scratch buffer from `units` (parallel over
//!                cell chunks, joined before ②).
//!   ② Publish  — scratch becomes the published snapshot; the previous
//!                buffer is recycled when no reader still holds it.
//!   ③ Steer    — intent pass reads the snapshot, apply pass moves agents
//!                (both parallel over agent chunks, joined before return).
//!   clock.advance(dt)
//! ```
//!
//! Commands (spawning, clearing, speed changes, unit regeneration) are plain
//! `&mut self` methods called between ticks.
//!
//! # Cargo features
//!
//! | Feature | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `EngineConfig` and agents.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use infl_core::EngineConfig;
//! use infl_sim::{EngineBuilder, NoopObserver};
//!
//! let mut engine = EngineBuilder::new(EngineConfig::default()).build()?;
//! engine.spawn_agents_random(5_000);
//! engine.generate_units();
//! engine.run_ticks(600, 1.0 / 60.0, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod engine;
pub mod error;
pub mod observer;
pub mod report;

#[cfg(test)]
mod tests;

pub use builder::EngineBuilder;
pub use engine::Engine;
pub use error::{EngineError, EngineResult};
pub use observer::{EngineObserver, NoopObserver};
pub use report::TickReport;
