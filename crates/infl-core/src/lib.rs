//! `infl-core` — foundational types for the influence field engine.
//!
//! This crate is a dependency of every other `infl-*` crate.  It has no
//! `infl-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`grid`]        | `GridDims`, `Offset`, `NEIGHBOR_OFFSETS`                |
//! | [`unit`]        | `Unit` (point source), `Team`                           |
//! | [`generator`]   | `UnitGenConfig`, bulk random unit generation            |
//! | [`ids`]         | `AgentId`                                               |
//! | [`time`]        | `Tick`, `TickClock`                                     |
//! | [`rng`]         | `SimRng`                                                |
//! | [`config`]      | `EngineConfig`, `KernelChoice`, `UnitLayout`, `Precision` |
//! | [`error`]       | `InflError`, `InflResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod ids;
pub mod rng;
pub mod time;
pub mod unit;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{EngineConfig, KernelChoice, Precision, UnitLayout};
pub use error::{InflError, InflResult};
pub use generator::{UnitGenConfig, generate_units, generate_units_into};
pub use grid::{GridDims, NEIGHBOR_OFFSETS, Offset};
pub use ids::AgentId;
pub use rng::SimRng;
pub use time::{Tick, TickClock};
pub use unit::{Team, Unit};
