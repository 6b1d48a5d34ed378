//! `infl-steer` — agents climbing the influence field.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`heading`]   | `Heading` — one agent's chosen direction and speed             |
//! | [`steer`]     | `steer_agent` — the per-agent neighbour scan (pure function)   |
//! | [`params`]    | `SteeringParams` — base speed and speed commands               |
//! | [`engine`]    | `SteeringEngine` (two-pass job), `StepReport`                  |
//! | [`error`]     | `SteerError`, `SteerResult<T>`                                 |
//!
//! # Movement model
//!
//! 1. Round the agent's position to its nearest cell (halves to even).  A
//!    cell outside the grid strands the agent for this step.
//! 2. Scan the 8 neighbours in `NEIGHBOR_OFFSETS` order, skipping cells off
//!    the grid.  Team A keeps a strictly greater value, team B a strictly
//!    lesser one; ties keep the earlier candidate.
//! 3. Move toward the best cell at `base_speed + |best| * 5` cells per second
//!    (zero when `base_speed <= 0`).  Positions are not clamped, so agents can
//!    walk off the grid and become stranded.
//!
//! # Two passes
//!
//! ```text
//! intent: headings[i] = steer_agent(field, positions[i], teams[i])   (reads only)
//! apply:  positions[i] += headings[i] * dt                            (own slot only)
//! ```
//!
//! Both passes run on the scheduler; neither takes a lock.

pub mod engine;
pub mod error;
pub mod heading;
pub mod params;
pub mod steer;


pub use engine::{SteeringEngine, StepReport};
pub use error::{SteerError, SteerResult};
pub use heading::Heading;
pub use params::SteeringParams;
pub use steer::{INFLUENCE_SPEED_GAIN, effective_speed, steer_agent};
