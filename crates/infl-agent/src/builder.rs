//! Fluent builder for an initial `AgentStore`.
//!
//! # Usage
//!
//! ```rust
//! use infl_agent::{AgentStoreBuilder, Position};
//! use infl_core::{GridDims, Team};
//!
//! let store = AgentStoreBuilder::new()
//!     .capacity(10_000)
//!     .agent(Position::new(4.0, 7.0), Team::A)
//!     .random(500, GridDims::DEFAULT, /*seed=*/ 42)
//!     .build();
//!
//! assert_eq!(store.len(), 501);
//! ```

use infl_core::{GridDims, SimRng, Team};

use crate::{AgentStore, Position, spawn_random};

enum Step {
    Agent(Position, Team),
    Random { count: usize, grid: GridDims, seed: u64 },
}

/// Fluent builder for [`AgentStore`].  Steps are applied in call order.
#[derive(Default)]
pub struct AgentStoreBuilder {
    capacity: usize,
    steps:    Vec<Step>,
}

impl AgentStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve room for `capacity` agents up front.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Add one agent.
    pub fn agent(mut self, position: Position, team: Team) -> Self {
        self.steps.push(Step::Agent(position, team));
        self
    }

    /// Add `count` agents via [`spawn_random`] with an RNG seeded from `seed`.
    pub fn random(mut self, count: usize, grid: GridDims, seed: u64) -> Self {
        self.steps.push(Step::Random { count, grid, seed });
        self
    }

    pub fn build(self) -> AgentStore {
        let mut store = AgentStore::with_capacity(self.capacity);
        for step in self.steps {
            match step {
                Step::Agent(position, team) => {
                    store.spawn(position, team);
                }
                Step::Random { count, grid, seed } => {
                    spawn_random(&mut store, count, grid, &mut SimRng::new(seed));
                }
            }
        }
        store
    }
}
