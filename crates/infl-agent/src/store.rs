//! Core agent storage: `AgentStore` (SoA data) and `Position`.
//!
//! Steering reads `teams` and writes `positions` in the same pass.  Keeping
//! them as separate `pub` vectors lets the caller borrow `&mut positions` and
//! `&teams` at the same time:
//!
//! ```ignore
//! let AgentStore { positions, teams, .. } = &mut store;
//! steer_into(positions, teams, ..);
//! ```
//!
//! # Revision
//!
//! Every structural change (spawn, clear, truncate) bumps `revision`.  Per-
//! agent scratch owned elsewhere (the steering headings buffer) compares the
//! revision it was sized for and resizes once when it differs.  Moving agents
//! does not change the revision.

use infl_core::{AgentId, GridDims, Team};

// ── Position ──────────────────────────────────────────────────────────────────

/// Continuous position on the ground plane.  `x` runs along grid columns,
/// `z` along grid rows.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub z: f32,
}

impl Position {
    #[inline]
    pub const fn new(x: f32, z: f32) -> Self {
        Self { x, z }
    }

    /// Nearest integer cell, rounding halves to even (`2.5 → 2`, `3.5 → 4`).
    #[inline]
    pub fn cell(self) -> (i32, i32) {
        (self.x.round_ties_even() as i32, self.z.round_ties_even() as i32)
    }

    /// `true` if the nearest cell lies inside `grid`.
    #[inline]
    pub fn in_grid(self, grid: GridDims) -> bool {
        let (x, y) = self.cell();
        grid.contains(x, y)
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agents.
///
/// `positions` and `teams` always have the same length; `AgentId(i)` indexes
/// both.  Ids are dense and handed out in spawn order.
#[derive(Clone, Debug, Default)]
pub struct AgentStore {
    /// Current position.  Mutated by steering.
    pub positions: Vec<Position>,

    /// Fixed at spawn.
    pub teams: Vec<Team>,

    revision: u64,
}

impl AgentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            teams:     Vec::with_capacity(capacity),
            revision:  0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Structural change counter.  See the module docs.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.len() as u32).map(AgentId)
    }

    #[inline]
    pub fn position(&self, agent: AgentId) -> Option<Position> {
        self.positions.get(agent.index()).copied()
    }

    #[inline]
    pub fn team(&self, agent: AgentId) -> Option<Team> {
        self.teams.get(agent.index()).copied()
    }

    /// Number of agents on `team`.
    pub fn count_team(&self, team: Team) -> usize {
        self.teams.iter().filter(|&&t| t == team).count()
    }

    /// Append one agent and return its id.
    pub fn spawn(&mut self, position: Position, team: Team) -> AgentId {
        let id = AgentId(self.positions.len() as u32);
        self.positions.push(position);
        self.teams.push(team);
        self.revision += 1;
        id
    }

    /// Append many agents at once; one revision bump for the batch.
    pub fn spawn_many<I>(&mut self, agents: I) -> usize
    where
        I: IntoIterator<Item = (Position, Team)>,
    {
        let agents = agents.into_iter();
        let before = self.len();
        self.positions.reserve(agents.size_hint().0);
        self.teams.reserve(agents.size_hint().0);
        for (position, team) in agents {
            self.positions.push(position);
            self.teams.push(team);
        }
        let added = self.len() - before;
        if added > 0 {
            self.revision += 1;
        }
        added
    }

    /// Keep only the first `len` agents.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len() {
            self.positions.truncate(len);
            self.teams.truncate(len);
            self.revision += 1;
        }
    }

    /// Remove every agent.  Capacity is kept; ids restart from zero.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            self.positions.clear();
            self.teams.clear();
            self.revision += 1;
        }
    }

    /// Number of agents whose nearest cell is outside `grid`.
    pub fn count_outside(&self, grid: GridDims) -> usize {
        self.positions.iter().filter(|p| !p.in_grid(grid)).count()
    }
}
