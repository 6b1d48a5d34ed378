//! Point sources (`Unit`) and agent teams.

use std::fmt;

/// A point source contributing `influence / (1 + distance)` to every cell.
///
/// The sign of `influence` encodes the faction: positive for side A,
/// negative for side B.  Units carry no identity; drivers regenerate the
/// whole set in bulk whenever it changes.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub x:         i32,
    pub y:         i32,
    pub influence: f32,
}

impl Unit {
    #[inline]
    pub const fn new(x: i32, y: i32, influence: f32) -> Self {
        Self { x, y, influence }
    }

    /// The side this unit strengthens.  Zero-influence units count as A.
    #[inline]
    pub fn team(&self) -> Team {
        if self.influence >= 0.0 { Team::A } else { Team::B }
    }
}

/// Which way an agent climbs the field.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    /// Seeks the local maximum (positive influence).
    #[default]
    A,
    /// Seeks the local minimum (negative influence).
    B,
}

impl Team {
    /// `true` if `candidate` is a strict improvement over `current` for this
    /// team.  Equal values never win.
    #[inline]
    pub fn prefers(self, candidate: f32, current: f32) -> bool {
        match self {
            Team::A => candidate > current,
            Team::B => candidate < current,
        }
    }

    /// `+1.0` for A, `-1.0` for B.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Team::A => 1.0,
            Team::B => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Team::A => "A",
            Team::B => "B",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
