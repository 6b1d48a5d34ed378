//! Tick counter and variable-step clock.
//!
//! Unlike a fixed-resolution simulation, every engine tick is driven by the
//! host frame, so the time step arrives with the call (`dt` seconds) and the
//! clock only accumulates it.  `Tick` stays an exact integer counter for
//! ordering and observer callbacks.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Number of completed engine ticks.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── TickClock ─────────────────────────────────────────────────────────────────

/// Current tick plus accumulated simulated seconds.
#[derive(Clone, Debug, Default)]
pub struct TickClock {
    /// The tick currently being processed.
    pub current_tick: Tick,
    /// Sum of every `dt` passed to [`advance`](Self::advance).
    pub elapsed_secs: f64,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current tick, which lasted `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.current_tick = self.current_tick + 1;
        self.elapsed_secs += f64::from(dt);
    }
}

impl fmt::Display for TickClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.3}s)", self.current_tick, self.elapsed_secs)
    }
}
