//! Per-agent steering output.

use infl_agent::Position;

/// Where one agent goes this step.
///
/// `(dx, dy)` is the integer step to the chosen cell (each component in
/// `-1..=1`) and `speed` is in cells per second.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct Heading {
    pub dx:       i32,
    pub dy:       i32,
    pub speed:    f32,
    /// The agent's cell was outside the grid; it is not moved.
    pub stranded: bool,
}

impl Heading {
    /// Heading for an agent whose cell is off the grid.
    pub const STRANDED: Heading = Heading { dx: 0, dy: 0, speed: 0.0, stranded: true };

    /// `true` if applying this heading changes the position for any `dt > 0`.
    #[inline]
    pub fn moves(&self) -> bool {
        !self.stranded && self.speed > 0.0 && (self.dx != 0 || self.dy != 0)
    }

    /// Advance `position` by this heading over `dt` seconds.
    #[inline]
    pub fn apply(&self, position: &mut Position, dt: f32) {
        if self.stranded {
            return;
        }
        let step = self.speed * dt;
        position.x += self.dx as f32 * step;
        position.z += self.dy as f32 * step;
    }
}
