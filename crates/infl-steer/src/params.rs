//! Speed settings and the speed commands.

/// Steering parameters shared by all agents.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SteeringParams {
    /// Base speed in cells per second.  `<= 0` freezes every agent.
    pub base_speed: f32,
}

impl SteeringParams {
    pub const DEFAULT_SPEED: f32 = 2.0;

    /// Increment used by the interactive speed up/down commands.
    pub const SPEED_STEP: f32 = 1.0;

    pub fn new(base_speed: f32) -> Self {
        Self { base_speed }
    }

    /// Replace the base speed.  Non-positive values are kept as given and
    /// freeze agents.
    pub fn set_speed(&mut self, speed: f32) {
        self.base_speed = speed;
    }

    /// Add `delta` to the base speed, clamping the result at zero.  Returns
    /// the new speed.
    pub fn adjust_speed(&mut self, delta: f32) -> f32 {
        self.base_speed = (self.base_speed + delta).max(0.0);
        self.base_speed
    }
}

impl Default for SteeringParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SPEED)
    }
}
