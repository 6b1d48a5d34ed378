//! Per-tick timing report.

use std::fmt;
use std::time::Duration;

use infl_core::Tick;
use infl_sched::JobStats;
use infl_steer::StepReport;

/// Timings and counts for one [`Engine::tick`][crate::Engine::tick].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick:             Tick,
    /// Units in the field computation.
    pub units:            usize,
    /// Generation of the field published this tick.
    pub field_generation: u64,
    /// Wall time of the field phase, SoA rebuild included.
    pub compute:          Duration,
    /// Kernel dispatch statistics.
    pub field:            JobStats,
    /// Wall time of the publish swap.
    pub publish:          Duration,
    pub steer:            StepReport,
}

impl TickReport {
    /// Sum of the three phase timings.
    pub fn total(&self) -> Duration {
        self.compute + self.publish + self.steer.elapsed()
    }
}

impl fmt::Display for TickReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = |d: Duration| d.as_secs_f64() * 1e3;
        write!(
            f,
            "{} field gen {} ({} units): compute {:.3} ms, publish {:.3} ms, steer {:.3} ms; {}",
            self.tick,
            self.field_generation,
            self.units,
            ms(self.compute),
            ms(self.publish),
            ms(self.steer.elapsed()),
            self.steer
        )
    }
}
