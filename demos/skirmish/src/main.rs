//! skirmish — headless demo for the influence field engine.
//!
//! Two sides of point-source units shape a 320 × 320 field; 5 000 agents
//! climb (team A) or descend (team B) it.  Mid-run the demo drops a disc of
//! reinforcements, bumps the speed and regenerates the unit set, the same
//! commands an interactive host would issue from input.
//!
//! ```text
//! cargo run -p skirmish --release [-- config.json]
//! RUST_LOG=debug cargo run -p skirmish     # per-phase timings
//! ```

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use infl_agent::{AgentStore, Position};
use infl_core::{EngineConfig, Team, Tick};
use infl_field::FieldSnapshot;
use infl_sim::{EngineBuilder, EngineObserver, TickReport};
use infl_steer::SteeringParams;

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:     usize = 5_000;
const TICKS:           u64   = 600;
const DT:              f32   = 1.0 / 60.0; // one 60 Hz frame
const LOG_EVERY:       u64   = 100;
const EVENT_TICK:      u64   = 300;         // reinforcements + new units
const CIRCLE_RADIUS:   u32   = 10;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Accumulates phase timings and logs a progress line every `LOG_EVERY`
/// ticks.
#[derive(Default)]
struct FrameStats {
    ticks:     u64,
    compute:   Duration,
    publish:   Duration,
    steer:     Duration,
    /// `(min, max)` of the latest field.
    extremes:  (f32, f32),
}

impl EngineObserver for FrameStats {
    fn on_field_published(&mut self, tick: Tick, field: &FieldSnapshot) {
        if tick.0 % LOG_EVERY == 0 {
            self.extremes = field
                .iter()
                .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        }
    }

    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        self.ticks   += 1;
        self.compute += report.compute;
        self.publish += report.publish;
        self.steer   += report.steer.elapsed();

        if tick.0 % LOG_EVERY == 0 {
            let (lo, hi) = self.extremes;
            info!(%tick, field_min = lo, field_max = hi, "{report}");
        }
    }
}

impl FrameStats {
    fn mean_ms(&self, total: Duration) -> f64 {
        total.as_secs_f64() * 1e3 / self.ticks.max(1) as f64
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&str>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("reading config {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let arg    = std::env::args().nth(1);
    let config = load_config(arg.as_deref())?;
    let grid   = config.grid;
    info!(%grid, seed = config.seed, agents = AGENT_COUNT, ticks = TICKS, "skirmish starting");

    // 1. Build the engine with an empty population, then spawn.
    let mut engine = EngineBuilder::new(config).agents(AgentStore::with_capacity(AGENT_COUNT)).build()?;
    engine.spawn_agents_random(AGENT_COUNT);

    // 2. First unit set from the configured seed.
    let mut units = engine.generate_units().to_vec();
    info!(units = units.len(), "initial unit set");

    // 3. Run.
    let mut stats = FrameStats::default();
    let t0 = Instant::now();
    for i in 0..TICKS {
        if i == EVENT_TICK {
            let center = Position::new(grid.cols as f32 / 2.0, grid.rows as f32 / 2.0);
            let added  = engine.spawn_agents_circle(center, CIRCLE_RADIUS);
            let speed  = engine.adjust_speed(SteeringParams::SPEED_STEP);
            units = engine.generate_units().to_vec();
            info!(added, speed, units = units.len(), "reinforcements arrive; units regrouped");
        }
        engine.tick(&units, DT, &mut stats)?;
    }
    let elapsed = t0.elapsed();

    // 4. Summary.
    let agents = &engine.agents;
    println!();
    println!("Run complete in {:.3} s ({})", elapsed.as_secs_f64(), engine.clock);
    println!("Kernel: {}  |  caps: {}", engine.kernel(), engine.capabilities());
    println!();
    println!("{:<12} {:>10}", "Phase", "mean ms");
    println!("{}", "-".repeat(23));
    println!("{:<12} {:>10.3}", "compute", stats.mean_ms(stats.compute));
    println!("{:<12} {:>10.3}", "publish", stats.mean_ms(stats.publish));
    println!("{:<12} {:>10.3}", "steer", stats.mean_ms(stats.steer));
    println!();
    println!("{:<12} {:>10}", "Team", "agents");
    println!("{}", "-".repeat(23));
    for team in [Team::A, Team::B] {
        println!("{:<12} {:>10}", team.as_str(), agents.count_team(team));
    }
    println!("{:<12} {:>10}", "off-grid", agents.count_outside(grid));

    Ok(())
}
