//! Integration tests for infl-sim.

use infl_agent::Position;
use infl_core::{EngineConfig, GridDims, InflError, KernelChoice, Team, Tick, Unit};
use infl_field::{Capabilities, FieldError, FieldKernel, FieldSnapshot};
use infl_steer::{SteerError, StepReport};

use crate::{Engine, EngineBuilder, EngineError, EngineObserver, NoopObserver, TickReport};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(rows: u32, cols: u32) -> EngineConfig {
    EngineConfig {
        grid:            GridDims::new(rows, cols).unwrap(),
        num_threads:     Some(2),
        agent_chunk_len: 16,
        ..EngineConfig::default()
    }
}

fn engine(rows: u32, cols: u32) -> Engine {
    EngineBuilder::new(config(rows, cols)).build().unwrap()
}

/// Records the order of observer callbacks.
#[derive(Default)]
struct Recorder {
    events:      Vec<String>,
    generations: Vec<u64>,
}

impl EngineObserver for Recorder {
    fn on_tick_start(&mut self, tick: Tick) {
        self.events.push(format!("start {tick}"));
    }

    fn on_field_published(&mut self, tick: Tick, field: &FieldSnapshot) {
        self.events.push(format!("published {tick}"));
        self.generations.push(field.generation());
    }

    fn on_agents_stepped(&mut self, tick: Tick, _agents: &infl_agent::AgentStore, report: &StepReport) {
        self.events.push(format!("stepped {tick} {}", report.agents));
    }

    fn on_tick_end(&mut self, tick: Tick, _report: &TickReport) {
        self.events.push(format!("end {tick}"));
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn invalid_config_is_rejected() {
        let cfg = EngineConfig { grid: GridDims { rows: 0, cols: 4 }, ..config(4, 4) };
        assert!(matches!(
            EngineBuilder::new(cfg).build(),
            Err(EngineError::Core(InflError::InvalidGrid { .. }))
        ));

        let cfg = EngineConfig { agent_chunk_len: 0, ..config(4, 4) };
        assert!(matches!(
            EngineBuilder::new(cfg).build(),
            Err(EngineError::Core(InflError::Config(_)))
        ));
    }

    #[test]
    fn explicit_kernel_on_portable_caps() {
        let cfg = EngineConfig { kernel: KernelChoice::Lanes8, ..config(8, 8) };
        let e = EngineBuilder::new(cfg)
            .capabilities(Capabilities::portable())
            .build()
            .unwrap();
        assert_eq!(e.kernel().name(), "lanes8");
        assert_eq!(e.kernel().path(), "portable");
        assert_eq!(e.capabilities(), Capabilities::portable());
    }

    #[test]
    fn auto_on_portable_caps_is_scalar() {
        let e = EngineBuilder::new(config(8, 8))
            .capabilities(Capabilities::portable())
            .build()
            .unwrap();
        assert_eq!(e.kernel().name(), "scalar");
    }

    #[test]
    fn starts_with_given_agents_and_zero_field() {
        let mut store = infl_agent::AgentStore::new();
        store.spawn(Position::new(1.0, 1.0), Team::B);
        let e = EngineBuilder::new(config(6, 5)).agents(store).build().unwrap();
        assert_eq!(e.agents.len(), 1);
        assert_eq!(e.speed(), 2.0);
        assert_eq!(e.scheduler().num_threads(), 2);

        let field = e.read_field();
        assert_eq!(field.generation(), 0);
        assert_eq!(field.len(), 30);
        assert!(field.iter().all(|&v| v == 0.0));
    }
}

// ── Field ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod field {
    use super::*;

    #[test]
    fn single_unit_values() {
        let mut e = engine(4, 4);
        let g     = e.grid();
        let computed = e.compute_field(&[Unit::new(0, 0, 4.0)], g).unwrap();
        let field    = e.publish_field(computed).unwrap();

        assert_eq!(field.get(0, 0), Some(4.0));
        assert_eq!(field.get(1, 0), Some(2.0));
        assert_eq!(field.get(0, 1), Some(2.0));
        let diag = 4.0 / (1.0 + 2.0f32.sqrt());
        assert!((field.get(1, 1).unwrap() - diag).abs() < 1e-5);
    }

    #[test]
    fn background_job_matches_sync_compute() {
        let mut e = engine(24, 20);
        let g     = e.grid();
        let units = e.generate_units().to_vec();

        let sync = e.compute_field(&units, g).unwrap();
        let sync = e.publish_field(sync).unwrap().to_vec();

        let job   = e.spawn_field_job(units.clone(), g).unwrap();
        let field = e.publish_field(job.join().unwrap()).unwrap();
        assert_eq!(&field[..], &sync[..]);
        assert_eq!(e.read_field().generation(), field.generation());
    }

    #[test]
    fn out_of_order_publish_is_stale() {
        let mut e = engine(8, 8);
        let g     = e.grid();
        let first  = e.compute_field(&[Unit::new(1, 1, 1.0)], g).unwrap();
        let second = e.compute_field(&[Unit::new(2, 2, 1.0)], g).unwrap();
        e.publish_field(second).unwrap();
        assert!(matches!(
            e.publish_field(first),
            Err(EngineError::Field(FieldError::StaleField { .. }))
        ));
    }

    #[test]
    fn grid_change_reallocates() {
        let mut e  = engine(8, 8);
        let bigger = GridDims::new(12, 16).unwrap();
        let computed = e.compute_field(&[Unit::new(15, 11, 2.0)], bigger).unwrap();
        let field    = e.publish_field(computed).unwrap();
        assert_eq!(e.grid(), bigger);
        assert_eq!(field.len(), 12 * 16);
        assert_eq!(field.get(15, 11), Some(2.0));

        e.spawn_agents_random(200);
        assert_eq!(e.agents.count_outside(bigger), 0);
        assert!(e.agents.positions.iter().any(|p| p.x >= 8.0));
    }

    #[test]
    fn invalid_grid_is_rejected() {
        let mut e = engine(8, 8);
        let bad   = GridDims { rows: 8, cols: 0 };
        assert!(matches!(e.compute_field(&[], bad), Err(EngineError::Core(_))));
        assert_eq!(e.grid(), GridDims::new(8, 8).unwrap());
    }
}

// ── Units ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod units {
    use super::*;

    #[test]
    fn generation_is_seeded() {
        let mut a = engine(32, 32);
        let mut b = engine(32, 32);
        assert_eq!(a.generate_units(), b.generate_units());
        assert_eq!(a.generate_units(), b.generate_units());
    }

    #[test]
    fn spawning_does_not_shift_unit_stream() {
        let mut a = engine(32, 32);
        let mut b = engine(32, 32);
        a.spawn_agents_random(100);
        a.spawn_agents_circle(Position::new(10.0, 10.0), 3);
        assert_eq!(a.generate_units(), b.generate_units());
    }

    #[test]
    fn generated_units_fit_config() {
        let mut e = engine(40, 30);
        let cfg   = e.config().units.clone();
        let units = e.generate_units().to_vec();
        let a = units.iter().filter(|u| u.influence > 0.0).count() as u32;
        let b = units.iter().filter(|u| u.influence < 0.0).count() as u32;
        assert!((cfg.min_per_side..cfg.max_per_side).contains(&a));
        assert!((cfg.min_per_side..cfg.max_per_side).contains(&b));
        assert!(units.iter().all(|u| (0..29).contains(&u.x) && (0..39).contains(&u.y)));
        assert_eq!(e.units(), &units[..]);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod commands {
    use super::*;

    #[test]
    fn speed_commands() {
        let mut e = engine(4, 4);
        assert_eq!(e.adjust_speed(1.0), 3.0);
        assert_eq!(e.adjust_speed(-10.0), 0.0);
        e.set_speed(5.5).unwrap();
        assert_eq!(e.speed(), 5.5);
        assert!(matches!(
            e.set_speed(f32::NAN),
            Err(EngineError::Steer(SteerError::InvalidSpeed(_)))
        ));
        assert_eq!(e.speed(), 5.5);
    }

    #[test]
    fn spawn_and_clear() {
        let mut e = engine(20, 20);
        let id = e.spawn_agent(Position::new(3.0, 4.0), Team::A);
        assert_eq!(id.index(), 0);
        assert_eq!(e.spawn_agents_random(50), 50);
        assert_eq!(e.spawn_agents_circle(Position::new(10.0, 10.0), 2), 13);
        assert_eq!(e.agents.len(), 64);
        e.clear_agents();
        assert!(e.agents.is_empty());
    }
}

// ── Tick loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick {
    use super::*;

    #[test]
    fn phases_run_in_order() {
        let mut e = engine(10, 10);
        e.spawn_agents_random(5);
        let mut rec = Recorder::default();
        e.tick(&[Unit::new(5, 5, 1.0)], 0.1, &mut rec).unwrap();
        e.tick(&[Unit::new(5, 5, 1.0)], 0.1, &mut rec).unwrap();
        assert_eq!(rec.events, vec![
            "start T0", "published T0", "stepped T0 5", "end T0",
            "start T1", "published T1", "stepped T1 5", "end T1",
        ]);
        assert_eq!(rec.generations, vec![1, 2]);
        assert_eq!(e.clock.current_tick, Tick(2));
        assert!((e.clock.elapsed_secs - 0.2).abs() < 1e-6);
    }

    #[test]
    fn agent_climbs_toward_unit() {
        let mut e = engine(10, 10);
        e.spawn_agent(Position::new(3.0, 3.0), Team::A);
        e.spawn_agent(Position::new(7.0, 3.0), Team::B);
        let report = e.tick(&[Unit::new(5, 3, 4.0)], 0.1, &mut NoopObserver).unwrap();

        assert_eq!(report.units, 1);
        assert_eq!(report.steer.moved, 2);
        assert!(e.agents.positions[0].x > 3.0);
        assert!(e.agents.positions[1].x > 7.0);
    }

    #[test]
    fn empty_unit_set_leaves_agents_in_place() {
        let mut e = engine(16, 16);
        e.spawn_agents_random(40);
        let before = e.agents.positions.clone();
        let report = e.tick(&[], 0.5, &mut NoopObserver).unwrap();
        assert!(e.read_field().iter().all(|&v| v == 0.0));
        assert_eq!(report.steer.stayed, 40);
        assert_eq!(e.agents.positions, before);
    }

    #[test]
    fn zero_speed_freezes_agents() {
        let mut e = engine(16, 16);
        e.spawn_agents_random(40);
        e.adjust_speed(-100.0);
        let before = e.agents.positions.clone();
        e.generate_units();
        e.run_ticks(3, 0.5, &mut NoopObserver).unwrap();
        assert_eq!(e.agents.positions, before);
    }

    #[test]
    fn run_ticks_keeps_unit_set() {
        let mut e = engine(16, 16);
        let units = e.generate_units().to_vec();
        let mut rec = Recorder::default();
        e.run_ticks(4, 0.25, &mut rec).unwrap();
        assert_eq!(e.units(), &units[..]);
        assert_eq!(e.clock.current_tick, Tick(4));
        assert_eq!(rec.generations, vec![1, 2, 3, 4]);
    }

    #[test]
    fn no_agents_still_publishes() {
        let mut e  = engine(8, 8);
        let report = e.tick(&[Unit::new(1, 1, 1.0)], 0.1, &mut NoopObserver).unwrap();
        assert_eq!(report.steer.agents, 0);
        assert_eq!(report.field_generation, 1);
        assert_eq!(e.read_field().get(1, 1), Some(1.0));
    }

    #[test]
    fn invalid_dt_does_nothing() {
        let mut e = engine(8, 8);
        assert!(matches!(
            e.tick(&[], f32::INFINITY, &mut NoopObserver),
            Err(EngineError::Steer(SteerError::InvalidDt(_)))
        ));
        assert_eq!(e.clock.current_tick, Tick(0));
        assert_eq!(e.read_field().generation(), 0);
    }
}
