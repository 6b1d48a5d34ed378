//! Unit tests for infl-core primitives.

#[cfg(test)]
mod grid {
    use crate::{GridDims, InflError, NEIGHBOR_OFFSETS};

    #[test]
    fn index_is_column_major() {
        let g = GridDims::new(4, 3).unwrap();
        assert_eq!(g.index(0, 0), 0);
        assert_eq!(g.index(0, 3), 3);
        assert_eq!(g.index(1, 0), 4);
        assert_eq!(g.index(2, 3), 11);
        assert_eq!(g.cell_count(), 12);
    }

    #[test]
    fn coords_invert_index() {
        let g = GridDims::new(5, 7).unwrap();
        for x in 0..7 {
            for y in 0..5 {
                assert_eq!(g.coords(g.index(x, y)), (x, y));
            }
        }
    }

    #[test]
    fn contains_and_checked_index() {
        let g = GridDims::new(2, 3).unwrap();
        assert!(g.contains(0, 0));
        assert!(g.contains(2, 1));
        assert!(!g.contains(3, 0));
        assert!(!g.contains(0, 2));
        assert!(!g.contains(-1, 0));
        assert_eq!(g.checked_index(2, 1), Some(5));
        assert_eq!(g.checked_index(0, -1), None);
    }

    #[test]
    fn zero_dimension_rejected() {
        assert!(matches!(GridDims::new(0, 10), Err(InflError::InvalidGrid { .. })));
        assert!(matches!(GridDims::new(10, 0), Err(InflError::InvalidGrid { .. })));
    }

    #[test]
    fn default_is_320_square() {
        assert_eq!(GridDims::default(), GridDims { rows: 320, cols: 320 });
        assert_eq!(GridDims::default().to_string(), "320 x 320");
    }

    #[test]
    fn offsets_fixed_order() {
        let pairs: Vec<(i32, i32)> = NEIGHBOR_OFFSETS.iter().map(|o| (o.dx, o.dy)).collect();
        assert_eq!(
            pairs,
            vec![(0, 1), (1, 1), (1, 0), (1, -1), (0, -1), (-1, -1), (-1, 0), (-1, 1)]
        );
    }
}

#[cfg(test)]
mod unit {
    use crate::{Team, Unit};

    #[test]
    fn team_from_sign() {
        assert_eq!(Unit::new(0, 0, 2.5).team(), Team::A);
        assert_eq!(Unit::new(0, 0, -0.1).team(), Team::B);
        assert_eq!(Unit::new(0, 0, 0.0).team(), Team::A);
    }

    #[test]
    fn prefers_is_strict() {
        assert!(Team::A.prefers(2.0, 1.0));
        assert!(!Team::A.prefers(1.0, 1.0));
        assert!(!Team::A.prefers(0.5, 1.0));
        assert!(Team::B.prefers(-2.0, -1.0));
        assert!(!Team::B.prefers(-1.0, -1.0));
        assert!(!Team::B.prefers(3.0, -1.0));
    }

    #[test]
    fn display() {
        assert_eq!(Team::A.to_string(), "A");
        assert_eq!(Team::B.to_string(), "B");
    }
}

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(AgentId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{Tick, TickClock};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_accumulates_dt() {
        let mut clock = TickClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.elapsed_secs - 0.75).abs() < 1e-9);
        assert_eq!(clock.to_string(), "T2 (0.750s)");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = SimRng::new(1);
        let mut c0 = root.child(0);
        let mut c1 = root.child(1);
        let a: u64 = c0.random();
        let b: u64 = c1.random();
        assert_ne!(a, b);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
        assert!(rng.gen_bool(7.0)); // clamped
    }
}

#[cfg(test)]
mod generator {
    use crate::{GridDims, SimRng, Team, UnitGenConfig, generate_units, generate_units_into};

    #[test]
    fn counts_positions_and_magnitudes_in_range() {
        let cfg = UnitGenConfig::default();
        let grid = GridDims::new(40, 30).unwrap();
        let mut rng = SimRng::new(UnitGenConfig::DETERMINISTIC_SEED);

        for _ in 0..50 {
            let units = generate_units(&cfg, grid, &mut rng);
            let a = units.iter().filter(|u| u.team() == Team::A).count() as u32;
            let b = units.iter().filter(|u| u.team() == Team::B).count() as u32;
            assert!((10..20).contains(&a), "side A count {a}");
            assert!((10..20).contains(&b), "side B count {b}");

            for u in &units {
                assert!((0..29).contains(&u.x), "x {}", u.x);
                assert!((0..39).contains(&u.y), "y {}", u.y);
                let m = u.influence.abs();
                assert!((1.0..5.0).contains(&m), "magnitude {m}");
            }
        }
    }

    #[test]
    fn side_a_emitted_before_side_b() {
        let mut rng = SimRng::new(3);
        let units = generate_units(&UnitGenConfig::default(), GridDims::DEFAULT, &mut rng);
        let first_b = units.iter().position(|u| u.team() == Team::B).unwrap();
        assert!(units[first_b..].iter().all(|u| u.team() == Team::B));
    }

    #[test]
    fn same_seed_same_units() {
        let cfg = UnitGenConfig::default();
        let a = generate_units(&cfg, GridDims::DEFAULT, &mut SimRng::new(9));
        let b = generate_units(&cfg, GridDims::DEFAULT, &mut SimRng::new(9));
        assert_eq!(a, b);
    }

    #[test]
    fn into_reuses_buffer() {
        let cfg = UnitGenConfig::default();
        let mut rng = SimRng::new(5);
        let mut out = Vec::with_capacity(64);
        generate_units_into(&mut out, &cfg, GridDims::DEFAULT, &mut rng);
        let ptr = out.as_ptr();
        generate_units_into(&mut out, &cfg, GridDims::DEFAULT, &mut rng);
        assert_eq!(out.as_ptr(), ptr);
        assert!(out.len() >= 20);
    }

    #[test]
    fn one_cell_grid_places_everything_at_origin() {
        let mut rng = SimRng::new(0);
        let grid = GridDims::new(1, 1).unwrap();
        let units = generate_units(&UnitGenConfig::default(), grid, &mut rng);
        assert!(units.iter().all(|u| u.x == 0 && u.y == 0));
    }

    #[test]
    fn empty_ranges_rejected() {
        let cfg = UnitGenConfig { min_per_side: 5, max_per_side: 5, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = UnitGenConfig { min_influence: 3.0, max_influence: 1.0, ..Default::default() };
        assert!(cfg.validate().is_err());
        assert!(UnitGenConfig::default().validate().is_ok());
    }
}

#[cfg(test)]
mod config {
    use crate::{EngineConfig, GridDims};

    #[test]
    fn default_validates() {
        let cfg = EngineConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.effective_field_chunk_len(), 320);
    }

    #[test]
    fn rejects_zero_threads_and_chunks() {
        let cfg = EngineConfig { num_threads: Some(0), ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = EngineConfig { agent_chunk_len: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = EngineConfig { field_chunk_len: Some(0), ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_bad_grid_and_speed() {
        let cfg = EngineConfig { grid: GridDims { rows: 0, cols: 4 }, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = EngineConfig { base_speed: f32::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn negative_speed_is_valid() {
        // A non-positive speed freezes agents; it is not a configuration error.
        let cfg = EngineConfig { base_speed: -1.0, ..Default::default() };
        cfg.validate().unwrap();
    }
}
