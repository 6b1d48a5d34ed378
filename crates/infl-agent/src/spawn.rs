//! Bulk spawners.
//!
//! Both spawners pick each agent's team with a fair coin from the caller's
//! RNG stream and add the whole batch with one revision bump.

use infl_core::{GridDims, SimRng, Team};

use crate::{AgentStore, Position};

#[inline]
fn coin_team(rng: &mut SimRng) -> Team {
    if rng.gen_bool(0.5) { Team::A } else { Team::B }
}

/// Spawn `count` agents at integer positions uniform over
/// `[0, cols) × [0, rows)`.  Returns the number spawned.
pub fn spawn_random(store: &mut AgentStore, count: usize, grid: GridDims, rng: &mut SimRng) -> usize {
    let agents = (0..count).map(|_| {
        let team = coin_team(rng);
        let x    = rng.gen_range(0..grid.cols) as f32;
        let z    = rng.gen_range(0..grid.rows) as f32;
        (Position::new(x, z), team)
    });
    store.spawn_many(agents)
}

/// Integer offsets `(dx, dy)` with `dx² + dy² <= radius²`, rows of `dy`
/// from `-radius` up, `dx` ascending within a row.
pub fn circle_offsets(radius: u32) -> impl Iterator<Item = (i32, i32)> {
    let r  = radius as i32;
    let r2 = i64::from(r) * i64::from(r);
    (-r..=r).flat_map(move |dy| {
        (-r..=r).filter_map(move |dx| {
            let d2 = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
            (d2 <= r2).then_some((dx, dy))
        })
    })
}

/// Spawn one agent per [`circle_offsets`] entry around `center`.
///
/// Offsets whose nearest cell lies outside `grid` are skipped, so every
/// spawned agent starts on the grid.  Returns the number spawned.
pub fn spawn_circle(
    store:  &mut AgentStore,
    center: Position,
    radius: u32,
    grid:   GridDims,
    rng:    &mut SimRng,
) -> usize {
    let batch: Vec<_> = circle_offsets(radius)
        .map(|(dx, dy)| Position::new(center.x + dx as f32, center.z + dy as f32))
        .filter(|p| p.in_grid(grid))
        .map(|p| (p, coin_team(rng)))
        .collect();
    store.spawn_many(batch)
}
