//! The per-agent neighbour scan.

use infl_agent::Position;
use infl_core::{GridDims, NEIGHBOR_OFFSETS, Team};

use crate::Heading;

/// Extra cells per second for each unit of `|best value|`.
pub const INFLUENCE_SPEED_GAIN: f32 = 5.0;

/// `base_speed + |best_value| * 5`, or zero when `base_speed <= 0`.
#[inline]
pub fn effective_speed(base_speed: f32, best_value: f32) -> f32 {
    if base_speed > 0.0 {
        base_speed + best_value.abs() * INFLUENCE_SPEED_GAIN
    } else {
        0.0
    }
}

/// Choose a heading for one agent.
///
/// `field` is a column-major `grid` buffer.  Never reads outside it: an agent
/// whose rounded cell is off the grid gets [`Heading::STRANDED`].
pub fn steer_agent(
    field:      &[f32],
    grid:       GridDims,
    position:   Position,
    team:       Team,
    base_speed: f32,
) -> Heading {
    debug_assert_eq!(field.len(), grid.cell_count());

    let (ix, iy) = position.cell();
    let Some(mut best_index) = grid.checked_index(ix, iy) else {
        return Heading::STRANDED;
    };
    let mut best_value = field[best_index];

    for offset in NEIGHBOR_OFFSETS {
        let Some(index) = grid.checked_index(ix + offset.dx, iy + offset.dy) else {
            continue;
        };
        let value = field[index];
        if team.prefers(value, best_value) {
            best_value = value;
            best_index = index;
        }
    }

    let (bx, by) = grid.coords(best_index);
    Heading {
        dx:       bx as i32 - ix,
        dy:       by as i32 - iy,
        speed:    effective_speed(base_speed, best_value),
        stranded: false,
    }
}
