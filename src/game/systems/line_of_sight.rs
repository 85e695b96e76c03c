//! Line-of-sight checks for firing
//!
//! A shot is traced cell by cell with the same movement rules as a player,
//! so walls absorb it exactly like they absorb a move.

use crate::game::state::{Cell, Grid, Orientation};
use crate::game::systems::movement::simulate_move;
use crate::util::torus::Position;

/// How a traced shot resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// An enemy sits on the line of fire
    Hit(Position),
    /// The shot meets our own marker, a bolt, or a wall
    Blocked(Position),
    /// Nothing was met within the step bound
    OutOfRange,
}

impl ShotOutcome {
    #[inline]
    pub fn is_clear(self) -> bool {
        matches!(self, ShotOutcome::Hit(_))
    }
}

/// Upper bound on cells a shot is traced over
///
/// A straight line on the torus revisits its start after `width` or
/// `height` cells, so `width + height` is always enough.
#[inline]
pub fn max_trace_steps(grid: &Grid) -> usize {
    (grid.width() + grid.height()) as usize
}

/// Trace a shot from `from` facing `orientation`, examining at most `max_steps` cells
pub fn trace_shot(
    grid: &Grid,
    from: Position,
    orientation: Orientation,
    max_steps: usize,
) -> ShotOutcome {
    let max_steps = max_steps.min(max_trace_steps(grid));
    let mut bolt = simulate_move(grid, from, orientation);

    for _ in 0..max_steps {
        match grid.cell_at(bolt) {
            Cell::Enemy => return ShotOutcome::Hit(bolt),
            Cell::Myself | Cell::Bolt => return ShotOutcome::Blocked(bolt),
            _ => {}
        }

        let next = simulate_move(grid, bolt, orientation);
        if next == bolt {
            return ShotOutcome::Blocked(bolt);
        }
        bolt = next;
    }

    ShotOutcome::OutOfRange
}

/// Whether firing now would strike an enemy
pub fn has_clear_shot(grid: &Grid, from: Position, orientation: Orientation) -> bool {
    trace_shot(grid, from, orientation, max_trace_steps(grid)).is_clear()
}
