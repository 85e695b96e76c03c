//! Move simulator
//!
//! Predicts the effect of a single action on a position/orientation pair.
//! Every function here is total: a blocked move is absorbed, not an error.

use crate::game::state::{Action, Cell, Grid, Orientation};
use crate::util::torus::Position;

/// One cell forward in `orientation`, or `position` itself if that cell is a wall
#[inline]
pub fn simulate_move(grid: &Grid, position: Position, orientation: Orientation) -> Position {
    let position = grid.wrap(position);
    let next = grid.wrap(position + orientation.delta());
    if grid.cell_at(next) == Cell::Wall {
        position
    } else {
        next
    }
}

/// Repeat [`simulate_move`] `steps` times
#[inline]
pub fn simulate_moves(
    grid: &Grid,
    position: Position,
    orientation: Orientation,
    steps: usize,
) -> Position {
    (0..steps).fold(position, |p, _| simulate_move(grid, p, orientation))
}

#[inline]
pub fn simulate_turn_left(orientation: Orientation) -> Orientation {
    orientation.left()
}

#[inline]
pub fn simulate_turn_right(orientation: Orientation) -> Orientation {
    orientation.right()
}

/// Resulting position and orientation after `action`
///
/// Fire and Noop leave both unchanged.
pub fn apply(
    grid: &Grid,
    position: Position,
    orientation: Orientation,
    action: Action,
) -> (Position, Orientation) {
    match action {
        Action::Move => (simulate_move(grid, position, orientation), orientation),
        Action::TurnLeft => (position, simulate_turn_left(orientation)),
        Action::TurnRight => (position, simulate_turn_right(orientation)),
        Action::Fire | Action::Noop => (position, orientation),
    }
}
