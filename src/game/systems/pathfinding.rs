//! Action planner
//!
//! Best-first search over (position, orientation) states toward a target
//! cell. Only the first action of the winning plan is ever used: the agent
//! re-plans from a fresh snapshot every turn.

use bitvec::prelude::*;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::game::constants::limits::ORIENTATIONS;
use crate::game::state::{Action, Grid, Orientation};
use crate::game::systems::movement;
use crate::util::torus::Position;

/// Actions that can change position or orientation
///
/// Fire and Noop never get a player closer to a cell.
const EXPANSION: [Action; 3] = [Action::Move, Action::TurnLeft, Action::TurnRight];

/// Result of one search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Full action sequence to the target, if one was found
    pub plan: Option<Vec<Action>>,
    /// States popped and expanded
    pub expanded: usize,
}

impl SearchOutcome {
    /// The action to take this turn
    ///
    /// Noop when the target is unreachable or already reached.
    pub fn first_action(&self) -> Action {
        self.plan
            .as_ref()
            .and_then(|plan| plan.first().copied())
            .unwrap_or(Action::Noop)
    }
}

#[derive(Debug, Clone)]
struct SearchNode {
    /// Actions so far plus range to target
    score: u32,
    /// Insertion counter; equal scores pop first-in first-out
    order: u64,
    position: Position,
    orientation: Orientation,
    history: Vec<Action>,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.order == other.order
    }
}

impl Eq for SearchNode {}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on score, then on insertion order
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[inline]
fn state_index(grid: &Grid, position: Position, orientation: Orientation) -> usize {
    grid.index_of(position) * ORIENTATIONS + orientation.index()
}

/// Search for an action sequence taking a player at `start` facing
/// `orientation` onto `target`
///
/// States are scored by actions taken plus wrapped Manhattan range to the
/// target. A (position, orientation) pair is expanded at most once, so the
/// search visits at most `width * height * 4` states and always terminates.
pub fn search(
    grid: &Grid,
    start: Position,
    orientation: Orientation,
    target: Position,
) -> SearchOutcome {
    let start = grid.wrap(start);
    let target = grid.wrap(target);

    let mut seen = bitvec![0; grid.len() * ORIENTATIONS];
    let mut queue = BinaryHeap::new();
    let mut order = 0u64;
    let mut expanded = 0usize;

    queue.push(SearchNode {
        score: grid.range(start, target),
        order,
        position: start,
        orientation,
        history: Vec::new(),
    });

    while let Some(node) = queue.pop() {
        let index = state_index(grid, node.position, node.orientation);
        if seen[index] {
            continue;
        }
        seen.set(index, true);
        expanded += 1;

        if node.position == target {
            return SearchOutcome {
                plan: Some(node.history),
                expanded,
            };
        }

        let successors: SmallVec<[(Action, Position, Orientation); 3]> = EXPANSION
            .iter()
            .map(|&action| {
                let (position, orientation) =
                    movement::apply(grid, node.position, node.orientation, action);
                (action, position, orientation)
            })
            .filter(|&(_, position, orientation)| !seen[state_index(grid, position, orientation)])
            .collect();

        for (action, position, orientation) in successors {
            let mut history = Vec::with_capacity(node.history.len() + 1);
            history.extend_from_slice(&node.history);
            history.push(action);

            order += 1;
            queue.push(SearchNode {
                score: history.len() as u32 + grid.range(position, target),
                order,
                position,
                orientation,
                history,
            });
        }
    }

    SearchOutcome {
        plan: None,
        expanded,
    }
}

/// First action toward `target`, or Noop if it cannot be reached
pub fn next_action(
    grid: &Grid,
    start: Position,
    orientation: Orientation,
    target: Position,
) -> Action {
    search(grid, start, orientation, target).first_action()
}
