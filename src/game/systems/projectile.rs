//! Bolt tracking across snapshots
//!
//! Snapshots only show where bolts are, never where they are going. The
//! tracker correlates consecutive snapshots to infer each bolt's heading and
//! keeps a belief set that lives for the whole game.

use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::game::constants::projectile::CELLS_PER_TURN;
use crate::game::state::{Cell, Grid, Orientation};
use crate::game::systems::movement::simulate_moves;
use crate::util::torus::Position;

/// A bolt the agent believes is in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedBullet {
    pub position: Position,
    /// Unknown until a second snapshot explains the bolt's motion
    pub heading: Option<Orientation>,
}

impl TrackedBullet {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            heading: None,
        }
    }
}

/// What one tracker update did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerUpdate {
    /// Known-heading bolts found again where expected
    pub advanced: usize,
    /// Unknown-heading bolts whose heading was just inferred
    pub inferred: usize,
    /// Bolts seen for the first time
    pub discovered: usize,
    /// Bolts whose motion could not be explained
    pub dropped: usize,
}

/// Belief set of in-flight bolts
#[derive(Debug, Clone)]
pub struct BulletTracker {
    bullets: Vec<TrackedBullet>,
    cells_per_turn: usize,
}

impl BulletTracker {
    pub fn new() -> Self {
        Self::with_speed(CELLS_PER_TURN)
    }

    /// Tracker for bolts moving `cells_per_turn` cells between snapshots
    pub fn with_speed(cells_per_turn: usize) -> Self {
        Self {
            bullets: Vec::new(),
            cells_per_turn,
        }
    }

    pub fn bullets(&self) -> &[TrackedBullet] {
        &self.bullets
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }

    pub fn cells_per_turn(&self) -> usize {
        self.cells_per_turn
    }

    /// Forget every tracked bolt (game over)
    pub fn reset(&mut self) {
        self.bullets.clear();
    }

    /// Fold a new snapshot into the belief set
    ///
    /// Known headings are advanced first, so they claim their cells before
    /// any heading inference runs. A cell is claimed by at most one bolt.
    pub fn update(&mut self, grid: &Grid) -> TrackerUpdate {
        let steps = self.cells_per_turn;
        let mut claimed: HashSet<Position> = HashSet::with_capacity(self.bullets.len());
        let mut report = TrackerUpdate::default();

        // Advance bolts with a known heading
        self.bullets.retain_mut(|bullet| {
            let Some(heading) = bullet.heading else {
                return true;
            };

            let next = simulate_moves(grid, bullet.position, heading, steps);
            if grid.cell_at(next) == Cell::Bolt && claimed.insert(next) {
                trace!(from = %bullet.position, to = %next, %heading, "bolt advanced");
                bullet.position = next;
                report.advanced += 1;
                true
            } else {
                trace!(at = %bullet.position, %heading, "bolt lost");
                report.dropped += 1;
                false
            }
        });

        // Infer a heading for bolts seen only once so far
        self.bullets.retain_mut(|bullet| {
            if bullet.heading.is_some() {
                return true;
            }

            for heading in Orientation::ALL {
                let next = simulate_moves(grid, bullet.position, heading, steps);
                if grid.cell_at(next) == Cell::Bolt && !claimed.contains(&next) {
                    claimed.insert(next);
                    trace!(from = %bullet.position, to = %next, %heading, "bolt heading inferred");
                    bullet.position = next;
                    bullet.heading = Some(heading);
                    report.inferred += 1;
                    return true;
                }
            }

            trace!(at = %bullet.position, "bolt heading unexplained");
            report.dropped += 1;
            false
        });

        // Anything left unclaimed is a new bolt
        for position in grid.positions_of(Cell::Bolt) {
            if !claimed.contains(&position) {
                self.bullets.push(TrackedBullet::new(position));
                report.discovered += 1;
            }
        }

        if report != TrackerUpdate::default() {
            debug!(
                advanced = report.advanced,
                inferred = report.inferred,
                discovered = report.discovered,
                dropped = report.dropped,
                tracked = self.bullets.len(),
                "bolt tracker updated"
            );
        }

        report
    }
}

impl Default for BulletTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> Grid {
        Grid::decode(text).unwrap()
    }

    #[test]
    fn test_new_bolt_has_unknown_heading() {
        let mut tracker = BulletTracker::new();
        let report = tracker.update(&grid("_____\n_____\n__L__\n_____\n_____"));

        assert_eq!(report.discovered, 1);
        assert_eq!(
            tracker.bullets(),
            &[TrackedBullet {
                position: Position::new(2, 2),
                heading: None
            }]
        );
    }

    #[test]
    fn test_heading_inferred_from_second_snapshot() {
        let mut tracker = BulletTracker::new();
        tracker.update(&grid("_____\n_____\n_____\n_____\n__L__\n_____\n_____"));

        // Two cells further north
        let report = tracker.update(&grid("_____\n_____\n__L__\n_____\n_____\n_____\n_____"));

        assert_eq!(report.inferred, 1);
        assert_eq!(report.discovered, 0);
        assert_eq!(tracker.len(), 1);
        let bullet = tracker.bullets()[0];
        assert_eq!(bullet.heading, Some(Orientation::North));
        assert_eq!(bullet.position, Position::new(2, 2));
    }

    #[test]
    fn test_known_heading_advances_two_cells() {
        let mut tracker = BulletTracker::new();
        tracker.update(&grid("L______"));
        tracker.update(&grid("__L____"));
        assert_eq!(tracker.bullets()[0].heading, Some(Orientation::East));

        let report = tracker.update(&grid("____L__"));
        assert_eq!(report.advanced, 1);
        assert_eq!(
            tracker.bullets(),
            &[TrackedBullet {
                position: Position::new(4, 0),
                heading: Some(Orientation::East)
            }]
        );
    }

    #[test]
    fn test_known_heading_wraps_across_edge() {
        let mut tracker = BulletTracker::new();
        tracker.update(&grid("__L__\n_____\n_____\n_____\n_____"));
        tracker.update(&grid("_____\n_____\n_____\n__L__\n_____"));
        assert_eq!(tracker.bullets()[0].heading, Some(Orientation::North));

        // (2,3) -> (2,2) -> (2,1)
        tracker.update(&grid("_____\n__L__\n_____\n_____\n_____"));
        assert_eq!(tracker.bullets()[0].position, Position::new(2, 1));
    }

    #[test]
    fn test_bolt_gone_is_dropped() {
        let mut tracker = BulletTracker::new();
        tracker.update(&grid("L______"));
        tracker.update(&grid("__L____"));

        let report = tracker.update(&grid("_______"));
        assert_eq!(report.dropped, 1);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_unexplained_bolt_dropped_and_rediscovered() {
        let mut tracker = BulletTracker::new();
        tracker.update(&grid("L______\n_______"));

        // Bolt reappears somewhere no two-cell move explains
        let report = tracker.update(&grid("_______\n_____L_"));
        assert_eq!(report.dropped, 1);
        assert_eq!(report.discovered, 1);
        assert_eq!(
            tracker.bullets(),
            &[TrackedBullet {
                position: Position::new(5, 1),
                heading: None
            }]
        );
    }

    #[test]
    fn test_cell_claimed_once() {
        let mut tracker = BulletTracker::new();
        // Two bolts four apart on a nine-wide row
        tracker.update(&grid("L___L____"));
        assert_eq!(tracker.len(), 2);

        // A single bolt midway can only be explained for one of them
        let report = tracker.update(&grid("__L______"));
        assert_eq!(report.inferred, 1);
        assert_eq!(report.dropped, 1);
        assert_eq!(report.discovered, 0);
        assert_eq!(tracker.len(), 1);
        assert_eq!(tracker.bullets()[0].heading, Some(Orientation::East));
    }

    #[test]
    fn test_known_headings_claim_before_inference() {
        let mut tracker = BulletTracker::new();
        tracker.update(&grid("L________"));
        tracker.update(&grid("__L______"));
        assert_eq!(tracker.bullets()[0].heading, Some(Orientation::East));

        // Known bolt reaches (4,0) while a second bolt appears at (6,0)
        tracker.update(&grid("____L_L__"));
        assert_eq!(tracker.len(), 2);

        let report = tracker.update(&grid("______L__"));
        // Known bolt claims (6,0); the unknown one finds nothing unclaimed
        assert_eq!(report.advanced, 1);
        assert_eq!(report.dropped, 1);
        assert_eq!(tracker.bullets()[0].position, Position::new(6, 0));
    }

    #[test]
    fn test_wall_stops_bolt() {
        let mut tracker = BulletTracker::new();
        tracker.update(&grid("L____W_"));
        tracker.update(&grid("__L__W_"));
        tracker.update(&grid("____LW_"));
        assert_eq!(tracker.bullets()[0].position, Position::new(4, 0));

        // Wall absorbs further motion; an empty cell means the bolt is gone
        let report = tracker.update(&grid("_____W_"));
        assert_eq!(report.dropped, 1);
    }

    #[test]
    fn test_reset_clears_beliefs() {
        let mut tracker = BulletTracker::new();
        tracker.update(&grid("L_L_L"));
        assert_eq!(tracker.len(), 3);
        tracker.reset();
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_custom_speed() {
        let mut tracker = BulletTracker::with_speed(1);
        tracker.update(&grid("L____"));
        tracker.update(&grid("_L___"));
        assert_eq!(tracker.bullets()[0].heading, Some(Orientation::East));
        assert_eq!(tracker.bullets()[0].position, Position::new(1, 0));
    }
}
