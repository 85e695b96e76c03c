//! Turn decision engine
//!
//! Fixed priority per turn: shoot when a shot lands and energy allows,
//! otherwise head for the nearest battery, otherwise chase the nearest enemy.
//! Exactly one policy applies per turn.

use tracing::debug;

use crate::config::GameConfig;
use crate::game::state::{Action, Cell, PlayerTurnState};
use crate::game::systems::line_of_sight::{max_trace_steps, trace_shot, ShotOutcome};
use crate::game::systems::pathfinding;
use crate::game::systems::projectile::{BulletTracker, TrackerUpdate};
use crate::util::torus::Position;

/// Why an action was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Firing at an enemy on the line of fire
    Attack { target: Position },
    /// Heading for a battery
    Recharge { battery: Position },
    /// Heading for an enemy
    Pursue { enemy: Position },
    /// Nothing to do (not on the grid, or nothing worth reaching)
    Idle,
}

/// Outcome of one turn's decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    pub intent: Intent,
    /// Planner states expanded this turn
    pub expanded: usize,
}

impl Decision {
    fn idle() -> Self {
        Self {
            action: Action::Noop,
            intent: Intent::Idle,
            expanded: 0,
        }
    }
}

/// Choose this turn's action from the current snapshot
pub fn decide(turn: &PlayerTurnState, config: &GameConfig) -> Decision {
    let grid = &turn.grid;
    let Some(me) = turn.me() else {
        return Decision::idle();
    };

    if config.can_fire(turn.energy) {
        let range = config.shot_range().unwrap_or_else(|| max_trace_steps(grid));
        if let ShotOutcome::Hit(target) = trace_shot(grid, me, turn.orientation, range) {
            return Decision {
                action: Action::Fire,
                intent: Intent::Attack { target },
                expanded: 0,
            };
        }
    }

    let (target, intent) = if let Some(battery) = grid.find_closest(Cell::Battery, me) {
        (battery, Intent::Recharge { battery })
    } else if let Some(enemy) = grid.find_closest(Cell::Enemy, me) {
        (enemy, Intent::Pursue { enemy })
    } else {
        return Decision::idle();
    };

    let outcome = pathfinding::search(grid, me, turn.orientation, target);
    let action = outcome.first_action();
    Decision {
        action,
        intent: if outcome.plan.is_some() { intent } else { Intent::Idle },
        expanded: outcome.expanded,
    }
}

/// The agent's belief state for one game
///
/// Created when the game starts, fed every snapshot in order, and reset when
/// the game ends.
#[derive(Debug, Clone, Default)]
pub struct Agent {
    config: GameConfig,
    tracker: BulletTracker,
    turn: Option<PlayerTurnState>,
}

impl Agent {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            tracker: BulletTracker::new(),
            turn: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn tracker(&self) -> &BulletTracker {
        &self.tracker
    }

    /// Latest snapshot, if the game is running
    pub fn turn(&self) -> Option<&PlayerTurnState> {
        self.turn.as_ref()
    }

    /// Replace the current snapshot and update bolt beliefs
    pub fn observe(&mut self, turn: PlayerTurnState) -> TrackerUpdate {
        let update = self.tracker.update(&turn.grid);
        self.turn = Some(turn);
        update
    }

    /// Decide on the current snapshot; Noop before the first one
    pub fn decide(&self) -> Decision {
        let Some(turn) = self.turn.as_ref() else {
            return Decision::idle();
        };
        let decision = decide(turn, &self.config);
        debug!(
            action = %decision.action,
            intent = ?decision.intent,
            expanded = decision.expanded,
            health = turn.health,
            energy = turn.energy,
            "turn decided"
        );
        decision
    }

    /// Drop all per-game beliefs
    pub fn end_game(&mut self) {
        self.tracker.reset();
        self.turn = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::state::{Grid, Orientation};

    fn turn(text: &str, orientation: Orientation, energy: i64) -> PlayerTurnState {
        PlayerTurnState {
            health: 100,
            energy,
            orientation,
            grid: Grid::decode(text).unwrap(),
        }
    }

    #[test]
    fn test_fires_on_clear_shot() {
        let t = turn("X__O_", Orientation::East, 5);
        let decision = decide(&t, &GameConfig::default());
        assert_eq!(decision.action, Action::Fire);
        assert_eq!(
            decision.intent,
            Intent::Attack {
                target: Position::new(3, 0)
            }
        );
    }

    #[test]
    fn test_fire_takes_priority_over_battery() {
        let t = turn("X__O_\n_B___\n_____", Orientation::East, 5);
        let decision = decide(&t, &GameConfig::default());
        assert_eq!(decision.action, Action::Fire);
    }

    #[test]
    fn test_no_energy_goes_for_battery() {
        let t = turn("X__O_\n_B___\n_____", Orientation::East, 0);
        let decision = decide(&t, &GameConfig::default());
        assert_ne!(decision.action, Action::Fire);
        assert_eq!(
            decision.intent,
            Intent::Recharge {
                battery: Position::new(1, 1)
            }
        );
    }

    #[test]
    fn test_laser_cost_gates_firing() {
        let config = GameConfig {
            laser_energy: 4,
            ..Default::default()
        };
        let t = turn("X__O_", Orientation::East, 3);
        let decision = decide(&t, &config);
        assert_eq!(decision.action, Action::Move);
        assert_eq!(
            decision.intent,
            Intent::Pursue {
                enemy: Position::new(3, 0)
            }
        );
    }

    #[test]
    fn test_laser_distance_limits_shot() {
        let config = GameConfig {
            laser_distance: 2,
            ..Default::default()
        };
        let t = turn("X___O___", Orientation::East, 5);
        assert_ne!(decide(&t, &config).action, Action::Fire);

        let close = turn("X_O_____", Orientation::East, 5);
        assert_eq!(decide(&close, &config).action, Action::Fire);
    }

    #[test]
    fn test_blocked_shot_seeks_battery() {
        let t = turn("X_WO_\n_____\nB____", Orientation::East, 5);
        let decision = decide(&t, &GameConfig::default());
        // Battery is one step north across the edge
        assert_eq!(decision.action, Action::TurnLeft);
        assert_eq!(
            decision.intent,
            Intent::Recharge {
                battery: Position::new(0, 2)
            }
        );
    }

    #[test]
    fn test_pursues_enemy_without_battery() {
        let t = turn("X____\n_____\n____O", Orientation::South, 0);
        let decision = decide(&t, &GameConfig::default());
        assert!(matches!(decision.intent, Intent::Pursue { .. }));
        assert!(decision.expanded > 0);
    }

    #[test]
    fn test_nothing_visible_is_noop() {
        let t = turn("X____\n_____", Orientation::East, 10);
        assert_eq!(decide(&t, &GameConfig::default()), Decision::idle());
    }

    #[test]
    fn test_not_on_grid_is_noop() {
        let t = turn("__O__\nB____", Orientation::East, 10);
        assert_eq!(decide(&t, &GameConfig::default()).action, Action::Noop);
    }

    #[test]
    fn test_unreachable_battery_is_noop() {
        let t = turn("X_____\n___W__\n__WBW_\n___W__", Orientation::East, 0);
        let decision = decide(&t, &GameConfig::default());
        assert_eq!(decision.action, Action::Noop);
        assert_eq!(decision.intent, Intent::Idle);
    }

    #[test]
    fn test_agent_tracks_bolts_across_turns() {
        let mut agent = Agent::new(GameConfig::default());
        assert_eq!(agent.decide().action, Action::Noop);

        let update = agent.observe(turn("X___L\n_____\n_____", Orientation::East, 0));
        assert_eq!(update.discovered, 1);
        assert_eq!(agent.tracker().len(), 1);

        agent.observe(turn("X_L__\n_____\n_____", Orientation::East, 0));
        assert_eq!(
            agent.tracker().bullets()[0].heading,
            Some(Orientation::West)
        );

        agent.end_game();
        assert!(agent.tracker().is_empty());
        assert!(agent.turn().is_none());
    }
}
