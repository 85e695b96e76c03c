//! Wire messages exchanged with the game server
//!
//! All bodies are JSON. A turn request carries no body: the action is the
//! last path segment and identity travels in headers.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::game::constants::status;
use crate::game::state::{Action, Grid, MalformedGrid, Orientation, PlayerTurnState};

/// Header carrying the player's display name on join
pub const PLAYER_MONIKER_HEADER: &str = "X-Sm-Playermoniker";
/// Header carrying the server-assigned player id, echoed on every request
pub const PLAYER_ID_HEADER: &str = "X-Sm-Playerid";

/// Path segment of the join request
pub const JOIN_SEGMENT: &str = "join";

/// Path of a game request relative to the server root
pub fn game_path(game: &str, segment: &str) -> String {
    format!("/game/{}/{}", game, segment)
}

/// Path of the request submitting `action`
pub fn action_path(game: &str, action: Action) -> String {
    game_path(game, action.as_str())
}

/// Per-turn state as sent by the server
///
/// Only `status` is guaranteed; the rest is present while the game runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnSnapshot {
    pub status: String,
    #[serde(default)]
    pub health: Option<i64>,
    #[serde(default)]
    pub energy: Option<i64>,
    #[serde(default)]
    pub orientation: Option<Orientation>,
    #[serde(default)]
    pub grid: Option<String>,
}

/// A running snapshot that cannot be turned into a usable turn state
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("running snapshot is missing `{0}`")]
    MissingField(&'static str),
    #[error(transparent)]
    Grid(#[from] MalformedGrid),
}

impl TurnSnapshot {
    /// A snapshot for a game in progress
    pub fn running(health: i64, energy: i64, orientation: Orientation, grid: &str) -> Self {
        Self {
            status: status::RUNNING.to_string(),
            health: Some(health),
            energy: Some(energy),
            orientation: Some(orientation),
            grid: Some(grid.to_string()),
        }
    }

    /// A snapshot that ends the game with `status`
    pub fn finished(status: &str) -> Self {
        Self {
            status: status.to_string(),
            health: None,
            energy: None,
            orientation: None,
            grid: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == status::RUNNING
    }

    /// Decode into the agent's view of this turn
    pub fn into_turn_state(self) -> Result<PlayerTurnState, SnapshotError> {
        let health = self.health.ok_or(SnapshotError::MissingField("health"))?;
        let energy = self.energy.ok_or(SnapshotError::MissingField("energy"))?;
        let orientation = self
            .orientation
            .ok_or(SnapshotError::MissingField("orientation"))?;
        let grid = self.grid.ok_or(SnapshotError::MissingField("grid"))?;

        Ok(PlayerTurnState {
            health,
            energy,
            orientation,
            grid: Grid::decode(&grid)?,
        })
    }
}

/// Reply to the join request: game parameters plus the first snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinResponse {
    #[serde(default)]
    pub config: GameConfig,
    #[serde(flatten)]
    pub snapshot: TurnSnapshot,
}
