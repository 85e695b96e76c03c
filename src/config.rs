use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection and identity settings for one agent run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentConfig {
    /// Game server host
    pub host: String,
    /// Game server port
    pub port: u16,
    /// Moniker announced when joining
    pub name: String,
    /// Game to join (required)
    pub game: Option<String>,
    /// Upper bound on a single request round-trip
    pub request_timeout: Duration,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            name: "laserbot".to_string(),
            game: None,
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Invalid agent configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("a game id is required (--game or LASERBOT_GAME)")]
    MissingGame,
    #[error("port cannot be 0")]
    InvalidPort,
    #[error("player name cannot be empty")]
    EmptyName,
    #[error("request timeout cannot be 0")]
    InvalidTimeout,
}

impl AgentConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("LASERBOT_HOST") {
            if host.trim().is_empty() {
                tracing::warn!("LASERBOT_HOST is empty, using default");
            } else {
                config.host = host;
            }
        }

        if let Ok(port) = std::env::var("LASERBOT_PORT") {
            if let Ok(parsed) = port.parse::<u16>() {
                if parsed > 0 {
                    config.port = parsed;
                } else {
                    tracing::warn!("LASERBOT_PORT must be > 0, using default");
                }
            } else {
                tracing::warn!("Invalid LASERBOT_PORT '{}', using default", port);
            }
        }

        if let Ok(name) = std::env::var("LASERBOT_NAME") {
            config.name = name;
        }

        if let Ok(game) = std::env::var("LASERBOT_GAME") {
            config.game = Some(game);
        }

        if let Ok(timeout) = std::env::var("LASERBOT_REQUEST_TIMEOUT_MS") {
            if let Ok(parsed) = timeout.parse::<u64>() {
                if parsed > 0 && parsed <= 600_000 {
                    config.request_timeout = Duration::from_millis(parsed);
                } else {
                    tracing::warn!("LASERBOT_REQUEST_TIMEOUT_MS must be 1-600000, using default");
                }
            } else {
                tracing::warn!("Invalid LASERBOT_REQUEST_TIMEOUT_MS '{}', using default", timeout);
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.game.as_deref() {
            None | Some("") => return Err(ConfigError::MissingGame),
            Some(_) => {}
        }
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }

    /// Base URL of the game server
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Numeric game parameters announced by the server when the agent joins
///
/// Fixed for the whole game. Missing fields read as 0, meaning "not
/// announced".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Time allowed to answer each turn, in nanoseconds; slower answers default to noop
    pub turn_timeout: u64,
    /// Seconds the server waits for a reply before dropping the player
    pub connect_back_timeout: u64,
    /// Starting health
    pub max_health: i64,
    /// Starting energy
    pub max_energy: i64,
    /// Health lost every turn
    pub health_loss: i64,
    /// Health lost when hit by a laser
    pub laser_damage: i64,
    /// Cells a laser travels before fizzling out
    pub laser_distance: u32,
    /// Energy it takes to fire
    pub laser_energy: i64,
    /// Energy restored by a battery, up to `max_energy`
    pub battery_power: i64,
    /// Health restored by a battery, up to `max_health`
    pub battery_health: i64,
}

impl GameConfig {
    /// Per-turn decision budget, if the server announced one
    pub fn turn_budget(&self) -> Option<Duration> {
        (self.turn_timeout > 0).then(|| Duration::from_nanos(self.turn_timeout))
    }

    pub fn connect_back(&self) -> Option<Duration> {
        (self.connect_back_timeout > 0).then(|| Duration::from_secs(self.connect_back_timeout))
    }

    /// Whether `energy` is enough to fire
    ///
    /// Any positive energy suffices unless the server announced a laser cost.
    pub fn can_fire(&self, energy: i64) -> bool {
        energy > 0 && (self.laser_energy <= 0 || energy >= self.laser_energy)
    }

    /// Cells a shot can cover, if the server announced a laser distance
    pub fn shot_range(&self) -> Option<usize> {
        (self.laser_distance > 0).then_some(self.laser_distance as usize)
    }
}
