//! Game session: join, then one decision per snapshot until the game ends
//!
//! The session owns the agent's belief state for exactly one game and is
//! the only writer of it.

use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::game::systems::ai::Agent;
use crate::metrics::AgentMetrics;
use crate::net::protocol::SnapshotError;
use crate::net::transport::{Transport, TransportError};

/// Errors that end a session early
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// How a finished game went
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    /// Actions submitted
    pub turns: u64,
    /// Status of the final, non-running snapshot
    pub final_status: String,
    pub last_health: Option<i64>,
    pub last_energy: Option<i64>,
}

/// One game played over a [`Transport`]
pub struct GameSession<T: Transport> {
    transport: T,
    moniker: String,
    agent: Agent,
    metrics: Arc<AgentMetrics>,
}

impl<T: Transport> GameSession<T> {
    pub fn new(transport: T, moniker: impl Into<String>, metrics: Arc<AgentMetrics>) -> Self {
        Self {
            transport,
            moniker: moniker.into(),
            agent: Agent::default(),
            metrics,
        }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Play the game to completion
    ///
    /// A snapshot that cannot be decoded aborts the session: there is no
    /// safe way to act on a world the agent cannot read.
    pub async fn run(&mut self) -> Result<SessionSummary, SessionError> {
        let join = self.transport.join(&self.moniker).await?;
        info!(
            moniker = %self.moniker,
            turn_timeout_ns = join.config.turn_timeout,
            laser_distance = join.config.laser_distance,
            laser_energy = join.config.laser_energy,
            "Joined game"
        );

        self.agent = Agent::new(join.config);
        let budget = self.agent.config().turn_budget();

        let mut snapshot = join.snapshot;
        let mut turns = 0u64;
        let mut last_health = None;
        let mut last_energy = None;

        while snapshot.is_running() {
            let state = snapshot.into_turn_state()?;
            last_health = Some(state.health);
            last_energy = Some(state.energy);

            let started = Instant::now();
            self.agent.observe(state);
            let decision = self.agent.decide();
            let elapsed = started.elapsed();

            self.metrics
                .record_decision(decision.action, decision.expanded, elapsed);
            self.metrics
                .record_tracked_bullets(self.agent.tracker().len());

            if let Some(budget) = budget {
                if elapsed > budget {
                    self.metrics.record_over_budget();
                    warn!(
                        turn = turns,
                        elapsed_us = elapsed.as_micros() as u64,
                        budget_us = budget.as_micros() as u64,
                        "Decision exceeded turn timeout"
                    );
                }
            }

            debug!(turn = turns, action = %decision.action, "submitting action");
            snapshot = self.transport.act(decision.action).await?;
            turns += 1;
        }

        self.agent.end_game();

        info!(
            turns,
            status = %snapshot.status,
            health = ?last_health,
            energy = ?last_energy,
            "Game over"
        );

        Ok(SessionSummary {
            turns,
            final_status: snapshot.status,
            last_health,
            last_energy,
        })
    }
}
