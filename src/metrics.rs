//! Per-game agent counters
//!
//! Updated once per turn by the session and rendered as a one-line summary
//! when the game ends.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::game::state::Action;

/// Counters for one agent run
#[derive(Debug, Default)]
pub struct AgentMetrics {
    // Turn counts by emitted action
    pub turns: AtomicU64,
    pub moves: AtomicU64,
    pub turns_left: AtomicU64,
    pub turns_right: AtomicU64,
    pub fires: AtomicU64,
    pub noops: AtomicU64,

    // Planner work
    pub planner_expanded: AtomicU64,

    // Bolt tracker high-water mark
    pub bullets_tracked_max: AtomicU64,

    // Decision timing (microseconds)
    pub decision_time_total_us: AtomicU64,
    pub decision_time_max_us: AtomicU64,
    pub over_budget: AtomicU64,
}

/// Plain copy of the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub turns: u64,
    pub moves: u64,
    pub turns_left: u64,
    pub turns_right: u64,
    pub fires: u64,
    pub noops: u64,
    pub planner_expanded: u64,
    pub bullets_tracked_max: u64,
    pub decision_time_avg_us: u64,
    pub decision_time_max_us: u64,
    pub over_budget: u64,
}

impl AgentMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one turn's decision
    pub fn record_decision(&self, action: Action, expanded: usize, elapsed: Duration) {
        self.turns.fetch_add(1, Ordering::Relaxed);
        let counter = match action {
            Action::Move => &self.moves,
            Action::TurnLeft => &self.turns_left,
            Action::TurnRight => &self.turns_right,
            Action::Fire => &self.fires,
            Action::Noop => &self.noops,
        };
        counter.fetch_add(1, Ordering::Relaxed);
        self.planner_expanded
            .fetch_add(expanded as u64, Ordering::Relaxed);

        let us = elapsed.as_micros().min(u64::MAX as u128) as u64;
        self.decision_time_total_us.fetch_add(us, Ordering::Relaxed);
        self.decision_time_max_us.fetch_max(us, Ordering::Relaxed);
    }

    /// Record a decision that took longer than the server's turn timeout
    pub fn record_over_budget(&self) {
        self.over_budget.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_tracked_bullets(&self, count: usize) {
        self.bullets_tracked_max
            .fetch_max(count as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let turns = self.turns.load(Ordering::Relaxed);
        let total = self.decision_time_total_us.load(Ordering::Relaxed);
        MetricsSnapshot {
            turns,
            moves: self.moves.load(Ordering::Relaxed),
            turns_left: self.turns_left.load(Ordering::Relaxed),
            turns_right: self.turns_right.load(Ordering::Relaxed),
            fires: self.fires.load(Ordering::Relaxed),
            noops: self.noops.load(Ordering::Relaxed),
            planner_expanded: self.planner_expanded.load(Ordering::Relaxed),
            bullets_tracked_max: self.bullets_tracked_max.load(Ordering::Relaxed),
            decision_time_avg_us: if turns > 0 { total / turns } else { 0 },
            decision_time_max_us: self.decision_time_max_us.load(Ordering::Relaxed),
            over_budget: self.over_budget.load(Ordering::Relaxed),
        }
    }

    /// One-line summary for the end-of-game log
    pub fn summary(&self) -> String {
        let s = self.snapshot();
        format!(
            "turns={} move={} left={} right={} fire={} noop={} expanded={} bolts_max={} decide_avg={}us decide_max={}us over_budget={}",
            s.turns,
            s.moves,
            s.turns_left,
            s.turns_right,
            s.fires,
            s.noops,
            s.planner_expanded,
            s.bullets_tracked_max,
            s.decision_time_avg_us,
            s.decision_time_max_us,
            s.over_budget
        )
    }
}
