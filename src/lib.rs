//! Laserbot
//!
//! Autonomous player for a turn-based laser duel on a wrap-around grid.
//! Each turn the server sends a text snapshot of the grid; the agent answers
//! with exactly one action.
//!
//! # Features
//!
//! - `http` - HTTP transport and the `laserbot` binary (enabled by default)

pub mod config;
pub mod game;
pub mod metrics;
pub mod net;
pub mod util;
