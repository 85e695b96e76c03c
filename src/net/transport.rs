//! Boundary between the agent and whatever carries its turns to the server
//!
//! The session only needs two round-trips: join once, then submit one
//! action per turn and receive the next snapshot.

use crate::game::state::Action;
use crate::net::protocol::{JoinResponse, TurnSnapshot};

/// Failure to exchange a message with the server
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected response status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("empty response body")]
    EmptyBody,
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Request/response channel to the game server
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Announce the player and receive the game parameters and first snapshot
    async fn join(&mut self, moniker: &str) -> Result<JoinResponse, TransportError>;

    /// Submit this turn's action and receive the next snapshot
    async fn act(&mut self, action: Action) -> Result<TurnSnapshot, TransportError>;
}

/// Decode a JSON response body, rejecting empty bodies
pub fn decode_body<T: for<'de> serde::Deserialize<'de>>(body: &str) -> Result<T, TransportError> {
    if body.trim().is_empty() {
        return Err(TransportError::EmptyBody);
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_body_rejects_empty() {
        let result: Result<TurnSnapshot, _> = decode_body("  \n");
        assert!(matches!(result, Err(TransportError::EmptyBody)));
    }

    #[test]
    fn test_decode_body_rejects_garbage() {
        let result: Result<TurnSnapshot, _> = decode_body("<html>");
        assert!(matches!(result, Err(TransportError::Decode(_))));
    }

    #[test]
    fn test_decode_body_snapshot() {
        let snapshot: TurnSnapshot = decode_body(r#"{"status":"won"}"#).unwrap();
        assert_eq!(snapshot.status, "won");
    }
}
