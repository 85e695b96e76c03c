//! HTTP transport
//!
//! Every exchange is a bodiless POST to `/game/{game}/{segment}`; the
//! server answers with JSON and assigns a player id through a response
//! header that is echoed on all later requests.

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::AgentConfig;
use crate::game::state::Action;
use crate::net::protocol::{
    action_path, game_path, JoinResponse, TurnSnapshot, JOIN_SEGMENT, PLAYER_ID_HEADER,
    PLAYER_MONIKER_HEADER,
};
use crate::net::transport::{decode_body, Transport, TransportError};

/// Game server client over plain HTTP
pub struct HttpTransport {
    client: Client,
    base_url: String,
    game: String,
    player_id: Option<String>,
}

impl HttpTransport {
    /// Create a client for the game named in `config`
    pub fn new(config: &AgentConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url(),
            game: config.game.clone().unwrap_or_default(),
            player_id: None,
        })
    }

    /// Id assigned by the server, once joined
    pub fn player_id(&self) -> Option<&str> {
        self.player_id.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&mut self, path: &str, moniker: Option<&str>) -> Result<String, TransportError> {
        let mut request = self.client.post(self.url(path));
        if let Some(moniker) = moniker {
            request = request.header(PLAYER_MONIKER_HEADER, moniker);
        }
        if let Some(id) = &self.player_id {
            request = request.header(PLAYER_ID_HEADER, id.as_str());
        }

        debug!(path, "sending request");

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("Game server error: {} - {}", status, body);
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        if let Some(id) = response
            .headers()
            .get(PLAYER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
        {
            if self.player_id.as_deref() != Some(id) {
                debug!(player_id = id, "player id assigned");
                self.player_id = Some(id.to_string());
            }
        }

        response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))
    }
}

impl Transport for HttpTransport {
    async fn join(&mut self, moniker: &str) -> Result<JoinResponse, TransportError> {
        let path = game_path(&self.game, JOIN_SEGMENT);
        let body = self.post(&path, Some(moniker)).await?;
        decode_body(&body)
    }

    async fn act(&mut self, action: Action) -> Result<TurnSnapshot, TransportError> {
        let path = action_path(&self.game, action);
        let body = self.post(&path, None).await?;
        decode_body(&body)
    }
}
