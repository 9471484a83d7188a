//! Per-connection lifecycle: `Connecting -> Open -> Closed`.
//!
//! The socket handler feeds discrete transport events into a
//! [`ConnectionLifecycle`]; it owns registration in the [`TopicRegistry`]
//! and the welcome/pong replies. Events arriving after close are ignored.

use std::fmt::Display;
use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::StateMachine;

use super::messages::{ClientMessage, ServerEvent};
use super::registry::TopicRegistry;
use super::session::{SendError, Session};

/// Connection state of one live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// Upgrade accepted, not yet registered.
    #[default]
    Connecting,
    /// Registered and receiving events.
    Open,
    /// Unregistered. Terminal.
    Closed,
}

impl StateMachine for ConnectionState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ConnectionState::*;
        matches!(
            (self, target),
            (Connecting, Open) | (Connecting, Closed) | (Open, Closed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ConnectionState::*;
        match self {
            Connecting => vec![Open, Closed],
            Open => vec![Closed],
            Closed => vec![],
        }
    }
}

/// Drives one session through its lifecycle.
pub struct ConnectionLifecycle {
    session: Arc<Session>,
    registry: Arc<TopicRegistry>,
    state: ConnectionState,
}

impl ConnectionLifecycle {
    pub fn new(session: Arc<Session>, registry: Arc<TopicRegistry>) -> Self {
        Self {
            session,
            registry,
            state: ConnectionState::Connecting,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Handshake completed: register the session and greet the client.
    ///
    /// The session is registered even if the welcome cannot be sent; the
    /// caller should then run [`on_close`](Self::on_close).
    pub async fn on_open(&mut self) -> Result<(), SendError> {
        let Ok(next) = self.state.transition_to(ConnectionState::Open) else {
            return Ok(());
        };

        self.registry
            .subscribe(self.session.topic(), self.session.clone())
            .await;
        self.state = next;

        tracing::info!(
            client_id = %self.session.id(),
            item_id = ?self.session.topic().map(|t| t.as_str()),
            "Live session opened"
        );

        let welcome = ServerEvent::connected(self.session.topic());
        match welcome.to_frame() {
            Ok(frame) => self.session.send(frame).await,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize welcome message");
                Ok(())
            }
        }
    }

    /// Inbound text frame from the client.
    pub async fn on_message(&mut self, text: &str) {
        if self.state != ConnectionState::Open {
            return;
        }
        self.session.touch();

        match serde_json::from_str::<ClientMessage>(text) {
            Ok(ClientMessage::Ping) => self.reply(&ServerEvent::Pong).await,
            Err(e) if e.is_syntax() || e.is_eof() => {
                tracing::warn!(
                    client_id = %self.session.id(),
                    error = %e,
                    "Ignoring malformed client message"
                );
            }
            Err(e) => {
                tracing::debug!(
                    client_id = %self.session.id(),
                    error = %e,
                    "Ignoring unrecognized client message"
                );
            }
        }
    }

    /// Transport error. Logged only; the transport follows up with a close.
    pub fn on_error(&self, error: &impl Display) {
        tracing::warn!(client_id = %self.session.id(), error = %error, "WebSocket transport error");
    }

    /// Connection closed for any reason. Safe to call more than once.
    ///
    /// Returns true if this call performed the close.
    pub async fn on_close(&mut self, code: Option<u16>, reason: &str) -> bool {
        let Ok(next) = self.state.transition_to(ConnectionState::Closed) else {
            return false;
        };

        self.registry
            .unsubscribe(self.session.topic(), &self.session.id())
            .await;
        self.session.close();
        self.state = next;

        tracing::info!(
            client_id = %self.session.id(),
            code = ?code,
            reason,
            "Live session closed"
        );
        true
    }

    async fn reply(&self, event: &ServerEvent) {
        let frame = match event.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize reply");
                return;
            }
        };
        if let Err(e) = self.session.send(frame).await {
            tracing::debug!(client_id = %self.session.id(), error = %e, "Reply not delivered");
        }
    }
}
