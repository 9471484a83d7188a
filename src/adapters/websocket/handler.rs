//! WebSocket upgrade handler for live auction watchers.
//!
//! Handles the HTTP → WebSocket upgrade and runs the connection:
//! 1. Resolve the watched item from the `itemId` query parameter
//! 2. Upgrade to WebSocket
//! 3. Open a session (writer task + heartbeat task) and register it
//! 4. Feed inbound frames to the lifecycle until disconnect
//! 5. Unregister on close

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        rejection::QueryRejection,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::Response,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::config::LiveConfig;
use crate::domain::foundation::ItemId;

use super::lifecycle::ConnectionLifecycle;
use super::registry::TopicRegistry;
use super::session::{ClientId, Frame, SendError, Session};

/// Close code sent when the server ends a connection (idle or evicted).
const GOING_AWAY: u16 = 1001;

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    pub registry: Arc<TopicRegistry>,
    pub config: LiveConfig,
}

impl WebSocketState {
    pub fn new(registry: Arc<TopicRegistry>, config: LiveConfig) -> Self {
        Self { registry, config }
    }
}

/// Query parameters accepted on the upgrade request.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectParams {
    #[serde(rename = "itemId")]
    pub item_id: Option<String>,
}

/// Map the raw `itemId` parameter to a topic.
///
/// Absent, blank or otherwise unusable values fall back to the global set
/// instead of rejecting the connection.
pub fn resolve_topic(raw: Option<&str>) -> Option<ItemId> {
    let raw = raw?;
    match ItemId::new(raw.trim()) {
        Ok(item_id) => Some(item_id),
        Err(e) => {
            tracing::debug!(error = %e, "Unusable itemId, subscribing globally");
            None
        }
    }
}

/// Handle WebSocket upgrade requests for auction updates.
///
/// Route: `GET /ws/auctions?itemId=<id>`
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    params: Result<Query<ConnectParams>, QueryRejection>,
    State(state): State<WebSocketState>,
) -> Response {
    let raw = match params {
        Ok(Query(params)) => params.item_id,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Bad upgrade query, subscribing globally");
            None
        }
    };
    let topic = resolve_topic(raw.as_deref());

    ws.on_upgrade(move |socket| handle_socket(socket, topic, state))
}

/// Run an established WebSocket connection until it closes.
async fn handle_socket(socket: WebSocket, topic: Option<ItemId>, state: WebSocketState) {
    let (sink, mut stream) = socket.split();

    let (session, outbound) = Session::open(
        topic,
        state.config.channel_capacity,
        state.config.send_timeout(),
    );
    let mut lifecycle = ConnectionLifecycle::new(session.clone(), state.registry.clone());

    let mut writer = tokio::spawn(write_frames(sink, outbound, session.id()));
    let heartbeat = tokio::spawn(heartbeat(
        session.clone(),
        state.config.heartbeat_interval(),
        state.config.idle_timeout(),
    ));

    let mut close: (Option<u16>, String) = Default::default();

    match lifecycle.on_open().await {
        Err(e) => {
            tracing::debug!(client_id = %session.id(), error = %e, "Client gone before welcome");
        }
        Ok(()) => loop {
            tokio::select! {
                incoming = stream.next() => match incoming {
                    Some(Ok(Message::Text(text))) => lifecycle.on_message(&text).await,
                    Some(Ok(Message::Binary(_))) => {
                        session.touch();
                        tracing::debug!(client_id = %session.id(), "Ignoring binary message");
                    }
                    Some(Ok(Message::Ping(_))) | Some(Ok(Message::Pong(_))) => session.touch(),
                    Some(Ok(Message::Close(frame))) => {
                        close = frame
                            .map(|f| (Some(f.code), f.reason.into_owned()))
                            .unwrap_or_default();
                        break;
                    }
                    Some(Err(e)) => {
                        lifecycle.on_error(&e);
                        break;
                    }
                    None => break,
                },
                _ = &mut writer => {
                    tracing::debug!(client_id = %session.id(), "Writer finished, closing");
                    break;
                }
                _ = session.closed() => {
                    tracing::debug!(client_id = %session.id(), "Session closed by server, tearing down");
                    close = (Some(GOING_AWAY), "Session evicted".to_string());
                    // Best effort: a stuck queue may have no room for the Close frame.
                    let _ = session.send_control(Frame::Close {
                        code: GOING_AWAY,
                        reason: close.1.clone(),
                    });
                    let _ = tokio::time::timeout(state.config.send_timeout(), &mut writer).await;
                    break;
                }
            }
        },
    }

    lifecycle.on_close(close.0, &close.1).await;
    heartbeat.abort();
    writer.abort();
}

impl From<Frame> for Message {
    fn from(frame: Frame) -> Self {
        match frame {
            Frame::Text(text) => Message::Text(text.to_string()),
            Frame::Ping => Message::Ping(Vec::new()),
            Frame::Close { code, reason } => Message::Close(Some(CloseFrame {
                code,
                reason: Cow::Owned(reason),
            })),
        }
    }
}

/// Single writer for the socket: drains the session's queue into the sink.
///
/// Stops after writing a Close frame or when the sink fails.
async fn write_frames(
    mut sink: SplitSink<WebSocket, Message>,
    mut outbound: mpsc::Receiver<Frame>,
    client_id: ClientId,
) {
    while let Some(frame) = outbound.recv().await {
        let closing = matches!(frame, Frame::Close { .. });
        if let Err(e) = sink.send(Message::from(frame)).await {
            tracing::debug!(client_id = %client_id, error = %e, "Send error, closing connection");
            break;
        }
        if closing {
            break;
        }
    }
    outbound.close();
}

/// Periodic transport ping plus idle detection.
///
/// Sends a Close frame and exits once the client has been silent for longer
/// than `idle_timeout`.
pub(crate) async fn heartbeat(session: Arc<Session>, every: Duration, idle_timeout: Duration) {
    let mut ticker = interval(every);
    // Skip the immediate first tick
    ticker.tick().await;

    loop {
        ticker.tick().await;

        if !session.is_open() {
            break;
        }

        if session.idle_for() > idle_timeout {
            tracing::warn!(client_id = %session.id(), "Idle timeout, closing connection");
            let _ = session.send_control(Frame::Close {
                code: GOING_AWAY,
                reason: "Idle timeout".to_string(),
            });
            break;
        }

        match session.send_control(Frame::Ping) {
            Ok(()) => {}
            Err(SendError::Full(_)) => {
                tracing::trace!(client_id = %session.id(), "Outbound queue full, skipping ping");
            }
            Err(_) => break,
        }
    }
}

/// Create axum router for the WebSocket endpoint.
///
/// ```ignore
/// let app = Router::new()
///     .merge(websocket_router().with_state(ws_state));
/// ```
pub fn websocket_router() -> axum::Router<WebSocketState> {
    use axum::routing::get;

    axum::Router::new().route("/ws/auctions", get(ws_handler))
}
