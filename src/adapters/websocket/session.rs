//! Handle for one live WebSocket connection.
//!
//! A `Session` owns the sending half of a bounded channel whose receiving
//! half is drained by the connection's writer task. Everything that wants
//! to talk to the client (broadcasts, pong replies, heartbeats) goes through
//! the session, so the socket itself has exactly one writer.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, Notify};
use tokio::time::timeout;
use uuid::Uuid;

use crate::domain::foundation::ItemId;

/// Unique identifier for a WebSocket client connection.
///
/// Generated server-side when a client connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Create a new random client ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ClientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A frame queued for the connection's writer task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// JSON text message.
    Text(Arc<str>),
    /// Transport-level ping.
    Ping,
    /// Close the connection with the given code.
    Close { code: u16, reason: String },
}

/// Why a frame could not be handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SendError {
    #[error("session {0} is closed")]
    Closed(ClientId),

    #[error("send to session {client_id} timed out after {after:?}")]
    TimedOut { client_id: ClientId, after: Duration },

    #[error("outbound queue for session {0} is full")]
    Full(ClientId),
}

/// One live client connection eligible to receive pushed events.
pub struct Session {
    id: ClientId,
    topic: Option<ItemId>,
    outbound: mpsc::Sender<Frame>,
    open: AtomicBool,
    closed: Notify,
    send_timeout: Duration,
    started: Instant,
    /// Milliseconds since `started` at the last inbound frame.
    last_activity_ms: AtomicU64,
}

impl Session {
    /// Create a session for `topic` together with the receiver its writer
    /// task should drain.
    ///
    /// `capacity` bounds the number of queued frames; `send_timeout` bounds
    /// how long a single `send` waits for room in that queue.
    pub fn open(
        topic: Option<ItemId>,
        capacity: usize,
        send_timeout: Duration,
    ) -> (Arc<Self>, mpsc::Receiver<Frame>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let session = Arc::new(Self {
            id: ClientId::new(),
            topic,
            outbound: tx,
            open: AtomicBool::new(true),
            closed: Notify::new(),
            send_timeout,
            started: Instant::now(),
            last_activity_ms: AtomicU64::new(0),
        });
        (session, rx)
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Item this session watches; `None` for global sessions.
    pub fn topic(&self) -> Option<&ItemId> {
        self.topic.as_ref()
    }

    /// True until the session is closed or its writer task has gone away.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire) && !self.outbound.is_closed()
    }

    /// Mark the session closed. Idempotent.
    ///
    /// Returns true if this call performed the transition.
    pub fn close(&self) -> bool {
        let was_open = self.open.swap(false, Ordering::AcqRel);
        if was_open {
            self.closed.notify_waiters();
        }
        was_open
    }

    /// Resolves once `close` has been called, immediately if it already was.
    ///
    /// The connection task selects on this so a session evicted elsewhere
    /// still gets its socket torn down.
    pub async fn closed(&self) {
        let notified = self.closed.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();

        if !self.open.load(Ordering::Acquire) {
            return;
        }
        notified.await;
    }

    /// Queue a text frame for the client.
    ///
    /// Fails if the session is closed, the writer task is gone, or the
    /// queue stays full for longer than the send timeout. Failures are not
    /// retried; the caller decides whether to evict.
    pub async fn send(&self, text: Arc<str>) -> Result<(), SendError> {
        if !self.is_open() {
            return Err(SendError::Closed(self.id));
        }

        match timeout(self.send_timeout, self.outbound.send(Frame::Text(text))).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(SendError::Closed(self.id)),
            Err(_) => Err(SendError::TimedOut {
                client_id: self.id,
                after: self.send_timeout,
            }),
        }
    }

    /// Queue a control frame without waiting.
    pub fn send_control(&self, frame: Frame) -> Result<(), SendError> {
        self.outbound.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SendError::Full(self.id),
            mpsc::error::TrySendError::Closed(_) => SendError::Closed(self.id),
        })
    }

    /// Record inbound activity from the client.
    pub fn touch(&self) {
        let elapsed = self.started.elapsed().as_millis() as u64;
        self.last_activity_ms.store(elapsed, Ordering::Release);
    }

    /// Time since the last inbound activity (or since connect).
    pub fn idle_for(&self) -> Duration {
        let last = Duration::from_millis(self.last_activity_ms.load(Ordering::Acquire));
        self.started.elapsed().saturating_sub(last)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .field("open", &self.is_open())
            .finish()
    }
}
