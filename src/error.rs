//! Error types for the snapshot data path.
//!
//! Only two kinds of failure exist from the renderer's point of view: the
//! transport failed, or the payload could not be decoded. Both are reported
//! by the feed worker and never reach the render loop.

use thiserror::Error;

/// Failure while fetching or decoding a snapshot.
#[derive(Debug, Error)]
pub enum FeedError {
    /// HTTP request could not be completed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned status {0}")]
    Status(u16),

    /// WebSocket handshake or frame error
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] Box<tungstenite::Error>),

    /// Local I/O failure (file sources, socket setup)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload is not a valid snapshot of the expected kind
    #[error("malformed snapshot payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The peer closed the channel
    #[error("channel closed")]
    Closed,
}

impl From<tungstenite::Error> for FeedError {
    fn from(err: tungstenite::Error) -> Self {
        match err {
            tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed => FeedError::Closed,
            tungstenite::Error::Io(io) => FeedError::Io(io),
            other => FeedError::WebSocket(Box::new(other)),
        }
    }
}

impl FeedError {
    /// True for transient socket read timeouts that should simply be retried.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            FeedError::Io(e) if matches!(e.kind(), std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut)
        )
    }
}

pub type FeedResult<T> = std::result::Result<T, FeedError>;
