//! Bidirectional push channel for the game.
//!
//! One worker thread owns the WebSocket. It forwards every snapshot event to
//! a `SnapshotFeed` and writes queued input messages as soon as it gets to
//! them. Reads use a short socket timeout so outbound input is never stuck
//! behind a quiet server.
//!
//! On every (re)connect the last transmitted movement flags are sent again.
//! Flags are not cleared when the connection drops.

use std::net::TcpStream;
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use tungstenite::stream::MaybeTlsStream;
use tungstenite::{Message, WebSocket};

use crate::error::{FeedError, FeedResult};
use crate::input::{InputState, Outbound};
use crate::transport::envelope::Envelope;
use crate::transport::feed::{deliver, with_stats, Notify, SharedStats, SnapshotFeed};

type Socket = WebSocket<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Clone, PartialEq)]
pub struct PushConfig {
    /// `ws://` or `wss://` endpoint
    pub url: String,
    /// Inbound event name that carries a snapshot
    pub event: String,
    pub reconnect_delay: Duration,
    pub read_timeout: Duration,
}

/// Handle for queueing input towards the game server.
///
/// Sending never blocks; messages are written by the channel worker.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<Outbound>,
}

impl InputSender {
    /// Queues one message. Returns `false` if the channel worker has exited.
    pub fn send(&self, message: Outbound) -> bool {
        self.tx.send(message).is_ok()
    }

    pub fn send_all(&self, messages: impl IntoIterator<Item = Outbound>) -> bool {
        messages.into_iter().all(|m| self.send(m))
    }
}

enum SessionEnd {
    Stopped,
}

struct Worker<S> {
    config: PushConfig,
    snapshots: Sender<S>,
    input: Receiver<Outbound>,
    stop: Receiver<()>,
    stats: SharedStats,
    notify: Notify,
    last_input: InputState,
}

impl<S: DeserializeOwned> Worker<S> {
    fn run(mut self) {
        info!(url = %self.config.url, event = %self.config.event, "push channel started");
        loop {
            match tungstenite::connect(self.config.url.as_str()) {
                Ok((mut socket, _response)) => {
                    info!(url = %self.config.url, "push channel connected");
                    with_stats(&self.stats, |s| s.connected = true);
                    let outcome = self.session(&mut socket);
                    with_stats(&self.stats, |s| s.connected = false);
                    match outcome {
                        Ok(SessionEnd::Stopped) => break,
                        Err(err) => {
                            warn!(url = %self.config.url, error = %err, "push channel lost");
                            with_stats(&self.stats, |s| s.record_failure(&err));
                        }
                    }
                }
                Err(err) => {
                    let err = FeedError::from(err);
                    warn!(url = %self.config.url, error = %err, "push channel connect failed");
                    with_stats(&self.stats, |s| s.record_failure(&err));
                }
            }

            match self.stop.recv_timeout(self.config.reconnect_delay) {
                Err(RecvTimeoutError::Timeout) => continue,
                _ => break,
            }
        }
        info!(url = %self.config.url, "push channel stopped");
    }

    fn session(&mut self, socket: &mut Socket) -> FeedResult<SessionEnd> {
        if let Some(stream) = tcp_stream(socket.get_ref()) {
            stream.set_read_timeout(Some(self.config.read_timeout))?;
        }

        // Anything queued while offline only updates the flags; one-shot
        // events from that period are dropped.
        while let Ok(message) = self.input.try_recv() {
            match message {
                Outbound::Input(state) => self.last_input = state,
                other => debug!(?other, "dropping input queued while offline"),
            }
        }
        send_envelope(socket, Envelope::from(Outbound::Input(self.last_input)))?;

        loop {
            match self.stop.try_recv() {
                Err(TryRecvError::Empty) => {}
                _ => {
                    let _ = socket.close(None);
                    let _ = socket.flush();
                    return Ok(SessionEnd::Stopped);
                }
            }

            while let Ok(message) = self.input.try_recv() {
                if let Outbound::Input(state) = message {
                    self.last_input = state;
                }
                send_envelope(socket, Envelope::from(message))?;
            }

            match socket.read() {
                Ok(Message::Text(text)) => {
                    if !self.on_text(text.as_str()) {
                        return Ok(SessionEnd::Stopped);
                    }
                }
                Ok(Message::Close(frame)) => {
                    debug!(?frame, "server closed push channel");
                    return Err(FeedError::Closed);
                }
                Ok(_) => {}
                Err(err) => {
                    let err = FeedError::from(err);
                    if !err.is_timeout() {
                        return Err(err);
                    }
                }
            }
        }
    }

    /// Returns `false` once nobody is listening for snapshots.
    fn on_text(&self, text: &str) -> bool {
        let envelope = match Envelope::parse(text) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(error = %err, "ignoring malformed push frame");
                with_stats(&self.stats, |s| s.record_failure(&err));
                return true;
            }
        };
        if envelope.event == self.config.event {
            deliver(serde_json::from_value(envelope.data), &self.snapshots, &self.stats, &self.notify)
        } else {
            debug!(event = %envelope.event, "ignoring push event");
            true
        }
    }
}

/// The TCP socket under a plain or `wss://` connection.
fn tcp_stream(stream: &MaybeTlsStream<TcpStream>) -> Option<&TcpStream> {
    match stream {
        MaybeTlsStream::Plain(stream) => Some(stream),
        MaybeTlsStream::Rustls(stream) => Some(stream.get_ref()),
        _ => None,
    }
}

fn send_envelope(socket: &mut Socket, envelope: Envelope) -> FeedResult<()> {
    socket.send(Message::text(envelope.to_text()?))?;
    Ok(())
}

/// Starts the push channel worker.
///
/// Returns the snapshot feed and the input handle for the same connection.
/// Dropping the feed closes the socket and ends the worker.
pub fn spawn_push<S>(config: PushConfig, notify: Notify) -> (SnapshotFeed<S>, InputSender)
where
    S: DeserializeOwned + Send + 'static,
{
    let (snap_tx, snap_rx) = channel();
    let (input_tx, input_rx) = channel();
    let (stop_tx, stop_rx) = channel();
    let stats = SharedStats::default();
    let description = format!("push {} ({})", config.url, config.event);

    let worker = Worker {
        config,
        snapshots: snap_tx,
        input: input_rx,
        stop: stop_rx,
        stats: Arc::clone(&stats),
        notify,
        last_input: InputState::default(),
    };

    let handle = match thread::Builder::new()
        .name("push-channel".to_string())
        .spawn(move || worker.run())
    {
        Ok(handle) => Some(handle),
        Err(err) => {
            warn!(error = %err, "failed to spawn push channel worker");
            with_stats(&stats, |s| s.record_failure(&FeedError::Io(err)));
            None
        }
    };

    (
        SnapshotFeed::from_parts(snap_rx, stats, stop_tx, handle, description),
        InputSender { tx: input_tx },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::GameSnapshot;
    use std::net::TcpListener;

    fn config(url: String) -> PushConfig {
        PushConfig {
            url,
            event: "game_state".to_string(),
            reconnect_delay: Duration::from_millis(50),
            read_timeout: Duration::from_millis(20),
        }
    }

    #[test]
    fn test_unreachable_server_counts_failures() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let (feed, _input) = spawn_push::<GameSnapshot>(config(format!("ws://127.0.0.1:{}/ws", port)), Box::new(|| {}));
        thread::sleep(Duration::from_millis(200));
        let stats = feed.stats();
        assert!(stats.failures >= 1);
        assert!(!stats.connected);
        feed.shutdown();
    }

    #[test]
    fn test_secure_url_reaches_tls_handshake() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("wss://{}/ws", listener.local_addr().unwrap());
        let server = thread::spawn(move || {
            // Hang up during the handshake
            let (stream, _) = listener.accept().unwrap();
            drop(stream);
        });

        let (feed, _input) = spawn_push::<GameSnapshot>(config(url), Box::new(|| {}));
        server.join().unwrap();
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while feed.stats().failures == 0 && std::time::Instant::now() < deadline {
            thread::sleep(Duration::from_millis(10));
        }

        let stats = feed.stats();
        assert!(stats.failures >= 1);
        assert!(!stats.connected);
        let error = stats.last_error.unwrap_or_default();
        assert!(!error.contains("not compiled"), "unexpected error: {}", error);
        feed.shutdown();
    }

    #[test]
    fn test_receives_snapshot_and_sends_input() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("ws://{}/ws", listener.local_addr().unwrap());

        let server = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut ws = tungstenite::accept(stream).unwrap();
            ws.send(Message::text(r#"{"event":"connected","data":{}}"#)).unwrap();
            ws.send(Message::text(r#"{"event":"game_state","data":{"score":120,"level":2,"lives":1}}"#))
                .unwrap();

            let mut frames = Vec::new();
            while frames.len() < 3 {
                if let Message::Text(text) = ws.read().unwrap() {
                    frames.push(text.as_str().to_string());
                }
            }
            frames
        });

        let (feed, input) = spawn_push::<GameSnapshot>(config(url), Box::new(|| {}));
        let snapshot = feed.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(snapshot.score, 120);

        input.send(Outbound::Reset);
        input.send(Outbound::Input(InputState { left: true, right: false }));

        let frames = server.join().unwrap();
        assert_eq!(frames[0], r#"{"event":"input","data":{"left":false,"right":false}}"#);
        assert_eq!(frames[1], r#"{"event":"reset"}"#);
        assert_eq!(frames[2], r#"{"event":"input","data":{"left":true,"right":false}}"#);
        feed.shutdown();
    }
}
