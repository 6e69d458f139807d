//! Background snapshot feed.
//!
//! The data cadence runs on a worker thread that owns the source. Decoded
//! snapshots travel to the UI thread over a channel; the UI drains it once
//! per frame and keeps only the newest. Failures never cross the channel:
//! they are logged, counted in `FeedStats`, and the UI keeps showing its
//! previous snapshot.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::FeedError;
use crate::traits::SnapshotSource;

/// Callback fired after each delivered snapshot, e.g. a repaint request.
pub type Notify = Box<dyn Fn() + Send + 'static>;

/// Health counters for one feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedStats {
    pub delivered: u64,
    pub failures: u64,
    pub last_error: Option<String>,
    pub last_success: Option<Instant>,
    /// Push feeds only: whether the channel is currently open
    pub connected: bool,
}

impl FeedStats {
    pub(crate) fn record_success(&mut self) {
        self.delivered += 1;
        self.last_success = Some(Instant::now());
    }

    pub(crate) fn record_failure(&mut self, err: &FeedError) {
        self.failures += 1;
        self.last_error = Some(err.to_string());
    }
}

pub(crate) type SharedStats = Arc<Mutex<FeedStats>>;

pub(crate) fn with_stats<R>(stats: &SharedStats, f: impl FnOnce(&mut FeedStats) -> R) -> R {
    let mut guard = stats.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// Forwards one decoded payload, or records why it could not be decoded.
///
/// Returns `false` once the receiving side is gone.
pub(crate) fn deliver<S>(
    decoded: serde_json::Result<S>,
    sender: &Sender<S>,
    stats: &SharedStats,
    notify: &Notify,
) -> bool {
    match decoded {
        Ok(snapshot) => {
            with_stats(stats, FeedStats::record_success);
            if sender.send(snapshot).is_err() {
                return false;
            }
            debug!("snapshot delivered");
            notify();
            true
        }
        Err(err) => {
            let err = FeedError::from(err);
            warn!(error = %err, "discarding malformed snapshot");
            with_stats(stats, |s| s.record_failure(&err));
            true
        }
    }
}

/// Receiving end of a snapshot worker.
///
/// Dropping the feed stops its worker at the next tick.
pub struct SnapshotFeed<S> {
    receiver: Receiver<S>,
    stats: SharedStats,
    stop: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
    description: String,
}

impl<S: DeserializeOwned + Send + 'static> SnapshotFeed<S> {
    /// Polls `source` every `period`, starting immediately.
    ///
    /// # Arguments
    /// * `source` - Where payloads come from
    /// * `period` - Fixed poll period; no backoff is applied after failures
    /// * `notify` - Called after every delivered snapshot
    pub fn spawn_polling<Src>(mut source: Src, period: Duration, notify: Notify) -> Self
    where
        Src: SnapshotSource + 'static,
    {
        let (tx, rx) = channel();
        let (stop_tx, stop_rx) = channel::<()>();
        let stats = SharedStats::default();
        let description = source.describe();

        let worker_stats = Arc::clone(&stats);
        let worker = thread::Builder::new()
            .name("snapshot-poll".to_string())
            .spawn(move || {
                info!(source = %source.describe(), period_ms = period.as_millis() as u64, "polling started");
                loop {
                    match source.fetch() {
                        Ok(bytes) => {
                            if !deliver(serde_json::from_slice(&bytes), &tx, &worker_stats, &notify) {
                                break;
                            }
                        }
                        Err(err) => {
                            warn!(source = %source.describe(), error = %err, "fetch failed, keeping previous snapshot");
                            with_stats(&worker_stats, |s| s.record_failure(&err));
                        }
                    }
                    match stop_rx.recv_timeout(period) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        _ => break,
                    }
                }
                info!(source = %source.describe(), "polling stopped");
            });

        let worker = match worker {
            Ok(handle) => Some(handle),
            Err(err) => {
                warn!(error = %err, "failed to spawn poll worker");
                with_stats(&stats, |s| s.record_failure(&FeedError::Io(err)));
                None
            }
        };

        Self::from_parts(rx, stats, stop_tx, worker, description)
    }
}

impl<S> SnapshotFeed<S> {
    pub(crate) fn from_parts(
        receiver: Receiver<S>,
        stats: SharedStats,
        stop: Sender<()>,
        worker: Option<JoinHandle<()>>,
        description: String,
    ) -> Self {
        Self {
            receiver,
            stats,
            stop: Some(stop),
            worker,
            description,
        }
    }

    /// Newest snapshot received since the last call, if any. Older pending
    /// snapshots are discarded.
    pub fn drain_latest(&self) -> Option<S> {
        self.receiver.try_iter().last()
    }

    /// Blocks until a snapshot arrives or `timeout` elapses.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<S> {
        self.receiver.recv_timeout(timeout).ok()
    }

    pub fn stats(&self) -> FeedStats {
        with_stats(&self.stats, |s| s.clone())
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Stops the worker and waits for it to exit.
    pub fn shutdown(mut self) {
        self.stop.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl<S> Drop for SnapshotFeed<S> {
    fn drop(&mut self) {
        // Disconnecting the stop channel wakes the worker; it is not joined
        // here so a slow fetch never blocks the UI thread.
        self.stop.take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedResult;
    use crate::snapshot::GameSnapshot;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        replies: VecDeque<FeedResult<Vec<u8>>>,
    }

    impl SnapshotSource for Scripted {
        fn describe(&self) -> String {
            "scripted".to_string()
        }

        fn fetch(&mut self) -> FeedResult<Vec<u8>> {
            self.replies.pop_front().unwrap_or(Err(FeedError::Closed))
        }
    }

    fn scripted(replies: Vec<FeedResult<Vec<u8>>>) -> Scripted {
        Scripted {
            replies: replies.into(),
        }
    }

    #[test]
    fn test_delivers_decoded_snapshots() {
        let source = scripted(vec![Ok(br#"{"score":5}"#.to_vec())]);
        let feed: SnapshotFeed<GameSnapshot> =
            SnapshotFeed::spawn_polling(source, Duration::from_millis(10), Box::new(|| {}));

        let snapshot = feed.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(snapshot.score, 5);
        feed.shutdown();
    }

    #[test]
    fn test_failures_are_counted_not_delivered() {
        let source = scripted(vec![
            Err(FeedError::Status(503)),
            Ok(b"{not json".to_vec()),
            Ok(br#"{"score":9}"#.to_vec()),
        ]);
        let feed: SnapshotFeed<GameSnapshot> =
            SnapshotFeed::spawn_polling(source, Duration::from_millis(5), Box::new(|| {}));

        let snapshot = feed.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(snapshot.score, 9);

        let stats = feed.stats();
        assert_eq!(stats.delivered, 1);
        assert!(stats.failures >= 2);
        assert!(stats.last_error.is_some());
        feed.shutdown();
    }

    #[test]
    fn test_notify_called_per_delivery() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let source = scripted(vec![Ok(b"{}".to_vec()), Ok(b"{}".to_vec())]);
        let feed: SnapshotFeed<GameSnapshot> = SnapshotFeed::spawn_polling(
            source,
            Duration::from_millis(5),
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );

        assert!(feed.recv_timeout(Duration::from_secs(2)).is_some());
        assert!(feed.recv_timeout(Duration::from_secs(2)).is_some());
        feed.shutdown();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drain_keeps_only_newest() {
        let (tx, rx) = channel();
        let (stop_tx, _stop_rx) = channel();
        let feed: SnapshotFeed<u32> = SnapshotFeed::from_parts(rx, SharedStats::default(), stop_tx, None, "test".into());
        tx.send(1).unwrap();
        tx.send(2).unwrap();
        tx.send(3).unwrap();
        assert_eq!(feed.drain_latest(), Some(3));
        assert_eq!(feed.drain_latest(), None);
    }
}
