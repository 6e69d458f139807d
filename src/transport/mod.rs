//! Snapshot transports.
//!
//! - `feed`: background worker and the channel the UI drains
//! - `http_poller`, `file_source`, `demo_source`: pull sources for polling
//! - `push_channel`: WebSocket channel for pushed snapshots and input
//! - `envelope`: named-event framing used on the push channel

pub mod envelope;
pub mod feed;
pub mod http_poller;
pub mod file_source;
pub mod demo_source;
pub mod push_channel;

pub use envelope::Envelope;
pub use feed::{FeedStats, Notify, SnapshotFeed};
pub use http_poller::HttpPoller;
pub use file_source::{write_snapshot, FileSource};
pub use demo_source::DemoSource;
pub use push_channel::{spawn_push, InputSender, PushConfig};

use crate::config::{SourceConfig, ViewKind};
use crate::error::FeedResult;
use crate::traits::SnapshotSource;

/// Builds the pull source for a polled configuration.
///
/// Returns `Ok(None)` for push sources, which are started with
/// [`spawn_push`] instead.
pub fn pull_source(config: &SourceConfig, kind: ViewKind) -> FeedResult<Option<Box<dyn SnapshotSource>>> {
    let source: Box<dyn SnapshotSource> = match config {
        SourceConfig::Push { .. } => return Ok(None),
        SourceConfig::Http { url } => Box::new(HttpPoller::new(url.clone())?),
        SourceConfig::File { path } => Box::new(FileSource::new(path.clone())),
        SourceConfig::Demo { seed } => Box::new(DemoSource::new(kind, *seed)),
    };
    Ok(Some(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_config_has_no_pull_source() {
        let config = ViewKind::Game.default_source();
        assert!(pull_source(&config, ViewKind::Game).unwrap().is_none());
    }

    #[test]
    fn test_pull_sources_by_kind() {
        let http = pull_source(&ViewKind::Devices.default_source(), ViewKind::Devices).unwrap().unwrap();
        assert!(http.describe().starts_with("GET http://"));

        let demo = pull_source(&SourceConfig::Demo { seed: 3 }, ViewKind::System).unwrap().unwrap();
        assert_eq!(demo.describe(), "demo system (seed 3)");
    }
}
