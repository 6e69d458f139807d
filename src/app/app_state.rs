//! Centralized application state for the snapshot viewer.
//!
//! The state is split into focused pieces:
//! - `ActiveSession`: the renderer and feed of the view on screen
//! - `RenderCadence`: when the dashboard frame is due to be recomposed
//! - view selection, device filter and input tracking at the top level

use std::time::{Duration, Instant};

use snapview::transport::FeedStats;
use snapview::{
    ClientConfig, DeviceFilter, DeviceSnapshot, Frame, GameSnapshot, InputSender, InputTracker, SnapshotFeed,
    SnapshotRenderer, SnapshotView, SourceConfig, Summary, SystemSnapshot, ViewKind,
};

/// Renderer paired with the feed that supplies it.
pub struct Session<S: SnapshotView> {
    pub renderer: SnapshotRenderer<S>,
    pub feed: SnapshotFeed<S>,
}

impl<S: SnapshotView> Session<S> {
    pub fn new(renderer: SnapshotRenderer<S>, feed: SnapshotFeed<S>) -> Self {
        Self { renderer, feed }
    }

    /// Applies the newest pending snapshot, if any.
    ///
    /// Returns true when the renderer received a new snapshot.
    pub fn apply_pending(&mut self) -> bool {
        match self.feed.drain_latest() {
            Some(snapshot) => {
                self.renderer.on_snapshot_received(snapshot);
                true
            }
            None => false,
        }
    }
}

/// The view currently on screen.
pub enum ActiveSession {
    Game {
        session: Session<GameSnapshot>,
        /// Present only for push sources
        input: Option<InputSender>,
    },
    Devices(Session<DeviceSnapshot>),
    System(Session<SystemSnapshot>),
}

impl ActiveSession {
    pub fn kind(&self) -> ViewKind {
        match self {
            ActiveSession::Game { .. } => ViewKind::Game,
            ActiveSession::Devices(_) => ViewKind::Devices,
            ActiveSession::System(_) => ViewKind::System,
        }
    }

    pub fn apply_pending(&mut self) -> bool {
        match self {
            ActiveSession::Game { session, .. } => session.apply_pending(),
            ActiveSession::Devices(session) => session.apply_pending(),
            ActiveSession::System(session) => session.apply_pending(),
        }
    }

    pub fn render_frame(&self, filter: DeviceFilter) -> Frame {
        match self {
            ActiveSession::Game { session, .. } => session.renderer.render_frame(filter),
            ActiveSession::Devices(session) => session.renderer.render_frame(filter),
            ActiveSession::System(session) => session.renderer.render_frame(filter),
        }
    }

    pub fn render_summary(&self) -> Summary {
        match self {
            ActiveSession::Game { session, .. } => session.renderer.render_summary(),
            ActiveSession::Devices(session) => session.renderer.render_summary(),
            ActiveSession::System(session) => session.renderer.render_summary(),
        }
    }

    pub fn feed_stats(&self) -> FeedStats {
        match self {
            ActiveSession::Game { session, .. } => session.feed.stats(),
            ActiveSession::Devices(session) => session.feed.stats(),
            ActiveSession::System(session) => session.feed.stats(),
        }
    }

    pub fn description(&self) -> &str {
        match self {
            ActiveSession::Game { session, .. } => session.feed.description(),
            ActiveSession::Devices(session) => session.feed.description(),
            ActiveSession::System(session) => session.feed.description(),
        }
    }

    pub fn snapshot_age(&self) -> Option<Duration> {
        match self {
            ActiveSession::Game { session, .. } => session.renderer.snapshot_age(),
            ActiveSession::Devices(session) => session.renderer.snapshot_age(),
            ActiveSession::System(session) => session.renderer.snapshot_age(),
        }
    }

    pub fn received(&self) -> u64 {
        match self {
            ActiveSession::Game { session, .. } => session.renderer.received(),
            ActiveSession::Devices(session) => session.renderer.received(),
            ActiveSession::System(session) => session.renderer.received(),
        }
    }

    pub fn input(&self) -> Option<&InputSender> {
        match self {
            ActiveSession::Game { input, .. } => input.as_ref(),
            _ => None,
        }
    }
}

/// Fixed-interval clock for recomposing dashboard frames.
///
/// The game recomposes every frame; dashboards reuse their last frame until
/// the interval elapses or something the frame depends on changes.
pub struct RenderCadence {
    interval: Duration,
    last: Option<Instant>,
}

impl RenderCadence {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last: None }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.last.map_or(true, |last| now.duration_since(last) >= self.interval)
    }

    pub fn mark(&mut self, now: Instant) {
        self.last = Some(now);
    }

    /// Forces a recompose on the next frame.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Main application state composed of focused state components.
pub struct AppState {
    pub config: ClientConfig,

    /// View selected in the header
    pub view: ViewKind,

    /// Source the active session was opened from
    pub source: SourceConfig,

    pub session: Option<ActiveSession>,

    pub filter: DeviceFilter,

    pub input: InputTracker,

    pub cadence: RenderCadence,

    /// Last composed frame, reused between dashboard ticks
    pub frame: Option<Frame>,

    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl AppState {
    pub fn new(config: ClientConfig) -> Self {
        let source = config.effective_source();
        Self {
            view: config.view,
            cadence: RenderCadence::new(config.cadence.render_interval()),
            source,
            config,
            session: None,
            filter: DeviceFilter::All,
            input: InputTracker::new(),
            frame: None,
            error_message: None,
        }
    }

    /// Drops the running session and everything derived from it.
    pub fn reset_session(&mut self) {
        self.session = None;
        self.input = InputTracker::new();
        self.frame = None;
        self.cadence.invalidate();
        self.error_message = None;
    }

    /// Frame for this repaint, recomposed only when due.
    ///
    /// # Arguments
    /// * `now` - Current time, compared against the render cadence
    pub fn current_frame(&mut self, now: Instant) -> Option<&Frame> {
        let session = self.session.as_ref()?;
        let continuous = session.kind() == ViewKind::Game;
        if continuous || self.frame.is_none() || self.cadence.is_due(now) {
            self.frame = Some(session.render_frame(self.filter));
            self.cadence.mark(now);
        }
        self.frame.as_ref()
    }

    pub fn set_filter(&mut self, filter: DeviceFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.cadence.invalidate();
        }
    }
}
