//! Application-level coordination and workflow management.
//!
//! Handles opening and replacing sessions, applying delivered snapshots and
//! forwarding game input to the active channel.

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

use crate::app::app_state::{ActiveSession, AppState, Session};
use snapview::config::CadenceConfig;
use snapview::transport::{self, Notify};
use snapview::{
    spawn_push, InputEvent, InputSender, PushConfig, SnapshotFeed, SnapshotRenderer, SnapshotView, SourceConfig,
    SurfaceConfig, ViewKind,
};

/// Poll period for game snapshots read from a file or the demo source.
const GAME_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Seed used by the header's demo button.
pub const DEMO_SEED: u64 = 42;

/// Coordinates application-level operations and workflows.
///
/// This struct is responsible for:
/// - Starting the feed for the selected view and source
/// - Applying delivered snapshots once per frame
/// - Routing game input to the push channel
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    /// Replaces the active session with one reading from `source`.
    ///
    /// The previous feed is dropped first, which stops its worker.
    pub fn open_session(state: &mut AppState, source: SourceConfig, ctx: &egui::Context) {
        state.reset_session();
        state.source = source;

        let notify = repaint_notify(ctx);
        let cadence = state.config.cadence.clone();
        let surface = state.config.surface;

        let opened = match state.view {
            ViewKind::Game => start::<snapview::GameSnapshot>(&state.source, &cadence, surface, notify)
                .map(|(session, input)| ActiveSession::Game { session, input }),
            ViewKind::Devices => start::<snapview::DeviceSnapshot>(&state.source, &cadence, surface, notify)
                .map(|(session, _)| ActiveSession::Devices(session)),
            ViewKind::System => start::<snapview::SystemSnapshot>(&state.source, &cadence, surface, notify)
                .map(|(session, _)| ActiveSession::System(session)),
        };

        match opened {
            Ok(session) => {
                info!(view = %state.view, source = %session.description(), "session opened");
                state.session = Some(session);
            }
            Err(e) => {
                state.error_message = Some(format!("Error opening {}: {:#}", state.source.describe(), e));
            }
        }
    }

    /// Switches to another view using its configured or default source.
    pub fn switch_view(state: &mut AppState, view: ViewKind, ctx: &egui::Context) {
        state.view = view;
        let source = if view == state.config.view {
            state.config.effective_source()
        } else {
            view.default_source()
        };
        Self::open_session(state, source, ctx);
    }

    /// Shows the snapshot file at `path` in the current view.
    pub fn open_snapshot_file(state: &mut AppState, path: PathBuf, ctx: &egui::Context) {
        Self::open_session(state, SourceConfig::File { path }, ctx);
    }

    pub fn open_demo(state: &mut AppState, ctx: &egui::Context) {
        Self::open_session(state, SourceConfig::Demo { seed: DEMO_SEED }, ctx);
    }

    /// Reopens the current source, e.g. after the server restarted.
    pub fn reconnect(state: &mut AppState, ctx: &egui::Context) {
        let source = state.source.clone();
        Self::open_session(state, source, ctx);
    }

    /// Applies the newest delivered snapshot to the renderer.
    ///
    /// Called once per frame in the update loop.
    /// Returns true if a snapshot was applied.
    pub fn check_feed(state: &mut AppState) -> bool {
        state.session.as_mut().is_some_and(ActiveSession::apply_pending)
    }

    /// Feeds captured input through the tracker and sends the result.
    ///
    /// Without a push channel the flags are still tracked, but nothing is
    /// transmitted.
    pub fn handle_input(state: &mut AppState, events: Vec<InputEvent>) {
        let Some(session) = state.session.as_ref() else {
            return;
        };
        let sender = session.input();
        for event in events {
            let outbound = state.input.handle(event);
            match sender {
                Some(sender) => {
                    sender.send_all(outbound);
                }
                None => debug!(?event, "no input channel, not transmitted"),
            }
        }
    }

    /// Releases every held key, e.g. when the window loses focus.
    pub fn release_input(state: &mut AppState) {
        let outbound = state.input.release_all();
        if let Some(sender) = state.session.as_ref().and_then(|s| s.input()) {
            sender.send(outbound);
        }
    }
}

fn repaint_notify(ctx: &egui::Context) -> Notify {
    let ctx = ctx.clone();
    Box::new(move || ctx.request_repaint())
}

/// Starts the feed for one snapshot family.
fn start<S: SnapshotView>(
    source: &SourceConfig,
    cadence: &CadenceConfig,
    surface: SurfaceConfig,
    notify: Notify,
) -> Result<(Session<S>, Option<InputSender>)> {
    let renderer = SnapshotRenderer::new(surface);

    if let SourceConfig::Push { url, event } = source {
        let config = PushConfig {
            url: url.clone(),
            event: event.clone(),
            reconnect_delay: cadence.reconnect_delay(),
            read_timeout: cadence.read_timeout(),
        };
        let (feed, input) = spawn_push::<S>(config, notify);
        return Ok((Session::new(renderer, feed), Some(input)));
    }

    let pull = transport::pull_source(source, S::KIND)?
        .ok_or_else(|| anyhow!("{} cannot be polled", source.describe()))?;
    let period = if S::KIND == ViewKind::Game {
        GAME_POLL_INTERVAL
    } else {
        cadence.poll_interval()
    };
    let feed = SnapshotFeed::spawn_polling(pull, period, notify);
    Ok((Session::new(renderer, feed), None))
}
