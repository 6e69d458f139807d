//! Seams between the renderer core and its collaborators.
//!
//! - `SnapshotView`: how one snapshot family summarises and draws itself
//! - `SnapshotSource`: how raw snapshot bytes are obtained for polling
//!
//! The renderer and the feed are generic over these traits, so a new
//! snapshot family or transport plugs in without touching either.

use serde::de::DeserializeOwned;

use crate::config::ViewKind;
use crate::error::FeedResult;
use crate::renderer::RenderContext;
use crate::rendering::device_view::device_grid;
use crate::rendering::game_frame::compose_game_frame;
use crate::rendering::system_view::system_dashboard;
use crate::rendering::Frame;
use crate::snapshot::{DeviceSnapshot, GameSnapshot, SystemSnapshot};
use crate::summary::{self, Summary};

/// A snapshot family the renderer can display.
///
/// `Default` is the placeholder rendered before the first delivery.
pub trait SnapshotView: DeserializeOwned + Default + Clone + Send + 'static {
    const KIND: ViewKind;

    /// Textual counters for the summary surface.
    fn summary(&self) -> Summary;

    /// Full redraw of the visual surface. Must be a pure function of the
    /// snapshot and the context.
    fn compose(&self, ctx: &RenderContext<'_>) -> Frame;
}

impl SnapshotView for GameSnapshot {
    const KIND: ViewKind = ViewKind::Game;

    fn summary(&self) -> Summary {
        summary::game_summary(self)
    }

    fn compose(&self, ctx: &RenderContext<'_>) -> Frame {
        Frame::Canvas(compose_game_frame(self, ctx.surface, ctx.starfield))
    }
}

impl SnapshotView for DeviceSnapshot {
    const KIND: ViewKind = ViewKind::Devices;

    fn summary(&self) -> Summary {
        summary::device_summary(self)
    }

    fn compose(&self, ctx: &RenderContext<'_>) -> Frame {
        Frame::Panels(device_grid(self, ctx.filter))
    }
}

impl SnapshotView for SystemSnapshot {
    const KIND: ViewKind = ViewKind::System;

    fn summary(&self) -> Summary {
        summary::system_summary(self)
    }

    fn compose(&self, _ctx: &RenderContext<'_>) -> Frame {
        Frame::Panels(system_dashboard(self))
    }
}

/// Pull-style producer of raw snapshot payloads.
///
/// Each call performs one fetch; the feed worker calls it once per data
/// cadence tick.
pub trait SnapshotSource: Send {
    /// Short description for logs and the status bar.
    fn describe(&self) -> String;

    /// Fetches one raw JSON payload.
    fn fetch(&mut self) -> FeedResult<Vec<u8>>;
}

impl<T: SnapshotSource + ?Sized> SnapshotSource for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn fetch(&mut self) -> FeedResult<Vec<u8>> {
        (**self).fetch()
    }
}
