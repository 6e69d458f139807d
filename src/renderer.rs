//! Snapshot renderer core.
//!
//! Holds the most recent snapshot of one family and turns it into frames.
//! Each delivery replaces the held snapshot wholesale; nothing from an older
//! snapshot survives into a later frame.

use std::time::{Duration, Instant};

use crate::config::SurfaceConfig;
use crate::filter::DeviceFilter;
use crate::rendering::{Frame, Starfield};
use crate::summary::Summary;
use crate::traits::SnapshotView;

/// Seed used for the starfield when the caller does not choose one.
pub const DEFAULT_STAR_SEED: u64 = 0x5eed;

/// Everything a view needs besides its snapshot to compose a frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub surface: &'a SurfaceConfig,
    pub starfield: &'a Starfield,
    pub filter: DeviceFilter,
}

/// Renderer for one snapshot family.
///
/// # Type Parameters
/// * `S` - The snapshot family, e.g. `GameSnapshot`
pub struct SnapshotRenderer<S: SnapshotView> {
    current: S,
    received: u64,
    last_received_at: Option<Instant>,
    surface: SurfaceConfig,
    starfield: Starfield,
}

impl<S: SnapshotView> SnapshotRenderer<S> {
    /// Creates a renderer holding the placeholder snapshot.
    pub fn new(surface: SurfaceConfig) -> Self {
        Self::with_star_seed(surface, DEFAULT_STAR_SEED)
    }

    /// Creates a renderer whose background stars come from `seed`.
    pub fn with_star_seed(surface: SurfaceConfig, seed: u64) -> Self {
        Self {
            current: S::default(),
            received: 0,
            last_received_at: None,
            starfield: Starfield::generate(seed, surface.width, surface.height),
            surface,
        }
    }

    /// Replaces the held snapshot with `snapshot`.
    pub fn on_snapshot_received(&mut self, snapshot: S) {
        self.current = snapshot;
        self.received += 1;
        self.last_received_at = Some(Instant::now());
    }

    /// Composes a frame from the held snapshot.
    ///
    /// Pure with respect to the snapshot: calling it repeatedly without a new
    /// delivery yields identical frames.
    ///
    /// # Arguments
    /// * `filter` - Device filter; ignored by families without a device list
    pub fn render_frame(&self, filter: DeviceFilter) -> Frame {
        let ctx = RenderContext {
            surface: &self.surface,
            starfield: &self.starfield,
            filter,
        };
        self.current.compose(&ctx)
    }

    pub fn render_summary(&self) -> Summary {
        self.current.summary()
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    /// Number of snapshots delivered so far.
    pub fn received(&self) -> u64 {
        self.received
    }

    /// True until the first snapshot arrives.
    pub fn is_placeholder(&self) -> bool {
        self.received == 0
    }

    /// Time since the last delivery, if any.
    pub fn snapshot_age(&self) -> Option<Duration> {
        self.last_received_at.map(|at| at.elapsed())
    }

    pub fn surface(&self) -> &SurfaceConfig {
        &self.surface
    }
}
