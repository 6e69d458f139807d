//! Panel orchestration and layout management.
//!
//! Header on top, status bar at the bottom and the active view in the
//! central panel.

use std::path::PathBuf;
use std::time::Instant;

use eframe::egui;
use snapview::input::MouseButton;
use snapview::{DeviceFilter, Frame, ViewKind};

use crate::app::AppState;
use crate::ui::device_panel::{self, DevicePanelInteraction};
use crate::ui::game_panel::{self, GamePanelInteraction};
use crate::ui::{header, status_bar, system_panel};

/// Result of panel interactions that need to be handled by the application coordinator.
pub enum PanelInteraction {
    ViewSelected(ViewKind),
    /// User requested to open a snapshot file
    OpenFileRequested(PathBuf),
    OpenDemoRequested,
    ReconnectRequested,
    /// A device filter button was clicked
    FilterSelected(DeviceFilter),
    /// A mouse button went down over the game canvas
    CanvasPressed(MouseButton),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// Called from `eframe::App::update()` after pending snapshots have been
    /// applied.
    pub fn render_all_panels(ctx: &egui::Context, state: &mut AppState) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::ViewSelected(view) => PanelInteraction::ViewSelected(view),
                    header::HeaderInteraction::OpenFileRequested(path) => PanelInteraction::OpenFileRequested(path),
                    header::HeaderInteraction::OpenDemoRequested => PanelInteraction::OpenDemoRequested,
                    header::HeaderInteraction::ReconnectRequested => PanelInteraction::ReconnectRequested,
                });
            }
        });

        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        let central_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(8))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default().frame(central_frame).show(ctx, |ui| {
            let Some((kind, summary)) = state.session.as_ref().map(|s| (s.kind(), s.render_summary())) else {
                ui.centered_and_justified(|ui| {
                    ui.label("No snapshot source open");
                });
                return;
            };
            let filter = state.filter;

            match (kind, state.current_frame(Instant::now())) {
                (_, Some(Frame::Canvas(canvas))) => {
                    if let Some(GamePanelInteraction::CanvasPressed(button)) =
                        game_panel::render_game_panel(ui, &summary, canvas)
                    {
                        interaction = Some(PanelInteraction::CanvasPressed(button));
                    }
                }
                (ViewKind::Devices, Some(Frame::Panels(tree))) => {
                    if let Some(DevicePanelInteraction::FilterSelected(selected)) =
                        device_panel::render_device_panel(ui, &summary, tree, filter)
                    {
                        interaction = Some(PanelInteraction::FilterSelected(selected));
                    }
                }
                (_, Some(Frame::Panels(tree))) => system_panel::render_system_panel(ui, &summary, tree),
                (_, None) => {}
            }
        });

        interaction
    }
}
