//! Header panel UI rendering
//!
//! View selector, source controls and the current error message.

use eframe::egui;
use egui::Color32;
use snapview::ViewKind;
use std::path::PathBuf;

use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    ViewSelected(ViewKind),
    /// User picked a snapshot file
    OpenFileRequested(PathBuf),
    OpenDemoRequested,
    ReconnectRequested,
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        for kind in ViewKind::ALL {
            if ui.selectable_label(state.view == kind, kind.title()).clicked() && state.view != kind {
                interaction = Some(HeaderInteraction::ViewSelected(kind));
            }
        }

        ui.separator();

        if ui.button("📁 Open Snapshot").clicked() {
            let mut dialog = rfd::FileDialog::new()
                .add_filter("Snapshot Files", &["json", "br"])
                .add_filter("Compressed Snapshots", &["br"]);

            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }

            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🔮 Demo").clicked() {
            interaction = Some(HeaderInteraction::OpenDemoRequested);
        }

        if ui
            .button("⟳ Reconnect")
            .on_hover_text(state.source.describe())
            .clicked()
        {
            interaction = Some(HeaderInteraction::ReconnectRequested);
        }
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
