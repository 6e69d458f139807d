//! Status bar UI rendering
//!
//! Shows process memory and the health of the active feed.

use eframe::egui;
use egui::{Color32, RichText};

use crate::app::{ActiveSession, AppState};
use crate::utils::{format_age, format_memory_mb, get_current_memory_mb};

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    ui.horizontal(|ui| {
        // Always show memory usage first
        let memory_text = format_memory_mb(get_current_memory_mb());
        ui.label(RichText::new(&memory_text).strong());
        ui.label(RichText::new("|").strong());

        match &state.session {
            Some(session) => render_session_status(ui, session),
            None => {
                ui.label(RichText::new("No source open").strong());
            }
        }
    });
}

fn render_session_status(ui: &mut egui::Ui, session: &ActiveSession) {
    let stats = session.feed_stats();

    ui.label(RichText::new(session.description()).strong());

    if let ActiveSession::Game { input: Some(_), .. } = session {
        let (text, color) = if stats.connected {
            ("connected", Color32::GREEN)
        } else {
            ("disconnected", Color32::RED)
        };
        ui.label(RichText::new(text).strong().color(color));
    }

    ui.label(RichText::new("|").strong());
    ui.label(RichText::new(format!(
        "Snapshots: {} | Failures: {} | {}",
        session.received(),
        stats.failures,
        format_age(session.snapshot_age())
    )).strong());

    if let Some(err) = &stats.last_error {
        ui.label(RichText::new("|").strong());
        ui.label(RichText::new(format!("Last error: {}", err)).color(Color32::YELLOW));
    }
}
