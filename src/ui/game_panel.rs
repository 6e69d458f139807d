//! Game view: summary counters above the scaled canvas.

use eframe::egui;
use snapview::input::MouseButton;
use snapview::rendering::DisplayList;
use snapview::Summary;

use crate::ui::input::game_input::map_button;
use crate::ui::painter::{paint_display_list, show_summary};

/// Result of user interaction with the game panel
pub enum GamePanelInteraction {
    /// A mouse button went down over the canvas
    CanvasPressed(MouseButton),
}

/// Renders the game summary and canvas
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `summary` - Counters for the current snapshot
/// * `canvas` - Display list for the current snapshot
pub fn render_game_panel(ui: &mut egui::Ui, summary: &Summary, canvas: &DisplayList) -> Option<GamePanelInteraction> {
    show_summary(ui, summary);
    ui.add_space(4.0);

    let mut interaction = None;
    ui.vertical_centered(|ui| {
        let response = paint_display_list(ui, canvas);
        if response.hovered() {
            let pressed = ui.input(|i| {
                [egui::PointerButton::Primary, egui::PointerButton::Secondary, egui::PointerButton::Middle]
                    .into_iter()
                    .find(|b| i.pointer.button_pressed(*b))
            });
            if let Some(button) = pressed {
                interaction = Some(GamePanelInteraction::CanvasPressed(map_button(button)));
            }
        }
    });

    ui.label(egui::RichText::new("← → / A D move · Space or click to shoot · R restart").small().weak());
    interaction
}
