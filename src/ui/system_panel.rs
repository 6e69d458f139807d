//! System metrics dashboard.

use eframe::egui;
use snapview::rendering::ViewNode;
use snapview::Summary;

use crate::ui::painter::{show_summary, show_view_node};

pub fn render_system_panel(ui: &mut egui::Ui, summary: &Summary, dashboard: &ViewNode) {
    show_summary(ui, summary);
    ui.separator();

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        show_view_node(ui, dashboard);
    });
}
