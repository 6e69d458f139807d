//! Device dashboard: counters, filter buttons and the device grid.

use eframe::egui;
use snapview::rendering::ViewNode;
use snapview::{DeviceFilter, Summary};

use crate::ui::painter::{show_summary, show_view_node};

pub enum DevicePanelInteraction {
    FilterSelected(DeviceFilter),
}

/// Renders the device dashboard
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `summary` - Stats counters for the current snapshot
/// * `grid` - Device grid composed for `filter`
/// * `filter` - Filter currently applied
pub fn render_device_panel(
    ui: &mut egui::Ui,
    summary: &Summary,
    grid: &ViewNode,
    filter: DeviceFilter,
) -> Option<DevicePanelInteraction> {
    let mut interaction = None;

    show_summary(ui, summary);
    ui.horizontal(|ui| {
        ui.label("Filter:");
        for candidate in DeviceFilter::ALL {
            if ui.selectable_label(filter == candidate, candidate.label()).clicked() && filter != candidate {
                interaction = Some(DevicePanelInteraction::FilterSelected(candidate));
            }
        }
    });
    ui.separator();

    egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
        show_view_node(ui, grid);
    });

    interaction
}
