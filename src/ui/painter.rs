//! Turns composed frames into egui output.
//!
//! Game frames are painted onto a canvas scaled to fit the panel while
//! keeping the logical surface's aspect ratio. Dashboard view trees are laid
//! out as regular widgets.

use eframe::egui;
use egui::{Color32, FontId, RichText, Stroke};
use snapview::rendering::{DisplayList, DrawCommand, Rgba, TextAlign, Tone, ViewNode};
use snapview::Summary;

/// Width of one dashboard card.
const CARD_WIDTH: f32 = 300.0;

/// Height of a bar chart's plot area.
const CHART_HEIGHT: f32 = 110.0;

const GOOD: Color32 = Color32::from_rgb(0x4a, 0xde, 0x80);
const BAD: Color32 = Color32::from_rgb(0xef, 0x44, 0x44);
const WARNING: Color32 = Color32::from_rgb(0xfb, 0xbf, 0x24);
const CHART_BAR: Color32 = Color32::from_rgb(0x3b, 0x82, 0xf6);

pub fn to_color32(color: Rgba) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn tone_color(ui: &egui::Ui, tone: Tone) -> Color32 {
    match tone {
        Tone::Neutral => ui.visuals().text_color(),
        Tone::Good => GOOD,
        Tone::Bad => BAD,
        Tone::Warning => WARNING,
    }
}

/// Largest scale at which a `width` x `height` surface fits in `available`.
///
/// Never scales above 1:1 by more than a factor of two, and never to zero.
pub fn fit_scale(available: egui::Vec2, width: f32, height: f32) -> f32 {
    if width <= 0.0 || height <= 0.0 {
        return 1.0;
    }
    (available.x / width).min(available.y / height).clamp(0.1, 2.0)
}

/// Paints a game frame and returns the canvas response for pointer input.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `list` - Display list composed by the renderer
pub fn paint_display_list(ui: &mut egui::Ui, list: &DisplayList) -> egui::Response {
    let scale = fit_scale(ui.available_size(), list.width, list.height);
    let size = egui::vec2(list.width * scale, list.height * scale);
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    let painter = ui.painter_at(rect);

    let to_screen = |x: f32, y: f32| rect.min + egui::vec2(x * scale, y * scale);

    for command in list.commands() {
        match command {
            DrawCommand::Clear(color) => {
                painter.rect_filled(rect, 0.0, to_color32(*color));
            }
            DrawCommand::FillRect { rect: r, color } => {
                let screen = egui::Rect::from_min_size(to_screen(r.x, r.y), egui::vec2(r.width * scale, r.height * scale));
                painter.rect_filled(screen, 0.0, to_color32(*color));
            }
            DrawCommand::Text {
                x,
                y,
                text,
                font,
                color,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => egui::Align2::LEFT_BOTTOM,
                    TextAlign::Center => egui::Align2::CENTER_BOTTOM,
                };
                let font_id = if font.monospace {
                    FontId::monospace(font.size * scale)
                } else {
                    FontId::proportional(font.size * scale)
                };
                let pos = to_screen(*x, *y);
                let color = to_color32(*color);
                if font.bold {
                    // No bold face in the default fonts; overstrike instead
                    painter.text(pos + egui::vec2(1.0, 0.0), anchor, text, font_id.clone(), color);
                }
                painter.text(pos, anchor, text, font_id, color);
            }
        }
    }

    response
}

/// Lays out a dashboard view tree.
pub fn show_view_node(ui: &mut egui::Ui, node: &ViewNode) {
    match node {
        ViewNode::Grid(cards) => {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
                for card in cards {
                    ui.allocate_ui(egui::vec2(CARD_WIDTH, 0.0), |ui| show_view_node(ui, card));
                }
            });
        }
        ViewNode::Card { title, tone, children } => {
            let stroke_color = match tone {
                Tone::Neutral => ui.visuals().widgets.noninteractive.bg_stroke.color,
                other => tone_color(ui, *other),
            };
            egui::Frame::group(ui.style())
                .stroke(Stroke::new(1.0, stroke_color))
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.set_width(CARD_WIDTH - 16.0);
                    ui.vertical(|ui| {
                        if let Some(title) = title {
                            ui.label(RichText::new(title).strong().size(15.0));
                            ui.separator();
                        }
                        for child in children {
                            show_view_node(ui, child);
                        }
                    });
                });
        }
        ViewNode::Row(children) => {
            ui.horizontal(|ui| {
                for child in children {
                    show_view_node(ui, child);
                }
            });
        }
        ViewNode::Heading(text) => {
            ui.label(RichText::new(text).strong().size(16.0));
        }
        ViewNode::Text(text) => {
            ui.label(text);
        }
        ViewNode::Field { label, value } => {
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{}:", label)).weak());
                ui.label(RichText::new(value).monospace());
            });
        }
        ViewNode::Badge { text, tone } => {
            let color = tone_color(ui, *tone);
            ui.label(RichText::new(text).small().strong().color(color));
        }
        ViewNode::Progress { percent } => {
            ui.add(
                egui::ProgressBar::new((*percent / 100.0) as f32)
                    .desired_height(8.0)
                    .desired_width(ui.available_width()),
            );
        }
        ViewNode::Table { headers, rows } => {
            egui::Grid::new(ui.next_auto_id())
                .striped(true)
                .num_columns(headers.len())
                .show(ui, |ui| {
                    for header in headers {
                        ui.label(RichText::new(header).strong());
                    }
                    ui.end_row();
                    for row in rows {
                        for cell in row {
                            ui.label(RichText::new(cell).monospace());
                        }
                        ui.end_row();
                    }
                });
        }
        ViewNode::BarChart { title, bars, max } => paint_bar_chart(ui, title, bars, *max),
        ViewNode::Notice(text) => {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(text).monospace().size(18.0).weak());
            });
        }
    }
}

/// Summary counters as one line of `Label: value` pairs.
pub fn show_summary(ui: &mut egui::Ui, summary: &Summary) {
    ui.horizontal_wrapped(|ui| {
        for field in summary.fields() {
            ui.label(RichText::new(format!("{}:", field.label)).weak());
            ui.label(RichText::new(&field.value).strong().monospace());
            ui.add_space(12.0);
        }
    });
}

fn paint_bar_chart(ui: &mut egui::Ui, title: &str, bars: &[(String, f64)], max: f64) {
    ui.label(RichText::new(title).small());
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, CHART_HEIGHT + 14.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    let plot = egui::Rect::from_min_max(rect.min, egui::pos2(rect.max.x, rect.min.y + CHART_HEIGHT));

    painter.rect_stroke(plot, 0.0, ui.visuals().widgets.noninteractive.bg_stroke, egui::StrokeKind::Inside);
    if bars.is_empty() || max <= 0.0 {
        return;
    }

    let slot = plot.width() / bars.len() as f32;
    let text_color = ui.visuals().weak_text_color();
    for (i, (label, value)) in bars.iter().enumerate() {
        let fraction = (value / max).clamp(0.0, 1.0) as f32;
        let x0 = plot.min.x + i as f32 * slot + slot * 0.15;
        let x1 = plot.min.x + (i + 1) as f32 * slot - slot * 0.15;
        let top = plot.max.y - fraction * plot.height();
        painter.rect_filled(
            egui::Rect::from_min_max(egui::pos2(x0, top), egui::pos2(x1, plot.max.y)),
            1.0,
            CHART_BAR,
        );
        painter.text(
            egui::pos2((x0 + x1) / 2.0, plot.max.y + 2.0),
            egui::Align2::CENTER_TOP,
            label.trim_start_matches("Core "),
            FontId::proportional(9.0),
            text_color,
        );
    }
}
