//! Keyboard capture for the game view.
//!
//! Translates egui's raw events into `InputEvent`s. Every key press and
//! release is forwarded, auto-repeat included, since each one transmits the
//! current flags. Mouse presses are reported by the canvas itself.

use eframe::egui;
use snapview::input::{InputEvent, Key, MouseButton};

/// Input gathered during one frame.
#[derive(Debug, Default, PartialEq)]
pub struct CapturedInput {
    pub events: Vec<InputEvent>,
    /// The window lost focus; held keys will never see their release
    pub focus_lost: bool,
}

/// Maps an egui key to the keys the game understands.
pub fn map_key(key: egui::Key) -> Option<Key> {
    match key {
        egui::Key::ArrowLeft => Some(Key::ArrowLeft),
        egui::Key::ArrowRight => Some(Key::ArrowRight),
        egui::Key::Space => Some(Key::Space),
        other => {
            let mut chars = other.name().chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_alphanumeric() => Some(Key::Char(c.to_ascii_lowercase())),
                _ => None,
            }
        }
    }
}

pub fn map_button(button: egui::PointerButton) -> MouseButton {
    match button {
        egui::PointerButton::Primary => MouseButton::Primary,
        egui::PointerButton::Secondary => MouseButton::Secondary,
        _ => MouseButton::Middle,
    }
}

/// Translates raw events, in arrival order.
pub fn translate_events(events: &[egui::Event]) -> CapturedInput {
    let mut captured = CapturedInput::default();
    for event in events {
        match event {
            egui::Event::Key { key, pressed, .. } => {
                if let Some(key) = map_key(*key) {
                    captured.events.push(if *pressed {
                        InputEvent::KeyDown(key)
                    } else {
                        InputEvent::KeyUp(key)
                    });
                }
            }
            egui::Event::WindowFocused(false) => captured.focus_lost = true,
            _ => {}
        }
    }
    captured
}

/// Collects this frame's game input, unless a text field has focus.
pub fn capture_game_input(ctx: &egui::Context) -> CapturedInput {
    let captured = ctx.input(|i| translate_events(&i.events));
    if ctx.wants_keyboard_input() {
        return CapturedInput {
            events: Vec::new(),
            focus_lost: captured.focus_lost,
        };
    }
    captured
}
