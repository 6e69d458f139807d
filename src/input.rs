//! Game input capture.
//!
//! Raw key and mouse events are folded into two movement flags and turned
//! into outbound messages for the game server. Flags are derived from the
//! set of currently held keys, so holding both `ArrowLeft` and `a` and
//! releasing one of them keeps moving left.

use serde::Serialize;
use std::collections::BTreeSet;

/// Keys the capture surface can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    /// Printable character, case-insensitive
    Char(char),
}

impl Key {
    /// Folds letter case so `A` and `a` are the same held key.
    fn normalized(self) -> Self {
        match self {
            Key::Char(' ') => Key::Space,
            Key::Char(c) => Key::Char(c.to_ascii_lowercase()),
            other => other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Middle,
}

/// What a key means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    MoveLeft,
    MoveRight,
    Shoot,
    Reset,
}

/// Maps a key to its game control, if any.
pub fn control_for(key: Key) -> Option<Control> {
    match key.normalized() {
        Key::ArrowLeft | Key::Char('a') => Some(Control::MoveLeft),
        Key::ArrowRight | Key::Char('d') => Some(Control::MoveRight),
        Key::Space => Some(Control::Shoot),
        Key::Char('r') => Some(Control::Reset),
        Key::Char(_) => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    MouseDown(MouseButton),
}

/// Movement flags as transmitted to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
}

/// Message for the game server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outbound {
    /// Current movement flags
    Input(InputState),
    /// Fire once
    Shoot,
    /// Restart the game
    Reset,
}

/// Tracks held keys and produces the messages each event must transmit.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: BTreeSet<Key>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current flags: OR over held keys mapped to left/right.
    pub fn state(&self) -> InputState {
        let mut state = InputState::default();
        for key in &self.held {
            match control_for(*key) {
                Some(Control::MoveLeft) => state.left = true,
                Some(Control::MoveRight) => state.right = true,
                _ => {}
            }
        }
        state
    }

    /// Applies one event and returns what must be sent, in order.
    ///
    /// Every key press and release transmits the flags, even when nothing
    /// changed. Shoot and reset go out before the flags of the same press.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Outbound> {
        match event {
            InputEvent::KeyDown(key) => {
                let key = key.normalized();
                let mut out = Vec::with_capacity(2);
                match control_for(key) {
                    Some(Control::MoveLeft) | Some(Control::MoveRight) => {
                        self.held.insert(key);
                    }
                    Some(Control::Shoot) => out.push(Outbound::Shoot),
                    Some(Control::Reset) => out.push(Outbound::Reset),
                    None => {}
                }
                out.push(Outbound::Input(self.state()));
                out
            }
            InputEvent::KeyUp(key) => {
                self.held.remove(&key.normalized());
                vec![Outbound::Input(self.state())]
            }
            InputEvent::MouseDown(MouseButton::Primary) => vec![Outbound::Shoot],
            InputEvent::MouseDown(_) => Vec::new(),
        }
    }

    /// Forgets all held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) -> Outbound {
        self.held.clear();
        Outbound::Input(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_input(out: &[Outbound]) -> InputState {
        out.iter()
            .rev()
            .find_map(|o| match o {
                Outbound::Input(state) => Some(*state),
                _ => None,
            })
            .expect("every key event transmits flags")
    }

    #[test]
    fn test_press_and_release_left() {
        let mut tracker = InputTracker::new();
        let out = tracker.handle(InputEvent::KeyDown(Key::ArrowLeft));
        assert_eq!(out, vec![Outbound::Input(InputState { left: true, right: false })]);

        let out = tracker.handle(InputEvent::KeyUp(Key::ArrowLeft));
        assert_eq!(out, vec![Outbound::Input(InputState::default())]);
    }

    #[test]
    fn test_flags_are_or_of_held_keys() {
        let mut tracker = InputTracker::new();
        tracker.handle(InputEvent::KeyDown(Key::ArrowLeft));
        tracker.handle(InputEvent::KeyDown(Key::Char('a')));
        tracker.handle(InputEvent::KeyDown(Key::Char('D')));

        let out = tracker.handle(InputEvent::KeyUp(Key::Char('a')));
        assert_eq!(last_input(&out), InputState { left: true, right: true });

        let out = tracker.handle(InputEvent::KeyUp(Key::ArrowLeft));
        assert_eq!(last_input(&out), InputState { left: false, right: true });

        let out = tracker.handle(InputEvent::KeyUp(Key::Char('d')));
        assert_eq!(last_input(&out), InputState::default());
    }

    #[test]
    fn test_case_is_folded() {
        let mut tracker = InputTracker::new();
        tracker.handle(InputEvent::KeyDown(Key::Char('a')));
        let out = tracker.handle(InputEvent::KeyUp(Key::Char('A')));
        assert_eq!(last_input(&out), InputState::default());
    }

    #[test]
    fn test_release_of_unheld_key_still_transmits() {
        let mut tracker = InputTracker::new();
        tracker.handle(InputEvent::KeyDown(Key::ArrowRight));

        let out = tracker.handle(InputEvent::KeyUp(Key::ArrowLeft));
        assert_eq!(out, vec![Outbound::Input(InputState { left: false, right: true })]);

        let out = tracker.handle(InputEvent::KeyUp(Key::Char('x')));
        assert_eq!(out, vec![Outbound::Input(InputState { left: false, right: true })]);
    }

    #[test]
    fn test_shoot_and_reset_are_one_shot() {
        let mut tracker = InputTracker::new();
        let out = tracker.handle(InputEvent::KeyDown(Key::Space));
        assert_eq!(out, vec![Outbound::Shoot, Outbound::Input(InputState::default())]);

        let out = tracker.handle(InputEvent::KeyDown(Key::Char('R')));
        assert_eq!(out, vec![Outbound::Reset, Outbound::Input(InputState::default())]);

        // Neither is held state
        assert_eq!(tracker.state(), InputState::default());
    }

    #[test]
    fn test_mouse_primary_shoots() {
        let mut tracker = InputTracker::new();
        assert_eq!(tracker.handle(InputEvent::MouseDown(MouseButton::Primary)), vec![Outbound::Shoot]);
        assert!(tracker.handle(InputEvent::MouseDown(MouseButton::Secondary)).is_empty());
    }

    #[test]
    fn test_state_serializes_as_flags() {
        let json = serde_json::to_value(InputState { left: true, right: false }).unwrap();
        assert_eq!(json, serde_json::json!({"left": true, "right": false}));
    }

    #[test]
    fn test_release_all() {
        let mut tracker = InputTracker::new();
        tracker.handle(InputEvent::KeyDown(Key::ArrowLeft));
        assert_eq!(tracker.release_all(), Outbound::Input(InputState::default()));
    }
}
