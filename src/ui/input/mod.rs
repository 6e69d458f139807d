//! Input handling subsystem for UI interactions.
//!
//! - Game keyboard capture and focus tracking

pub mod game_input;
