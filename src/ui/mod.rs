//! UI panel rendering subsystem
//!
//! - Header panel (view selector, source controls)
//! - Game, device and system panels for the central area
//! - Status bar (memory, feed health)
//! - Painter (display lists and view trees to egui)
//! - Panel manager (panel orchestration and layout)
//! - Input handling (game keyboard capture)

pub mod header;
pub mod game_panel;
pub mod device_panel;
pub mod system_panel;
pub mod status_bar;
pub mod painter;
pub mod panel_manager;
pub mod input;
