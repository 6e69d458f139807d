//! Application-level modules for the snapshot viewer.
//!
//! This module contains the application coordinator and centralized state management.

mod app_state;
mod application_coordinator;
mod settings_coordinator;

pub use app_state::{ActiveSession, AppState};
pub use application_coordinator::ApplicationCoordinator;
pub use settings_coordinator::SettingsCoordinator;
