//! Application-level modules for the dashboard window.
//!
//! This module contains the application coordinators and the centralized state.

mod app_state;
mod application_coordinator;
mod theme_coordinator;
mod settings_coordinator;

pub use app_state::{AppState, CardGrid, LayoutSettings};
pub use application_coordinator::ApplicationCoordinator;
pub use theme_coordinator::ThemeCoordinator;
pub use settings_coordinator::SettingsCoordinator;
