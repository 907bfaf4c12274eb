//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the dashboard:
//! - Header panel (title, analysis loading, export buttons, toggles)
//! - Sandbox panel (topic list and concept cards)
//! - Toasts (notifications mirrored from the document)
//! - Status bar (memory, analysis, export activity)
//! - Panel manager (panel orchestration and layout)

pub mod header;
pub mod sandbox_panel;
pub mod toasts;
pub mod status_bar;
pub mod panel_manager;
