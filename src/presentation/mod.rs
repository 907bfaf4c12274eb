//! Presentation layer for visual styling and color mapping.
//!
//! This module keeps egui colors out of the dashboard logic:
//! - Palette variables read back from the document
//! - Accent, severity and callout colors

pub mod color_mapping;
