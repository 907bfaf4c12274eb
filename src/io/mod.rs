//! Background I/O for the dashboard window.

pub mod async_exporter;

// Re-export commonly used types
pub use async_exporter::AsyncExporter;
