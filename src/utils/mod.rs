//! Utility modules for the snapshot viewer.

pub mod formatting;

// Re-export commonly used functions
pub use formatting::{format_age, format_memory_mb, get_current_memory_mb};
