//! Text formatting utilities for the status bar.

use once_cell::sync::Lazy;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use sysinfo::{Pid, ProcessRefreshKind, RefreshKind, System};

static SYSTEM: Lazy<Mutex<System>> = Lazy::new(|| {
    Mutex::new(System::new_with_specifics(
        RefreshKind::new().with_processes(ProcessRefreshKind::new().with_memory()),
    ))
});

/// Gets the current process memory usage in megabytes.
///
/// Returns 0.0 if the process information cannot be retrieved.
pub fn get_current_memory_mb() -> f64 {
    let mut sys = SYSTEM.lock().unwrap_or_else(PoisonError::into_inner);
    sys.refresh_processes_specifics(ProcessRefreshKind::new().with_memory());

    if let Some(process) = sys.process(Pid::from_u32(std::process::id())) {
        process.memory() as f64 / (1024.0 * 1024.0)
    } else {
        0.0
    }
}

/// Formats memory usage in MB as a human-readable string.
///
/// # Arguments
/// * `memory_mb` - Memory usage in megabytes
pub fn format_memory_mb(memory_mb: f64) -> String {
    if memory_mb > 1024.0 {
        format!("Memory: {:.2} GB", memory_mb / 1024.0)
    } else {
        format!("Memory: {:.1} MB", memory_mb)
    }
}

/// Formats the time since the last snapshot, e.g. `updated 3s ago`.
pub fn format_age(age: Option<Duration>) -> String {
    match age {
        None => "no snapshot yet".to_string(),
        Some(age) if age.as_secs() < 60 => format!("updated {}s ago", age.as_secs()),
        Some(age) => format!("updated {}m {}s ago", age.as_secs() / 60, age.as_secs() % 60),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_memory() {
        assert_eq!(format_memory_mb(512.5), "Memory: 512.5 MB");
        assert_eq!(format_memory_mb(2048.0), "Memory: 2.00 GB");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(None), "no snapshot yet");
        assert_eq!(format_age(Some(Duration::from_millis(3400))), "updated 3s ago");
        assert_eq!(format_age(Some(Duration::from_secs(125))), "updated 2m 5s ago");
    }

    #[test]
    fn test_memory_is_non_negative() {
        assert!(get_current_memory_mb() >= 0.0);
    }
}
