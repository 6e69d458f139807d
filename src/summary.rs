//! Textual counters shown next to the visual surface.

use crate::rendering::text_utils::{format_local_time, format_percent, format_uptime};
use crate::snapshot::{DeviceSnapshot, GameSnapshot, SystemSnapshot};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryField {
    /// Stable identifier, e.g. `score`
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Ordered counters derived from exactly one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    fields: Vec<SummaryField>,
}

impl Summary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, label: &'static str, value: impl Into<String>) -> Self {
        self.fields.push(SummaryField { key, label, value: value.into() });
        self
    }

    pub fn fields(&self) -> &[SummaryField] {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|f| f.key == key).map(|f| f.value.as_str())
    }
}

pub fn game_summary(snapshot: &GameSnapshot) -> Summary {
    Summary::new()
        .with("score", "Score", snapshot.score.to_string())
        .with("level", "Level", snapshot.level.to_string())
        .with("lives", "Lives", snapshot.lives.to_string())
}

/// Counters come from the producer's stats block, not from the device list.
pub fn device_summary(snapshot: &DeviceSnapshot) -> Summary {
    let stats = &snapshot.stats;
    Summary::new()
        .with("total", "Total Devices", stats.total_devices.to_string())
        .with("connected", "Connected", stats.connected_devices.to_string())
        .with("disconnected", "Disconnected", stats.disconnected_devices.to_string())
        .with("last_scan", "Last Scan", format_local_time(&stats.last_scan))
}

pub fn system_summary(snapshot: &SystemSnapshot) -> Summary {
    Summary::new()
        .with("host", "Host", snapshot.system.hostname.clone())
        .with("cpu", "CPU", format_percent(snapshot.cpu.percent))
        .with("memory", "RAM", format_percent(snapshot.memory.ram.percent))
        .with("uptime", "Uptime", format_uptime(snapshot.system.uptime_seconds))
        .with("processes", "Tracked processes", snapshot.processes.cpu_top.len().to_string())
}
