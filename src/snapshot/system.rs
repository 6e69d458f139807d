//! System metrics dashboard snapshot (`GET /api/stats`).
//!
//! The producer reports whatever its platform exposes, so every section is
//! optional and every number tolerates `null`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::default_on_error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SystemSnapshot {
    #[serde(deserialize_with = "default_on_error")]
    pub system: HostInfo,
    #[serde(deserialize_with = "default_on_error")]
    pub cpu: CpuInfo,
    #[serde(deserialize_with = "default_on_error")]
    pub memory: MemoryInfo,
    #[serde(deserialize_with = "default_on_error")]
    pub disk: DiskInfo,
    #[serde(deserialize_with = "default_on_error")]
    pub network: NetworkInfo,
    #[serde(deserialize_with = "default_on_error")]
    pub processes: ProcessInfo,
    #[serde(deserialize_with = "default_on_error")]
    pub sensors: SensorInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HostInfo {
    #[serde(deserialize_with = "default_on_error")]
    pub hostname: String,
    /// OS name and release, e.g. `Linux 6.8.0`
    #[serde(deserialize_with = "default_on_error")]
    pub system: String,
    #[serde(deserialize_with = "default_on_error")]
    pub machine: String,
    #[serde(deserialize_with = "default_on_error")]
    pub boot_time: String,
    #[serde(deserialize_with = "default_on_error")]
    pub uptime_seconds: f64,
    #[serde(deserialize_with = "default_on_error")]
    pub users: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CpuInfo {
    #[serde(deserialize_with = "default_on_error")]
    pub percent: f64,
    #[serde(deserialize_with = "default_on_error")]
    pub per_cpu: Vec<f64>,
    #[serde(deserialize_with = "default_on_error")]
    pub cores: u32,
    #[serde(deserialize_with = "default_on_error")]
    pub physical_cores: u32,
    #[serde(deserialize_with = "default_on_error")]
    pub load_avg: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MemoryInfo {
    #[serde(rename = "virtual", deserialize_with = "default_on_error")]
    pub ram: MemoryUsage,
    #[serde(deserialize_with = "default_on_error")]
    pub swap: MemoryUsage,
}

/// Byte counts as reported by the producer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MemoryUsage {
    #[serde(deserialize_with = "default_on_error")]
    pub total: f64,
    #[serde(deserialize_with = "default_on_error")]
    pub used: f64,
    #[serde(deserialize_with = "default_on_error")]
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiskInfo {
    #[serde(deserialize_with = "default_on_error")]
    pub partitions: Vec<Partition>,
}

/// One mounted partition. Sizes arrive pre-formatted (`"12.50 GB"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Partition {
    #[serde(deserialize_with = "default_on_error")]
    pub device: String,
    #[serde(deserialize_with = "default_on_error")]
    pub mountpoint: String,
    #[serde(deserialize_with = "default_on_error")]
    pub fstype: String,
    #[serde(deserialize_with = "default_on_error")]
    pub total: String,
    #[serde(deserialize_with = "default_on_error")]
    pub used: String,
    #[serde(deserialize_with = "default_on_error")]
    pub free: String,
    #[serde(deserialize_with = "default_on_error")]
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NetworkInfo {
    #[serde(deserialize_with = "default_on_error")]
    pub io: NetworkIo,
    /// Active connections, `-1` when the producer was denied access
    #[serde(deserialize_with = "default_on_error")]
    pub connections: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NetworkIo {
    #[serde(deserialize_with = "default_on_error")]
    pub bytes_sent: f64,
    #[serde(deserialize_with = "default_on_error")]
    pub bytes_recv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProcessInfo {
    #[serde(deserialize_with = "default_on_error")]
    pub cpu_top: Vec<ProcessEntry>,
    #[serde(deserialize_with = "default_on_error")]
    pub mem_top: Vec<ProcessEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProcessEntry {
    #[serde(deserialize_with = "default_on_error")]
    pub pid: u32,
    #[serde(deserialize_with = "default_on_error")]
    pub name: String,
    #[serde(deserialize_with = "default_on_error")]
    pub cpu_percent: f64,
    #[serde(deserialize_with = "default_on_error")]
    pub memory_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SensorInfo {
    /// Sensor chip name to readings; `None` when the platform has no sensors
    #[serde(deserialize_with = "default_on_error")]
    pub temperatures: Option<BTreeMap<String, Vec<TemperatureReading>>>,
    #[serde(deserialize_with = "default_on_error")]
    pub battery: Option<Battery>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TemperatureReading {
    #[serde(deserialize_with = "default_on_error")]
    pub label: String,
    #[serde(deserialize_with = "default_on_error")]
    pub current: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Battery {
    #[serde(deserialize_with = "default_on_error")]
    pub percent: f64,
    /// `None` when the platform cannot tell
    #[serde(deserialize_with = "default_on_error")]
    pub power_plugged: Option<bool>,
}
