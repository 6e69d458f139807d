//! Network device dashboard snapshot (`GET /api/devices`).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::default_on_error;

/// Connection status reported by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Connected,
    #[default]
    Disconnected,
    /// Any status string this client does not know about
    #[serde(untagged)]
    Other(String),
}

impl DeviceStatus {
    pub fn as_str(&self) -> &str {
        match self {
            DeviceStatus::Connected => "connected",
            DeviceStatus::Disconnected => "disconnected",
            DeviceStatus::Other(s) => s,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, DeviceStatus::Connected)
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Device {
    #[serde(deserialize_with = "default_on_error")]
    pub mac: String,
    #[serde(deserialize_with = "default_on_error")]
    pub ip: String,
    /// Empty when the scanner could not resolve a name
    #[serde(deserialize_with = "default_on_error")]
    pub hostname: String,
    #[serde(deserialize_with = "default_on_error")]
    pub vendor: String,
    /// `%Y-%m-%d %H:%M:%S` in the scanner's local time
    #[serde(deserialize_with = "default_on_error")]
    pub first_seen: String,
    #[serde(deserialize_with = "default_on_error")]
    pub last_seen: String,
    #[serde(deserialize_with = "default_on_error")]
    pub status: DeviceStatus,
    #[serde(deserialize_with = "default_on_error")]
    pub connection_count: u64,
    /// Recent addresses, newest last; entry shape varies by scanner, only the count is read
    #[serde(deserialize_with = "default_on_error")]
    pub ip_history: Vec<serde_json::Value>,
}

impl Device {
    /// True when the device has been seen on more than one address.
    pub fn ip_changed(&self) -> bool {
        self.ip_history.len() > 1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeviceStats {
    #[serde(deserialize_with = "default_on_error")]
    pub total_scans: u64,
    #[serde(deserialize_with = "default_on_error")]
    pub total_devices: u64,
    #[serde(deserialize_with = "default_on_error")]
    pub connected_devices: u64,
    #[serde(deserialize_with = "default_on_error")]
    pub disconnected_devices: u64,
    /// Timestamp of the last scan, or `Never`
    #[serde(deserialize_with = "default_on_error")]
    pub last_scan: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DeviceSnapshot {
    #[serde(deserialize_with = "default_on_error")]
    pub devices: Vec<Device>,
    #[serde(deserialize_with = "default_on_error")]
    pub stats: DeviceStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_scanner_payload() {
        let snapshot: DeviceSnapshot = serde_json::from_value(serde_json::json!({
            "devices": [{
                "mac": "aabbccddeeff",
                "ip": "192.168.1.20",
                "hostname": null,
                "vendor": "Espressif",
                "first_seen": "2024-05-01 10:00:00",
                "last_seen": "2024-05-01 10:05:00",
                "status": "connected",
                "connection_count": 4,
                "ip_history": [["192.168.1.19", "2024-05-01 10:01:00"], ["192.168.1.20", "2024-05-01 10:03:00"]]
            }],
            "stats": {"total_scans": 9, "total_devices": 1, "connected_devices": 1,
                      "disconnected_devices": 0, "last_scan": "2024-05-01 10:05:00"}
        }))
        .unwrap();

        let device = &snapshot.devices[0];
        assert_eq!(device.hostname, "");
        assert!(device.status.is_connected());
        assert!(device.ip_changed());
        assert_eq!(snapshot.stats.total_scans, 9);
    }

    #[test]
    fn test_mistyped_fields_fall_back_per_field() {
        let device: Device = serde_json::from_value(serde_json::json!({
            "mac": "aabbccddeeff",
            "connection_count": "many",
            "ip_history": ["10.0.0.1", "10.0.0.2"]
        }))
        .unwrap();
        assert_eq!(device.mac, "aabbccddeeff");
        assert_eq!(device.connection_count, 0);
        assert!(device.ip_changed());

        let snapshot: DeviceSnapshot =
            serde_json::from_str(r#"{"devices": [{"mac": "01"}], "stats": {"total_devices": 1.5}}"#).unwrap();
        assert_eq!(snapshot.devices.len(), 1);
        assert_eq!(snapshot.stats.total_devices, 0);
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let device: Device = serde_json::from_str(r#"{"status": "sleeping"}"#).unwrap();
        assert_eq!(device.status, DeviceStatus::Other("sleeping".to_string()));
        assert!(!device.status.is_connected());
    }
}
