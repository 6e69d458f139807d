//! Device list filter selected in the dashboard header.

use std::fmt;
use std::str::FromStr;

use crate::snapshot::Device;

/// Which devices the dashboard shows. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceFilter {
    #[default]
    All,
    Connected,
    Disconnected,
}

impl DeviceFilter {
    pub const ALL: [DeviceFilter; 3] = [DeviceFilter::All, DeviceFilter::Connected, DeviceFilter::Disconnected];

    pub fn as_str(self) -> &'static str {
        match self {
            DeviceFilter::All => "all",
            DeviceFilter::Connected => "connected",
            DeviceFilter::Disconnected => "disconnected",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeviceFilter::All => "All",
            DeviceFilter::Connected => "Connected",
            DeviceFilter::Disconnected => "Disconnected",
        }
    }

    pub fn matches(self, device: &Device) -> bool {
        match self {
            DeviceFilter::All => true,
            DeviceFilter::Connected => device.status.as_str() == "connected",
            DeviceFilter::Disconnected => device.status.as_str() == "disconnected",
        }
    }

    /// Derives the filtered view, preserving snapshot order.
    pub fn apply(self, devices: &[Device]) -> Vec<&Device> {
        devices.iter().filter(|d| self.matches(d)).collect()
    }
}

impl fmt::Display for DeviceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DeviceFilter::All),
            "connected" => Ok(DeviceFilter::Connected),
            "disconnected" => Ok(DeviceFilter::Disconnected),
            other => Err(format!("unknown filter '{}'", other)),
        }
    }
}
