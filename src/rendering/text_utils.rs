//! Text formatting for summary counters and dashboard fields.

use chrono::{DateTime, Local, NaiveDateTime};

/// Timestamp layout used by the dashboard producers.
const PRODUCER_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// Formats a hardware address as upper-case colon-separated pairs.
///
/// Existing separators are dropped first, so `aa:bb:cc`, `aa-bb-cc` and
/// `aabbcc` all become `AA:BB:CC`.
pub fn format_mac(mac: &str) -> String {
    let digits: Vec<char> = mac
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    digits
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(":")
}

/// Renders a producer timestamp as a local time of day (`HH:MM:SS`).
///
/// RFC 3339 timestamps are converted to local time. Anything unparseable,
/// such as `Never`, is shown as-is.
pub fn format_local_time(timestamp: &str) -> String {
    let trimmed = timestamp.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, PRODUCER_TIMESTAMP) {
        return naive.format("%H:%M:%S").to_string();
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return parsed.with_timezone(&Local).format("%H:%M:%S").to_string();
    }
    trimmed.to_string()
}

/// `7380` seconds -> `2h 3m`.
pub fn format_uptime(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 { seconds as u64 } else { 0 };
    format!("{}h {}m", total / 3600, (total % 3600) / 60)
}

pub fn format_gb(bytes: f64) -> String {
    format!("{:.2}GB", bytes / 1e9)
}

pub fn format_mb(bytes: f64) -> String {
    format!("{:.2} MB", bytes / 1e6)
}

/// Percent as the producer reported it, without trailing `.0`.
pub fn format_percent(percent: f64) -> String {
    if percent.fract() == 0.0 {
        format!("{}%", percent as i64)
    } else {
        format!("{:.1}%", percent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mac_grouping() {
        assert_eq!(format_mac("aabbccddeeff"), "AA:BB:CC:DD:EE:FF");
        assert_eq!(format_mac("aa:bb:cc:dd:ee:ff"), "AA:BB:CC:DD:EE:FF");
        assert_eq!(format_mac("aa-bb-c"), "AA:BB:C");
        assert_eq!(format_mac(""), "");
    }

    #[test]
    fn test_local_time() {
        assert_eq!(format_local_time("2024-05-01 10:05:09"), "10:05:09");
        assert_eq!(format_local_time("Never"), "Never");
        assert_eq!(format_local_time(""), "");
    }

    #[test]
    fn test_uptime() {
        assert_eq!(format_uptime(7380.5), "2h 3m");
        assert_eq!(format_uptime(59.0), "0h 0m");
        assert_eq!(format_uptime(-1.0), "0h 0m");
    }

    #[test]
    fn test_sizes_and_percent() {
        assert_eq!(format_gb(8e9), "8.00GB");
        assert_eq!(format_mb(1.5e6), "1.50 MB");
        assert_eq!(format_percent(25.0), "25%");
        assert_eq!(format_percent(33.33), "33.3%");
    }
}
