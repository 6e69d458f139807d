//! Device dashboard view builders.

use crate::filter::DeviceFilter;
use crate::rendering::text_utils::{format_local_time, format_mac};
use crate::rendering::view_tree::{Tone, ViewNode};
use crate::snapshot::{Device, DeviceSnapshot};

pub const EMPTY_NOTICE: &str = "> NO DEVICES FOUND";

fn status_tone(device: &Device) -> Tone {
    if device.status.is_connected() {
        Tone::Good
    } else {
        Tone::Bad
    }
}

/// One device card.
pub fn device_card(device: &Device) -> ViewNode {
    let tone = status_tone(device);
    let name = if device.hostname.is_empty() { "Unknown Device" } else { device.hostname.as_str() };

    let header = ViewNode::Row(vec![
        ViewNode::Heading(name.to_string()),
        ViewNode::badge(device.status.as_str(), tone),
    ]);

    let mut footer = vec![ViewNode::text(format!("Connections: {}", device.connection_count))];
    if device.ip_changed() {
        footer.push(ViewNode::badge("⚠ IP changed", Tone::Warning));
    }

    ViewNode::Card {
        title: None,
        tone,
        children: vec![
            header,
            ViewNode::field("MAC", format_mac(&device.mac)),
            ViewNode::field("IP", device.ip.clone()),
            ViewNode::Row(vec![
                ViewNode::text("Vendor:"),
                ViewNode::badge(device.vendor.clone(), Tone::Neutral),
            ]),
            ViewNode::field("First Seen", format_local_time(&device.first_seen)),
            ViewNode::field("Last Seen", format_local_time(&device.last_seen)),
            ViewNode::Row(footer),
        ],
    }
}

/// Device grid for the current filter, or the empty-state notice.
pub fn device_grid(snapshot: &DeviceSnapshot, filter: DeviceFilter) -> ViewNode {
    let visible = filter.apply(&snapshot.devices);
    if visible.is_empty() {
        return ViewNode::Notice(EMPTY_NOTICE.to_string());
    }
    ViewNode::Grid(visible.into_iter().map(device_card).collect())
}
