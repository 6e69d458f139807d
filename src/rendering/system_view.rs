//! System metrics dashboard view builders.
//!
//! Cards appear in a fixed order: System, CPU, Memory, Disk, Network, the two
//! top-process tables, then Temperatures and Battery when the producer
//! reported them.

use crate::rendering::text_utils::{format_gb, format_mb, format_percent, format_uptime};
use crate::rendering::view_tree::{Tone, ViewNode};
use crate::snapshot::system::{ProcessEntry, SensorInfo};
use crate::snapshot::SystemSnapshot;

fn system_card(snapshot: &SystemSnapshot) -> ViewNode {
    let host = &snapshot.system;
    ViewNode::card(
        "System",
        vec![
            ViewNode::field("Host", host.hostname.clone()),
            ViewNode::field("OS", host.system.clone()),
            ViewNode::field("Uptime", format_uptime(host.uptime_seconds)),
            ViewNode::field("Boot", host.boot_time.clone()),
            ViewNode::field("Users", host.users.len().to_string()),
        ],
    )
}

fn cpu_card(snapshot: &SystemSnapshot) -> ViewNode {
    let cpu = &snapshot.cpu;
    let bars = cpu
        .per_cpu
        .iter()
        .enumerate()
        .map(|(i, usage)| (format!("Core {}", i), *usage))
        .collect();

    ViewNode::card(
        "CPU",
        vec![
            ViewNode::field("Overall", format_percent(cpu.percent)),
            ViewNode::progress(cpu.percent),
            ViewNode::BarChart {
                title: "CPU Usage %".to_string(),
                bars,
                max: 100.0,
            },
        ],
    )
}

fn memory_card(snapshot: &SystemSnapshot) -> ViewNode {
    let ram = &snapshot.memory.ram;
    let mut children = vec![
        ViewNode::field(
            "RAM",
            format!("{} used ({} / {})", format_percent(ram.percent), format_gb(ram.used), format_gb(ram.total)),
        ),
        ViewNode::progress(ram.percent),
    ];
    let swap = &snapshot.memory.swap;
    if swap.total > 0.0 {
        children.push(ViewNode::field("Swap", format_percent(swap.percent)));
    }
    ViewNode::card("Memory", children)
}

fn disk_card(snapshot: &SystemSnapshot) -> ViewNode {
    let mut children = Vec::new();
    for partition in &snapshot.disk.partitions {
        children.push(ViewNode::field(
            format!("{} ({})", partition.mountpoint, partition.fstype),
            format!("{} used ({} / {})", format_percent(partition.percent), partition.used, partition.total),
        ));
        children.push(ViewNode::progress(partition.percent));
    }
    ViewNode::card("Disk", children)
}

fn network_card(snapshot: &SystemSnapshot) -> ViewNode {
    let net = &snapshot.network;
    let connections = if net.connections < 0 {
        "n/a".to_string()
    } else {
        net.connections.to_string()
    };
    ViewNode::card(
        "Network",
        vec![
            ViewNode::field("Bytes sent", format_mb(net.io.bytes_sent)),
            ViewNode::field("Bytes recv", format_mb(net.io.bytes_recv)),
            ViewNode::field("Active connections", connections),
        ],
    )
}

fn process_table(title: &str, metric: &str, entries: &[ProcessEntry], value: fn(&ProcessEntry) -> f64) -> ViewNode {
    let rows = entries
        .iter()
        .map(|p| vec![p.pid.to_string(), p.name.clone(), format!("{:.1}", value(p))])
        .collect();
    ViewNode::card(
        title,
        vec![ViewNode::Table {
            headers: vec!["PID".to_string(), "Name".to_string(), metric.to_string()],
            rows,
        }],
    )
}

fn sensor_cards(sensors: &SensorInfo) -> Vec<ViewNode> {
    let mut cards = Vec::new();

    if let Some(temperatures) = &sensors.temperatures {
        let readings = temperatures
            .iter()
            .flat_map(|(chip, entries)| {
                entries
                    .iter()
                    .map(move |e| ViewNode::field(chip.clone(), format!("{}°C", e.current)))
            })
            .collect();
        cards.push(ViewNode::card("Temperatures", readings));
    }

    if let Some(battery) = &sensors.battery {
        let state = match battery.power_plugged {
            Some(true) => " (charging)",
            Some(false) => " (discharging)",
            None => "",
        };
        let tone = if battery.percent < 20.0 && battery.power_plugged != Some(true) {
            Tone::Warning
        } else {
            Tone::Neutral
        };
        cards.push(ViewNode::Card {
            title: Some("Battery".to_string()),
            tone,
            children: vec![
                ViewNode::text(format!("{}{}", format_percent(battery.percent), state)),
                ViewNode::progress(battery.percent),
            ],
        });
    }

    cards
}

/// Complete dashboard grid for one metrics snapshot.
pub fn system_dashboard(snapshot: &SystemSnapshot) -> ViewNode {
    let mut cards = vec![
        system_card(snapshot),
        cpu_card(snapshot),
        memory_card(snapshot),
        disk_card(snapshot),
        network_card(snapshot),
        process_table("Top 5 CPU", "CPU%", &snapshot.processes.cpu_top, |p| p.cpu_percent),
        process_table("Top 5 MEM", "MEM%", &snapshot.processes.mem_top, |p| p.memory_percent),
    ];
    cards.extend(sensor_cards(&snapshot.sensors));
    ViewNode::Grid(cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::system::{Battery, Partition, TemperatureReading};
    use std::collections::BTreeMap;

    fn sample() -> SystemSnapshot {
        let mut snapshot = SystemSnapshot::default();
        snapshot.system.hostname = "box".into();
        snapshot.system.uptime_seconds = 7380.0;
        snapshot.cpu.percent = 12.5;
        snapshot.cpu.per_cpu = vec![10.0, 15.0, 5.0];
        snapshot.memory.ram.total = 8e9;
        snapshot.memory.ram.used = 2e9;
        snapshot.memory.ram.percent = 25.0;
        snapshot.disk.partitions.push(Partition {
            mountpoint: "/".into(),
            fstype: "ext4".into(),
            used: "20.00 GB".into(),
            total: "100.00 GB".into(),
            percent: 20.0,
            ..Partition::default()
        });
        snapshot.processes.cpu_top.push(ProcessEntry {
            pid: 42,
            name: "cargo".into(),
            cpu_percent: 97.26,
            memory_percent: 3.0,
        });
        snapshot
    }

    #[test]
    fn test_card_order_without_sensors() {
        let grid = system_dashboard(&sample());
        assert_eq!(
            grid.card_titles(),
            vec!["System", "CPU", "Memory", "Disk", "Network", "Top 5 CPU", "Top 5 MEM"]
        );
        assert_eq!(grid.field_value("Uptime"), Some("2h 3m"));
        assert_eq!(grid.field_value("RAM"), Some("25% used (2.00GB / 8.00GB)"));
        assert_eq!(grid.field_value("/ (ext4)"), Some("20% used (20.00 GB / 100.00 GB)"));
    }

    #[test]
    fn test_per_core_chart() {
        let grid = system_dashboard(&sample());
        let chart = grid
            .walk()
            .into_iter()
            .find_map(|n| match n {
                ViewNode::BarChart { bars, max, .. } => Some((bars.clone(), *max)),
                _ => None,
            })
            .unwrap();
        assert_eq!(chart.1, 100.0);
        assert_eq!(chart.0[2], ("Core 2".to_string(), 5.0));
    }

    #[test]
    fn test_process_table_rows() {
        let grid = system_dashboard(&sample());
        let rows = grid
            .walk()
            .into_iter()
            .find_map(|n| match n {
                ViewNode::Table { rows, .. } => Some(rows.clone()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows, vec![vec!["42".to_string(), "cargo".to_string(), "97.3".to_string()]]);
    }

    #[test]
    fn test_swap_hidden_when_absent() {
        let grid = system_dashboard(&sample());
        assert_eq!(grid.field_value("Swap"), None);
    }

    #[test]
    fn test_sensor_cards() {
        let mut snapshot = sample();
        let mut temps = BTreeMap::new();
        temps.insert("coretemp".to_string(), vec![TemperatureReading { label: "Core 0".into(), current: 48.0 }]);
        snapshot.sensors.temperatures = Some(temps);
        snapshot.sensors.battery = Some(Battery { percent: 80.0, power_plugged: Some(false) });

        let grid = system_dashboard(&snapshot);
        let titles = grid.card_titles();
        assert_eq!(&titles[titles.len() - 2..], &["Temperatures", "Battery"]);
        assert_eq!(grid.field_value("coretemp"), Some("48°C"));
        assert!(grid.walk().iter().any(|n| matches!(n, ViewNode::Text(t) if t == "80% (discharging)")));
    }

    #[test]
    fn test_empty_snapshot_renders() {
        let grid = system_dashboard(&SystemSnapshot::default());
        assert_eq!(grid.card_titles().len(), 7);
        assert_eq!(grid.field_value("Users"), Some("0"));
    }
}
