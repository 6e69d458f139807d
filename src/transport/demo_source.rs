//! Synthetic snapshot source for offline use.
//!
//! Produces plausible snapshots of any family from a seed, one per fetch.
//! The same seed always yields the same sequence of game and metrics
//! snapshots; device timestamps are anchored to the moment the source was
//! created.

use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;
use std::collections::BTreeMap;

use crate::config::ViewKind;
use crate::error::FeedResult;
use crate::snapshot::system::{
    Battery, CpuInfo, DiskInfo, HostInfo, MemoryInfo, MemoryUsage, NetworkInfo, NetworkIo, Partition, ProcessEntry,
    ProcessInfo, SensorInfo, TemperatureReading,
};
use crate::snapshot::{Alien, BarrierBlock, Body, Device, DeviceSnapshot, DeviceStats, DeviceStatus, GameSnapshot, SystemSnapshot};
use crate::traits::SnapshotSource;

const SCREEN_WIDTH: f32 = 800.0;
const SCREEN_HEIGHT: f32 = 600.0;

const ALIEN_ROWS: u32 = 5;
const ALIEN_COLS: u32 = 15;
const ALIEN_WIDTH: f32 = 40.0;
const ALIEN_HEIGHT: f32 = 30.0;
const ALIEN_SPACING: f32 = 7.0;
const ALIEN_COLORS: [&str; 5] = ["#ef4444", "#f97316", "#eab308", "#22c55e", "#3b82f6"];

const BARRIER_COUNT: usize = 4;
const BARRIER_WIDTH: f32 = 80.0;
const BARRIER_HEIGHT: f32 = 40.0;
const BARRIER_Y: f32 = 450.0;

const VENDORS: [&str; 6] = ["Apple", "Espressif", "Raspberry Pi", "Intel", "TP-Link", "Unknown"];
const HOSTNAMES: [&str; 6] = ["laptop", "thermostat", "pi-hole", "printer", "phone", ""];
const PROCESS_NAMES: [&str; 8] = ["firefox", "cargo", "rustc", "postgres", "code", "dockerd", "python3", "sshd"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn tick_rng(seed: u64, tick: u64) -> StdRng {
    StdRng::seed_from_u64(seed ^ tick.wrapping_mul(0x9e37_79b9_7f4a_7c15))
}

/// Game snapshot for `tick`: the swarm drifts sideways and drops slowly,
/// a few aliens and blocks are gone, bullets are in flight.
pub fn demo_game(seed: u64, tick: u64) -> GameSnapshot {
    let mut rng = tick_rng(seed, tick);

    // Triangle wave across 60 ticks, 2px per tick
    let phase = (tick % 60) as f32;
    let wave = if phase < 30.0 { phase * 2.0 } else { (60.0 - phase) * 2.0 };
    let drift = wave - 30.0;
    let drop = ((tick / 60) as f32 * 5.0).min(120.0);

    let mut aliens = Vec::with_capacity((ALIEN_ROWS * ALIEN_COLS) as usize);
    for row in 0..ALIEN_ROWS {
        for col in 0..ALIEN_COLS {
            aliens.push(Alien {
                x: 100.0 + col as f32 * (ALIEN_WIDTH + ALIEN_SPACING) + drift,
                y: 80.0 + row as f32 * (ALIEN_HEIGHT + ALIEN_SPACING) + drop,
                width: ALIEN_WIDTH,
                height: ALIEN_HEIGHT,
                color: ALIEN_COLORS[row as usize % ALIEN_COLORS.len()].to_string(),
                active: rng.gen_bool(0.85),
                row,
                col,
            });
        }
    }

    let spacing = SCREEN_WIDTH / (BARRIER_COUNT as f32 + 1.0);
    let barriers = (0..BARRIER_COUNT)
        .map(|i| {
            let x = (i as f32 + 1.0) * spacing - BARRIER_WIDTH / 2.0;
            let mut blocks = Vec::with_capacity(9);
            for row in 0..3 {
                for col in 0..3 {
                    blocks.push(BarrierBlock {
                        x: x + col as f32 * (BARRIER_WIDTH / 3.0),
                        y: BARRIER_Y + row as f32 * (BARRIER_HEIGHT / 3.0),
                        width: BARRIER_WIDTH / 3.0,
                        height: BARRIER_HEIGHT / 3.0,
                        active: rng.gen_bool(0.8),
                    });
                }
            }
            blocks
        })
        .collect();

    let player_x = SCREEN_WIDTH / 2.0 - 15.0 + (tick as f32 * 0.1).sin() * 200.0;
    let player = Body::new(player_x, SCREEN_HEIGHT - 60.0, 30.0, 30.0);

    let player_bullets = (0..rng.gen_range(0..=3))
        .map(|_| Body::new(rng.gen_range(0.0..SCREEN_WIDTH), rng.gen_range(100.0..500.0), 4.0, 5.0))
        .collect();
    let enemy_bullets = (0..rng.gen_range(0..=4))
        .map(|_| Body::new(rng.gen_range(0.0..SCREEN_WIDTH), rng.gen_range(150.0..540.0), 4.0, 5.0))
        .collect();

    GameSnapshot {
        player,
        aliens,
        player_bullets,
        enemy_bullets,
        barriers,
        score: (tick * 10) as i64,
        level: 1 + (tick / 600) as i64,
        lives: 3,
        game_over: false,
        game_win: false,
    }
}

/// Device snapshot for `tick`. The device population is fixed by `seed`;
/// connection state changes from tick to tick.
pub fn demo_devices(seed: u64, tick: u64, started: NaiveDateTime) -> DeviceSnapshot {
    let mut identity = StdRng::seed_from_u64(seed);
    let mut rng = tick_rng(seed, tick);
    let now = started + ChronoDuration::seconds((tick * 2) as i64);

    let count = identity.gen_range(4..=10);
    let devices: Vec<Device> = (0..count)
        .map(|i| {
            let mac: String = (0..6).map(|_| format!("{:02x}", identity.gen::<u8>())).collect();
            let first_seen = started - ChronoDuration::minutes(identity.gen_range(5..600));
            let connected = rng.gen_bool(0.7);
            let last_seen = if connected { now } else { now - ChronoDuration::seconds(rng.gen_range(30..900)) };
            let ip = format!("192.168.1.{}", 10 + i);
            let seen = first_seen.format(TIMESTAMP_FORMAT).to_string();
            let mut ip_history = vec![json!([ip.clone(), seen.clone()])];
            if identity.gen_bool(0.2) {
                ip_history.insert(0, json!([format!("192.168.1.{}", 100 + i), seen]));
            }
            Device {
                mac,
                ip,
                hostname: HOSTNAMES[identity.gen_range(0..HOSTNAMES.len())].to_string(),
                vendor: VENDORS[identity.gen_range(0..VENDORS.len())].to_string(),
                first_seen: first_seen.format(TIMESTAMP_FORMAT).to_string(),
                last_seen: last_seen.format(TIMESTAMP_FORMAT).to_string(),
                status: if connected { DeviceStatus::Connected } else { DeviceStatus::Disconnected },
                connection_count: identity.gen_range(1..50) + tick,
                ip_history,
            }
        })
        .collect();

    let connected = devices.iter().filter(|d| d.status.is_connected()).count() as u64;
    let stats = DeviceStats {
        total_scans: tick + 1,
        total_devices: devices.len() as u64,
        connected_devices: connected,
        disconnected_devices: devices.len() as u64 - connected,
        last_scan: now.format(TIMESTAMP_FORMAT).to_string(),
    };
    DeviceSnapshot { devices, stats }
}

/// Host metrics snapshot for `tick`.
pub fn demo_system(seed: u64, tick: u64) -> SystemSnapshot {
    let mut rng = tick_rng(seed, tick);
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;

    let per_cpu: Vec<f64> = (0..8).map(|_| (rng.gen_range(0.0..100.0_f64) * 10.0).round() / 10.0).collect();
    let cpu_percent = (per_cpu.iter().sum::<f64>() / per_cpu.len() as f64 * 10.0).round() / 10.0;

    let ram_total = 16.0 * GB;
    let ram_percent = rng.gen_range(30.0..85.0_f64).round();
    let swap_total = 4.0 * GB;
    let swap_percent = rng.gen_range(0.0..20.0_f64).round();

    let mut processes: Vec<ProcessEntry> = PROCESS_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| ProcessEntry {
            pid: 1000 + i as u32 * 37,
            name: name.to_string(),
            cpu_percent: (rng.gen_range(0.0..60.0_f64) * 10.0).round() / 10.0,
            memory_percent: (rng.gen_range(0.0..15.0_f64) * 10.0).round() / 10.0,
        })
        .collect();
    processes.sort_by(|a, b| b.cpu_percent.total_cmp(&a.cpu_percent));
    let cpu_top = processes.iter().take(5).cloned().collect();
    processes.sort_by(|a, b| b.memory_percent.total_cmp(&a.memory_percent));
    let mem_top = processes.iter().take(5).cloned().collect();

    let mut temperatures = BTreeMap::new();
    temperatures.insert(
        "coretemp".to_string(),
        vec![TemperatureReading {
            label: "Package id 0".to_string(),
            current: rng.gen_range(40.0..75.0_f64).round(),
        }],
    );

    SystemSnapshot {
        system: HostInfo {
            hostname: "demo-host".to_string(),
            system: "Linux 6.8.0".to_string(),
            machine: "x86_64".to_string(),
            boot_time: "2024-05-01 08:00:00".to_string(),
            uptime_seconds: 3.0 * 3600.0 + 25.0 * 60.0 + tick as f64 * 2.0,
            users: vec![serde_json::json!({ "name": "demo", "terminal": "pts/0" })],
        },
        cpu: CpuInfo {
            percent: cpu_percent,
            cores: per_cpu.len() as u32,
            physical_cores: per_cpu.len() as u32 / 2,
            per_cpu,
            load_avg: vec![1.2, 0.9, 0.7],
        },
        memory: MemoryInfo {
            ram: MemoryUsage {
                total: ram_total,
                used: ram_total * ram_percent / 100.0,
                percent: ram_percent,
            },
            swap: MemoryUsage {
                total: swap_total,
                used: swap_total * swap_percent / 100.0,
                percent: swap_percent,
            },
        },
        disk: DiskInfo {
            partitions: vec![
                Partition {
                    device: "/dev/nvme0n1p2".to_string(),
                    mountpoint: "/".to_string(),
                    fstype: "ext4".to_string(),
                    total: "476.94 GB".to_string(),
                    used: "210.31 GB".to_string(),
                    free: "242.36 GB".to_string(),
                    percent: 44.1,
                },
                Partition {
                    device: "/dev/nvme0n1p1".to_string(),
                    mountpoint: "/boot/efi".to_string(),
                    fstype: "vfat".to_string(),
                    total: "0.50 GB".to_string(),
                    used: "0.03 GB".to_string(),
                    free: "0.47 GB".to_string(),
                    percent: 6.2,
                },
            ],
        },
        network: NetworkInfo {
            io: NetworkIo {
                bytes_sent: 1.5e8 + tick as f64 * 2.0e5,
                bytes_recv: 9.0e8 + tick as f64 * 1.1e6,
            },
            connections: rng.gen_range(20..120),
        },
        processes: ProcessInfo { cpu_top, mem_top },
        sensors: SensorInfo {
            temperatures: Some(temperatures),
            battery: Some(Battery {
                percent: (100.0 - (tick % 100) as f64).max(5.0),
                power_plugged: Some(false),
            }),
        },
    }
}

/// Endless sequence of synthetic snapshots for one view kind.
pub struct DemoSource {
    kind: ViewKind,
    seed: u64,
    tick: u64,
    started: NaiveDateTime,
}

impl DemoSource {
    pub fn new(kind: ViewKind, seed: u64) -> Self {
        Self {
            kind,
            seed,
            tick: 0,
            started: Local::now().naive_local(),
        }
    }

    /// Next snapshot as a JSON value, in the same shape a server would send.
    pub fn next_value(&mut self) -> FeedResult<serde_json::Value> {
        let tick = self.tick;
        self.tick += 1;
        let value = match self.kind {
            ViewKind::Game => serde_json::to_value(demo_game(self.seed, tick))?,
            ViewKind::Devices => serde_json::to_value(demo_devices(self.seed, tick, self.started))?,
            ViewKind::System => serde_json::to_value(demo_system(self.seed, tick))?,
        };
        Ok(value)
    }
}

impl SnapshotSource for DemoSource {
    fn describe(&self) -> String {
        format!("demo {} (seed {})", self.kind, self.seed)
    }

    fn fetch(&mut self) -> FeedResult<Vec<u8>> {
        let value = self.next_value()?;
        Ok(serde_json::to_vec(&value)?)
    }
}
