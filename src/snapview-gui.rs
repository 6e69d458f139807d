//! Snapshot viewer GUI application
//!
//! Renders server-published state snapshots with the egui framework:
//! - Arcade game frames pushed over a WebSocket, with keyboard input sent back
//! - Home-network device dashboard polled over HTTP, with a status filter
//! - System metrics dashboard polled over HTTP

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state, session lifecycle and settings persistence
//! - `ui/` - UI panel rendering, painting and input capture
//! - `utils/` - Formatting helpers for the status bar

use clap::Parser;
use eframe::egui;
use std::path::PathBuf;
use tracing::warn;

mod app;
mod ui;
mod utils;

use app::{AppState, ApplicationCoordinator, SettingsCoordinator};
use snapview::config::LoggingConfig;
use snapview::{ClientConfig, InputEvent, SourceConfig, ViewKind};
use ui::input::game_input::capture_game_input;
use ui::panel_manager::{PanelInteraction, PanelManager};

#[derive(Parser, Debug)]
#[command(name = "snapview-gui", version, about = "Realtime snapshot viewer")]
struct Args {
    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// View to open: game, devices or system
    #[arg(long)]
    view: Option<ViewKind>,

    /// Snapshot source URL; ws:// and wss:// use the push channel
    #[arg(long, conflicts_with_all = ["file", "demo"])]
    url: Option<String>,

    /// Snapshot file (JSON, or brotli-compressed with a .br extension)
    #[arg(long, conflicts_with = "demo")]
    file: Option<PathBuf>,

    /// Poll period for HTTP and file sources, in milliseconds
    #[arg(long)]
    poll_ms: Option<u64>,

    /// Show synthetic snapshots, optionally with a seed
    #[arg(long, num_args = 0..=1, default_missing_value = "42")]
    demo: Option<u64>,
}

impl Args {
    /// Folds command-line overrides into the loaded configuration.
    fn apply(self, config: &mut ClientConfig) {
        if let Some(view) = self.view {
            if view != config.view {
                config.source = None;
            }
            config.view = view;
        }

        if let Some(url) = self.url {
            config.source = Some(if url.starts_with("ws://") || url.starts_with("wss://") {
                let event = match config.view.default_source() {
                    SourceConfig::Push { event, .. } => event,
                    _ => "game_state".to_string(),
                };
                SourceConfig::Push { url, event }
            } else {
                SourceConfig::Http { url }
            });
        } else if let Some(path) = self.file {
            config.source = Some(SourceConfig::File { path });
        } else if let Some(seed) = self.demo {
            config.source = Some(SourceConfig::Demo { seed });
        }

        if let Some(ms) = self.poll_ms {
            config.cadence.poll_interval_ms = ms;
        }
    }
}

/// Logging settings to start with; built-in defaults when the config file failed to load.
fn startup_logging(config: &ClientConfig, load_failed: bool) -> LoggingConfig {
    if load_failed {
        LoggingConfig::default()
    } else {
        config.logging.clone()
    }
}

/// Main application entry point that initializes and launches the snapshot viewer GUI.
fn main() -> eframe::Result {
    let args = Args::parse();
    let view_from_cli = args.view.is_some();

    let (mut config, load_error) = match ClientConfig::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (ClientConfig::default(), Some(e)),
    };
    args.apply(&mut config);

    snapview::logging::init(&startup_logging(&config, load_error.is_some()));
    if let Some(e) = load_error {
        warn!("{:#}; using defaults", e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 800.0])
            .with_title("snapview"),
        ..Default::default()
    };

    eframe::run_native(
        "snapview",
        options,
        Box::new(move |cc| Ok(Box::new(SnapViewApp::new(cc, config, view_from_cli)))),
    )
}

/// The main snapshot viewer application.
///
/// Delegates most functionality to coordinators:
/// - `ApplicationCoordinator` opens sessions, applies snapshots and routes input
/// - `SettingsCoordinator` persists the last selected view
/// - `PanelManager` handles UI panel layout and rendering
struct SnapViewApp {
    /// Centralized application state
    state: AppState,
    /// View to open on the first frame
    pending_open: Option<ViewKind>,
}

impl SnapViewApp {
    /// Creates the viewer, restoring the last view unless the command line named one.
    fn new(cc: &eframe::CreationContext, config: ClientConfig, view_from_cli: bool) -> Self {
        let view = if view_from_cli {
            config.view
        } else {
            SettingsCoordinator::load_last_view(cc.storage, config.view)
        };

        Self {
            state: AppState::new(config),
            pending_open: Some(view),
        }
    }

    /// Handles panel interactions by delegating to ApplicationCoordinator.
    fn handle_panel_interaction(&mut self, interaction: PanelInteraction, ctx: &egui::Context) {
        match interaction {
            PanelInteraction::ViewSelected(view) => {
                ApplicationCoordinator::switch_view(&mut self.state, view, ctx);
            }
            PanelInteraction::OpenFileRequested(path) => {
                ApplicationCoordinator::open_snapshot_file(&mut self.state, path, ctx);
            }
            PanelInteraction::OpenDemoRequested => {
                ApplicationCoordinator::open_demo(&mut self.state, ctx);
            }
            PanelInteraction::ReconnectRequested => {
                ApplicationCoordinator::reconnect(&mut self.state, ctx);
            }
            PanelInteraction::FilterSelected(filter) => {
                self.state.set_filter(filter);
            }
            PanelInteraction::CanvasPressed(button) => {
                ApplicationCoordinator::handle_input(&mut self.state, vec![InputEvent::MouseDown(button)]);
            }
        }
    }
}

impl eframe::App for SnapViewApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_last_view(storage, self.state.view);
    }

    /// Main update loop:
    /// 1. Open the initial session on the first frame
    /// 2. Apply the newest delivered snapshot
    /// 3. Forward game input
    /// 4. Render all panels via PanelManager and handle interactions
    /// 5. Schedule the next repaint
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(view) = self.pending_open.take() {
            ApplicationCoordinator::switch_view(&mut self.state, view, ctx);
        }

        ApplicationCoordinator::check_feed(&mut self.state);

        if self.state.view == ViewKind::Game {
            let captured = capture_game_input(ctx);
            if captured.focus_lost {
                ApplicationCoordinator::release_input(&mut self.state);
            }
            if !captured.events.is_empty() {
                ApplicationCoordinator::handle_input(&mut self.state, captured.events);
            }
        }

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &mut self.state) {
            self.handle_panel_interaction(interaction, ctx);
        }

        // Game frames animate continuously; dashboards recompose on their cadence
        // and repaint early whenever the feed delivers.
        if self.state.view == ViewKind::Game {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(self.state.cadence.interval());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(argv: &[&str]) -> ClientConfig {
        let mut config = ClientConfig::default();
        Args::parse_from(argv).apply(&mut config);
        config
    }

    #[test]
    fn test_startup_logging_falls_back_on_load_failure() {
        let mut config = ClientConfig::default();
        config.logging.level = "trace".to_string();
        assert_eq!(startup_logging(&config, false).level, "trace");
        assert_eq!(startup_logging(&config, true), LoggingConfig::default());
    }

    #[test]
    fn test_url_scheme_selects_source() {
        let secure = apply(&["snapview-gui", "--url", "wss://example.org/ws"]);
        assert!(matches!(secure.source, Some(SourceConfig::Push { ref url, .. }) if url == "wss://example.org/ws"));

        let polled = apply(&["snapview-gui", "--view", "system", "--url", "http://127.0.0.1:5000/api/stats"]);
        assert_eq!(polled.view, ViewKind::System);
        assert!(matches!(polled.source, Some(SourceConfig::Http { .. })));
    }

    #[test]
    fn test_demo_flag_defaults_seed() {
        let config = apply(&["snapview-gui", "--demo", "--poll-ms", "250"]);
        assert_eq!(config.source, Some(SourceConfig::Demo { seed: 42 }));
        assert_eq!(config.cadence.poll_interval_ms, 250);
    }
}
