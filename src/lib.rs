pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod rendering;
pub mod snapshot;
pub mod summary;
pub mod traits;
pub mod transport;

// Export seams
pub use traits::{SnapshotSource, SnapshotView};

// Export the renderer core
pub use renderer::{RenderContext, SnapshotRenderer};
pub use rendering::{DisplayList, DrawCommand, Frame, Rgba, Tone, ViewNode};
pub use summary::{Summary, SummaryField};

// Export snapshot families
pub use snapshot::{DeviceSnapshot, GameSnapshot, SystemSnapshot};

// Export input handling and device filtering
pub use input::{InputEvent, InputState, InputTracker, Key, MouseButton, Outbound};
pub use filter::DeviceFilter;

// Export configuration and transport
pub use config::{CadenceConfig, ClientConfig, SourceConfig, SurfaceConfig, ViewKind};
pub use error::{FeedError, FeedResult};
pub use transport::{spawn_push, InputSender, PushConfig, SnapshotFeed};
