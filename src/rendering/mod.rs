//! Frame composition for every snapshot family.
//!
//! - Game frames become a `DisplayList` of rectangles and text
//! - Dashboards become a `ViewNode` tree
//! - Text utilities shared by summaries and dashboard fields

pub mod display_list;
pub mod starfield;
pub mod game_frame;
pub mod view_tree;
pub mod device_view;
pub mod system_view;
pub mod text_utils;

pub use display_list::{DisplayList, DrawCommand, Font, Rect, Rgba, TextAlign};
pub use starfield::Starfield;
pub use view_tree::{Tone, ViewNode};

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Fixed-size drawing surface
    Canvas(DisplayList),
    /// Dashboard view tree
    Panels(ViewNode),
}

impl Frame {
    pub fn as_canvas(&self) -> Option<&DisplayList> {
        match self {
            Frame::Canvas(list) => Some(list),
            Frame::Panels(_) => None,
        }
    }

    pub fn as_panels(&self) -> Option<&ViewNode> {
        match self {
            Frame::Panels(node) => Some(node),
            Frame::Canvas(_) => None,
        }
    }
}
