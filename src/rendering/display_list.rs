//! Retained draw commands for the game surface.
//!
//! Frames are composed into a `DisplayList` in logical surface coordinates
//! and painted by the GUI afterwards. Keeping the list as plain data lets
//! frame composition be tested without a window.

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            3 => {
                let mut channels = digits.chars().map(|c| c.to_digit(16).map(|v| (v * 17) as u8));
                Some(Rgba::rgb(channels.next()??, channels.next()??, channels.next()??))
            }
            6 => Some(Rgba::rgb(byte(&digits[0..2])?, byte(&digits[2..4])?, byte(&digits[4..6])?)),
            8 => Some(Rgba::rgb(byte(&digits[0..2])?, byte(&digits[2..4])?, byte(&digits[4..6])?)
                .with_alpha(byte(&digits[6..8])?)),
            _ => None,
        }
    }

    /// Like [`Rgba::from_hex`] but never fails.
    pub fn from_hex_or(hex: &str, fallback: Rgba) -> Self {
        Self::from_hex(hex).unwrap_or(fallback)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f32,
    pub bold: bool,
    pub monospace: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the whole surface
    Clear(Rgba),
    FillRect { rect: Rect, color: Rgba },
    /// Text anchored at its baseline origin
    Text {
        x: f32,
        y: f32,
        text: String,
        font: Font,
        color: Rgba,
        align: TextAlign,
    },
}

/// Commands for one frame, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayList {
    pub width: f32,
    pub height: f32,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::Clear(color));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    pub fn text(&mut self, x: f32, y: f32, text: impl Into<String>, font: Font, color: Rgba, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            text: text.into(),
            font,
            color,
            align,
        });
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of rectangles painted in `color`.
    pub fn count_rects(&self, color: Rgba) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { color: fill, .. } if *fill == color))
            .count()
    }

    /// All text strings in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
