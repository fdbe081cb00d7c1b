//! Drawing surface abstraction
//!
//! Surfaces receive device coordinates only. Scaling, origin offset and the
//! vertical flip have already been applied by the layout engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use windot_core::DevicePoint;

use crate::error::RenderResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.trim().trim_start_matches('#');
        if s.len() != 6 || !s.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Luminance in `[0, 1]`, used by gray colour mode output
    pub fn gray_level(&self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }
}

/// Text anchor, named after compass points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    Center,
}

impl Anchor {
    /// Horizontal position of the anchor point: 0 left edge, 0.5 middle, 1 right edge
    pub fn horizontal(&self) -> f64 {
        match self {
            Anchor::NW | Anchor::W | Anchor::SW => 0.0,
            Anchor::N | Anchor::Center | Anchor::S => 0.5,
            Anchor::NE | Anchor::E | Anchor::SE => 1.0,
        }
    }

    /// Vertical position of the anchor point: 0 top edge, 0.5 middle, 1 bottom edge
    pub fn vertical(&self) -> f64 {
        match self {
            Anchor::NW | Anchor::N | Anchor::NE => 0.0,
            Anchor::W | Anchor::Center | Anchor::E => 0.5,
            Anchor::SW | Anchor::S | Anchor::SE => 1.0,
        }
    }
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" => Ok(Anchor::N),
            "ne" => Ok(Anchor::NE),
            "e" => Ok(Anchor::E),
            "se" => Ok(Anchor::SE),
            "s" => Ok(Anchor::S),
            "sw" => Ok(Anchor::SW),
            "w" => Ok(Anchor::W),
            "nw" => Ok(Anchor::NW),
            "center" => Ok(Anchor::Center),
            other => Err(format!("unknown anchor '{}'", other)),
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Anchor::N => "n",
            Anchor::NE => "ne",
            Anchor::E => "e",
            Anchor::SE => "se",
            Anchor::S => "s",
            Anchor::SW => "sw",
            Anchor::W => "w",
            Anchor::NW => "nw",
            Anchor::Center => "center",
        };
        f.write_str(name)
    }
}

/// Font request: preferred families in order, size in points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub families: Vec<String>,
    pub size: u32,
    pub bold: bool,
}

impl Font {
    pub fn new(families: &[&str], size: u32, bold: bool) -> Self {
        Self {
            families: families.iter().map(|f| f.to_string()).collect(),
            size,
            bold,
        }
    }

    /// CSS font-family list
    pub fn css_family(&self) -> String {
        self.families
            .iter()
            .map(|f| if f.contains(' ') { format!("'{}'", f) } else { f.clone() })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvalStyle {
    pub width: i64,
    pub fill: Color,
    pub outline: Color,
}

pub trait DrawingSurface {
    /// Start a canvas of fixed size
    fn begin(&mut self, width: u32, height: u32, background: Color);

    fn size(&self) -> (u32, u32);

    fn line(&mut self, from: DevicePoint, to: DevicePoint, width: i64, color: Color);

    /// Oval inscribed in the box spanned by two corners
    fn oval(&mut self, corner1: DevicePoint, corner2: DevicePoint, style: OvalStyle);

    fn rectangle(&mut self, corner1: DevicePoint, corner2: DevicePoint, fill: Color);

    fn text(&mut self, at: DevicePoint, text: &str, font: &Font, anchor: Anchor, color: Color);
}

/// Persists a finished canvas
pub trait CanvasWriter {
    fn write_to_file(&self, path: &Path) -> RenderResult<()>;
}

/// Corners of the box spanned by two points: (min_x, min_y, max_x, max_y)
pub fn normalized_box(a: DevicePoint, b: DevicePoint) -> (i64, i64, i64, i64) {
    (a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Begin { width: u32, height: u32, background: Color },
    Line { from: DevicePoint, to: DevicePoint, width: i64, color: Color },
    Oval { corner1: DevicePoint, corner2: DevicePoint, style: OvalStyle },
    Rectangle { corner1: DevicePoint, corner2: DevicePoint, fill: Color },
    Text { at: DevicePoint, text: String, font_size: u32, anchor: Anchor, color: Color },
}

/// In-memory surface keeping every command in issue order
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    width: u32,
    height: u32,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn ovals(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|c| matches!(c, DrawCommand::Oval { .. }))
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn begin(&mut self, width: u32, height: u32, background: Color) {
        self.width = width;
        self.height = height;
        self.commands.clear();
        self.commands.push(DrawCommand::Begin { width, height, background });
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn line(&mut self, from: DevicePoint, to: DevicePoint, width: i64, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn oval(&mut self, corner1: DevicePoint, corner2: DevicePoint, style: OvalStyle) {
        self.commands.push(DrawCommand::Oval { corner1, corner2, style });
    }

    fn rectangle(&mut self, corner1: DevicePoint, corner2: DevicePoint, fill: Color) {
        self.commands.push(DrawCommand::Rectangle { corner1, corner2, fill });
    }

    fn text(&mut self, at: DevicePoint, text: &str, font: &Font, anchor: Anchor, color: Color) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            font_size: font.size,
            anchor,
            color,
        });
    }
}
