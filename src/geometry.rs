//! Shared geometric and color primitives used across raster and editor modules.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolPoint {
    pub x: i32,
    pub y: i32,
}

impl ToolPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: ToolPoint) -> f64 {
        let dx = f64::from(other.x) - f64::from(self.x);
        let dy = f64::from(other.y) - f64::from(self.y);
        dx.hypot(dy)
    }
}

/// Pixel-aligned rectangle, used for dirty regions and clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl ToolBounds {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest pixel rectangle covering the continuous box `[min, max]`.
    pub fn covering(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        let left = min_x.floor() as i32;
        let top = min_y.floor() as i32;
        let right = max_x.ceil() as i32;
        let bottom = max_y.ceil() as i32;
        Self::from_edges(left, top, right.max(left), bottom.max(top))
    }

    fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        let width = i64::from(right) - i64::from(left);
        let height = i64::from(bottom) - i64::from(top);
        Self::new(
            left,
            top,
            u32::try_from(width).unwrap_or(0),
            u32::try_from(height).unwrap_or(0),
        )
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add_unsigned(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add_unsigned(self.height)
    }

    pub fn union(&self, other: &ToolBounds) -> ToolBounds {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self::from_edges(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Intersection with `[0, width) x [0, height)`, or `None` when nothing remains.
    pub fn clip_to(&self, image: ImageBounds) -> Option<ToolBounds> {
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = self.right().min(image.width);
        let bottom = self.bottom().min(image.height);
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::from_edges(left, top, right, bottom))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBounds {
    pub width: i32,
    pub height: i32,
}

impl ImageBounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub const fn contains(&self, point: ToolPoint) -> bool {
        point.x >= 0 && point.y >= 0 && point.x < self.width && point.y < self.height
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color `{input}`: expected #rgb, #rrggbb or rgb(r, g, b)")]
pub struct ColorParseError {
    pub input: String,
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let parsed = if let Some(hex) = trimmed.strip_prefix('#') {
            parse_hex_color(hex)
        } else {
            trimmed
                .strip_prefix("rgb(")
                .and_then(|rest| rest.strip_suffix(')'))
                .and_then(parse_rgb_function)
        };
        parsed.ok_or_else(|| ColorParseError {
            input: value.to_string(),
        })
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let channel = |index: usize| {
                u8::from_str_radix(&hex[index..=index], 16)
                    .ok()
                    .map(|nibble| nibble * 17)
            };
            Some(Color::new(channel(0)?, channel(1)?, channel(2)?))
        }
        6 => {
            let channel = |index: usize| u8::from_str_radix(&hex[index..index + 2], 16).ok();
            Some(Color::new(channel(0)?, channel(2)?, channel(4)?))
        }
        _ => None,
    }
}

fn parse_rgb_function(arguments: &str) -> Option<Color> {
    let mut channels = arguments.split(',').map(|part| part.trim().parse::<u8>());
    let r = channels.next()?.ok()?;
    let g = channels.next()?.ok()?;
    let b = channels.next()?.ok()?;
    if channels.next().is_some() {
        return None;
    }
    Some(Color::new(r, g, b))
}
