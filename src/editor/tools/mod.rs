mod brush;
mod circle;
mod rectangle;
mod triangle;

use std::fmt;
use std::str::FromStr;

pub use crate::geometry::{Color, ColorParseError, ImageBounds, ToolBounds, ToolPoint};
pub use brush::BrushSegment;
pub use circle::CircleShape;
pub use rectangle::RectangleShape;
pub use triangle::TriangleShape;

use crate::raster::RasterBuffer;
use thiserror::Error;

pub const BRUSH_WIDTH_MIN: u32 = 1;
pub const BRUSH_WIDTH_MAX: u32 = 100;
const DEFAULT_BRUSH_WIDTH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Brush,
    Eraser,
    Rectangle,
    Circle,
    Triangle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 5] = [
        Self::Brush,
        Self::Eraser,
        Self::Rectangle,
        Self::Circle,
        Self::Triangle,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Brush => "brush",
            Self::Eraser => "eraser",
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Triangle => "triangle",
        }
    }

    /// Freehand tools paint cumulatively; shape tools redraw from the drag snapshot.
    pub const fn is_freehand(self) -> bool {
        matches!(self, Self::Brush | Self::Eraser)
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = StyleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| StyleError::UnknownTool {
                name: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("unknown tool `{name}`")]
    UnknownTool { name: String },
    #[error("brush width {width} outside {min}..={max}")]
    BrushWidthOutOfRange { width: i64, min: u32, max: u32 },
    #[error(transparent)]
    InvalidColor(#[from] ColorParseError),
}

/// Tool and style selection read by every draw operation. Copied by value into each
/// call so a draw never observes a half-applied change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStyle {
    pub tool: ToolKind,
    pub brush_width: u32,
    pub color: Color,
    pub fill: bool,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self {
            tool: ToolKind::Brush,
            brush_width: DEFAULT_BRUSH_WIDTH,
            color: Color::BLACK,
            fill: false,
        }
    }
}

impl ToolStyle {
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn set_tool_name(&mut self, name: &str) -> Result<(), StyleError> {
        self.tool = name.parse()?;
        Ok(())
    }

    /// Accepts widths in `BRUSH_WIDTH_MIN..=BRUSH_WIDTH_MAX`; anything else leaves the
    /// current width untouched.
    pub fn set_brush_width(&mut self, width: i64) -> Result<(), StyleError> {
        let accepted = u32::try_from(width)
            .ok()
            .filter(|width| (BRUSH_WIDTH_MIN..=BRUSH_WIDTH_MAX).contains(width))
            .ok_or(StyleError::BrushWidthOutOfRange {
                width,
                min: BRUSH_WIDTH_MIN,
                max: BRUSH_WIDTH_MAX,
            })?;
        self.brush_width = accepted;
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_color_str(&mut self, value: &str) -> Result<(), StyleError> {
        self.color = value.parse()?;
        Ok(())
    }

    pub fn set_fill(&mut self, fill: bool) {
        self.fill = fill;
    }

    /// Color actually laid down by freehand tools.
    pub const fn ink(&self) -> Color {
        match self.tool {
            ToolKind::Eraser => crate::raster::BACKGROUND,
            _ => self.color,
        }
    }
}

/// Shape previewed while dragging with a shape tool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToolShape {
    Rectangle(RectangleShape),
    Circle(CircleShape),
    Triangle(TriangleShape),
}

impl ToolShape {
    /// Builds the shape spanned by a drag, or `None` for freehand tools.
    pub fn from_drag(tool: ToolKind, anchor: ToolPoint, pointer: ToolPoint) -> Option<Self> {
        match tool {
            ToolKind::Brush | ToolKind::Eraser => None,
            ToolKind::Rectangle => Some(Self::Rectangle(RectangleShape::from_drag(anchor, pointer))),
            ToolKind::Circle => Some(Self::Circle(CircleShape::from_drag(anchor, pointer))),
            ToolKind::Triangle => Some(Self::Triangle(TriangleShape::from_drag(anchor, pointer))),
        }
    }

    pub fn paint(&self, buffer: &mut RasterBuffer, style: ToolStyle) -> Option<ToolBounds> {
        match self {
            Self::Rectangle(rectangle) => rectangle.paint(buffer, style),
            Self::Circle(circle) => circle.paint(buffer, style),
            Self::Triangle(triangle) => triangle.paint(buffer, style),
        }
    }
}
