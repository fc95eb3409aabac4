use super::{ToolBounds, ToolPoint, ToolStyle};
use crate::raster::{self, RasterBuffer};

/// Axis-aligned rectangle spanned by the drag anchor and the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectangleShape {
    pub anchor: ToolPoint,
    pub corner: ToolPoint,
}

impl RectangleShape {
    pub const fn from_drag(anchor: ToolPoint, pointer: ToolPoint) -> Self {
        Self {
            anchor,
            corner: pointer,
        }
    }

    pub fn paint(&self, buffer: &mut RasterBuffer, style: ToolStyle) -> Option<ToolBounds> {
        if style.fill {
            raster::fill_rect(buffer, self.anchor, self.corner, style.color)
        } else {
            raster::stroke_rect(
                buffer,
                self.anchor,
                self.corner,
                style.brush_width,
                style.color,
            )
        }
    }
}
