use super::{ToolBounds, ToolPoint, ToolStyle};
use crate::raster::{self, RasterBuffer};

/// Isosceles triangle with its apex on the drag anchor, mirrored across the vertical
/// line through the anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriangleShape {
    pub vertices: [ToolPoint; 3],
}

impl TriangleShape {
    pub fn from_drag(anchor: ToolPoint, pointer: ToolPoint) -> Self {
        let mirrored_x = anchor.x.saturating_mul(2).saturating_sub(pointer.x);
        Self {
            vertices: [anchor, pointer, ToolPoint::new(mirrored_x, pointer.y)],
        }
    }

    pub fn paint(&self, buffer: &mut RasterBuffer, style: ToolStyle) -> Option<ToolBounds> {
        if style.fill {
            raster::fill_triangle(buffer, self.vertices, style.color)
        } else {
            raster::stroke_triangle(buffer, self.vertices, style.brush_width, style.color)
        }
    }
}
