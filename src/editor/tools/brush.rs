use super::{ToolBounds, ToolPoint, ToolStyle};
use crate::raster::{self, RasterBuffer};

/// One pointer-move worth of freehand stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushSegment {
    pub from: ToolPoint,
    pub to: ToolPoint,
}

impl BrushSegment {
    pub const fn new(from: ToolPoint, to: ToolPoint) -> Self {
        Self { from, to }
    }

    pub fn paint(&self, buffer: &mut RasterBuffer, style: ToolStyle) -> Option<ToolBounds> {
        raster::stroke_segment(buffer, self.from, self.to, style.brush_width, style.ink())
    }
}
