use super::{ToolBounds, ToolPoint, ToolStyle};
use crate::raster::{self, RasterBuffer};

/// Circle centered on the drag anchor passing through the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    pub center: ToolPoint,
    pub radius: f64,
}

impl CircleShape {
    pub fn from_drag(anchor: ToolPoint, pointer: ToolPoint) -> Self {
        Self {
            center: anchor,
            radius: anchor.distance_to(pointer),
        }
    }

    pub fn paint(&self, buffer: &mut RasterBuffer, style: ToolStyle) -> Option<ToolBounds> {
        if style.fill {
            raster::fill_circle(buffer, self.center, self.radius, style.color)
        } else {
            raster::stroke_circle(
                buffer,
                self.center,
                self.radius,
                style.brush_width,
                style.color,
            )
        }
    }
}
