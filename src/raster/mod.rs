//! Opaque RGBA raster buffer backing the drawing surface.

mod rasterize;

pub use rasterize::{
    fill_circle, fill_rect, fill_triangle, stroke_circle, stroke_rect, stroke_segment,
    stroke_triangle,
};

use crate::geometry::{Color, ImageBounds, ToolBounds};
use image::{Rgba, RgbaImage};

pub const BACKGROUND: Color = Color::WHITE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    image: RgbaImage,
}

impl RasterBuffer {
    /// Allocates a white buffer. Callers validate that both dimensions are non-zero.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(BACKGROUND.to_rgba())),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn bounds(&self) -> ImageBounds {
        ImageBounds::new(
            i32::try_from(self.width()).unwrap_or(i32::MAX),
            i32::try_from(self.height()).unwrap_or(i32::MAX),
        )
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let Rgba([r, g, b, _]) = *self.image.get_pixel(x, y);
        Some(Color::new(r, g, b))
    }

    pub fn fill(&mut self, color: Color) {
        let pixel = Rgba(color.to_rgba());
        for target in self.image.pixels_mut() {
            *target = pixel;
        }
    }

    pub fn is_uniform(&self, color: Color) -> bool {
        let pixel = Rgba(color.to_rgba());
        self.image.pixels().all(|current| *current == pixel)
    }

    /// Copies `region` from `source` back into this buffer. Both buffers must share
    /// dimensions; the region is clipped to them.
    pub fn restore_region(&mut self, source: &RasterBuffer, region: ToolBounds) {
        if source.image.dimensions() != self.image.dimensions() {
            tracing::warn!(
                target_size = ?self.image.dimensions(),
                source_size = ?source.image.dimensions(),
                "snapshot size mismatch; restoring whole buffer"
            );
            self.image = source.image.clone();
            return;
        }

        let Some(region) = region.clip_to(self.bounds()) else {
            return;
        };
        let stride = self.image.width() as usize * 4;
        let left = region.x as usize * 4;
        let row_len = region.width as usize * 4;
        let top = region.y as usize;
        let rows = region.height as usize;

        let src = source.image.as_raw();
        let dst: &mut [u8] = &mut self.image;
        for row in top..top + rows {
            let start = row * stride + left;
            let end = start + row_len;
            dst[start..end].copy_from_slice(&src[start..end]);
        }
    }

    /// Paints every pixel in `region` whose center satisfies `covered` and returns the
    /// clipped bounds that were visited.
    pub(crate) fn paint_where<F>(
        &mut self,
        region: ToolBounds,
        color: Color,
        covered: F,
    ) -> Option<ToolBounds>
    where
        F: Fn(f64, f64) -> bool,
    {
        let region = region.clip_to(self.bounds())?;
        let pixel = Rgba(color.to_rgba());
        let mut painted = false;
        for y in region.y..region.bottom() {
            let center_y = f64::from(y) + 0.5;
            for x in region.x..region.right() {
                if covered(f64::from(x) + 0.5, center_y) {
                    self.image.put_pixel(x as u32, y as u32, pixel);
                    painted = true;
                }
            }
        }
        painted.then_some(region)
    }
}
