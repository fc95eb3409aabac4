//! Coverage rasterizers. A pixel is painted when its center is covered by the shape;
//! there is no anti-aliasing so the buffer stays opaque and results are exact.

use super::RasterBuffer;
use crate::geometry::{Color, ToolBounds, ToolPoint};

#[derive(Debug, Clone, Copy)]
struct Vec2 {
    x: f64,
    y: f64,
}

impl From<ToolPoint> for Vec2 {
    fn from(point: ToolPoint) -> Self {
        Self {
            x: f64::from(point.x),
            y: f64::from(point.y),
        }
    }
}

fn half_width(width: u32) -> f64 {
    f64::from(width.max(1)) / 2.0
}

fn distance_sq_to_segment(px: f64, py: f64, a: Vec2, b: Vec2) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let length_sq = dx * dx + dy * dy;
    let t = if length_sq == 0.0 {
        0.0
    } else {
        (((px - a.x) * dx + (py - a.y) * dy) / length_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx - px, a.y + t * dy - py);
    cx * cx + cy * cy
}

fn segment_bounds(a: Vec2, b: Vec2, pad: f64) -> ToolBounds {
    ToolBounds::covering(
        a.x.min(b.x) - pad,
        a.y.min(b.y) - pad,
        a.x.max(b.x) + pad,
        a.y.max(b.y) + pad,
    )
}

/// Paints a line segment with round caps. Consecutive segments sharing endpoints form
/// a path with round joins.
pub fn stroke_segment(
    buffer: &mut RasterBuffer,
    from: ToolPoint,
    to: ToolPoint,
    width: u32,
    color: Color,
) -> Option<ToolBounds> {
    let (a, b) = (Vec2::from(from), Vec2::from(to));
    let half = half_width(width);
    let limit = half * half;
    buffer.paint_where(segment_bounds(a, b, half), color, |px, py| {
        distance_sq_to_segment(px, py, a, b) <= limit
    })
}

fn ordered_corners(first: ToolPoint, second: ToolPoint) -> (Vec2, Vec2) {
    let (a, b) = (Vec2::from(first), Vec2::from(second));
    (
        Vec2 {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
        },
        Vec2 {
            x: a.x.max(b.x),
            y: a.y.max(b.y),
        },
    )
}

pub fn fill_rect(
    buffer: &mut RasterBuffer,
    first: ToolPoint,
    second: ToolPoint,
    color: Color,
) -> Option<ToolBounds> {
    let (min, max) = ordered_corners(first, second);
    if min.x == max.x || min.y == max.y {
        return None;
    }
    buffer.paint_where(segment_bounds(min, max, 0.0), color, |px, py| {
        px >= min.x && px <= max.x && py >= min.y && py <= max.y
    })
}

/// Outlines a rectangle with a stroke centered on its edges and square corners.
/// A rectangle collapsed to a point has no edges and paints nothing; one collapsed
/// on a single axis still paints a line.
pub fn stroke_rect(
    buffer: &mut RasterBuffer,
    first: ToolPoint,
    second: ToolPoint,
    width: u32,
    color: Color,
) -> Option<ToolBounds> {
    if first == second {
        return None;
    }
    let (min, max) = ordered_corners(first, second);
    let half = half_width(width);
    let inner_min = Vec2 {
        x: min.x + half,
        y: min.y + half,
    };
    let inner_max = Vec2 {
        x: max.x - half,
        y: max.y - half,
    };
    buffer.paint_where(segment_bounds(min, max, half), color, |px, py| {
        let in_outer =
            px >= min.x - half && px <= max.x + half && py >= min.y - half && py <= max.y + half;
        let in_inner = px > inner_min.x && px < inner_max.x && py > inner_min.y && py < inner_max.y;
        in_outer && !in_inner
    })
}

fn circle_bounds(center: Vec2, reach: f64) -> ToolBounds {
    ToolBounds::covering(
        center.x - reach,
        center.y - reach,
        center.x + reach,
        center.y + reach,
    )
}

pub fn fill_circle(
    buffer: &mut RasterBuffer,
    center: ToolPoint,
    radius: f64,
    color: Color,
) -> Option<ToolBounds> {
    if radius <= 0.0 || !radius.is_finite() {
        return None;
    }
    let c = Vec2::from(center);
    let limit = radius * radius;
    buffer.paint_where(circle_bounds(c, radius), color, |px, py| {
        let (dx, dy) = (px - c.x, py - c.y);
        dx * dx + dy * dy <= limit
    })
}

pub fn stroke_circle(
    buffer: &mut RasterBuffer,
    center: ToolPoint,
    radius: f64,
    width: u32,
    color: Color,
) -> Option<ToolBounds> {
    if radius <= 0.0 || !radius.is_finite() {
        return None;
    }
    let c = Vec2::from(center);
    let half = half_width(width);
    buffer.paint_where(circle_bounds(c, radius + half), color, |px, py| {
        ((px - c.x).hypot(py - c.y) - radius).abs() <= half
    })
}

fn triangle_bounds(vertices: [Vec2; 3], pad: f64) -> ToolBounds {
    let min_x = vertices.iter().map(|v| v.x).fold(f64::INFINITY, f64::min);
    let min_y = vertices.iter().map(|v| v.y).fold(f64::INFINITY, f64::min);
    let max_x = vertices.iter().map(|v| v.x).fold(f64::NEG_INFINITY, f64::max);
    let max_y = vertices.iter().map(|v| v.y).fold(f64::NEG_INFINITY, f64::max);
    ToolBounds::covering(min_x - pad, min_y - pad, max_x + pad, max_y + pad)
}

fn edge(a: Vec2, b: Vec2, px: f64, py: f64) -> f64 {
    (b.x - a.x) * (py - a.y) - (b.y - a.y) * (px - a.x)
}

pub fn fill_triangle(
    buffer: &mut RasterBuffer,
    vertices: [ToolPoint; 3],
    color: Color,
) -> Option<ToolBounds> {
    let [a, b, c] = vertices.map(Vec2::from);
    if edge(a, b, c.x, c.y) == 0.0 {
        return None;
    }
    buffer.paint_where(triangle_bounds([a, b, c], 0.0), color, |px, py| {
        let e0 = edge(a, b, px, py);
        let e1 = edge(b, c, px, py);
        let e2 = edge(c, a, px, py);
        (e0 >= 0.0 && e1 >= 0.0 && e2 >= 0.0) || (e0 <= 0.0 && e1 <= 0.0 && e2 <= 0.0)
    })
}

/// Outlines a closed triangle; joins are rounded. Three coincident vertices paint
/// nothing.
pub fn stroke_triangle(
    buffer: &mut RasterBuffer,
    vertices: [ToolPoint; 3],
    width: u32,
    color: Color,
) -> Option<ToolBounds> {
    if vertices[1] == vertices[0] && vertices[2] == vertices[0] {
        return None;
    }
    let [a, b, c] = vertices.map(Vec2::from);
    let half = half_width(width);
    let limit = half * half;
    buffer.paint_where(triangle_bounds([a, b, c], half), color, |px, py| {
        distance_sq_to_segment(px, py, a, b) <= limit
            || distance_sq_to_segment(px, py, b, c) <= limit
            || distance_sq_to_segment(px, py, c, a) <= limit
    })
}
