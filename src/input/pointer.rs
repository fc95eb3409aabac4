use crate::geometry::{ImageBounds, ToolPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

/// Pointer event in host coordinates, relative to the surface's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub const fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self { kind, x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Begin(ToolPoint),
    Continue(ToolPoint),
    End,
    Ignore,
}

fn to_buffer_point(x: f64, y: f64, bounds: ImageBounds) -> Option<ToolPoint> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    let point = ToolPoint::new(x.floor() as i32, y.floor() as i32);
    bounds.contains(point).then_some(point)
}

/// Maps a host pointer event onto a surface operation. Presses and moves outside the
/// surface are dropped, the same way a canvas only sees events over itself.
pub fn resolve_pointer(event: PointerEvent, bounds: ImageBounds) -> PointerAction {
    match event.kind {
        PointerKind::Down => to_buffer_point(event.x, event.y, bounds)
            .map_or(PointerAction::Ignore, PointerAction::Begin),
        PointerKind::Move => to_buffer_point(event.x, event.y, bounds)
            .map_or(PointerAction::Ignore, PointerAction::Continue),
        PointerKind::Up | PointerKind::Leave => PointerAction::End,
    }
}
