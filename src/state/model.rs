/// Pointer-drag lifecycle of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrokeState {
    #[default]
    Idle,
    Dragging,
}

impl StrokeState {
    pub const fn is_dragging(self) -> bool {
        matches!(self, Self::Dragging)
    }
}
