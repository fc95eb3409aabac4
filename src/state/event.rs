use super::model::StrokeState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeEvent {
    /// Pointer pressed inside the surface.
    Begin,
    /// Pointer released or left the surface.
    End,
    /// Surface cleared or re-initialized while a drag was open.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeTransition {
    pub from: StrokeState,
    pub event: StrokeEvent,
    pub to: StrokeState,
}

impl StrokeTransition {
    pub const fn new(from: StrokeState, event: StrokeEvent, to: StrokeState) -> Self {
        Self { from, event, to }
    }
}
