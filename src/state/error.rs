use super::event::StrokeEvent;
use super::model::StrokeState;
use thiserror::Error;

pub type StateResult<T> = std::result::Result<T, StateError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("invalid stroke transition: from {from:?} using event {event:?}")]
    InvalidStateTransition {
        from: StrokeState,
        event: StrokeEvent,
    },
}
