use std::collections::VecDeque;

use super::error::{StateError, StateResult};
use super::{StrokeEvent, StrokeState, StrokeTransition};

const TRANSITION_HISTORY_LIMIT: usize = 64;

#[derive(Debug)]
pub struct StrokeMachine {
    state: StrokeState,
    transition_history: VecDeque<StrokeTransition>,
}

impl StrokeMachine {
    pub fn new() -> Self {
        Self {
            state: StrokeState::default(),
            transition_history: VecDeque::new(),
        }
    }

    pub fn state(&self) -> StrokeState {
        self.state
    }

    pub fn can_transition(&self, event: StrokeEvent) -> bool {
        self.next_state(event).is_some()
    }

    pub fn next_state(&self, event: StrokeEvent) -> Option<StrokeState> {
        use StrokeEvent::*;
        match (self.state, event) {
            (StrokeState::Idle, Begin) => Some(StrokeState::Dragging),
            // a lost pointer-up leaves us dragging; the next press re-anchors
            (StrokeState::Dragging, Begin) => Some(StrokeState::Dragging),
            (StrokeState::Dragging, End) => Some(StrokeState::Idle),
            (StrokeState::Dragging, Cancel) => Some(StrokeState::Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: StrokeEvent) -> StateResult<StrokeState> {
        tracing::trace!(from = ?self.state, event = ?event, "request stroke transition");
        let next = self.next_state(event).ok_or_else(|| {
            let from = self.state;
            tracing::debug!(from = ?from, event = ?event, "stroke transition ignored");
            StateError::InvalidStateTransition { from, event }
        })?;

        let record = StrokeTransition::new(self.state, event, next);
        self.state = next;
        if self.transition_history.len() == TRANSITION_HISTORY_LIMIT {
            self.transition_history.pop_front();
        }
        self.transition_history.push_back(record);

        Ok(self.state)
    }

    pub fn recent_transitions(&self) -> impl Iterator<Item = &StrokeTransition> {
        self.transition_history.iter()
    }
}

impl Default for StrokeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StrokeMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "StrokeState::{:?}", self.state)
    }
}
