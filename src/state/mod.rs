pub mod error;
pub mod event;
pub mod machine;
pub mod model;

pub use error::{StateError, StateResult};
pub use event::{StrokeEvent, StrokeTransition};
pub use machine::StrokeMachine;
pub use model::StrokeState;
