mod pointer;
mod script;

pub use pointer::{resolve_pointer, PointerAction, PointerEvent, PointerKind};
pub use script::{load_script, parse_script, Script, ScriptError, ScriptResult, SurfaceCommand};
