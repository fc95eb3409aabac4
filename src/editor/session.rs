use crate::geometry::{ToolBounds, ToolPoint};
use crate::raster::RasterBuffer;

/// State held between pointer-down and pointer-up.
///
/// The snapshot is the buffer as it was when the drag started. `dirty` covers every
/// pixel painted since the snapshot was taken, so a restore only needs to copy that
/// rectangle back; the result is the same as restoring the whole buffer.
#[derive(Debug, Clone)]
pub struct DragSession {
    anchor: ToolPoint,
    last: ToolPoint,
    snapshot: RasterBuffer,
    dirty: Option<ToolBounds>,
}

impl DragSession {
    pub fn open(anchor: ToolPoint, buffer: &RasterBuffer) -> Self {
        Self {
            anchor,
            last: anchor,
            snapshot: buffer.clone(),
            dirty: None,
        }
    }

    pub fn anchor(&self) -> ToolPoint {
        self.anchor
    }

    pub fn last(&self) -> ToolPoint {
        self.last
    }

    pub fn snapshot(&self) -> &RasterBuffer {
        &self.snapshot
    }

    pub fn dirty(&self) -> Option<ToolBounds> {
        self.dirty
    }

    /// Moves the pointer and returns where it was.
    pub fn advance(&mut self, to: ToolPoint) -> ToolPoint {
        std::mem::replace(&mut self.last, to)
    }

    pub fn mark_dirty(&mut self, painted: Option<ToolBounds>) {
        if let Some(painted) = painted {
            self.dirty = Some(match self.dirty {
                Some(dirty) => dirty.union(&painted),
                None => painted,
            });
        }
    }

    /// Reverts `buffer` to the snapshot.
    pub fn restore(&mut self, buffer: &mut RasterBuffer) {
        if let Some(dirty) = self.dirty.take() {
            buffer.restore_region(&self.snapshot, dirty);
        }
    }
}
