//! Drawing surface controller: raster buffer, style selection and the pointer-drag
//! lifecycle.

pub mod session;
pub mod tools;

use crate::export::{self, ExportFormat, ExportResult, DEFAULT_JPEG_QUALITY};
use crate::geometry::ToolPoint;
use crate::raster::{RasterBuffer, BACKGROUND};
use crate::state::{StrokeEvent, StrokeMachine, StrokeState, StrokeTransition};
use thiserror::Error;

pub use session::DragSession;
pub use tools::{
    BrushSegment, Color, StyleError, ToolBounds, ToolKind, ToolShape, ToolStyle,
    BRUSH_WIDTH_MAX, BRUSH_WIDTH_MIN,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("surface dimensions must be non-zero, got {width}x{height}")]
    EmptySurface { width: u32, height: u32 },
}

pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// `machine` decides when a drag opens and closes; `session` carries the drag's data
/// and is `Some` exactly while the machine is dragging.
#[derive(Debug)]
pub struct DrawingSurface {
    raster: RasterBuffer,
    style: ToolStyle,
    session: Option<DragSession>,
    machine: StrokeMachine,
    jpeg_quality: u8,
}

impl DrawingSurface {
    pub fn new(width: u32, height: u32) -> SurfaceResult<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            raster: RasterBuffer::new(width, height),
            style: ToolStyle::default(),
            session: None,
            machine: StrokeMachine::new(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        })
    }

    pub fn with_style(mut self, style: ToolStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> ExportResult<Self> {
        self.jpeg_quality = export::validate_jpeg_quality(quality)?;
        Ok(self)
    }

    /// Resizes the buffer to the container size and paints it white. Any open drag is
    /// discarded since its snapshot no longer matches.
    pub fn initialize(&mut self, width: u32, height: u32) -> SurfaceResult<()> {
        validate_dimensions(width, height)?;
        self.cancel_session();
        self.raster = RasterBuffer::new(width, height);
        tracing::debug!(width, height, "surface initialized");
        Ok(())
    }

    pub fn raster(&self) -> &RasterBuffer {
        &self.raster
    }

    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn style(&self) -> ToolStyle {
        self.style
    }

    pub fn stroke_state(&self) -> StrokeState {
        self.machine.state()
    }

    pub fn is_drawing(&self) -> bool {
        self.machine.state().is_dragging()
    }

    pub fn recent_transitions(&self) -> impl Iterator<Item = &StrokeTransition> {
        self.machine.recent_transitions()
    }

    /// Opens a drag session at a point inside the buffer. Points outside
    /// `[0, width) x [0, height)` are ignored and return `false`.
    pub fn begin_stroke(&mut self, x: i32, y: i32) -> bool {
        let anchor = ToolPoint::new(x, y);
        if !self.raster.bounds().contains(anchor) {
            tracing::debug!(x, y, "begin_stroke outside surface ignored");
            return false;
        }

        if !self.advance_machine(StrokeEvent::Begin) {
            return false;
        }
        if self.session.is_some() {
            tracing::debug!(x, y, "re-anchoring open drag session");
        }
        self.session = Some(DragSession::open(anchor, &self.raster));
        tracing::debug!(x, y, tool = %self.style.tool, "drag session opened");
        true
    }

    /// Advances the open drag to `(x, y)`. Without an open session this does nothing
    /// and returns `false`.
    pub fn continue_stroke(&mut self, x: i32, y: i32) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let point = ToolPoint::new(x, y);
        let style = self.style;
        let previous = session.advance(point);
        let painted = if style.tool.is_freehand() {
            BrushSegment::new(previous, point).paint(&mut self.raster, style)
        } else {
            session.restore(&mut self.raster);
            ToolShape::from_drag(style.tool, session.anchor(), point)
                .and_then(|shape| shape.paint(&mut self.raster, style))
        };
        session.mark_dirty(painted);
        tracing::trace!(x, y, tool = %style.tool, ?painted, "stroke continued");
        true
    }

    /// Closes the open drag, keeping whatever the last move painted.
    pub fn end_stroke(&mut self) -> bool {
        if !self.machine.can_transition(StrokeEvent::End) {
            return false;
        }
        if !self.advance_machine(StrokeEvent::End) {
            return false;
        }
        if let Some(session) = self.session.take() {
            tracing::debug!(
                anchor = ?session.anchor(),
                last = ?session.last(),
                "drag session closed"
            );
        }
        true
    }

    /// Paints the whole buffer white and closes any open drag.
    pub fn clear(&mut self) {
        self.cancel_session();
        self.raster.fill(BACKGROUND);
        tracing::debug!("surface cleared");
    }

    pub fn export_raster(&self, format: ExportFormat) -> ExportResult<Vec<u8>> {
        export::encode_rgba(self.raster.image(), format, self.jpeg_quality)
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.style.set_tool(tool);
        tracing::debug!(%tool, "tool selected");
    }

    pub fn set_tool_name(&mut self, name: &str) -> Result<(), StyleError> {
        self.style.set_tool_name(name)?;
        tracing::debug!(tool = %self.style.tool, "tool selected");
        Ok(())
    }

    pub fn set_brush_width(&mut self, width: i64) -> Result<(), StyleError> {
        self.style.set_brush_width(width)?;
        tracing::debug!(width, "brush width changed");
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) {
        self.style.set_color(color);
        tracing::debug!(%color, "color selected");
    }

    pub fn set_color_str(&mut self, value: &str) -> Result<(), StyleError> {
        self.style.set_color_str(value)?;
        tracing::debug!(color = %self.style.color, "color selected");
        Ok(())
    }

    pub fn set_fill_mode(&mut self, fill: bool) {
        self.style.set_fill(fill);
        tracing::debug!(fill, "fill mode changed");
    }

    fn cancel_session(&mut self) {
        if self.machine.can_transition(StrokeEvent::Cancel)
            && self.advance_machine(StrokeEvent::Cancel)
        {
            self.session = None;
            tracing::debug!("open drag session discarded");
        }
    }

    fn advance_machine(&mut self, event: StrokeEvent) -> bool {
        match self.machine.transition(event) {
            Ok(_) => true,
            Err(err) => {
                tracing::warn!(%err, "stroke transition rejected");
                false
            }
        }
    }
}

fn validate_dimensions(width: u32, height: u32) -> SurfaceResult<()> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::EmptySurface { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster;

    const INK: Color = Color::new(30, 60, 200);

    fn surface(width: u32, height: u32) -> DrawingSurface {
        let mut surface = DrawingSurface::new(width, height).expect("surface should allocate");
        surface.set_color(INK);
        surface
    }

    fn painted(surface: &DrawingSurface, x: u32, y: u32) -> bool {
        surface.raster().pixel(x, y) == Some(INK)
    }

    #[test]
    fn new_surface_is_idle_and_white() {
        let surface = surface(32, 16);
        assert_eq!((surface.width(), surface.height()), (32, 16));
        assert_eq!(surface.stroke_state(), StrokeState::Idle);
        assert!(surface.raster().is_uniform(Color::WHITE));
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert_eq!(
            DrawingSurface::new(0, 10).err(),
            Some(SurfaceError::EmptySurface {
                width: 0,
                height: 10
            })
        );
        let mut surface = surface(4, 4);
        assert!(surface.initialize(4, 0).is_err());
        assert_eq!((surface.width(), surface.height()), (4, 4));
    }

    #[test]
    fn continue_and_end_without_session_are_no_ops() {
        let mut surface = surface(20, 20);
        assert!(!surface.continue_stroke(5, 5));
        assert!(!surface.end_stroke());
        assert!(surface.raster().is_uniform(Color::WHITE));
        assert_eq!(surface.stroke_state(), StrokeState::Idle);
    }

    #[test]
    fn begin_outside_surface_is_ignored() {
        let mut surface = surface(20, 20);
        assert!(!surface.begin_stroke(20, 3));
        assert!(!surface.begin_stroke(-1, 3));
        assert!(!surface.is_drawing());
        assert!(surface.begin_stroke(19, 19));
        assert!(surface.is_drawing());
    }

    #[test]
    fn begin_alone_has_no_visible_effect() {
        let mut surface = surface(20, 20);
        assert!(surface.begin_stroke(10, 10));
        assert!(surface.raster().is_uniform(Color::WHITE));
        assert!(surface.end_stroke());
        assert!(surface.raster().is_uniform(Color::WHITE));
    }

    #[test]
    fn brush_strokes_accumulate_across_moves() {
        let mut surface = surface(100, 100);
        surface.begin_stroke(10, 10);
        surface.continue_stroke(50, 10);
        surface.continue_stroke(50, 60);
        surface.end_stroke();

        assert!(painted(&surface, 30, 10));
        assert!(painted(&surface, 50, 35));
        assert!(!painted(&surface, 30, 40));
        assert_eq!(surface.stroke_state(), StrokeState::Idle);
    }

    #[test]
    fn brush_moves_up_to_fifty_pixels_leave_no_gaps() {
        for width in [2_i64, 5, 20] {
            let mut surface = surface(200, 200);
            surface.set_brush_width(width).expect("width in range");
            let path = [(10, 10), (60, 10), (90, 50), (60, 90), (60, 140), (25, 105)];
            surface.begin_stroke(path[0].0, path[0].1);
            for &(x, y) in &path[1..] {
                surface.continue_stroke(x, y);
            }
            surface.end_stroke();

            for pair in path.windows(2) {
                let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
                for step in 0..=200 {
                    let t = f64::from(step) / 200.0;
                    let x = f64::from(x0) + t * f64::from(x1 - x0);
                    let y = f64::from(y0) + t * f64::from(y1 - y0);
                    let (px, py) = (x.floor() as u32, y.floor() as u32);
                    assert!(
                        painted(&surface, px, py),
                        "gap at ({px}, {py}) for width {width}"
                    );
                }
            }
        }
    }

    #[test]
    fn eraser_paints_background_not_selected_color() {
        let mut surface = surface(60, 60);
        surface.set_tool(ToolKind::Rectangle);
        surface.set_fill_mode(true);
        surface.begin_stroke(0, 0);
        surface.continue_stroke(60, 60);
        surface.end_stroke();
        assert!(surface.raster().is_uniform(INK));

        surface.set_tool(ToolKind::Eraser);
        surface.set_brush_width(6).expect("width in range");
        surface.begin_stroke(5, 30);
        surface.continue_stroke(55, 30);
        surface.end_stroke();

        assert_eq!(surface.raster().pixel(30, 30), Some(Color::WHITE));
        assert!(painted(&surface, 30, 10));
    }

    #[test]
    fn rectangle_previews_never_persist() {
        let anchors_and_paths = [
            ((10, 12), vec![(80, 70), (5, 3), (40, 90), (33, 21)]),
            ((70, 70), vec![(10, 10), (95, 5), (60, 20)]),
            ((50, 50), vec![(50, 50), (0, 0), (99, 99), (49, 80)]),
        ];

        for fill in [false, true] {
            for (anchor, path) in &anchors_and_paths {
                let mut dragged = surface(100, 100);
                dragged.set_tool(ToolKind::Rectangle);
                dragged.set_fill_mode(fill);
                dragged.set_brush_width(4).expect("width in range");
                dragged.begin_stroke(anchor.0, anchor.1);
                for &(x, y) in path {
                    dragged.continue_stroke(x, y);
                }
                dragged.end_stroke();

                let (end_x, end_y) = *path.last().expect("path is non-empty");
                let mut expected = RasterBuffer::new(100, 100);
                let (a, b) = (
                    ToolPoint::new(anchor.0, anchor.1),
                    ToolPoint::new(end_x, end_y),
                );
                if fill {
                    raster::fill_rect(&mut expected, a, b, INK);
                } else {
                    raster::stroke_rect(&mut expected, a, b, 4, INK);
                }

                assert_eq!(dragged.raster(), &expected, "anchor {anchor:?} fill {fill}");
            }
        }
    }

    #[test]
    fn shape_previews_keep_pre_drag_content() {
        let mut surface = surface(80, 80);
        surface.begin_stroke(5, 40);
        surface.continue_stroke(75, 40);
        surface.end_stroke();
        let before = surface.raster().clone();

        surface.set_tool(ToolKind::Triangle);
        surface.set_color(Color::new(250, 0, 0));
        surface.begin_stroke(40, 10);
        surface.continue_stroke(70, 70);
        surface.continue_stroke(41, 11);
        surface.end_stroke();

        // the tiny final triangle sits well above the earlier brush line
        assert!(painted(&surface, 20, 40));
        assert!(painted(&surface, 60, 40));
        assert_ne!(surface.raster(), &before);
        assert_eq!(surface.raster().pixel(40, 70), Some(Color::WHITE));
    }

    #[test]
    fn circle_preview_is_replaced_by_next_radius() {
        let mut surface = surface(200, 200);
        surface.set_tool(ToolKind::Circle);
        surface.set_fill_mode(false);
        surface.begin_stroke(10, 10);

        surface.continue_stroke(50, 50);
        // on the radius-56.57 circle, along the x axis and the diagonal
        assert!(painted(&surface, 66, 10));
        assert!(painted(&surface, 50, 50));

        surface.continue_stroke(30, 10);
        assert!(!painted(&surface, 66, 10));
        assert!(!painted(&surface, 50, 50));
        assert!(painted(&surface, 30, 10));
        assert!(painted(&surface, 10, 30));
        assert!(!painted(&surface, 10, 10));
        surface.end_stroke();

        let mut expected = RasterBuffer::new(200, 200);
        raster::stroke_circle(&mut expected, ToolPoint::new(10, 10), 20.0, 5, INK);
        assert_eq!(surface.raster(), &expected);
    }

    #[test]
    fn filled_triangle_uses_mirrored_vertex() {
        let mut surface = surface(100, 100);
        surface.set_tool(ToolKind::Triangle);
        surface.set_fill_mode(true);
        surface.begin_stroke(50, 10);
        surface.continue_stroke(80, 70);
        surface.end_stroke();

        // base spans 20..80 on row 69
        assert!(painted(&surface, 21, 69));
        assert!(painted(&surface, 78, 69));
        assert!(painted(&surface, 50, 40));
        assert!(!painted(&surface, 15, 69));
        assert!(!painted(&surface, 50, 71));
    }

    #[test]
    fn outline_dragged_back_onto_anchor_leaves_nothing() {
        for tool in [ToolKind::Rectangle, ToolKind::Triangle] {
            let mut surface = surface(60, 60);
            surface.set_tool(tool);
            surface.set_fill_mode(false);
            surface.set_brush_width(10).expect("width in range");

            surface.begin_stroke(20, 20);
            surface.continue_stroke(30, 30);
            assert!(!surface.raster().is_uniform(Color::WHITE), "{tool} preview");
            surface.continue_stroke(20, 20);
            surface.end_stroke();

            assert!(surface.raster().is_uniform(Color::WHITE), "{tool} left ink");
        }
    }

    #[test]
    fn filled_circle_covers_the_disc() {
        let mut surface = surface(100, 100);
        surface.set_tool(ToolKind::Circle);
        surface.set_fill_mode(true);
        surface.begin_stroke(50, 50);
        surface.continue_stroke(50, 70);
        surface.end_stroke();

        assert!(painted(&surface, 50, 50));
        assert!(painted(&surface, 60, 60));
        assert!(painted(&surface, 31, 50));
        assert!(painted(&surface, 50, 68));
        assert!(!painted(&surface, 50, 71));
        assert!(!painted(&surface, 66, 66));

        let mut expected = RasterBuffer::new(100, 100);
        raster::fill_circle(&mut expected, ToolPoint::new(50, 50), 20.0, INK);
        assert_eq!(surface.raster(), &expected);
    }

    #[test]
    fn drag_lifecycle_is_logged_as_transitions() {
        let mut surface = surface(30, 30);
        surface.begin_stroke(1, 1);
        surface.begin_stroke(2, 2);
        surface.end_stroke();
        surface.end_stroke();
        surface.begin_stroke(3, 3);
        surface.clear();

        let events = surface
            .recent_transitions()
            .map(|transition| transition.event)
            .collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                StrokeEvent::Begin,
                StrokeEvent::Begin,
                StrokeEvent::End,
                StrokeEvent::Begin,
                StrokeEvent::Cancel,
            ]
        );
        assert!(!surface.is_drawing());
    }

    #[test]
    fn clear_resets_pixels_and_closes_session() {
        let mut surface = surface(50, 50);
        surface.set_brush_width(10).expect("width in range");
        surface.begin_stroke(0, 0);
        surface.continue_stroke(49, 49);

        surface.clear();

        assert!(surface.raster().is_uniform(Color::WHITE));
        assert!(!surface.is_drawing());
        assert_eq!(surface.stroke_state(), StrokeState::Idle);
        assert!(!surface.continue_stroke(10, 10));
        assert!(surface.raster().is_uniform(Color::WHITE));
    }

    #[test]
    fn initialize_resizes_and_discards_session() {
        let mut surface = surface(20, 20);
        surface.begin_stroke(3, 3);
        surface.continue_stroke(15, 15);

        surface.initialize(64, 48).expect("resize should work");

        assert_eq!((surface.width(), surface.height()), (64, 48));
        assert!(surface.raster().is_uniform(Color::WHITE));
        assert!(!surface.is_drawing());
    }

    #[test]
    fn rejected_setters_keep_previous_style() {
        let mut surface = surface(10, 10);
        surface.set_tool(ToolKind::Circle);
        surface.set_brush_width(12).expect("width in range");
        let before = surface.style();

        assert!(surface.set_tool_name("bucket").is_err());
        assert!(surface.set_brush_width(0).is_err());
        assert!(surface.set_brush_width(250).is_err());
        assert!(surface.set_color_str("#zzz").is_err());

        assert_eq!(surface.style(), before);
    }

    #[test]
    fn style_changes_mid_drag_apply_to_next_move() {
        let mut surface = surface(100, 40);
        surface.begin_stroke(5, 20);
        surface.continue_stroke(45, 20);
        surface.set_color(Color::new(0, 200, 0));
        surface.continue_stroke(95, 20);
        surface.end_stroke();

        assert!(painted(&surface, 25, 20));
        assert_eq!(surface.raster().pixel(75, 20), Some(Color::new(0, 200, 0)));
    }

    #[test]
    fn export_after_clear_is_uniform_background() {
        let mut surface = surface(37, 23);
        surface.begin_stroke(1, 1);
        surface.continue_stroke(30, 20);
        surface.end_stroke();
        surface.clear();

        let png = surface
            .export_raster(ExportFormat::Png)
            .expect("png export should succeed");
        let decoded = image::load_from_memory(&png)
            .expect("png should decode")
            .to_rgba8();
        assert_eq!(decoded.dimensions(), (37, 23));
        assert!(decoded.pixels().all(|pixel| pixel.0 == [255, 255, 255, 255]));

        let jpeg = surface
            .export_raster(ExportFormat::Jpeg)
            .expect("jpeg export should succeed");
        let decoded = image::load_from_memory(&jpeg)
            .expect("jpeg should decode")
            .to_rgb8();
        assert_eq!(decoded.dimensions(), (37, 23));
        assert!(decoded
            .pixels()
            .all(|pixel| pixel.0.iter().all(|channel| *channel >= 250)));
    }

    #[test]
    fn export_does_not_mutate_surface() {
        let mut surface = surface(16, 16);
        surface.begin_stroke(2, 2);
        surface.continue_stroke(12, 12);
        let before = surface.raster().clone();
        let style = surface.style();

        let _ = surface.export_raster(ExportFormat::Png).expect("export");

        assert_eq!(surface.raster(), &before);
        assert_eq!(surface.style(), style);
        assert!(surface.is_drawing());
    }
}
