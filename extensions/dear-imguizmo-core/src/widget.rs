//! Per-instance widget record
//!
//! One [`Widget`] exists per [`WidgetId`] and survives across frames. Its
//! derived matrices and screen metrics are refreshed at every `begin`; the drag
//! scratch lives in a tagged union so only the active operation's data exists.

use crate::camera::Camera;
use crate::gizmo::bounds::BoundsDrag;
use crate::gizmo::rotate::RotateDrag;
use crate::gizmo::scale::ScaleDrag;
use crate::gizmo::translate::TranslateDrag;
use crate::math::{column_lengths, normalize_basis, segment_length_clip_space, world_to_screen};
use crate::style::Style;
use crate::types::{AxisFlags, EPSILON, Mat4, Mode, Operation, Rect, Vec2, Vec3, WidgetId};

/// Ring radius as a fraction of `gizmo_scale * viewport width`
pub const RING_RADIUS_FACTOR: f32 = 0.55;

/// Drag scratch for the operation in progress
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) enum Drag {
    #[default]
    Idle,
    Translate(TranslateDrag),
    Rotate(RotateDrag),
    Scale(ScaleDrag),
    BoundsScale(BoundsDrag),
}

impl Drag {
    pub(crate) fn operation(&self) -> Operation {
        match self {
            Drag::Idle => Operation::None,
            Drag::Translate(_) => Operation::Translate,
            Drag::Rotate(_) => Operation::Rotate,
            Drag::Scale(_) => Operation::Scale,
            Drag::BoundsScale(_) => Operation::BoundsScale,
        }
    }
}

/// State of one gizmo instance
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub(crate) id: WidgetId,
    pub(crate) mode: Mode,
    pub(crate) source_matrix: Mat4,
    pub(crate) model_matrix: Mat4,
    pub(crate) inverse_model_matrix: Mat4,
    pub(crate) model_view_proj: Mat4,
    pub(crate) model_scale_origin: Vec3,
    pub(crate) locked_axes: AxisFlags,
    pub(crate) active_axes: AxisFlags,
    pub(crate) dirty: bool,
    pub(crate) screen_factor: f32,
    pub(crate) ring_radius: f32,
    pub(crate) origin: Vec2,
    pub(crate) drag: Drag,
}

impl Widget {
    pub(crate) fn new(id: WidgetId) -> Self {
        Self {
            id,
            mode: Mode::Local,
            source_matrix: Mat4::IDENTITY,
            model_matrix: Mat4::IDENTITY,
            inverse_model_matrix: Mat4::IDENTITY,
            model_view_proj: Mat4::IDENTITY,
            model_scale_origin: Vec3::ONE,
            locked_axes: AxisFlags::empty(),
            active_axes: AxisFlags::empty(),
            dirty: false,
            screen_factor: 1.0,
            ring_radius: 0.0,
            origin: Vec2::ZERO,
            drag: Drag::Idle,
        }
    }

    /// Refresh the derived state from the caller's matrix.
    ///
    /// Local mode works on the source with normalized basis columns, World
    /// mode on a pure translation to the source origin. `screen_factor` is the
    /// world length that spans `gizmo_scale` of clip space along the camera's
    /// right vector.
    pub(crate) fn load(
        &mut self,
        matrix: Mat4,
        mode: Mode,
        camera: &Camera,
        viewport: &Rect,
        style: &Style,
    ) {
        self.mode = mode;
        self.source_matrix = matrix;
        self.model_matrix = match mode {
            Mode::Local => normalize_basis(&matrix),
            Mode::World => Mat4::from_translation(matrix.w_axis.truncate()),
        };
        self.inverse_model_matrix = self.model_matrix.inverse();
        self.model_view_proj = camera.view_projection() * self.model_matrix;
        self.model_scale_origin = column_lengths(&matrix);

        let right = self.inverse_model_matrix.transform_vector3(camera.right());
        let right_length = segment_length_clip_space(
            Vec3::ZERO,
            right,
            &self.model_view_proj,
            viewport.aspect_ratio(),
        );
        self.screen_factor = if right_length > EPSILON && right_length.is_finite() {
            style.gizmo_scale / right_length
        } else {
            crate::guizmo_trace!("widget {} has degenerate screen factor", self.id);
            style.gizmo_scale
        };

        self.origin = world_to_screen(Vec3::ZERO, &self.model_view_proj, viewport);
        self.ring_radius = style.gizmo_scale * viewport.width * RING_RADIUS_FACTOR;
    }

    /// Drop the drag and its captured axes
    pub(crate) fn release(&mut self) {
        self.active_axes = AxisFlags::empty();
        self.drag = Drag::Idle;
    }

    /// Basis column `index` of the working model matrix
    pub(crate) fn model_axis(&self, index: usize) -> Vec3 {
        self.model_matrix.col(index).truncate()
    }

    pub(crate) fn model_origin(&self) -> Vec3 {
        self.model_matrix.w_axis.truncate()
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Matrix supplied by the caller at the last `begin`
    pub fn source_matrix(&self) -> Mat4 {
        self.source_matrix
    }

    /// Working matrix; after a drag update this is what gets written back
    pub fn model_matrix(&self) -> Mat4 {
        self.model_matrix
    }

    pub fn model_view_projection(&self) -> Mat4 {
        self.model_view_proj
    }

    pub fn locked_axes(&self) -> AxisFlags {
        self.locked_axes
    }

    /// Axes captured by the drag in progress, empty when idle
    pub fn active_axes(&self) -> AxisFlags {
        self.active_axes
    }

    pub fn active_operation(&self) -> Operation {
        self.drag.operation()
    }

    /// Whether a write-back is pending
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// World length of a unit gizmo axis at the widget's depth
    pub fn screen_factor(&self) -> f32 {
        self.screen_factor
    }

    /// Free rotation ring radius in pixels
    pub fn ring_radius(&self) -> f32 {
        self.ring_radius
    }

    /// Widget origin in pixels
    pub fn screen_origin(&self) -> Vec2 {
        self.origin
    }
}
