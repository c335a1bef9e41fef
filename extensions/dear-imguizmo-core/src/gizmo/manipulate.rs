//! One-call manipulation
//!
//! [`ManipulateBuilder`] wraps `begin`, a single operation and `end` for hosts
//! that drive one operation per widget per frame.

use crate::context::GuizmoContext;
use crate::gizmo::Bounds;
use crate::mat::Mat4Like;
use crate::math::is_matrix_finite;
use crate::types::{AxisFlags, Mat4, Mode, Operation, Vec3, WidgetId};
use crate::{GuizmoError, GuizmoResult};

/// Result of a manipulation operation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ManipulationResult {
    /// Whether the matrix was modified
    pub modified: bool,
    /// Whether the widget origin was in front of the camera
    pub visible: bool,
    /// `new * old⁻¹` when the matrix was modified
    pub delta: Option<Mat4>,
    /// Which specific operation was performed
    pub operation_used: Option<Operation>,
    /// Element under the pointer, or the captured axes while dragging
    pub hovered: AxisFlags,
    /// World-space box size during a BoundsScale drag
    pub extents: Option<Vec3>,
}

/// Builder for a single begin/operation/end pass
#[must_use = "call `apply` to run the manipulation"]
pub struct ManipulateBuilder<'a, M: Mat4Like> {
    context: &'a mut GuizmoContext,
    id: WidgetId,
    matrix: &'a mut M,
    operation: Operation,
    mode: Mode,
    snap: Option<Vec3>,
    locked_axes: AxisFlags,
    bounds: Option<Bounds>,
    bounds_snap: Option<Vec3>,
}

impl<'a, M: Mat4Like> ManipulateBuilder<'a, M> {
    pub(crate) fn new(context: &'a mut GuizmoContext, id: WidgetId, matrix: &'a mut M) -> Self {
        Self {
            context,
            id,
            matrix,
            operation: Operation::Translate,
            mode: Mode::Local,
            snap: None,
            locked_axes: AxisFlags::empty(),
            bounds: None,
            bounds_snap: None,
        }
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Snap increments.
    ///
    /// Translation uses all three components (world units), rotation the X
    /// component in degrees, scale the X component as a ratio step.
    pub fn snap(mut self, snap: impl Into<Vec3>) -> Self {
        self.snap = Some(snap.into());
        self
    }

    pub fn locked_axes(mut self, locked_axes: AxisFlags) -> Self {
        self.locked_axes = locked_axes;
        self
    }

    /// Local bounds for [`Operation::BoundsScale`]
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Per-axis extent increments for [`Operation::BoundsScale`]
    pub fn bounds_snap(mut self, snap: impl Into<Vec3>) -> Self {
        self.bounds_snap = Some(snap.into());
        self
    }

    /// Run the pass
    pub fn apply(self) -> GuizmoResult<ManipulationResult> {
        let bounds = match (self.operation, self.bounds) {
            (Operation::BoundsScale, None) => {
                return Err(GuizmoError::invalid_operation(
                    "BoundsScale requires local bounds",
                ));
            }
            (_, bounds) => bounds,
        };

        let original = self.matrix.to_mat4();
        let mut gizmo = self
            .context
            .begin(self.id, self.mode, &mut *self.matrix, self.locked_axes)?;
        let visible = gizmo.is_visible();

        let mut extents = None;
        let interaction = if visible {
            match (self.operation, bounds) {
                (Operation::None, _) => None,
                (Operation::Translate, _) => Some(gizmo.translate(self.snap)),
                (Operation::Rotate, _) => Some(gizmo.rotate(self.snap.map(|s| s.x))),
                (Operation::Scale, _) => Some(gizmo.scale(self.snap.map(|s| s.x))),
                (Operation::BoundsScale, Some(bounds)) => {
                    let result = gizmo.bounds_scale(&bounds, self.bounds_snap);
                    extents = result.extents;
                    Some(result.interaction)
                }
                (Operation::BoundsScale, None) => None,
            }
        } else {
            None
        };

        let modified = gizmo.end();
        let mut result = ManipulationResult {
            modified,
            visible,
            hovered: interaction.map_or(AxisFlags::empty(), |i| i.hovered),
            extents,
            ..Default::default()
        };

        if modified {
            let updated = self.matrix.to_mat4();
            if is_matrix_finite(&updated) && original.determinant().abs() > f32::MIN_POSITIVE {
                result.delta = Some(updated * original.inverse());
            }
            result.operation_used = Some(self.operation);
            crate::guizmo_debug!("Matrix was modified by {}", self.operation);
        }

        Ok(result)
    }
}
