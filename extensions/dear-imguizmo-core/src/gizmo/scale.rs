//! Scale drags
//!
//! Single-axis scale compares the pointer's distance along the axis with the
//! distance at press; uniform scale follows horizontal pointer movement. The
//! ratio is always applied to the column lengths captured at press.

use crate::context::GuizmoContext;
use crate::math::{
    MIN_SCALE, MOTION_EPSILON, PlaneEquation, column_lengths, intersect_ray_plane, normalize_basis,
};
use crate::snap::snap_vec3;
use crate::types::{AxisFlags, EPSILON, Mat4, Vec3, WidgetId};
use crate::widget::{Drag, Widget};

/// Uniform scale change per pixel of horizontal pointer movement
pub const UNIFORM_SCALE_SENSITIVITY: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScaleDrag {
    plane: PlaneEquation,
    /// Drag-plane hit at press
    plane_origin: Vec3,
    /// Same hit relative to the origin, in screen factors
    model_relative_origin: Vec3,
    /// Source column lengths at press
    scale_origin: Vec3,
    /// Ratio last written to the matrix
    last_scale: Vec3,
}

/// A single axis drags in the plane of the following axis; uniform scale in
/// the widget's third basis plane.
fn scale_plane(widget: &Widget, axes: AxisFlags) -> Option<PlaneEquation> {
    let index = match axes.single_axis() {
        Some(axis) => axis.next().index(),
        None => 2,
    };
    let normal = widget.model_axis(index).try_normalize()?;
    Some(PlaneEquation::from_point_normal(widget.model_origin(), normal))
}

impl GuizmoContext {
    pub(crate) fn begin_scale(&mut self, id: WidgetId) -> bool {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return false;
        };

        self.backup_matrix = widget.source_matrix;
        self.drag_origin = self.input.position;

        let Some(plane) = scale_plane(widget, widget.active_axes) else {
            crate::guizmo_trace!("widget {} has no usable scale plane", id);
            return false;
        };
        // The uniform handle does not need the plane hit
        let plane_origin = match intersect_ray_plane(&self.ray, &plane) {
            Some(distance) => self.ray.point_at(distance),
            None if !widget.active_axes.is_single_axis() => widget.model_origin(),
            None => {
                crate::guizmo_trace!("widget {} scale plane missed at press", id);
                return false;
            }
        };

        widget.drag = Drag::Scale(ScaleDrag {
            plane,
            plane_origin,
            model_relative_origin: (plane_origin - widget.model_origin()) / widget.screen_factor,
            scale_origin: column_lengths(&widget.source_matrix),
            last_scale: Vec3::ONE,
        });
        crate::guizmo_debug!("widget {} scale on {}", id, widget.active_axes);
        true
    }

    /// `snap` is a ratio increment applied to every axis
    pub(crate) fn continue_scale(&mut self, id: WidgetId, snap: Option<f32>) {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        let Drag::Scale(mut drag) = widget.drag else {
            return;
        };
        let axes = widget.active_axes;

        let mut scale = Vec3::ONE;
        if let Some(axis) = axes.single_axis() {
            let Some(distance) = intersect_ray_plane(&self.ray, &drag.plane) else {
                crate::guizmo_trace!("scale plane missed, skipping frame");
                return;
            };
            let origin = widget.model_origin();
            let target =
                self.ray.point_at(distance) - drag.model_relative_origin * widget.screen_factor;
            let direction = widget.model_axis(axis.index());
            let delta = direction * direction.dot(target - origin);

            let base = drag.plane_origin - origin;
            let denominator = direction.dot(base);
            if denominator.abs() <= EPSILON {
                return;
            }
            scale[axis.index()] = (direction.dot(base + delta) / denominator).max(MIN_SCALE);
        } else {
            let pixels = self.input.position.x - self.drag_origin.x;
            scale = Vec3::splat((1.0 + pixels * UNIFORM_SCALE_SENSITIVITY).max(MIN_SCALE));
        }

        if let Some(increment) = snap {
            scale = snap_vec3(scale, Vec3::splat(increment));
        }
        scale = scale.max(Vec3::splat(MIN_SCALE));
        for axis in widget.locked_axes.axes() {
            scale[axis.index()] = 1.0;
        }

        if !scale.abs_diff_eq(drag.last_scale, MOTION_EPSILON) {
            let mut result = normalize_basis(&widget.source_matrix)
                * Mat4::from_scale(scale * drag.scale_origin);
            for axis in widget.locked_axes.axes() {
                *result.col_mut(axis.index()) = widget.source_matrix.col(axis.index());
            }
            widget.model_matrix = result;
            widget.dirty = true;
            drag.last_scale = scale;
            widget.drag = Drag::Scale(drag);
        }
    }
}
