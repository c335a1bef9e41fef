//! Translation drags
//!
//! The pointer ray is intersected with a drag plane chosen at press time; the
//! offset between the hit and the widget origin at press is kept so the
//! grabbed point stays under the pointer.

use glam::Mat3;

use crate::camera::Camera;
use crate::context::GuizmoContext;
use crate::math::{MOTION_EPSILON, PlaneEquation, intersect_ray_plane, normalize_basis};
use crate::snap::snap_vec3;
use crate::types::{AxisFlags, Mat4, Mode, Vec3, WidgetId};
use crate::widget::{Drag, Widget};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TranslateDrag {
    plane: PlaneEquation,
    /// Drag-plane hit at press, relative to the origin, in screen factors
    model_relative_origin: Vec3,
    /// World translation of the matrix at press
    translation_origin: Vec3,
    /// Cumulative translation last written to the matrix
    last_delta: Vec3,
}

/// Plane the pointer ray is intersected with while dragging `axes`.
///
/// Planes use their own normal; a single axis uses the plane containing the
/// axis that faces the camera best; the core drags parallel to the screen.
fn translation_plane(widget: &Widget, camera: &Camera, axes: AxisFlags) -> Option<PlaneEquation> {
    let origin = widget.model_origin();
    let normal = if let Some(plane) = axes.plane() {
        widget.model_axis(plane.normal_axis().index())
    } else if let Some(axis) = axes.single_axis() {
        let direction = widget.model_axis(axis.index());
        let to_model = (origin - camera.eye()).try_normalize()?;
        direction.cross(direction.cross(to_model))
    } else {
        -camera.forward()
    };
    let normal = normal.try_normalize()?;
    Some(PlaneEquation::from_point_normal(origin, normal))
}

impl GuizmoContext {
    pub(crate) fn begin_translation(&mut self, id: WidgetId) -> bool {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return false;
        };

        self.backup_matrix = widget.source_matrix;
        self.drag_origin = self.input.position;

        let Some(plane) = translation_plane(widget, &self.camera, widget.active_axes) else {
            crate::guizmo_trace!("widget {} has no usable translation plane", id);
            return false;
        };
        let Some(distance) = intersect_ray_plane(&self.ray, &plane) else {
            crate::guizmo_trace!("widget {} translation plane missed at press", id);
            return false;
        };

        let origin = widget.model_origin();
        widget.drag = Drag::Translate(TranslateDrag {
            plane,
            model_relative_origin: (self.ray.point_at(distance) - origin) / widget.screen_factor,
            translation_origin: origin,
            last_delta: Vec3::ZERO,
        });
        crate::guizmo_debug!("widget {} translation on {}", id, widget.active_axes);
        true
    }

    pub(crate) fn continue_translation(&mut self, id: WidgetId, snap: Option<Vec3>) {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        let Drag::Translate(mut drag) = widget.drag else {
            return;
        };
        let Some(distance) = intersect_ray_plane(&self.ray, &drag.plane) else {
            crate::guizmo_trace!("translation plane missed, skipping frame");
            return;
        };

        let axes = widget.active_axes;
        let current = widget.model_origin();
        let target =
            self.ray.point_at(distance) - drag.model_relative_origin * widget.screen_factor;
        let mut delta = target - current;

        if let Some(axis) = axes.single_axis() {
            let direction = widget.model_axis(axis.index());
            delta = direction * direction.dot(delta);
        }

        if let Some(snap) = snap {
            let mut cumulative = current + delta - drag.translation_origin;
            if widget.mode == Mode::Local || axes.is_all() {
                let basis = Mat3::from_mat4(normalize_basis(&widget.source_matrix));
                cumulative = basis * snap_vec3(basis.inverse() * cumulative, snap);
            } else {
                cumulative = snap_vec3(cumulative, snap);
            }
            delta = drag.translation_origin + cumulative - current;
        }

        let mut translation = current + delta;
        for axis in widget.locked_axes.axes() {
            translation[axis.index()] = drag.translation_origin[axis.index()];
        }

        // Ray/plane round-off alone must not rewrite the matrix
        let applied = translation - drag.translation_origin;
        if !applied.abs_diff_eq(drag.last_delta, MOTION_EPSILON * widget.screen_factor) {
            let mut result = Mat4::from_translation(translation - current) * widget.source_matrix;
            for axis in widget.locked_axes.axes() {
                result.w_axis[axis.index()] = drag.translation_origin[axis.index()];
            }
            widget.model_matrix = result;
            widget.dirty = true;
            drag.last_delta = applied;
            widget.drag = Drag::Translate(drag);
        }
    }
}
