//! Rotation drags
//!
//! The angle is measured in the rotation plane between the vector to the
//! press point and the vector to the current pointer hit. Each update applies
//! only the difference to the previous frame's angle.

use crate::camera::Camera;
use crate::context::GuizmoContext;
use crate::math::{PlaneEquation, Ray, intersect_ray_plane};
use crate::snap::snap;
use crate::types::{AxisFlags, Mat4, Mode, Vec3, Vec4, WidgetId};
use crate::widget::{Drag, Widget};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RotateDrag {
    plane: PlaneEquation,
    /// Unit vector from the origin to the press point, defines angle zero
    reference: Vec3,
    /// Angle already applied to the matrix, in radians
    angle_origin: f32,
}

fn rotation_plane(widget: &Widget, camera: &Camera, axes: AxisFlags) -> Option<PlaneEquation> {
    match axes.single_axis() {
        Some(axis) => {
            let point = match widget.mode {
                Mode::Local => widget.model_origin(),
                Mode::World => widget.source_matrix.w_axis.truncate(),
            };
            let normal = widget.model_axis(axis.index()).try_normalize()?;
            Some(PlaneEquation::from_point_normal(point, normal))
        }
        None => {
            let normal = (-camera.forward()).try_normalize()?;
            Some(PlaneEquation::from_point_normal(
                widget.source_matrix.w_axis.truncate(),
                normal,
            ))
        }
    }
}

/// Signed angle between `reference` and the pointer hit on `plane`.
///
/// Positive when the hit lies on the `cross(plane.normal, reference)` side,
/// i.e. counter-clockwise around the plane normal.
fn angle_on_plane(ray: &Ray, plane: &PlaneEquation, origin: Vec3, reference: Vec3) -> Option<f32> {
    let distance = intersect_ray_plane(ray, plane)?;
    let local = (ray.point_at(distance) - origin).try_normalize()?;
    let perpendicular = reference.cross(plane.normal).try_normalize()?;
    let cos = local.dot(reference).clamp(-1.0, 1.0);
    let sin = -local.dot(perpendicular);
    Some(sin.atan2(cos))
}

impl GuizmoContext {
    pub(crate) fn begin_rotation(&mut self, id: WidgetId) -> bool {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return false;
        };

        self.backup_matrix = widget.source_matrix;
        self.drag_origin = self.input.position;

        let Some(plane) = rotation_plane(widget, &self.camera, widget.active_axes) else {
            crate::guizmo_trace!("widget {} has no usable rotation plane", id);
            return false;
        };
        let Some(distance) = intersect_ray_plane(&self.ray, &plane) else {
            crate::guizmo_trace!("widget {} rotation plane missed at press", id);
            return false;
        };
        let origin = widget.model_origin();
        let Some(reference) = (self.ray.point_at(distance) - origin).try_normalize() else {
            return false;
        };
        let angle = angle_on_plane(&self.ray, &plane, origin, reference).unwrap_or(0.0);

        widget.drag = Drag::Rotate(RotateDrag {
            plane,
            reference,
            angle_origin: angle,
        });
        crate::guizmo_debug!("widget {} rotation around {}", id, widget.active_axes);
        true
    }

    /// `snap` is an angle increment in degrees
    pub(crate) fn continue_rotation(&mut self, id: WidgetId, snap_degrees: Option<f32>) {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        let Drag::Rotate(mut drag) = widget.drag else {
            return;
        };
        let origin = widget.model_origin();
        let Some(mut angle) = angle_on_plane(&self.ray, &drag.plane, origin, drag.reference) else {
            crate::guizmo_trace!("rotation plane missed, skipping frame");
            return;
        };
        if let Some(increment) = snap_degrees {
            angle = snap(angle, increment.to_radians());
        }

        let Some(axis) = widget
            .inverse_model_matrix
            .transform_vector3(drag.plane.normal)
            .try_normalize()
        else {
            return;
        };

        if angle != drag.angle_origin {
            let delta = Mat4::from_axis_angle(axis, angle - drag.angle_origin);
            match widget.mode {
                Mode::Local => {
                    widget.model_matrix =
                        widget.model_matrix * delta * Mat4::from_scale(widget.model_scale_origin);
                }
                Mode::World => {
                    let mut source = widget.source_matrix;
                    source.w_axis = Vec4::W;
                    let mut result = delta * source;
                    result.w_axis = widget.source_matrix.w_axis;
                    widget.model_matrix = result;
                }
            }
            widget.dirty = true;
        }

        drag.angle_origin = angle;
        widget.drag = Drag::Rotate(drag);
    }
}
