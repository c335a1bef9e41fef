//! Bounds scaling
//!
//! Resizes a local axis-aligned box by dragging one of its corner or edge
//! handles while the opposite handle stays fixed in world space.

use crate::context::GuizmoContext;
use crate::interaction::BoundHover;
use crate::math::{
    MIN_SCALE, MOTION_EPSILON, PlaneEquation, intersect_ray_plane, matrices_approximately_equal,
};
use crate::snap::snap;
use crate::types::{Axis, AxisFlags, EPSILON, Mat4, Plane, Vec3, WidgetId};
use crate::widget::Drag;
use crate::{GuizmoError, GuizmoResult};

/// Local-space box edited by BoundsScale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn new(min: Vec3, max: Vec3) -> GuizmoResult<Self> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(GuizmoError::invalid_bounds("bounds contain non-finite values"));
        }
        if min.cmpgt(max).any() {
            return Err(GuizmoError::invalid_bounds(format!(
                "min {min} exceeds max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// From `[min_x, min_y, min_z, max_x, max_y, max_z]`
    pub fn from_array(bounds: &[f32; 6]) -> GuizmoResult<Self> {
        Self::new(
            Vec3::new(bounds[0], bounds[1], bounds[2]),
            Vec3::new(bounds[3], bounds[4], bounds[5]),
        )
    }

    pub fn to_array(&self) -> [f32; 6] {
        [
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z,
        ]
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Bound value `index` in `[min_x, .., max_z]` order
    fn value(&self, index: usize) -> f32 {
        if index < 3 {
            self.min[index]
        } else {
            self.max[index - 3]
        }
    }
}

/// A grab point on one face of the bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoundHandle {
    /// Corner `0..4`, scales both in-plane axes
    Corner(usize),
    /// Edge midpoint `0..4` between corner `i` and `i + 1`, scales one axis
    Mid(usize),
}

impl BoundHandle {
    pub fn index(self) -> usize {
        match self {
            BoundHandle::Corner(index) | BoundHandle::Mid(index) => index,
        }
    }

    /// Handle of the same kind across the face
    pub fn opposite(self) -> Self {
        match self {
            BoundHandle::Corner(index) => BoundHandle::Corner((index + 2) % 4),
            BoundHandle::Mid(index) => BoundHandle::Mid((index + 2) % 4),
        }
    }

    /// Axes this handle scales on `plane`
    pub fn axes(self, plane: Plane) -> AxisFlags {
        let (first, second) = plane.axes();
        match self {
            BoundHandle::Corner(_) => plane.flags(),
            BoundHandle::Mid(index) if index % 2 == 0 => first.flag(),
            BoundHandle::Mid(_) => second.flag(),
        }
    }
}

/// Handle positions of the current bounds, rebuilt every frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub(crate) struct BoundsScratch {
    outer: [[Vec3; 4]; 3],
    mid: [[Vec3; 4]; 3],
}

impl BoundsScratch {
    /// Lay out the four corners and edge midpoints of each cardinal face.
    ///
    /// Faces pass through the local origin: the normal-axis component is 0.
    pub(crate) fn rebuild(&mut self, bounds: &Bounds) {
        for plane in Plane::ALL {
            let (first, second) = plane.axes();
            let (d1, d2) = (first.index(), second.index());
            for i in 0..4 {
                let mut point = Vec3::ZERO;
                point[d1] = bounds.value(d1 + 3 * (i >> 1));
                point[d2] = bounds.value(d2 + 3 * ((i >> 1) ^ (i & 1)));
                self.outer[plane.index()][i] = point;
            }
            for i in 0..4 {
                let outer = &self.outer[plane.index()];
                self.mid[plane.index()][i] = (outer[i] + outer[(i + 1) % 4]) * 0.5;
            }
        }
    }

    pub(crate) fn point(&self, plane: Plane, handle: BoundHandle) -> Vec3 {
        match handle {
            BoundHandle::Corner(index) => self.outer[plane.index()][index % 4],
            BoundHandle::Mid(index) => self.mid[plane.index()][index % 4],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BoundsDrag {
    pub(crate) plane: Plane,
    pub(crate) handle: BoundHandle,
    anchor: Vec3,
    local_pivot: Vec3,
    pivot: Vec3,
    drag_plane: PlaneEquation,
}

impl GuizmoContext {
    /// Fix the grabbed handle and its opposite as anchor and pivot
    pub(crate) fn begin_bounds_scale(&mut self, id: WidgetId, hover: BoundHover) -> bool {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return false;
        };

        self.backup_matrix = widget.source_matrix;
        self.drag_origin = self.input.position;

        let source = widget.source_matrix;
        let anchor = source.transform_point3(self.bounds.point(hover.plane, hover.handle));
        let local_pivot = self.bounds.point(hover.plane, hover.handle.opposite());
        let pivot = source.transform_point3(local_pivot);
        let normal = source.transform_vector3(hover.plane.normal_axis().unit());
        if normal.length_squared() <= EPSILON * EPSILON {
            crate::guizmo_trace!("bounds plane {} has no usable normal", hover.plane);
            return false;
        }

        widget.drag = Drag::BoundsScale(BoundsDrag {
            plane: hover.plane,
            handle: hover.handle,
            anchor,
            local_pivot,
            pivot,
            drag_plane: PlaneEquation::from_point_normal(anchor, normal),
        });
        crate::guizmo_debug!(
            "widget {} bounds drag on {} {:?}",
            id,
            hover.plane,
            hover.handle
        );
        true
    }

    /// Rescale about the pivot so the grabbed handle follows the pointer.
    ///
    /// Returns the world-space extents of the rescaled box, or `None` when
    /// there is no drag or the pointer ray misses the drag plane.
    pub(crate) fn continue_bounds_scale(
        &mut self,
        id: WidgetId,
        bounds: &Bounds,
        snap_values: Option<Vec3>,
    ) -> Option<Vec3> {
        let widget = self.widgets.get_mut(&id)?;
        let Drag::BoundsScale(drag) = widget.drag else {
            return None;
        };
        let backup = self.backup_matrix;

        let Some(distance) = intersect_ray_plane(&self.ray, &drag.drag_plane) else {
            crate::guizmo_trace!("bounds drag plane missed, skipping frame");
            return None;
        };
        let reference = (drag.anchor - drag.pivot).abs();
        let delta = (self.ray.point_at(distance) - drag.pivot).abs();

        let size = bounds.size();
        let mut ratios = Vec3::ONE;
        for axis in drag.handle.axes(drag.plane).axes() {
            let index = axis.index();
            let axis_dir = backup.col(index).truncate().abs();
            let dt_axis = axis_dir.dot(reference);

            let mut ratio = 1.0;
            if dt_axis > EPSILON {
                ratio = axis_dir.dot(delta) / dt_axis;
            }
            if let Some(snap_values) = snap_values {
                let length = snap(size[index] * ratio, snap_values[index]);
                if size[index] > EPSILON {
                    ratio = length / size[index];
                }
            }
            ratios[index] = ratio.max(MIN_SCALE);
        }

        let result = backup
            * Mat4::from_translation(drag.local_pivot)
            * Mat4::from_scale(ratios)
            * Mat4::from_translation(-drag.local_pivot);
        if !matrices_approximately_equal(&result, &widget.source_matrix, MOTION_EPSILON) {
            widget.model_matrix = result;
            widget.dirty = true;
        }

        let mut extents = Vec3::ZERO;
        for axis in Axis::ALL {
            let index = axis.index();
            extents[index] = size[index] * backup.col(index).truncate().length() * ratios[index];
        }
        Some(extents)
    }
}
