//! Hover classification
//!
//! Decides which element of a widget sits under the pointer. Each operation
//! tests its elements in a fixed order and the first hit wins, so elements
//! drawn on top (the core, plane quads) take precedence over axes.

use glam::Vec2;

use crate::camera::Camera;
use crate::gizmo::bounds::{BoundHandle, BoundsScratch};
use crate::math::{PlaneEquation, Ray, intersect_ray_plane, point_on_segment, world_to_screen};
use crate::style::Style;
use crate::types::{Axis, AxisFlags, EPSILON, Mat4, Plane, Rect, Vec3};
use crate::visibility::{PlaneVisibility, is_axis_visible};
use crate::widget::Widget;

/// Pixel radius of the central handle
pub const CORE_RADIUS: f32 = 6.0;
/// Extra pixels accepted around the central handle
pub const CORE_TOLERANCE: f32 = 3.0;
/// Pixel distance accepted from a projected translate/scale axis
pub const AXIS_TOLERANCE: f32 = 6.0;
/// Axes start this far (in screen factors) from the origin
pub const AXIS_START: f32 = 0.1;
/// Plane quads span this range (in screen factors) on both in-plane axes
pub const QUAD_MIN: f32 = 0.3;
pub const QUAD_MAX: f32 = 0.5;
/// Pixel distance accepted from a rotation arc
pub const ROTATION_AXIS_TOLERANCE: f32 = 8.0;
/// Added to the ring thickness for the free rotation band
pub const RING_TOLERANCE: f32 = 1.0;
/// Pixel radius of bounds corner handles
pub const OUTER_ANCHOR_RADIUS: f32 = 6.0;
/// Pixel radius of bounds edge handles
pub const MID_ANCHOR_RADIUS: f32 = 4.0;

/// Everything a hit test needs for one widget in the current frame
#[derive(Debug, Clone, Copy)]
pub(crate) struct HoverContext<'a> {
    pub(crate) widget: &'a Widget,
    pub(crate) camera: &'a Camera,
    pub(crate) viewport: &'a Rect,
    pub(crate) style: &'a Style,
    pub(crate) ray: &'a Ray,
    pub(crate) pointer: Vec2,
    pub(crate) model_visibility: PlaneVisibility,
}

impl<'a> HoverContext<'a> {
    pub(crate) fn new(
        widget: &'a Widget,
        camera: &'a Camera,
        viewport: &'a Rect,
        style: &'a Style,
        ray: &'a Ray,
        pointer: Vec2,
    ) -> Self {
        Self {
            widget,
            camera,
            viewport,
            style,
            ray,
            pointer,
            model_visibility: PlaneVisibility::compute(camera.eye(), &widget.model_matrix),
        }
    }

    fn screen(&self, world: Vec3) -> Vec2 {
        world_to_screen(world, &self.camera.view_projection(), self.viewport)
    }

    fn all_locked(&self) -> bool {
        self.widget.locked_axes.is_all()
    }

    /// Pointer over the central handle
    pub(crate) fn is_core_hovered(&self) -> bool {
        if self.all_locked() {
            return false;
        }
        self.pointer.distance(self.widget.origin) <= CORE_RADIUS + CORE_TOLERANCE
    }

    /// Pointer within tolerance of the projected axis segment
    pub(crate) fn is_axis_hovered(&self, axis: Axis) -> bool {
        let widget = self.widget;
        if widget.locked_axes.contains(axis.flag()) {
            return false;
        }
        if !is_axis_visible(
            axis,
            &widget.model_view_proj,
            widget.screen_factor,
            self.viewport.aspect_ratio(),
        ) {
            return false;
        }

        let direction = widget.model_axis(axis.index());
        let origin = widget.model_origin();
        let start = self.screen(origin + direction * widget.screen_factor * AXIS_START);
        let end = self.screen(origin + direction * widget.screen_factor);

        let closest = point_on_segment(self.pointer, start, end);
        closest.distance(self.pointer) < AXIS_TOLERANCE
    }

    /// Pointer ray lands inside the plane's quad
    pub(crate) fn is_plane_hovered(&self, plane: Plane) -> bool {
        let widget = self.widget;
        if widget.locked_axes.intersects(plane.flags()) {
            return false;
        }
        if !self.model_visibility.is_visible(plane) {
            return false;
        }

        let origin = widget.model_origin();
        let normal = widget.model_axis(plane.normal_axis().index());
        let equation = PlaneEquation::from_point_normal(origin, normal);
        let Some(distance) = intersect_ray_plane(self.ray, &equation) else {
            return false;
        };

        let local = (self.ray.point_at(distance) - origin) / widget.screen_factor;
        let (first, second) = plane.axes();
        let dx = widget.model_axis(first.index()).dot(local);
        let dy = widget.model_axis(second.index()).dot(local);
        (QUAD_MIN..=QUAD_MAX).contains(&dx) && (QUAD_MIN..=QUAD_MAX).contains(&dy)
    }

    /// Pointer over the visible half of an axis rotation circle
    pub(crate) fn is_rotation_axis_hovered(&self, axis: Axis) -> bool {
        let widget = self.widget;
        if widget.locked_axes.contains(axis.flag()) {
            return false;
        }

        let origin = widget.model_origin();
        let normal = widget.model_axis(axis.index());
        let equation = PlaneEquation::from_point_normal(origin, normal);
        let Some(distance) = intersect_ray_plane(self.ray, &equation) else {
            return false;
        };
        let Some(local) = (self.ray.point_at(distance) - origin).try_normalize() else {
            return false;
        };

        // back half of the circle is hidden behind the widget
        if local.dot(self.ray.direction) > EPSILON {
            return false;
        }

        let ideal = widget.inverse_model_matrix.transform_vector3(local) * widget.screen_factor;
        let ideal_screen = world_to_screen(ideal, &widget.model_view_proj, self.viewport);
        ideal_screen.distance(self.pointer) < ROTATION_AXIS_TOLERANCE
    }

    /// Pointer inside the free rotation band
    pub(crate) fn is_rotation_ring_hovered(&self) -> bool {
        if self.all_locked() {
            return false;
        }
        let band = self.style.rotation_ring_thickness + RING_TOLERANCE;
        let distance = self.pointer.distance(self.widget.origin);
        distance >= self.widget.ring_radius - band && distance < self.widget.ring_radius + band
    }

    /// Translate: core, then plane quads, then axes
    pub(crate) fn find_translation_hover(&self) -> AxisFlags {
        if self.is_core_hovered() {
            return AxisFlags::ALL;
        }
        if let Some(plane) = Plane::ALL.into_iter().find(|&p| self.is_plane_hovered(p)) {
            return plane.flags();
        }
        Axis::ALL
            .into_iter()
            .find(|&a| self.is_axis_hovered(a))
            .map_or(AxisFlags::empty(), Axis::flag)
    }

    /// Rotate: free ring, then axis circles
    pub(crate) fn find_rotation_hover(&self) -> AxisFlags {
        if self.is_rotation_ring_hovered() {
            return AxisFlags::ALL;
        }
        Axis::ALL
            .into_iter()
            .find(|&a| self.is_rotation_axis_hovered(a))
            .map_or(AxisFlags::empty(), Axis::flag)
    }

    /// Scale: core (uniform), then axes
    pub(crate) fn find_scale_hover(&self) -> AxisFlags {
        if self.is_core_hovered() {
            return AxisFlags::ALL;
        }
        Axis::ALL
            .into_iter()
            .find(|&a| self.is_axis_hovered(a))
            .map_or(AxisFlags::empty(), Axis::flag)
    }
}

/// Bounds handle under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundHover {
    pub plane: Plane,
    pub handle: BoundHandle,
    /// Plane flags for a corner, the scaled axis for an edge
    pub axes: AxisFlags,
}

/// Find the bounds handle under `pointer`.
///
/// Planes are tried from most to least visible, invisible ones skipped; within
/// a plane each corner is tested before the edge handle that follows it.
pub(crate) fn find_bound_hover(
    pointer: Vec2,
    scratch: &BoundsScratch,
    model_view_proj: &Mat4,
    viewport: &Rect,
    visibility: &PlaneVisibility,
    locked: AxisFlags,
) -> Option<BoundHover> {
    for plane in visibility.ranked() {
        if !visibility.is_visible(plane) {
            continue;
        }
        for index in 0..4 {
            let corner = BoundHandle::Corner(index);
            let corner_axes = corner.axes(plane);
            if !locked.intersects(corner_axes) {
                let screen =
                    world_to_screen(scratch.point(plane, corner), model_view_proj, viewport);
                if screen.distance(pointer) <= OUTER_ANCHOR_RADIUS {
                    return Some(BoundHover {
                        plane,
                        handle: corner,
                        axes: corner_axes,
                    });
                }
            }

            let mid = BoundHandle::Mid(index);
            let mid_axes = mid.axes(plane);
            if !locked.intersects(mid_axes) {
                let screen = world_to_screen(scratch.point(plane, mid), model_view_proj, viewport);
                if screen.distance(pointer) <= MID_ANCHOR_RADIUS {
                    return Some(BoundHover {
                        plane,
                        handle: mid,
                        axes: mid_axes,
                    });
                }
            }
        }
    }
    None
}
