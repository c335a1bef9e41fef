//! Plane and axis visibility ranking
//!
//! Planes seen edge-on and axes pointing at the camera are impossible to aim
//! at; hover testing skips them and BoundsScale tries the most visible plane
//! first.

use crate::math::segment_length_clip_space;
use crate::types::{Axis, Mat4, Plane, Vec3};

/// Minimum plane score for its handles to be hoverable
pub const PLANE_VISIBILITY_THRESHOLD: f32 = 0.1;

/// Minimum clip-space length of a projected axis for it to be hoverable
pub const AXIS_VISIBILITY_THRESHOLD: f32 = 0.03;

/// Per-plane facing scores and the planes sorted from most to least visible
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneVisibility {
    scores: [f32; 3],
    order: [Plane; 3],
}

impl Default for PlaneVisibility {
    fn default() -> Self {
        Self {
            scores: [0.0; 3],
            order: Plane::ALL,
        }
    }
}

impl PlaneVisibility {
    /// Score each plane of `matrix` by how directly it faces `eye`.
    ///
    /// The score is `|dot(view direction, plane normal)|`; ties keep the
    /// YZ, ZX, XY order.
    pub fn compute(eye: Vec3, matrix: &Mat4) -> Self {
        let origin = matrix.w_axis.truncate();
        let to_eye = (eye - origin).normalize_or_zero();

        let mut scores = [0.0; 3];
        for plane in Plane::ALL {
            let normal = matrix
                .transform_vector3(plane.normal_axis().unit())
                .normalize_or_zero();
            scores[plane.index()] = to_eye.dot(normal).abs();
        }

        let mut order = Plane::ALL;
        order.sort_by(|a, b| scores[b.index()].total_cmp(&scores[a.index()]));

        Self { scores, order }
    }

    pub fn score(&self, plane: Plane) -> f32 {
        self.scores[plane.index()]
    }

    pub fn is_visible(&self, plane: Plane) -> bool {
        self.score(plane) >= PLANE_VISIBILITY_THRESHOLD
    }

    /// Planes from most to least visible
    pub fn ranked(&self) -> [Plane; 3] {
        self.order
    }

    pub fn most_visible(&self) -> Plane {
        self.order[0]
    }
}

/// Whether `axis` of a widget projects long enough to be aimed at.
///
/// The axis is measured from the local origin to `screen_factor` along the
/// local axis, through the widget's model-view-projection.
pub fn is_axis_visible(axis: Axis, mvp: &Mat4, screen_factor: f32, aspect_ratio: f32) -> bool {
    segment_length_clip_space(Vec3::ZERO, axis.unit() * screen_factor, mvp, aspect_ratio)
        >= AXIS_VISIBILITY_THRESHOLD
}
