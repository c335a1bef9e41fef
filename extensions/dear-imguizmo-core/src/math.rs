//! Ray/plane geometry kernel
//!
//! Pointer-to-ray conversion, world-to-screen projection, plane intersection
//! and the matrix helpers the drag operations are built on. Everything here
//! is pure: degenerate inputs produce `None` or a documented fallback, never
//! a panic.

use glam::{Mat3, Vec2};

use crate::types::{ClipDepth, EPSILON, Mat4, Rect, Vec3, Vec4};
use crate::{GuizmoError, GuizmoResult};

/// Smallest scale written back by recomposition and clamped drag ratios
pub const MIN_SCALE: f32 = 0.001;

/// Change below which a drag update leaves the matrix alone.
///
/// Ratios compare against it directly, translations after scaling by the
/// widget's screen factor.
pub const MOTION_EPSILON: f32 = 1e-4;

/// World-space ray cast from the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Point on the near plane
    pub origin: Vec3,
    /// Normalized direction towards the far plane
    pub direction: Vec3,
}

impl Default for Ray {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            direction: Vec3::NEG_Z,
        }
    }
}

impl Ray {
    /// Unproject a pixel position through the inverse view-projection.
    ///
    /// Y is flipped so that screen-down maps to NDC-down. The far point uses
    /// `1 - EPSILON` to stay inside the frustum for infinite projections.
    pub fn from_screen(
        pointer: Vec2,
        viewport: &Rect,
        view_projection: &Mat4,
        depth: ClipDepth,
    ) -> Self {
        let inverse = view_projection.inverse();
        let relative = (pointer - viewport.min()) / viewport.size();
        let ndc = Vec2::new(relative.x * 2.0 - 1.0, (1.0 - relative.y) * 2.0 - 1.0);

        let origin = unproject(&inverse, ndc.extend(depth.near()));
        let end = unproject(&inverse, ndc.extend(1.0 - EPSILON));
        let direction = (end - origin).normalize_or_zero();

        Self { origin, direction }
    }

    /// Point at `distance` along the ray
    pub fn point_at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

fn unproject(inverse_view_projection: &Mat4, ndc: Vec3) -> Vec3 {
    let world = *inverse_view_projection * ndc.extend(1.0);
    if world.w.abs() > EPSILON {
        world.truncate() / world.w
    } else {
        world.truncate()
    }
}

/// Plane stored as a unit normal and its distance from the origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneEquation {
    pub normal: Vec3,
    pub distance: f32,
}

impl PlaneEquation {
    /// Plane through `point` facing `normal` (normalized here)
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: normal.dot(point),
        }
    }

    /// Signed distance of `point` from the plane
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) - self.distance
    }
}

/// Distance along `ray` to `plane`.
///
/// `None` when the ray runs parallel to the plane, when the hit lies behind
/// the ray origin, or when the result is not finite. Callers treat `None` as
/// "no valid drag point this frame".
pub fn intersect_ray_plane(ray: &Ray, plane: &PlaneEquation) -> Option<f32> {
    let numerator = plane.signed_distance(ray.origin);
    let denominator = plane.normal.dot(ray.direction);

    if denominator.abs() < EPSILON {
        return None;
    }

    let distance = -(numerator / denominator);
    (distance.is_finite() && distance >= 0.0).then_some(distance)
}

/// Project a world point to pixel coordinates.
///
/// The perspective divide is skipped when `|w|` is too small to divide by.
pub fn world_to_screen(point: Vec3, matrix: &Mat4, viewport: &Rect) -> Vec2 {
    let clip = *matrix * point.extend(1.0);
    let factor = if clip.w.abs() > EPSILON {
        0.5 / clip.w
    } else {
        0.5
    };
    let mut screen = Vec2::new(clip.x, clip.y) * factor + Vec2::splat(0.5);
    screen.y = 1.0 - screen.y;
    screen * viewport.size() + viewport.min()
}

/// Closest point to `point` on the segment `a`-`b`
pub fn point_on_segment(point: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let segment = b - a;
    let length = segment.length();
    if length <= EPSILON {
        return a;
    }
    let direction = segment / length;
    let t = direction.dot(point - a);
    if t < 0.0 {
        a
    } else if t > length {
        b
    } else {
        a + direction * t
    }
}

/// Length of the projected segment `start`-`end` in clip space.
///
/// Y is divided by the aspect ratio so the metric is isotropic. Used as a
/// visibility measure only.
pub fn segment_length_clip_space(start: Vec3, end: Vec3, mvp: &Mat4, aspect_ratio: f32) -> f32 {
    let project = |point: Vec3| {
        let clip = *mvp * point.extend(1.0);
        let ndc = if clip.w.abs() > EPSILON {
            Vec2::new(clip.x, clip.y) / clip.w
        } else {
            Vec2::new(clip.x, clip.y)
        };
        Vec2::new(ndc.x, ndc.y / aspect_ratio)
    };
    (project(end) - project(start)).length()
}

/// Copy of `matrix` with its three basis columns scaled to unit length.
///
/// A zero-length column falls back to the matching identity axis.
pub fn normalize_basis(matrix: &Mat4) -> Mat4 {
    let column = |col: Vec4, fallback: Vec3| {
        col.truncate()
            .try_normalize()
            .unwrap_or(fallback)
            .extend(0.0)
    };
    Mat4::from_cols(
        column(matrix.x_axis, Vec3::X),
        column(matrix.y_axis, Vec3::Y),
        column(matrix.z_axis, Vec3::Z),
        matrix.w_axis,
    )
}

/// Length of each basis column
pub fn column_lengths(matrix: &Mat4) -> Vec3 {
    Vec3::new(
        matrix.x_axis.truncate().length(),
        matrix.y_axis.truncate().length(),
        matrix.z_axis.truncate().length(),
    )
}

/// Basis column `index` (0..=2) as a 3D vector
pub fn basis(matrix: &Mat4, index: usize) -> Vec3 {
    matrix.col(index).truncate()
}

/// Matrix decomposition result
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixDecomposition {
    /// Translation component
    pub translation: Vec3,
    /// Rotation component (as Euler angles in degrees)
    pub rotation: Vec3,
    /// Scale component
    pub scale: Vec3,
}

/// Decompose a 4x4 transformation matrix into translation, rotation, and scale components
///
/// Rotation is returned in degrees for the `Rz * Ry * Rx` convention used by
/// [`recompose_matrix`]; the Y angle is recovered within (-90, 90).
///
/// # Returns
/// * `Ok(MatrixDecomposition)` - The decomposed components
/// * `Err(GuizmoError)` - If a basis column has zero length
pub fn decompose_matrix(matrix: &Mat4) -> GuizmoResult<MatrixDecomposition> {
    if !is_matrix_finite(matrix) {
        return Err(GuizmoError::invalid_matrix("Matrix contains non-finite values"));
    }

    let translation = matrix.w_axis.truncate();
    let scale = column_lengths(matrix);

    if scale.x.abs() < EPSILON || scale.y.abs() < EPSILON || scale.z.abs() < EPSILON {
        return Err(GuizmoError::invalid_matrix(
            "Matrix has zero scale component",
        ));
    }

    let x = matrix.x_axis.truncate() / scale.x;
    let y = matrix.y_axis.truncate() / scale.y;
    let z = matrix.z_axis.truncate() / scale.z;

    let rotation = Vec3::new(
        y.z.atan2(z.z),
        (-x.z).atan2((y.z * y.z + z.z * z.z).sqrt()),
        x.y.atan2(x.x),
    );

    Ok(MatrixDecomposition {
        translation,
        rotation: Vec3::new(
            rotation.x.to_degrees(),
            rotation.y.to_degrees(),
            rotation.z.to_degrees(),
        ),
        scale,
    })
}

/// Recompose a transformation matrix from translation, rotation, and scale components
///
/// Rotation is given as Euler angles in degrees and applied as `Rz * Ry * Rx`.
/// Scale components closer to zero than `EPSILON` are replaced by
/// [`MIN_SCALE`] so the result stays invertible.
pub fn recompose_matrix(translation: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
    let rotation = Mat3::from_rotation_z(rotation.z.to_radians())
        * Mat3::from_rotation_y(rotation.y.to_radians())
        * Mat3::from_rotation_x(rotation.x.to_radians());

    let scale = Vec3::select(
        scale.abs().cmplt(Vec3::splat(EPSILON)),
        Vec3::splat(MIN_SCALE),
        scale,
    );

    Mat4::from_cols(
        (rotation.x_axis * scale.x).extend(0.0),
        (rotation.y_axis * scale.y).extend(0.0),
        (rotation.z_axis * scale.z).extend(0.0),
        translation.extend(1.0),
    )
}

/// Check if a matrix contains only finite values (no NaN or infinity)
pub fn is_matrix_finite(matrix: &Mat4) -> bool {
    matrix.to_cols_array().iter().all(|&x| x.is_finite())
}

/// Check if a matrix is approximately equal to another matrix
pub fn matrices_approximately_equal(a: &Mat4, b: &Mat4, epsilon: f32) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(&a_val, &b_val)| (a_val - b_val).abs() < epsilon)
}
