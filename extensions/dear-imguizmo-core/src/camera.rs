//! Per-frame camera snapshot

use crate::math::is_matrix_finite;
use crate::types::{EPSILON, Mat4, Vec3};
use crate::{GuizmoError, GuizmoResult};

/// View and projection supplied by the caller, with the derived basis.
///
/// `right`, `up`, `forward` and `eye` are the columns of the inverse view
/// matrix, so for a right-handed view `forward` points from the scene back
/// towards the viewer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
    eye: Vec3,
    is_orthographic: bool,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_valid(Mat4::IDENTITY, Mat4::IDENTITY, false)
    }
}

impl Camera {
    /// Validate and snapshot a view/projection pair
    pub fn new(view: Mat4, projection: Mat4, is_orthographic: bool) -> GuizmoResult<Self> {
        if !is_matrix_finite(&view) {
            return Err(GuizmoError::invalid_matrix("view matrix contains non-finite values"));
        }
        if !is_matrix_finite(&projection) {
            return Err(GuizmoError::invalid_matrix(
                "projection matrix contains non-finite values",
            ));
        }
        if view.determinant().abs() < EPSILON {
            return Err(GuizmoError::invalid_matrix("view matrix is not invertible"));
        }
        if (projection * view).determinant().abs() < f32::MIN_POSITIVE {
            return Err(GuizmoError::invalid_matrix(
                "view-projection matrix is not invertible",
            ));
        }
        Ok(Self::from_valid(view, projection, is_orthographic))
    }

    fn from_valid(view: Mat4, projection: Mat4, is_orthographic: bool) -> Self {
        let inverse_view = view.inverse();
        Self {
            view,
            projection,
            view_projection: projection * view,
            right: inverse_view.x_axis.truncate(),
            up: inverse_view.y_axis.truncate(),
            forward: inverse_view.z_axis.truncate(),
            eye: inverse_view.w_axis.truncate(),
            is_orthographic,
        }
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// `projection * view`
    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Camera position in world space
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn is_orthographic(&self) -> bool {
        self.is_orthographic
    }
}
