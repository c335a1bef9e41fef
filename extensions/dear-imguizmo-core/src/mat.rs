use crate::types::Mat4;

/// Trait to abstract over 4x4 column-major matrices handed to the engine.
pub trait Mat4Like: Sized {
    fn to_cols_array(&self) -> [f32; 16];
    fn set_from_cols_array(&mut self, arr: [f32; 16]);
    fn identity() -> Self;
    fn from_cols_array(arr: [f32; 16]) -> Self {
        let mut out = Self::identity();
        out.set_from_cols_array(arr);
        out
    }

    /// Read as a glam matrix
    fn to_mat4(&self) -> Mat4 {
        Mat4::from_cols_array(&self.to_cols_array())
    }

    /// Overwrite from a glam matrix
    fn set_from_mat4(&mut self, mat: &Mat4) {
        self.set_from_cols_array(mat.to_cols_array());
    }
}

impl Mat4Like for [f32; 16] {
    fn to_cols_array(&self) -> [f32; 16] {
        *self
    }
    fn set_from_cols_array(&mut self, arr: [f32; 16]) {
        *self = arr;
    }
    fn identity() -> Self {
        Mat4::IDENTITY.to_cols_array()
    }
}

impl Mat4Like for Mat4 {
    fn to_cols_array(&self) -> [f32; 16] {
        Mat4::to_cols_array(self)
    }
    fn set_from_cols_array(&mut self, arr: [f32; 16]) {
        *self = Mat4::from_cols_array(&arr);
    }
    fn identity() -> Self {
        Mat4::IDENTITY
    }
    fn to_mat4(&self) -> Mat4 {
        *self
    }
    fn set_from_mat4(&mut self, mat: &Mat4) {
        *self = *mat;
    }
}

#[cfg(feature = "mint")]
impl Mat4Like for mint::ColumnMatrix4<f32> {
    fn to_cols_array(&self) -> [f32; 16] {
        Mat4::from(*self).to_cols_array()
    }
    fn set_from_cols_array(&mut self, arr: [f32; 16]) {
        *self = Mat4::from_cols_array(&arr).into();
    }
    fn identity() -> Self {
        Mat4::IDENTITY.into()
    }
}
