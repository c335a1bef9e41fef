//! Gizmo sizing configuration
//!
//! Only the values that influence hit testing live here; colors and line
//! thicknesses belong to whoever draws the widget.

use crate::error::{GuizmoError, GuizmoResult};

/// Style configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Style {
    /// Apparent gizmo size as a fraction of the viewport (clip-space length of a unit axis)
    pub gizmo_scale: f32,
    /// Half width, in pixels, of the free rotation ring hit band (plus a one pixel tolerance)
    pub rotation_ring_thickness: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            gizmo_scale: 0.1,
            rotation_ring_thickness: 3.5,
        }
    }
}

impl Style {
    /// Set the apparent gizmo size
    pub fn with_gizmo_scale(mut self, gizmo_scale: f32) -> Self {
        self.gizmo_scale = gizmo_scale;
        self
    }

    /// Set the free rotation ring thickness
    pub fn with_rotation_ring_thickness(mut self, thickness: f32) -> Self {
        self.rotation_ring_thickness = thickness;
        self
    }

    /// Reject values the engine cannot work with
    pub fn validate(&self) -> GuizmoResult<()> {
        if !(self.gizmo_scale.is_finite() && self.gizmo_scale > 0.0) {
            return Err(GuizmoError::style_configuration(format!(
                "gizmo_scale must be positive and finite, got {}",
                self.gizmo_scale
            )));
        }
        if !(self.rotation_ring_thickness.is_finite() && self.rotation_ring_thickness >= 0.0) {
            return Err(GuizmoError::style_configuration(format!(
                "rotation_ring_thickness must be non-negative, got {}",
                self.rotation_ring_thickness
            )));
        }
        Ok(())
    }
}
