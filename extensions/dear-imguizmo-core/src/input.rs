//! Pointer state fed to the engine once per frame

use crate::types::Vec2;

/// Pointer position and button edges for the current frame.
///
/// `primary_clicked` and `secondary_clicked` are edge flags: true only on the
/// frame the button went down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerInput {
    /// Pointer position in pixels, same space as the viewport rectangle
    pub position: Vec2,
    /// Primary button currently held
    pub primary_down: bool,
    /// Primary button pressed this frame
    pub primary_clicked: bool,
    /// Secondary button pressed this frame
    pub secondary_clicked: bool,
}

impl PointerInput {
    /// Pointer hovering with no button held
    pub fn hover(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// First frame of a primary press
    pub fn press(position: Vec2) -> Self {
        Self {
            position,
            primary_down: true,
            primary_clicked: true,
            secondary_clicked: false,
        }
    }

    /// Primary button held since an earlier frame
    pub fn drag(position: Vec2) -> Self {
        Self {
            position,
            primary_down: true,
            ..Self::default()
        }
    }

    /// Add a secondary click edge to this frame
    pub fn with_secondary_click(mut self) -> Self {
        self.secondary_clicked = true;
        self
    }
}
