//! Pure-Rust ImGuizmo manipulation engine
//!
//! Turns pointer input plus a camera and a model matrix into edits of that
//! matrix: translation along axes, planes or the screen, rotation around axes
//! or the view direction, per-axis and uniform scale, and bounding-box
//! resizing. Nothing is drawn; hosts render the widget however they like and
//! query the engine for hover and drag state.
//!
//! # Usage
//!
//! ```no_run
//! use dear_imguizmo_core::{AxisFlags, GuizmoContext, Mat4, Mode, PointerInput, Rect, Vec2, Vec3};
//!
//! # fn main() -> dear_imguizmo_core::GuizmoResult<()> {
//! let mut context = GuizmoContext::new();
//! let mut model = Mat4::IDENTITY;
//!
//! // Once per frame
//! let view = Mat4::look_at_rh(Vec3::new(0.0, 2.0, 6.0), Vec3::ZERO, Vec3::Y);
//! let projection = Mat4::perspective_rh(45f32.to_radians(), 16.0 / 9.0, 0.1, 100.0);
//! context.set_viewport(Rect::new(0.0, 0.0, 1280.0, 720.0))?;
//! context.set_camera(&view, &projection, false)?;
//! context.set_input(PointerInput::hover(Vec2::new(640.0, 360.0)));
//!
//! // Once per widget
//! let mut gizmo = context.begin("model", Mode::Local, &mut model, AxisFlags::empty())?;
//! if gizmo.is_visible() {
//!     gizmo.translate(None);
//! }
//! let changed = gizmo.end();
//! # let _ = changed;
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - `tracing` (default): diagnostic events through the `tracing` crate
//! - `serde`: serialization of the configuration types
//! - `mint`: accept `mint::ColumnMatrix4<f32>` matrices

pub mod camera;
pub mod context;
pub mod error;
pub mod gizmo;
pub mod input;
pub mod interaction;
pub mod logging;
pub mod mat;
pub mod math;
pub mod snap;
pub mod style;
pub mod types;
pub mod visibility;
pub mod widget;

pub use camera::Camera;
pub use context::GuizmoContext;
pub use error::{GuizmoError, GuizmoResult};
pub use gizmo::{
    BoundHandle, Bounds, BoundsInteraction, Gizmo, Interaction, ManipulateBuilder,
    ManipulationResult,
};
pub use input::PointerInput;
pub use interaction::BoundHover;
pub use mat::Mat4Like;
pub use math::{MatrixDecomposition, Ray, decompose_matrix, recompose_matrix};
pub use style::Style;
pub use types::*;
pub use visibility::PlaneVisibility;
pub use widget::Widget;
