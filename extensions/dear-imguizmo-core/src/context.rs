//! Gizmo context management

use std::collections::HashMap;

use crate::camera::Camera;
use crate::gizmo::bounds::BoundsScratch;
use crate::gizmo::{Gizmo, ManipulateBuilder};
use crate::input::PointerInput;
use crate::interaction::HoverContext;
use crate::mat::Mat4Like;
use crate::math::{MatrixDecomposition, Ray, decompose_matrix, is_matrix_finite, recompose_matrix};
use crate::style::Style;
use crate::types::{
    AxisFlags, ClipDepth, ConfigFlags, Mat4, Mode, Operation, Rect, Vec2, Vec3, Vec4, WidgetId,
};
use crate::visibility::PlaneVisibility;
use crate::widget::{Drag, Widget};
use crate::{GuizmoError, GuizmoResult};

/// Clip-space depth below which a perspective widget counts as behind the camera
const BEHIND_CAMERA_DEPTH: f32 = 0.001;

/// Owns the per-frame inputs and every widget's state.
///
/// Feed the camera, viewport and pointer once per frame, then run
/// [`begin`](Self::begin) / operation / `end` for each widget. At most one
/// widget holds the drag at a time.
#[derive(Debug, Clone)]
pub struct GuizmoContext {
    pub(crate) enabled: bool,
    pub(crate) style: Style,
    pub(crate) config_flags: ConfigFlags,
    pub(crate) clip_depth: ClipDepth,
    pub(crate) viewport: Rect,
    pub(crate) camera: Camera,
    pub(crate) input: PointerInput,
    pub(crate) ray: Ray,
    /// Pointer position when the current drag started
    pub(crate) drag_origin: Vec2,
    pub(crate) widgets: HashMap<WidgetId, Widget>,
    pub(crate) active_widget: Option<WidgetId>,
    /// Matrix at press, restored by a cancel
    pub(crate) backup_matrix: Mat4,
    /// Plane ranking of the most recent `begin`, on the source matrix
    pub(crate) plane_visibility: PlaneVisibility,
    pub(crate) bounds: BoundsScratch,
    /// Last widget that reported a hover this frame
    pub(crate) over_widget: Option<WidgetId>,
}

impl Default for GuizmoContext {
    fn default() -> Self {
        Self::new()
    }
}

impl GuizmoContext {
    pub fn new() -> Self {
        Self {
            enabled: true,
            style: Style::default(),
            config_flags: ConfigFlags::empty(),
            clip_depth: ClipDepth::default(),
            viewport: Rect::new(0.0, 0.0, 800.0, 600.0),
            camera: Camera::default(),
            input: PointerInput::default(),
            ray: Ray::default(),
            drag_origin: Vec2::ZERO,
            widgets: HashMap::new(),
            active_widget: None,
            backup_matrix: Mat4::IDENTITY,
            plane_visibility: PlaneVisibility::default(),
            bounds: BoundsScratch::default(),
            over_widget: None,
        }
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    /// Replace the style after validating it
    pub fn set_style(&mut self, style: Style) -> GuizmoResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    pub fn config_flags(&self) -> ConfigFlags {
        self.config_flags
    }

    pub fn set_config_flags(&mut self, flags: ConfigFlags) {
        self.config_flags = flags;
    }

    /// Disabled contexts still report visibility but never hover or start a drag
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            crate::guizmo_debug!("Gizmo context {}", if enabled { "enabled" } else { "disabled" });
        }
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn clip_depth(&self) -> ClipDepth {
        self.clip_depth
    }

    /// Depth convention of the projection passed to [`set_camera`](Self::set_camera)
    pub fn set_clip_depth(&mut self, clip_depth: ClipDepth) {
        self.clip_depth = clip_depth;
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Set the screen rectangle the widgets live in
    pub fn set_viewport(&mut self, viewport: Rect) -> GuizmoResult<()> {
        if viewport.is_empty() {
            return Err(GuizmoError::invalid_viewport(format!(
                "viewport must have a positive size, got {}x{}",
                viewport.width, viewport.height
            )));
        }
        if !(viewport.x.is_finite() && viewport.y.is_finite()) {
            return Err(GuizmoError::invalid_viewport("viewport origin is not finite"));
        }
        self.viewport = viewport;
        Ok(())
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Snapshot the view and projection for this frame
    pub fn set_camera<V: Mat4Like, P: Mat4Like>(
        &mut self,
        view: &V,
        projection: &P,
        is_orthographic: bool,
    ) -> GuizmoResult<()> {
        self.camera = Camera::new(view.to_mat4(), projection.to_mat4(), is_orthographic)?;
        Ok(())
    }

    /// Pointer state for this frame
    pub fn set_input(&mut self, input: PointerInput) {
        self.input = input;
        self.over_widget = None;
    }

    pub fn input(&self) -> &PointerInput {
        &self.input
    }

    /// World-space pointer ray of the most recent `begin`
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Whether any widget holds the drag
    pub fn is_using(&self) -> bool {
        self.active_widget.is_some()
    }

    pub fn is_using_widget(&self, id: impl Into<WidgetId>) -> bool {
        self.active_widget == Some(id.into())
    }

    /// Whether an operation reported a hovered element this frame
    pub fn is_over(&self) -> bool {
        self.over_widget.is_some()
    }

    pub fn active_widget(&self) -> Option<WidgetId> {
        self.active_widget
    }

    pub fn widget(&self, id: impl Into<WidgetId>) -> Option<&Widget> {
        self.widgets.get(&id.into())
    }

    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    /// Forget a widget; releases the drag if it held it
    pub fn remove_widget(&mut self, id: impl Into<WidgetId>) -> Option<Widget> {
        let id = id.into();
        if self.active_widget == Some(id) {
            self.active_widget = None;
        }
        self.widgets.remove(&id)
    }

    pub fn clear_widgets(&mut self) {
        self.widgets.clear();
        self.active_widget = None;
        self.over_widget = None;
    }

    /// Plane ranking computed by the most recent `begin`
    pub fn plane_visibility(&self) -> &PlaneVisibility {
        &self.plane_visibility
    }

    /// Split a matrix into translation, rotation in degrees and scale
    pub fn decompose_matrix<M: Mat4Like>(&self, matrix: &M) -> GuizmoResult<MatrixDecomposition> {
        decompose_matrix(&matrix.to_mat4())
    }

    /// Inverse of [`decompose_matrix`](Self::decompose_matrix)
    pub fn recompose_matrix<M: Mat4Like>(
        &self,
        translation: Vec3,
        rotation: Vec3,
        scale: Vec3,
    ) -> M {
        let mut out = M::identity();
        out.set_from_mat4(&recompose_matrix(translation, rotation, scale));
        out
    }

    /// Start the scope of widget `id` for this frame.
    ///
    /// Refreshes the widget from `matrix` and returns a [`Gizmo`] on which to
    /// run operations. When the primary button is up, any drag in progress is
    /// released first.
    pub fn begin<'a, M: Mat4Like>(
        &'a mut self,
        id: impl Into<WidgetId>,
        mode: Mode,
        matrix: &'a mut M,
        locked_axes: AxisFlags,
    ) -> GuizmoResult<Gizmo<'a, M>> {
        let id = id.into();
        if self.viewport.is_empty() {
            return Err(GuizmoError::invalid_viewport("viewport has no area"));
        }
        let source = matrix.to_mat4();
        if !is_matrix_finite(&source) {
            return Err(GuizmoError::invalid_matrix(format!(
                "matrix of widget {id} contains non-finite values"
            )));
        }

        self.ray = Ray::from_screen(
            self.input.position,
            &self.viewport,
            &self.camera.view_projection(),
            self.clip_depth,
        );

        let button_up = !self.input.primary_down;
        if button_up {
            self.drag_origin = Vec2::ZERO;
            // The holder may no longer be submitted; release it from here
            if let Some(active) = self.active_widget.take()
                && let Some(holder) = self.widgets.get_mut(&active)
            {
                crate::guizmo_debug!("widget {} released", active);
                holder.release();
            }
        }

        let widget = self.widgets.entry(id).or_insert_with(|| {
            crate::guizmo_trace!("Creating widget {}", id);
            Widget::new(id)
        });
        if button_up && widget.drag != Drag::Idle {
            crate::guizmo_debug!("widget {} released", id);
            widget.release();
        }
        widget.load(source, mode, &self.camera, &self.viewport, &self.style);
        widget.locked_axes = locked_axes;

        self.plane_visibility = PlaneVisibility::compute(self.camera.eye(), &source);

        let visible = self.camera.is_orthographic()
            || (widget.model_view_proj * Vec4::W).z >= BEHIND_CAMERA_DEPTH;
        if !visible {
            crate::guizmo_trace!("widget {} is behind the camera", id);
        }

        Ok(Gizmo::new(self, matrix, id, visible))
    }

    /// Build a single-call manipulation of widget `id`
    pub fn manipulate<'a, M: Mat4Like>(
        &'a mut self,
        id: impl Into<WidgetId>,
        matrix: &'a mut M,
    ) -> ManipulateBuilder<'a, M> {
        ManipulateBuilder::new(self, id.into(), matrix)
    }

    /// Re-derive the widget frame for `mode`, keeping a result not yet committed
    pub(crate) fn reframe_widget(&mut self, id: WidgetId, mode: Mode) {
        let Some(widget) = self.widgets.get_mut(&id) else {
            return;
        };
        if widget.mode == mode {
            return;
        }
        let pending = widget.dirty.then_some(widget.model_matrix);
        let source = widget.source_matrix;
        widget.load(source, mode, &self.camera, &self.viewport, &self.style);
        if let Some(model) = pending {
            widget.model_matrix = model;
        }
    }

    /// Interactive only when enabled and the pointer is over the viewport
    pub(crate) fn can_activate(&self) -> bool {
        self.enabled && self.viewport.contains(self.input.position)
    }

    pub(crate) fn hover_flags(
        &self,
        id: WidgetId,
        find: impl FnOnce(&HoverContext<'_>) -> AxisFlags,
    ) -> AxisFlags {
        if !self.can_activate() {
            return AxisFlags::empty();
        }
        let Some(widget) = self.widgets.get(&id) else {
            return AxisFlags::empty();
        };
        let hover = HoverContext::new(
            widget,
            &self.camera,
            &self.viewport,
            &self.style,
            &self.ray,
            self.input.position,
        );
        find(&hover)
    }

    /// Resolve press/hold for one operation call.
    ///
    /// While this widget drags, `hovered` is replaced by the captured axes;
    /// while another widget or another operation drags, it is cleared.
    /// Returns `(pressed, held)`.
    pub(crate) fn behavior(
        &mut self,
        id: WidgetId,
        operation: Operation,
        hovered: &mut AxisFlags,
    ) -> (bool, bool) {
        let input = self.input;
        let Some(widget) = self.widgets.get_mut(&id) else {
            *hovered = AxisFlags::empty();
            return (false, false);
        };

        let other_active = self.active_widget.is_some_and(|active| active != id);
        let other_operation = !matches!(widget.drag.operation(), Operation::None)
            && widget.drag.operation() != operation;
        if other_active || other_operation {
            *hovered = AxisFlags::empty();
        } else if !widget.active_axes.is_empty() {
            *hovered = widget.active_axes;
        }

        let pressed = !hovered.is_empty() && input.primary_clicked && self.active_widget.is_none();
        if pressed {
            self.active_widget = Some(id);
            widget.active_axes = *hovered;
            crate::guizmo_debug!("widget {} pressed {} on {}", id, operation, *hovered);
        }

        let mut held = false;
        if !widget.active_axes.is_empty() && widget.active_axes == *hovered {
            if input.primary_down {
                held = true;
            } else {
                widget.release();
                if self.active_widget == Some(id) {
                    self.active_widget = None;
                }
            }
        }

        if !hovered.is_empty() {
            self.over_widget = Some(id);
        }
        (pressed, held)
    }

    /// Undo a press whose drag could not start
    pub(crate) fn abort_drag(&mut self, id: WidgetId) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.release();
        }
        if self.active_widget == Some(id) {
            self.active_widget = None;
        }
    }

    /// Apply a cancel if requested, then hand back the matrix to write if dirty
    pub(crate) fn commit(&mut self, id: WidgetId) -> Option<Mat4> {
        let cancel = self.config_flags.contains(ConfigFlags::HAS_REVERSING)
            && self.input.secondary_clicked;
        let backup = self.backup_matrix;
        let widget = self.widgets.get_mut(&id)?;

        if cancel && !widget.active_axes.is_empty() {
            crate::guizmo_debug!("widget {} drag cancelled", id);
            widget.model_matrix = backup;
            widget.dirty = true;
            widget.release();
            if self.active_widget == Some(id) {
                self.active_widget = None;
            }
        }

        if widget.dirty {
            widget.dirty = false;
            Some(widget.model_matrix)
        } else {
            None
        }
    }
}
