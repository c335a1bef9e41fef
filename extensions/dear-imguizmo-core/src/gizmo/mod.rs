//! Widget scope and manipulation operations
//!
//! [`GuizmoContext::begin`] returns a [`Gizmo`] that borrows both the context
//! and the caller's matrix. Operations are run on the scope, and
//! [`Gizmo::end`] (or dropping the scope) writes the matrix back if a drag
//! changed it.

pub mod bounds;
pub mod manipulate;
pub mod rotate;
pub mod scale;
pub mod translate;

use crate::context::GuizmoContext;
use crate::interaction::{BoundHover, HoverContext};
use crate::mat::Mat4Like;
use crate::types::{AxisFlags, Mode, Operation, Plane, Vec3, WidgetId};
use crate::widget::{Drag, Widget};

pub use bounds::{BoundHandle, Bounds};
pub use manipulate::{ManipulateBuilder, ManipulationResult};

/// What one operation call observed this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Interaction {
    /// Element under the pointer, or the captured axes while dragging
    pub hovered: AxisFlags,
    /// A drag started this frame
    pub pressed: bool,
    /// A drag is in progress (includes the press frame while the button is down)
    pub held: bool,
    pub operation: Operation,
}

impl Interaction {
    pub fn is_hovered(&self) -> bool {
        !self.hovered.is_empty()
    }
}

/// BoundsScale result with the handle and box size
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundsInteraction {
    pub interaction: Interaction,
    /// Face of the hovered or dragged handle
    pub plane: Option<Plane>,
    pub handle: Option<BoundHandle>,
    /// World-space size of the box while dragging
    pub extents: Option<Vec3>,
}

/// One widget's begin/end scope
///
/// Holding the scope keeps the context and matrix mutably borrowed, so
/// widgets cannot nest and `end` cannot run without a matching `begin`.
#[must_use = "call `end` to learn whether the matrix changed"]
pub struct Gizmo<'a, M: Mat4Like> {
    context: &'a mut GuizmoContext,
    matrix: &'a mut M,
    id: WidgetId,
    visible: bool,
    finished: bool,
}

impl<'a, M: Mat4Like> Gizmo<'a, M> {
    pub(crate) fn new(
        context: &'a mut GuizmoContext,
        matrix: &'a mut M,
        id: WidgetId,
        visible: bool,
    ) -> Self {
        Self {
            context,
            matrix,
            id,
            visible,
            finished: false,
        }
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Whether the widget origin is in front of the camera
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn widget(&self) -> Option<&Widget> {
        self.context.widget(self.id)
    }

    /// Translate along an axis, in a plane or parallel to the screen.
    ///
    /// `snap` holds per-axis increments in world units.
    pub fn translate(&mut self, snap: Option<Vec3>) -> Interaction {
        self.run(
            Operation::Translate,
            |hover| hover.find_translation_hover(),
            GuizmoContext::begin_translation,
            |context, id| context.continue_translation(id, snap),
        )
    }

    /// Rotate around an axis or the view direction; `snap_degrees` is the
    /// angle increment.
    pub fn rotate(&mut self, snap_degrees: Option<f32>) -> Interaction {
        self.run(
            Operation::Rotate,
            |hover| hover.find_rotation_hover(),
            GuizmoContext::begin_rotation,
            |context, id| context.continue_rotation(id, snap_degrees),
        )
    }

    /// Scale one axis or uniformly; `snap` is the ratio increment.
    ///
    /// Scaling always follows the object's own axes, also in [`Mode::World`].
    pub fn scale(&mut self, snap: Option<f32>) -> Interaction {
        let mode = self.context.widget(self.id).map(Widget::mode);
        if mode == Some(Mode::World) {
            self.context.reframe_widget(self.id, Mode::Local);
        }
        let interaction = self.run(
            Operation::Scale,
            |hover| hover.find_scale_hover(),
            GuizmoContext::begin_scale,
            |context, id| context.continue_scale(id, snap),
        );
        if mode == Some(Mode::World) {
            self.context.reframe_widget(self.id, Mode::World);
        }
        interaction
    }

    /// Resize the local box `bounds` by its handles; `snap` holds per-axis
    /// extent increments.
    pub fn bounds_scale(&mut self, bounds: &Bounds, snap: Option<Vec3>) -> BoundsInteraction {
        let id = self.id;
        let context = &mut *self.context;
        context.bounds.rebuild(bounds);

        let hover = context.bound_hover(id);
        let mut hovered = hover.map_or(AxisFlags::empty(), |h| h.axes);
        let (mut pressed, mut held) = context.behavior(id, Operation::BoundsScale, &mut hovered);
        if pressed {
            let started = hover.is_some_and(|hover| context.begin_bounds_scale(id, hover));
            if !started {
                context.abort_drag(id);
                pressed = false;
                held = false;
            }
        }

        let extents = if held {
            context.continue_bounds_scale(id, bounds, snap)
        } else {
            None
        };

        // While dragging, report the grabbed handle rather than the one under the pointer
        let (plane, handle) = match context.widget(id).map(|w| w.drag) {
            Some(Drag::BoundsScale(drag)) => (Some(drag.plane), Some(drag.handle)),
            _ if !hovered.is_empty() => (hover.map(|h| h.plane), hover.map(|h| h.handle)),
            _ => (None, None),
        };

        BoundsInteraction {
            interaction: Interaction {
                hovered,
                pressed,
                held,
                operation: Operation::BoundsScale,
            },
            plane,
            handle,
            extents,
        }
    }

    fn run(
        &mut self,
        operation: Operation,
        find_hover: impl FnOnce(&HoverContext<'_>) -> AxisFlags,
        begin: fn(&mut GuizmoContext, WidgetId) -> bool,
        update: impl FnOnce(&mut GuizmoContext, WidgetId),
    ) -> Interaction {
        let id = self.id;
        let context = &mut *self.context;

        let mut hovered = context.hover_flags(id, find_hover);
        let (mut pressed, mut held) = context.behavior(id, operation, &mut hovered);

        if pressed && !begin(context, id) {
            context.abort_drag(id);
            pressed = false;
            held = false;
        }
        if held {
            update(context, id);
        }

        Interaction {
            hovered,
            pressed,
            held,
            operation,
        }
    }

    /// Finish the scope, writing the matrix back if it changed
    pub fn end(mut self) -> bool {
        self.finish()
    }

    fn finish(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        match self.context.commit(self.id) {
            Some(matrix) => {
                self.matrix.set_from_mat4(&matrix);
                true
            }
            None => false,
        }
    }
}

impl<M: Mat4Like> Drop for Gizmo<'_, M> {
    fn drop(&mut self) {
        self.finish();
    }
}

impl<M: Mat4Like> std::fmt::Debug for Gizmo<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gizmo")
            .field("id", &self.id)
            .field("visible", &self.visible)
            .field("finished", &self.finished)
            .finish()
    }
}

/// Bounds handle lookup used by [`Gizmo::bounds_scale`]
impl GuizmoContext {
    pub(crate) fn bound_hover(&self, id: WidgetId) -> Option<BoundHover> {
        if !self.can_activate() {
            return None;
        }
        let widget = self.widgets.get(&id)?;
        let mvp = self.camera.view_projection() * widget.source_matrix;
        crate::interaction::find_bound_hover(
            self.input.position,
            &self.bounds,
            &mvp,
            &self.viewport,
            &self.plane_visibility,
            widget.locked_axes,
        )
    }
}
