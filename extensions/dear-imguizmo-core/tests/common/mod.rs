#![allow(dead_code)]

use dear_imguizmo_core::math::{PlaneEquation, Ray, intersect_ray_plane, world_to_screen};
use dear_imguizmo_core::{
    AxisFlags, ClipDepth, Gizmo, GuizmoContext, Mat4, Mode, PointerInput, Rect, Vec2, Vec3,
    WidgetId,
};

pub const WIDGET: WidgetId = WidgetId(1);

pub fn viewport() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 600.0)
}

pub fn projection() -> Mat4 {
    Mat4::perspective_rh(45f32.to_radians(), 800.0 / 600.0, 0.1, 100.0)
}

/// One widget seen from `eye`, driven frame by frame
pub struct Harness {
    pub context: GuizmoContext,
    pub matrix: Mat4,
    pub mode: Mode,
    pub locked: AxisFlags,
}

impl Harness {
    pub fn new(eye: Vec3) -> Self {
        Self::with_matrix(eye, Mat4::IDENTITY)
    }

    pub fn with_matrix(eye: Vec3, matrix: Mat4) -> Self {
        let mut context = GuizmoContext::new();
        context.set_viewport(viewport()).expect("viewport");
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        context
            .set_camera(&view, &projection(), false)
            .expect("camera");
        Self {
            context,
            matrix,
            mode: Mode::Local,
            locked: AxisFlags::empty(),
        }
    }

    /// Run one frame for the widget; returns `op`'s result and whether the
    /// matrix was written back
    pub fn frame<R>(
        &mut self,
        input: PointerInput,
        op: impl FnOnce(&mut Gizmo<'_, Mat4>) -> R,
    ) -> (R, bool) {
        self.context.set_input(input);
        let mut gizmo = self
            .context
            .begin(WIDGET, self.mode, &mut self.matrix, self.locked)
            .expect("begin");
        let result = op(&mut gizmo);
        (result, gizmo.end())
    }

    pub fn screen(&self, world: Vec3) -> Vec2 {
        world_to_screen(world, &self.context.camera().view_projection(), &viewport())
    }

    pub fn screen_factor(&self) -> f32 {
        self.context
            .widget(WIDGET)
            .map_or(0.0, |widget| widget.screen_factor())
    }

    /// World point under `pixel` on the plane through `point` with `normal`
    pub fn hit_on_plane(&self, pixel: Vec2, point: Vec3, normal: Vec3) -> Vec3 {
        let ray = Ray::from_screen(
            pixel,
            &viewport(),
            &self.context.camera().view_projection(),
            ClipDepth::ZeroToOne,
        );
        let plane = PlaneEquation::from_point_normal(point, normal);
        let distance = intersect_ray_plane(&ray, &plane).expect("ray hits plane");
        ray.point_at(distance)
    }
}
