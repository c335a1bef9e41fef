mod common;

use common::{Harness, WIDGET};
use dear_imguizmo_core::math::world_to_screen;
use dear_imguizmo_core::{
    AxisFlags, GuizmoContext, Mat4, Mode, Operation, PointerInput, Vec2, Vec3, WidgetId,
};
use pretty_assertions::assert_eq;

#[test]
fn idle_frames_leave_matrix_untouched() {
    let original = Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 2.0, 0.5),
        glam::Quat::from_rotation_x(0.4),
        Vec3::new(0.2, -0.1, 0.3),
    );
    let mut harness = Harness::with_matrix(Vec3::new(2.0, 1.0, 5.0), original);

    for x in [100.0, 400.0, 410.0, 700.0] {
        let pointer = PointerInput::hover(Vec2::new(x, 300.0));
        let (_, modified) = harness.frame(pointer, |gizmo| {
            gizmo.translate(None);
            gizmo.rotate(None);
            gizmo.scale(None);
        });
        assert!(!modified);
    }
    assert_eq!(harness.matrix, original);
    assert!(!harness.context.is_using());
}

#[test]
fn only_one_widget_drags_at_a_time() {
    let mut context = GuizmoContext::new();
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    context
        .set_camera(&view, &common::projection(), false)
        .unwrap();

    let mut first = Mat4::IDENTITY;
    let mut second = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
    let first_id = WidgetId::from("first");
    let second_id = WidgetId::from("second");

    let mut frame = |context: &mut GuizmoContext, input: PointerInput| {
        context.set_input(input);
        let mut gizmo = context
            .begin(first_id, Mode::Local, &mut first, AxisFlags::empty())
            .unwrap();
        let a = gizmo.translate(None);
        gizmo.end();
        let mut gizmo = context
            .begin(second_id, Mode::Local, &mut second, AxisFlags::empty())
            .unwrap();
        let b = gizmo.translate(None);
        gizmo.end();
        (a, b)
    };

    let center = Vec2::new(400.0, 300.0);
    let (a, b) = frame(&mut context, PointerInput::press(center));
    assert!(a.pressed);
    assert!(!b.pressed);
    assert!(context.is_using_widget(first_id));

    // Drag the first widget over the second one's core
    let second_origin = context.widget(second_id).unwrap().screen_origin();
    let (a, b) = frame(&mut context, PointerInput::drag(second_origin));
    assert!(a.held);
    assert!(!b.is_hovered());
    assert!(!b.held);
    assert_eq!(context.active_widget(), Some(first_id));

    let (a, b) = frame(&mut context, PointerInput::hover(second_origin));
    assert!(!a.held);
    assert_eq!(b.hovered, AxisFlags::ALL);
    assert!(!context.is_using());
    assert!(context.is_over());
}

#[test]
fn operations_do_not_steal_each_others_drag() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    let center = harness.screen(Vec3::ZERO);

    let ((translate, scale), _) = harness.frame(PointerInput::press(center), |gizmo| {
        (gizmo.translate(None), gizmo.scale(None))
    });
    assert!(translate.pressed);
    assert!(!scale.pressed);
    assert!(!scale.is_hovered());

    let ((translate, scale), _) = harness.frame(
        PointerInput::drag(center + Vec2::new(20.0, 0.0)),
        |gizmo| (gizmo.translate(None), gizmo.scale(None)),
    );
    assert!(translate.held);
    assert!(!scale.held);
    assert_eq!(
        harness.context.widget(WIDGET).unwrap().active_operation(),
        Operation::Translate
    );
    // Only translation happened
    assert_eq!(harness.matrix.x_axis, Mat4::IDENTITY.x_axis);
}

#[test]
fn widget_behind_camera_is_reported_invisible() {
    let mut harness = Harness::with_matrix(
        Vec3::new(0.0, 0.0, 5.0),
        Mat4::from_translation(Vec3::new(0.0, 0.0, 8.0)),
    );
    let (visible, modified) =
        harness.frame(PointerInput::hover(Vec2::new(400.0, 300.0)), |gizmo| gizmo.is_visible());
    assert!(!visible);
    assert!(!modified);

    let mut matrix = harness.matrix;
    let result = harness
        .context
        .manipulate(WIDGET, &mut matrix)
        .operation(Operation::Rotate)
        .apply()
        .unwrap();
    assert!(!result.visible);
    assert_eq!(result.hovered, AxisFlags::empty());
}

#[test]
fn removing_the_active_widget_releases_the_drag() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    let center = harness.screen(Vec3::ZERO);
    harness.frame(PointerInput::press(center), |gizmo| gizmo.translate(None));
    assert!(harness.context.is_using_widget(WIDGET));

    assert!(harness.context.remove_widget(WIDGET).is_some());
    assert!(!harness.context.is_using());
    assert_eq!(harness.context.widget_count(), 0);

    harness.frame(PointerInput::hover(center), |gizmo| gizmo.translate(None));
    assert_eq!(harness.context.widget_count(), 1);
    harness.context.clear_widgets();
    assert_eq!(harness.context.widget_count(), 0);
}

#[test]
fn pointer_outside_viewport_does_not_hover() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    let (interaction, _) = harness.frame(PointerInput::press(Vec2::new(-20.0, 300.0)), |gizmo| {
        gizmo.translate(None)
    });
    assert!(!interaction.is_hovered());
    assert!(!harness.context.is_over());
}

#[test]
fn release_frees_the_lock_when_the_holder_is_not_drawn() {
    let mut context = GuizmoContext::new();
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    context
        .set_camera(&view, &common::projection(), false)
        .unwrap();

    let first_id = WidgetId::from("first");
    let second_id = WidgetId::from("second");
    let mut first = Mat4::IDENTITY;
    let mut second = Mat4::from_translation(Vec3::new(1.5, 0.0, 0.0));
    let first_center = Vec2::new(400.0, 300.0);
    let second_center = world_to_screen(
        Vec3::new(1.5, 0.0, 0.0),
        &context.camera().view_projection(),
        &common::viewport(),
    );

    let translate = |context: &mut GuizmoContext, id: WidgetId, matrix: &mut Mat4| {
        let mut gizmo = context
            .begin(id, Mode::Local, matrix, AxisFlags::empty())
            .unwrap();
        let interaction = gizmo.translate(None);
        gizmo.end();
        interaction
    };

    context.set_input(PointerInput::press(first_center));
    assert!(translate(&mut context, first_id, &mut first).pressed);
    assert!(context.is_using_widget(first_id));

    // The first widget is no longer drawn when the button comes up
    context.set_input(PointerInput::hover(second_center));
    let hover = translate(&mut context, second_id, &mut second);
    assert!(!context.is_using());
    assert_eq!(hover.hovered, AxisFlags::ALL);

    // Drawn again, the first widget must not resume its old drag
    context.set_input(PointerInput::press(second_center));
    let a = translate(&mut context, first_id, &mut first);
    let b = translate(&mut context, second_id, &mut second);
    assert!(!a.pressed);
    assert!(!a.held);
    assert!(b.pressed);
    assert_eq!(context.active_widget(), Some(second_id));
    assert_eq!(first, Mat4::IDENTITY);
}
