mod common;

use approx::assert_relative_eq;
use common::Harness;
use dear_imguizmo_core::math::MIN_SCALE;
use dear_imguizmo_core::{AxisFlags, Mat4, Mode, PointerInput, Vec2, Vec3, Vec4};
use glam::Quat;
use pretty_assertions::assert_eq;

#[test]
fn uniform_scale_follows_horizontal_motion() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    let center = harness.screen(Vec3::ZERO);

    let (press, _) = harness.frame(PointerInput::press(center), |gizmo| gizmo.scale(None));
    assert_eq!(press.hovered, AxisFlags::ALL);

    // 50 px at 0.01 per pixel
    let input = PointerInput::drag(center + Vec2::new(50.0, 0.0));
    let (drag, modified) = harness.frame(input, |gizmo| gizmo.scale(None));
    assert!(drag.held);
    assert!(modified);
    assert_relative_eq!(harness.matrix, Mat4::from_scale(Vec3::splat(1.5)), epsilon = 1e-5);

    // Vertical motion alone changes nothing
    let (_, modified) = harness.frame(PointerInput::drag(center + Vec2::new(50.0, 80.0)), |gizmo| {
        gizmo.scale(None)
    });
    assert!(!modified);
}

#[test]
fn uniform_scale_keeps_locked_column() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    harness.locked = AxisFlags::X;
    let center = harness.screen(Vec3::ZERO);

    harness.frame(PointerInput::press(center), |gizmo| gizmo.scale(None));
    harness.frame(PointerInput::drag(center + Vec2::new(50.0, 0.0)), |gizmo| gizmo.scale(None));

    assert_eq!(harness.matrix.x_axis, Vec4::X);
    assert_relative_eq!(harness.matrix.y_axis, Vec4::Y * 1.5, epsilon = 1e-5);
    assert_relative_eq!(harness.matrix.z_axis, Vec4::Z * 1.5, epsilon = 1e-5);
}

#[test]
fn uniform_scale_is_clamped() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    let center = harness.screen(Vec3::ZERO);

    harness.frame(PointerInput::press(center), |gizmo| gizmo.scale(None));
    harness.frame(PointerInput::drag(center - Vec2::new(300.0, 0.0)), |gizmo| gizmo.scale(None));

    assert_relative_eq!(harness.matrix.x_axis.x, MIN_SCALE, epsilon = 1e-7);
    assert!(harness.matrix.determinant() > 0.0);
}

#[test]
fn single_axis_scale_ratio() {
    let mut harness = Harness::new(Vec3::new(3.0, 3.0, 5.0));
    harness.frame(PointerInput::hover(Vec2::ZERO), |gizmo| gizmo.scale(None));
    let sf = harness.screen_factor();

    let grab = harness.screen(Vec3::X * sf * 0.6);
    let (press, _) = harness.frame(PointerInput::press(grab), |gizmo| gizmo.scale(None));
    assert_eq!(press.hovered, AxisFlags::X);

    // Twice the distance along the axis doubles the X column
    let target = harness.screen(Vec3::X * sf * 1.2);
    harness.frame(PointerInput::drag(target), |gizmo| gizmo.scale(None));

    assert_relative_eq!(
        harness.matrix,
        Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)),
        epsilon = 1e-3
    );
}

#[test]
fn snapped_scale_uses_ratio_increment() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    let center = harness.screen(Vec3::ZERO);

    harness.frame(PointerInput::press(center), |gizmo| gizmo.scale(Some(0.25)));
    // Raw ratio 1.4 snaps to 1.5
    harness.frame(PointerInput::drag(center + Vec2::new(40.0, 0.0)), |gizmo| {
        gizmo.scale(Some(0.25))
    });

    assert_relative_eq!(harness.matrix, Mat4::from_scale(Vec3::splat(1.5)), epsilon = 1e-5);
}

#[test]
fn single_axis_scale_keeps_locked_column() {
    let stretched = Mat4::from_scale(Vec3::new(1.0, 2.0, 1.0));
    let mut harness = Harness::with_matrix(Vec3::new(3.0, 3.0, 5.0), stretched);
    harness.locked = AxisFlags::Y;
    harness.frame(PointerInput::hover(Vec2::ZERO), |gizmo| gizmo.scale(None));
    let sf = harness.screen_factor();

    let grab = harness.screen(Vec3::X * sf * 0.6);
    let (press, _) = harness.frame(PointerInput::press(grab), |gizmo| gizmo.scale(None));
    assert_eq!(press.hovered, AxisFlags::X);

    let target = harness.screen(Vec3::X * sf * 1.2);
    let (_, modified) = harness.frame(PointerInput::drag(target), |gizmo| gizmo.scale(None));
    assert!(modified);

    assert_relative_eq!(harness.matrix.x_axis, Vec4::X * 2.0, epsilon = 1e-3);
    assert_eq!(harness.matrix.y_axis, stretched.y_axis);
    assert_eq!(harness.matrix.z_axis, Vec4::Z);
}

#[test]
fn world_mode_scales_along_object_axes() {
    // Local X points along world Y
    let rotated = Mat4::from_quat(Quat::from_rotation_z(90f32.to_radians()));
    let mut harness = Harness::with_matrix(Vec3::new(3.0, 3.0, 5.0), rotated);
    harness.mode = Mode::World;
    harness.frame(PointerInput::hover(Vec2::ZERO), |gizmo| gizmo.scale(None));
    let sf = harness.screen_factor();

    let grab = harness.screen(Vec3::Y * sf * 0.6);
    let (press, _) = harness.frame(PointerInput::press(grab), |gizmo| gizmo.scale(None));
    assert_eq!(press.hovered, AxisFlags::X);

    let target = harness.screen(Vec3::Y * sf * 1.2);
    let (_, modified) = harness.frame(PointerInput::drag(target), |gizmo| gizmo.scale(None));
    assert!(modified);

    assert_relative_eq!(
        harness.matrix,
        rotated * Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0)),
        epsilon = 1e-3
    );
    assert_eq!(
        harness.context.widget(common::WIDGET).map(|widget| widget.mode()),
        Some(Mode::World)
    );
}

#[test]
fn press_without_motion_leaves_matrix_untouched() {
    let original = Mat4::from_scale_rotation_translation(
        Vec3::new(1.2, 0.8, 1.5),
        Quat::from_rotation_y(0.4),
        Vec3::new(0.37, -0.21, 0.13),
    );
    let mut harness = Harness::with_matrix(Vec3::new(3.0, 3.0, 5.0), original);
    harness.frame(PointerInput::hover(Vec2::ZERO), |gizmo| gizmo.scale(None));
    let sf = harness.screen_factor();
    let origin = original.w_axis.truncate();
    let rotation = Quat::from_rotation_y(0.4);

    let mut presses = 0;
    for step in 0..40 {
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            let along = rotation * axis * sf * (0.2 + step as f32 * 0.02);
            let grab = harness.screen(origin + along);
            let (press, pressed_modified) =
                harness.frame(PointerInput::press(grab), |gizmo| gizmo.scale(None));
            let (_, held_modified) =
                harness.frame(PointerInput::drag(grab), |gizmo| gizmo.scale(None));
            harness.frame(PointerInput::hover(grab), |gizmo| gizmo.scale(None));

            presses += usize::from(press.pressed);
            assert!(!pressed_modified);
            assert!(!held_modified);
            assert_eq!(harness.matrix, original);
        }
    }
    assert!(presses > 0);
}
