mod common;

use approx::assert_relative_eq;
use common::Harness;
use dear_imguizmo_core::{
    AxisFlags, BoundHandle, Bounds, GuizmoError, Mat4, Operation, Plane, PointerInput, Vec2, Vec3,
};
use pretty_assertions::assert_eq;

fn cube() -> Bounds {
    Bounds::new(Vec3::splat(-1.0), Vec3::splat(1.0)).unwrap()
}

#[test]
fn corner_drag_keeps_opposite_corner_fixed() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    let bounds = cube();
    let corner = harness.screen(Vec3::new(1.0, 1.0, 0.0));

    let (hover, _) = harness.frame(PointerInput::hover(corner), |gizmo| {
        gizmo.bounds_scale(&bounds, None)
    });
    assert_eq!(hover.interaction.hovered, AxisFlags::XY);
    assert_eq!(hover.plane, Some(Plane::XY));
    assert_eq!(hover.handle, Some(BoundHandle::Corner(2)));

    let (press, _) = harness.frame(PointerInput::press(corner), |gizmo| {
        gizmo.bounds_scale(&bounds, None)
    });
    assert!(press.interaction.pressed);

    let target = harness.screen(Vec3::new(1.5, 1.5, 0.0));
    let (drag, modified) = harness.frame(PointerInput::drag(target), |gizmo| {
        gizmo.bounds_scale(&bounds, None)
    });
    assert!(modified);
    assert_eq!(drag.handle, Some(BoundHandle::Corner(2)));
    assert_relative_eq!(
        drag.extents.expect("extents while dragging"),
        Vec3::new(2.5, 2.5, 2.0),
        epsilon = 1e-3
    );

    let pivot = harness.matrix.transform_point3(Vec3::new(-1.0, -1.0, 0.0));
    assert_relative_eq!(pivot, Vec3::new(-1.0, -1.0, 0.0), epsilon = 1e-4);
    let grabbed = harness.matrix.transform_point3(Vec3::new(1.0, 1.0, 0.0));
    assert_relative_eq!(grabbed, Vec3::new(1.5, 1.5, 0.0), epsilon = 1e-3);
    // Depth is untouched by an XY corner
    assert_eq!(harness.matrix.z_axis, Mat4::IDENTITY.z_axis);
}

#[test]
fn edge_drag_scales_one_axis() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    let bounds = cube();
    // Mid handle 1 of XY sits on the +Y edge
    let edge = harness.screen(Vec3::new(0.0, 1.0, 0.0));

    let (press, _) = harness.frame(PointerInput::press(edge), |gizmo| {
        gizmo.bounds_scale(&bounds, None)
    });
    assert_eq!(press.handle, Some(BoundHandle::Mid(1)));
    assert_eq!(press.interaction.hovered, AxisFlags::Y);

    let target = harness.screen(Vec3::new(0.3, 2.0, 0.0));
    harness.frame(PointerInput::drag(target), |gizmo| gizmo.bounds_scale(&bounds, None));

    assert_relative_eq!(harness.matrix.x_axis.x, 1.0, epsilon = 1e-6);
    assert_relative_eq!(harness.matrix.y_axis.y, 1.5, epsilon = 1e-3);
    let pivot = harness.matrix.transform_point3(Vec3::new(0.0, -1.0, 0.0));
    assert_relative_eq!(pivot, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-4);
}

#[test]
fn snapped_extents() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    let bounds = cube();
    let snap = Some(Vec3::splat(1.0));
    let corner = harness.screen(Vec3::new(1.0, 1.0, 0.0));

    harness.frame(PointerInput::press(corner), |gizmo| gizmo.bounds_scale(&bounds, snap));
    // Raw extents 2.8 snap to 3
    let target = harness.screen(Vec3::new(1.8, 1.8, 0.0));
    let (drag, _) = harness.frame(PointerInput::drag(target), |gizmo| {
        gizmo.bounds_scale(&bounds, snap)
    });

    assert_relative_eq!(
        drag.extents.expect("extents"),
        Vec3::new(3.0, 3.0, 2.0),
        epsilon = 1e-4
    );
}

#[test]
fn locked_axes_disable_handles() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    harness.locked = AxisFlags::X;
    let bounds = cube();

    let corner = harness.screen(Vec3::new(1.0, 1.0, 0.0));
    let (hover, _) = harness.frame(PointerInput::hover(corner), |gizmo| {
        gizmo.bounds_scale(&bounds, None)
    });
    assert!(!hover.interaction.is_hovered());

    // The Y edge handle does not involve X
    let edge = harness.screen(Vec3::new(0.0, 1.0, 0.0));
    let (hover, _) = harness.frame(PointerInput::hover(edge), |gizmo| {
        gizmo.bounds_scale(&bounds, None)
    });
    assert_eq!(hover.interaction.hovered, AxisFlags::Y);
}

#[test]
fn builder_requires_bounds() {
    let mut harness = Harness::new(Vec3::new(0.0, 0.0, 5.0));
    let mut matrix = Mat4::IDENTITY;
    let result = harness
        .context
        .manipulate(common::WIDGET, &mut matrix)
        .operation(Operation::BoundsScale)
        .apply();
    assert!(matches!(result, Err(GuizmoError::InvalidOperation { .. })));

    harness
        .context
        .set_input(PointerInput::hover(Vec2::new(400.0, 300.0)));
    let result = harness
        .context
        .manipulate(common::WIDGET, &mut matrix)
        .operation(Operation::BoundsScale)
        .bounds(cube())
        .apply()
        .unwrap();
    assert!(!result.modified);
    assert!(result.extents.is_none());
}

#[test]
fn press_without_motion_leaves_matrix_untouched() {
    let original = Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 1.5, 0.8),
        glam::Quat::from_rotation_z(0.3),
        Vec3::new(0.2, -0.21, 0.1),
    );
    let mut harness = Harness::with_matrix(Vec3::new(1.0, 2.0, 5.0), original);
    let bounds = cube();
    let handles = [
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
    ];

    for handle in handles {
        let grab = harness.screen(original.transform_point3(handle));
        let (press, pressed_modified) = harness.frame(PointerInput::press(grab), |gizmo| {
            gizmo.bounds_scale(&bounds, None)
        });
        let (_, held_modified) = harness.frame(PointerInput::drag(grab), |gizmo| {
            gizmo.bounds_scale(&bounds, None)
        });
        harness.frame(PointerInput::hover(grab), |gizmo| gizmo.bounds_scale(&bounds, None));

        assert!(press.interaction.pressed);
        assert!(!pressed_modified);
        assert!(!held_modified);
        assert_eq!(harness.matrix, original);
    }
}
