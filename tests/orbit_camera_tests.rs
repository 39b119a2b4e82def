use glam::Vec3;
use shader_lab::camera::OrbitCamera;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

fn settle(camera: &mut OrbitCamera) {
    // Damping is exponential; a few hundred 60fps steps converge.
    for _ in 0..600 {
        camera.update(1.0 / 60.0);
    }
}

#[test]
fn starts_at_the_configured_eye() {
    let eye = Vec3::new(2.4, 2.4, 1.7);
    let camera = OrbitCamera::from_eye(eye, Vec3::ZERO);
    assert!((camera.position() - eye).length() < 1e-4);
}

#[test]
fn rotation_preserves_distance_to_target() {
    let mut camera = OrbitCamera::from_eye(Vec3::new(0.0, 1.0, 3.0), Vec3::ZERO);
    let radius = camera.position().length();

    camera.rotate(120.0, -40.0);
    settle(&mut camera);

    let moved = camera.position();
    assert!((moved.length() - radius).abs() < 1e-3);
    assert!((moved - Vec3::new(0.0, 1.0, 3.0)).length() > 0.1);
}

#[test]
fn damping_eases_toward_the_desired_pose() {
    let mut camera = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO);
    let start = camera.position();

    camera.rotate(200.0, 0.0);
    camera.update(1.0 / 60.0);
    let after_one = camera.position();
    settle(&mut camera);
    let settled = camera.position();

    // One step moves part of the way; settling moves further.
    let first_step = (after_one - start).length();
    let total = (settled - start).length();
    assert!(first_step > 0.0);
    assert!(total > first_step);
}

#[test]
fn zoom_moves_closer_but_never_through_the_target() {
    let mut camera = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO);

    camera.zoom(1.0);
    settle(&mut camera);
    let closer = camera.position().length();
    assert!(closer < 3.0);

    for _ in 0..100 {
        camera.zoom(1.0);
    }
    settle(&mut camera);
    assert!(camera.position().length() >= 0.19);
}

#[test]
fn polar_limits_clamp_elevation() {
    let mut camera = OrbitCamera::from_eye(Vec3::new(0.05, 1.0, 3.5), Vec3::ZERO);
    camera.set_polar_limits(FRAC_PI_6, FRAC_PI_2);

    // Drag far upward; elevation stays below the polar minimum.
    camera.rotate(0.0, 10_000.0);
    settle(&mut camera);
    let position = camera.position();
    let elevation = (position.y / position.length()).asin();
    assert!(elevation <= FRAC_PI_2 - FRAC_PI_6 + 1e-3);

    // Drag far downward; the horizontal limit holds too.
    camera.rotate(0.0, -20_000.0);
    settle(&mut camera);
    let position = camera.position();
    let elevation = (position.y / position.length()).asin();
    assert!(elevation >= -1e-3);
}

#[test]
fn pan_translates_the_orbit_target() {
    let mut camera = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO);
    let before = camera.position();

    camera.pan(300.0, 0.0);
    settle(&mut camera);

    let after = camera.position();
    assert!((after - before).length() > 0.01);
    // Panning slides the camera sideways without changing its height.
    assert!((after.y - before.y).abs() < 1e-3);
}
