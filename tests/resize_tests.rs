use shader_lab::camera::OrbitCamera;
use shader_lab::renderer::{overlay_pixels_per_point, surface_extent};

use glam::Vec3;

#[test]
fn surface_matches_logical_size_at_ratio_one() {
    assert_eq!(surface_extent(800, 600, 1.0), (800, 600));
    assert_eq!(surface_extent(1024, 768, 1.0), (1024, 768));
}

#[test]
fn pixel_ratio_is_capped_at_two() {
    // A 3x display never produces more than 2x the logical resolution.
    assert_eq!(surface_extent(400, 400, 3.0), (800, 800));
    assert_eq!(surface_extent(400, 400, 2.0), (800, 800));
}

#[test]
fn fractional_ratios_scale_proportionally() {
    assert_eq!(surface_extent(400, 400, 1.5), (600, 600));
    assert_eq!(surface_extent(800, 600, 1.25), (1000, 750));
}

#[test]
fn surface_is_never_zero_sized() {
    assert_eq!(surface_extent(0, 0, 1.0), (1, 1));
    assert_eq!(surface_extent(1, 1, 0.1), (1, 1));
}

#[test]
fn extent_is_deterministic_across_repeats() {
    let first = surface_extent(1280, 720, 1.75);
    for _ in 0..10 {
        assert_eq!(surface_extent(1280, 720, 1.75), first);
    }
}

#[test]
fn overlay_scale_matches_the_surface_scale() {
    // The egui pass draws into the capped-ratio surface, so its
    // pixels-per-point must track surface_extent, not the raw factor.
    for scale in [1.0, 1.25, 1.5, 2.0, 3.0] {
        let (width, _) = surface_extent(400, 400, scale);
        let ppp = overlay_pixels_per_point(scale);
        assert!((width as f32 - 400.0 * ppp).abs() <= 1.0);
    }
    assert_eq!(overlay_pixels_per_point(3.0), 2.0);
}

#[test]
fn camera_aspect_follows_logical_size() {
    let mut camera = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO);
    camera.set_aspect(800.0, 600.0);
    assert!((camera.aspect() - 800.0 / 600.0).abs() < 1e-6);

    // Pixel ratio never enters the aspect; logical size alone does.
    camera.set_aspect(400.0, 400.0);
    assert!((camera.aspect() - 1.0).abs() < 1e-6);
}

#[test]
fn zero_height_leaves_aspect_unchanged() {
    let mut camera = OrbitCamera::from_eye(Vec3::new(0.0, 0.0, 3.0), Vec3::ZERO);
    camera.set_aspect(800.0, 600.0);
    let before = camera.aspect();
    camera.set_aspect(800.0, 0.0);
    assert_eq!(camera.aspect(), before);
}
