use glam::Vec3;

use crate::demo::{CameraConfig, DemoConfig, Geometry, MeshDef, ModelDef};

pub fn config() -> DemoConfig {
    let mut config = DemoConfig::new(
        "fresnel",
        include_str!("../shaders/fresnel.wgsl"),
        CameraConfig::looking_from(Vec3::new(0.05, 1.0, 3.5)),
    );

    // The model and the torus knot share one reflective material.
    config.model = Some(
        ModelDef::new("monkey.glb")
            .at(Vec3::new(1.25, -0.5, 0.0))
            .spinning(Vec3::new(0.0, 0.0025, 0.0)),
    );
    config.meshes.push(
        MeshDef::new(Geometry::TorusKnot {
            radius: 0.5,
            tube: 0.2,
            tubular_segments: 100,
            radial_segments: 16,
        })
        .at(Vec3::new(-1.25, 0.0, 0.0))
        .spinning(Vec3::splat(0.0025)),
    );

    config.background = Some("map3");
    config.environment_map = true;
    config
}
