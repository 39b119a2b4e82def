use glam::Vec3;

use crate::demo::{CameraConfig, DemoConfig, Geometry, MeshDef};
use crate::uniforms::UniformDecl;

pub fn config() -> DemoConfig {
    let mut config = DemoConfig::new(
        "pattern",
        include_str!("../shaders/pattern.wgsl"),
        CameraConfig::looking_from(Vec3::new(0.0, 0.0, 1.0)),
    );
    config.meshes.push(MeshDef::new(Geometry::Plane {
        width: 2.0,
        height: 2.0,
        seg_x: 128,
        seg_y: 128,
    }));
    config.uniforms = vec![
        UniformDecl::float("uTerrainElevation", 0.01).with_range(0.0, 0.05, 0.01),
        UniformDecl::color("uC1", [1.0, 0.0, 0.4]),
        UniformDecl::color("uC2", [0.071, 0.075, 0.086]),
    ];
    config.double_sided = true;
    config
}
