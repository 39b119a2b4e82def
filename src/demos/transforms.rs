use glam::Vec3;

use crate::demo::{CameraConfig, DemoConfig, Geometry, MeshDef};

pub fn config() -> DemoConfig {
    let mut config = DemoConfig::new(
        "transforms",
        include_str!("../shaders/transforms.wgsl"),
        CameraConfig::looking_from(Vec3::new(0.0, 0.3, 3.5)),
    );
    config.meshes.push(MeshDef::new(Geometry::Torus {
        radius: 1.0,
        tube: 0.4,
        radial_segments: 64,
        tubular_segments: 48,
    }));
    config.background = Some("map");
    config
}
