use glam::Vec3;

use crate::demo::{CameraConfig, DemoConfig, Geometry, MeshDef};

pub fn config() -> DemoConfig {
    let mut config = DemoConfig::new(
        "step-mix",
        include_str!("../shaders/step_mix.wgsl"),
        CameraConfig::looking_from(Vec3::new(0.0, 0.0, 0.8)),
    );
    config.meshes.push(MeshDef::new(Geometry::Plane {
        width: 1.0,
        height: 1.0,
        seg_x: 32,
        seg_y: 32,
    }));
    config.double_sided = true;
    config
}
