use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

use crate::demo::{CameraConfig, DemoConfig, Geometry, MeshDef};

pub fn config() -> DemoConfig {
    let mut config = DemoConfig::new(
        "terrain",
        include_str!("../shaders/terrain.wgsl"),
        CameraConfig::looking_from(Vec3::new(0.6, 0.45, 1.05)),
    );
    config.meshes.push(
        MeshDef::new(Geometry::Plane {
            width: 4.0,
            height: 4.0,
            seg_x: 128,
            seg_y: 128,
        })
        .rotated(Vec3::new(FRAC_PI_2, 0.0, 0.0))
        .spinning(Vec3::new(0.0, 0.0, 0.001)),
    );
    config.double_sided = true;
    config.wireframe = true;
    config
}
