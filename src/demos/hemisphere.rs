use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

use crate::demo::{CameraConfig, DemoConfig, ModelDef};

pub fn config() -> DemoConfig {
    let mut config = DemoConfig::new(
        "hemisphere",
        include_str!("../shaders/hemisphere.wgsl"),
        CameraConfig::looking_from(Vec3::new(0.0, 0.0, 3.0)),
    );
    config.model = Some(
        ModelDef::new("model.glb")
            .rotated(Vec3::new(FRAC_PI_2, 0.0, 0.0))
            .spinning(Vec3::new(0.0, 0.0025, 0.0)),
    );
    config.background = Some("map");
    config
}
