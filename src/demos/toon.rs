use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_6};

use crate::demo::{CameraConfig, DemoConfig, ModelDef};
use crate::uniforms::UniformDecl;

pub fn config() -> DemoConfig {
    let mut config = DemoConfig::new(
        "toon",
        include_str!("../shaders/toon.wgsl"),
        CameraConfig {
            eye: Vec3::new(0.05, 1.0, 3.5),
            target: Vec3::ZERO,
            polar_limits: Some((FRAC_PI_6, FRAC_PI_2)),
        },
    );

    config.model = Some(
        ModelDef::new("whitebeard.glb")
            .at(Vec3::new(0.0, -1.7, 0.0))
            .spinning(Vec3::new(0.0, 0.0025, 0.0)),
    );

    config.uniforms = vec![
        UniformDecl::color("uLightColor", [1.0, 0.976, 0.922]),
        UniformDecl::float("uLightIntensity", 0.7),
        UniformDecl::vec3("uLightPosition", Vec3::new(1.0, 1.0, 1.0)),
        UniformDecl::float("uSpecularPower", 50.0),
        UniformDecl::color("uRimLightColor", [1.0, 0.976, 0.922]),
        UniformDecl::float("uRimLightPower", 10.0),
        UniformDecl::float("uEnvironmentReflectionIntensity", 0.01),
    ];

    config.background = Some("map");
    config.environment_map = true;
    config.model_texture = true;
    config
}
