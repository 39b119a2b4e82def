use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

use crate::demo::{CameraConfig, DemoConfig, Geometry, MeshDef, TextureDef, TimeMode};
use crate::uniforms::UniformDecl;

const UNIFORMS: &str = "Uniforms";

pub fn config() -> DemoConfig {
    let mut config = DemoConfig::new(
        "data-texture",
        include_str!("../shaders/data_texture.wgsl"),
        CameraConfig::looking_from(Vec3::new(6.7, 4.0, 6.3)),
    );

    config.meshes.push(
        MeshDef::new(Geometry::Plane {
            width: 10.0,
            height: 10.0,
            seg_x: 64,
            seg_y: 64,
        })
        .rotated(Vec3::new(-FRAC_PI_2, 0.0, 0.0)),
    );

    // The height map reads discrete texels, so it samples nearest.
    config.textures = vec![
        TextureDef {
            file: "1.png",
            nearest: true,
        },
        TextureDef {
            file: "water.png",
            nearest: false,
        },
        TextureDef {
            file: "grass.png",
            nearest: false,
        },
        TextureDef {
            file: "land.png",
            nearest: false,
        },
    ];

    config.uniforms = vec![
        UniformDecl::float("uWaveHeight", 0.3)
            .with_range(0.0, 2.0, 0.01)
            .in_group(UNIFORMS),
        UniformDecl::float("uWaveSpeed", 1.7)
            .with_range(0.0, 5.0, 0.01)
            .in_group(UNIFORMS),
        UniformDecl::float("uGroundHeight", 0.7)
            .with_range(0.0, 5.0, 0.01)
            .in_group(UNIFORMS),
        UniformDecl::float("uGrassHeight", 0.3)
            .with_range(0.0, 5.0, 0.01)
            .in_group(UNIFORMS),
        UniformDecl::float("uScaleFactor", 30.0)
            .with_range(0.0, 100.0, 0.01)
            .in_group(UNIFORMS),
        UniformDecl::float("uRandom", 0.5),
    ];

    // Shader time advances by a fixed step scaled by the wave speed.
    config.time = TimeMode::Scaled {
        uniform: "uWaveSpeed",
        step: 0.01,
    };
    config.double_sided = true;
    config
}
