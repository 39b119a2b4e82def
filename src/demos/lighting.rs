use glam::Vec3;

use crate::demo::{CameraConfig, DemoConfig, Geometry, HelperDef, ModelDef};
use crate::uniforms::UniformDecl;

const AMBIENT: &str = "Ambient Light";
const DIRECTIONAL: &str = "Directional Light";
const POINT: &str = "Point Light";

pub fn config() -> DemoConfig {
    let mut config = DemoConfig::new(
        "lighting",
        include_str!("../shaders/lighting.wgsl"),
        CameraConfig::looking_from(Vec3::new(2.4, 2.4, 1.7)),
    );

    config.model = Some(ModelDef::new("suzanne.glb").spinning(Vec3::new(0.0, 0.0025, 0.0)));

    config.uniforms = vec![
        UniformDecl::color("uBaseColor", [1.0, 1.0, 1.0]),
        UniformDecl::color("uAmbientLightColor", [0.212, 0.188, 0.188]).in_group(AMBIENT),
        UniformDecl::float("uAmbientLightIntensity", 0.1)
            .with_range(0.0, 1.0, 0.01)
            .in_group(AMBIENT),
        UniformDecl::color("uDirectionalLightColor", [0.1, 0.0, 1.0]).in_group(DIRECTIONAL),
        UniformDecl::float("uDirectionalLightIntensity", 1.0)
            .with_range(0.0, 5.0, 0.01)
            .in_group(DIRECTIONAL),
        UniformDecl::vec3("uDirectionalLightPosition", Vec3::new(0.0, 0.5, 2.5))
            .with_range(-10.0, 10.0, 0.001)
            .in_group(DIRECTIONAL),
        UniformDecl::float("uDirectionalLightSpecularPower", 20.0)
            .with_range(1.0, 500.0, 1.0)
            .in_group(DIRECTIONAL),
        UniformDecl::color("uPointLightColor", [0.8, 0.0, 0.25]).in_group(POINT),
        UniformDecl::float("uPointLightIntensity", 1.0)
            .with_range(0.0, 5.0, 0.01)
            .in_group(POINT),
        UniformDecl::vec3("uPointLightPosition", Vec3::new(0.0, 2.1, 0.0))
            .with_range(-10.0, 10.0, 0.001)
            .in_group(POINT),
        UniformDecl::float("uPointLightSpecularPower", 20.0)
            .with_range(1.0, 500.0, 1.0)
            .in_group(POINT),
        UniformDecl::float("uPointLightDecay", 0.4)
            .with_range(0.1, 2.0, 0.001)
            .in_group(POINT),
    ];

    // Wireframe stand-ins marking where each light sits.
    config.helpers = vec![
        HelperDef {
            geometry: Geometry::Plane {
                width: 1.0,
                height: 1.0,
                seg_x: 1,
                seg_y: 1,
            },
            color_uniform: "uDirectionalLightColor",
            position_uniform: "uDirectionalLightPosition",
        },
        HelperDef {
            geometry: Geometry::Sphere {
                radius: 0.08,
                width_segments: 8,
                height_segments: 8,
            },
            color_uniform: "uPointLightColor",
            position_uniform: "uPointLightPosition",
        },
    ];

    config
}
