//! The demo catalog. Each module builds a `DemoConfig` describing one
//! scene; the harness does the rest.

mod data_texture;
mod fresnel;
mod hemisphere;
mod lighting;
mod pattern;
mod step_mix;
mod terrain;
mod toon;
mod transforms;

use crate::demo::DemoConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Demo {
    /// Step/mix/smoothstep shaping functions on a plane
    StepMix,
    /// Ambient + directional + point lighting on a model
    Lighting,
    /// Hemisphere lighting blended across the model normal
    Hemisphere,
    /// Fresnel-weighted environment reflections
    Fresnel,
    /// Banded toon shading with a rim light
    Toon,
    /// Animated abstract pattern with slight vertex displacement
    Pattern,
    /// Vertex transforms on a torus
    Transforms,
    /// Procedural wireframe terrain
    Terrain,
    /// Height/ground textures driving vertex displacement
    DataTexture,
}

impl Demo {
    pub fn config(&self) -> DemoConfig {
        match self {
            Demo::StepMix => step_mix::config(),
            Demo::Lighting => lighting::config(),
            Demo::Hemisphere => hemisphere::config(),
            Demo::Fresnel => fresnel::config(),
            Demo::Toon => toon::config(),
            Demo::Pattern => pattern::config(),
            Demo::Transforms => transforms::config(),
            Demo::Terrain => terrain::config(),
            Demo::DataTexture => data_texture::config(),
        }
    }

    pub fn all() -> [Demo; 9] {
        [
            Demo::StepMix,
            Demo::Lighting,
            Demo::Hemisphere,
            Demo::Fresnel,
            Demo::Toon,
            Demo::Pattern,
            Demo::Transforms,
            Demo::Terrain,
            Demo::DataTexture,
        ]
    }
}
