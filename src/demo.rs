use glam::Vec3;

use crate::geometry::{self, MeshData};
use crate::uniforms::UniformDecl;

/// Procedural geometry source for a demo mesh.
#[derive(Debug, Clone, Copy)]
pub enum Geometry {
    Plane {
        width: f32,
        height: f32,
        seg_x: u32,
        seg_y: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    TorusKnot {
        radius: f32,
        tube: f32,
        tubular_segments: u32,
        radial_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

impl Geometry {
    pub fn build(&self) -> MeshData {
        match *self {
            Geometry::Plane {
                width,
                height,
                seg_x,
                seg_y,
            } => geometry::plane(width, height, seg_x, seg_y),
            Geometry::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => geometry::torus(radius, tube, radial_segments, tubular_segments),
            Geometry::TorusKnot {
                radius,
                tube,
                tubular_segments,
                radial_segments,
            } => geometry::torus_knot(radius, tube, tubular_segments, radial_segments),
            Geometry::Sphere {
                radius,
                width_segments,
                height_segments,
            } => geometry::uv_sphere(radius, width_segments, height_segments),
        }
    }
}

/// One procedural mesh in the scene. `spin` is a fixed per-frame Euler
/// increment, applied once per redraw rather than scaled by delta time.
#[derive(Debug, Clone)]
pub struct MeshDef {
    pub geometry: Geometry,
    pub position: Vec3,
    pub rotation: Vec3,
    pub spin: Vec3,
}

impl MeshDef {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            spin: Vec3::ZERO,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn spinning(mut self, spin: Vec3) -> Self {
        self.spin = spin;
        self
    }
}

/// Externally authored model, loaded asynchronously. The path is joined
/// against the `--assets` directory.
#[derive(Debug, Clone)]
pub struct ModelDef {
    pub file: &'static str,
    pub position: Vec3,
    pub rotation: Vec3,
    pub spin: Vec3,
}

impl ModelDef {
    pub fn new(file: &'static str) -> Self {
        Self {
            file,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            spin: Vec3::ZERO,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn spinning(mut self, spin: Vec3) -> Self {
        self.spin = spin;
        self
    }
}

/// 2D texture bound to the material, in declaration order.
#[derive(Debug, Clone)]
pub struct TextureDef {
    pub file: &'static str,
    /// Nearest-neighbor sampling (the data-texture demo reads discrete
    /// texels).
    pub nearest: bool,
}

/// Small wireframe mesh that tracks a light's uniforms: color from
/// `color_uniform`, world position from `position_uniform`. Re-read every
/// frame, so panel edits propagate immediately.
#[derive(Debug, Clone)]
pub struct HelperDef {
    pub geometry: Geometry,
    pub color_uniform: &'static str,
    pub position_uniform: &'static str,
}

/// Initial orbit pose, plus optional polar-angle clamps in radians
/// (min = closest to overhead).
#[derive(Debug, Clone, Copy)]
pub struct CameraConfig {
    pub eye: Vec3,
    pub target: Vec3,
    pub polar_limits: Option<(f32, f32)>,
}

impl CameraConfig {
    pub fn looking_from(eye: Vec3) -> Self {
        Self {
            eye,
            target: Vec3::ZERO,
            polar_limits: None,
        }
    }
}

/// How the shader time value advances each frame.
#[derive(Debug, Clone, Copy)]
pub enum TimeMode {
    /// Wall-clock seconds since loop start.
    Elapsed,
    /// Accumulate `step * value_of(uniform)` per frame (the data-texture
    /// demo scales time by its wave-speed uniform).
    Scaled {
        uniform: &'static str,
        step: f32,
    },
}

/// Complete declarative description of one demo. The harness consumes
/// this to build the scene, panel, camera, and pipelines; the per-frame
/// loop is identical across demos.
#[derive(Clone)]
pub struct DemoConfig {
    pub name: &'static str,
    /// WGSL source with `vs_main` and `fs_main` entry points.
    pub shader: &'static str,
    pub meshes: Vec<MeshDef>,
    pub model: Option<ModelDef>,
    /// Cubemap directory (under assets) drawn as the scene background.
    pub background: Option<&'static str>,
    /// Also bind the background cubemap to the material as an
    /// environment map.
    pub environment_map: bool,
    /// Bind the model's own base-color texture to the material.
    pub model_texture: bool,
    pub textures: Vec<TextureDef>,
    pub uniforms: Vec<UniformDecl>,
    pub helpers: Vec<HelperDef>,
    pub camera: CameraConfig,
    pub time: TimeMode,
    pub double_sided: bool,
    pub wireframe: bool,
}

impl DemoConfig {
    pub fn new(name: &'static str, shader: &'static str, camera: CameraConfig) -> Self {
        Self {
            name,
            shader,
            meshes: Vec::new(),
            model: None,
            background: None,
            environment_map: false,
            model_texture: false,
            textures: Vec::new(),
            uniforms: Vec::new(),
            helpers: Vec::new(),
            camera,
            time: TimeMode::Elapsed,
            double_sided: false,
            wireframe: false,
        }
    }

    /// True when the material needs a texture bind group at all.
    pub fn has_textures(&self) -> bool {
        self.environment_map || self.model_texture || !self.textures.is_empty()
    }
}
