use anyhow::{Context, Result};
use std::path::Path;

/// Cubemap face filenames, in wgpu layer order (+X -X +Y -Y +Z -Z).
pub const CUBEMAP_FACES: [&str; 6] = ["px.png", "nx.png", "py.png", "ny.png", "pz.png", "nz.png"];

/// Decoded RGBA8 image.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// 1x1 opaque white stand-in for textures that failed to load, so a
    /// demo still runs without its assets.
    pub fn placeholder() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![0xff; 4],
        }
    }

    pub fn from_gltf(data: &gltf::image::Data) -> Option<Self> {
        use gltf::image::Format;
        let pixels = match data.format {
            Format::R8G8B8A8 => data.pixels.clone(),
            Format::R8G8B8 => data
                .pixels
                .chunks_exact(3)
                .flat_map(|rgb| [rgb[0], rgb[1], rgb[2], 0xff])
                .collect(),
            other => {
                log::warn!("unsupported glTF texture format {other:?}, ignoring texture");
                return None;
            }
        };
        Some(Self {
            width: data.width,
            height: data.height,
            pixels,
        })
    }
}

/// Decode one PNG into RGBA8.
pub fn load_png(path: impl AsRef<Path>) -> Result<ImageData> {
    let path = path.as_ref();
    let image = image::open(path)
        .with_context(|| format!("failed to load texture {path:?}"))?
        .to_rgba8();
    Ok(ImageData {
        width: image.width(),
        height: image.height(),
        pixels: image.into_raw(),
    })
}

/// Load the six faces of a cubemap from a directory. All faces must share
/// one size.
pub fn load_cubemap(dir: impl AsRef<Path>) -> Result<[ImageData; 6]> {
    let dir = dir.as_ref();
    let mut faces = Vec::with_capacity(6);
    for face in CUBEMAP_FACES {
        faces.push(load_png(dir.join(face))?);
    }

    let (width, height) = (faces[0].width, faces[0].height);
    if faces.iter().any(|f| f.width != width || f.height != height) {
        anyhow::bail!("cubemap faces in {dir:?} have mismatched sizes");
    }

    faces
        .try_into()
        .map_err(|_| anyhow::anyhow!("cubemap in {dir:?} did not produce six faces"))
}
