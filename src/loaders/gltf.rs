use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::Path;

use crate::geometry::{MeshData, Vertex};
use crate::loaders::texture::ImageData;

/// A loaded glTF model: one mesh per primitive, ready for upload.
/// Every primitive is drawn with the demo's shader material once the
/// model resolves, regardless of the materials the file declares.
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub meshes: Vec<MeshData>,
    /// First base-color texture found in the file, for demos that sample
    /// the model's own texture.
    pub texture: Option<ImageData>,
}

/// Loads a glTF/glb file into renderable meshes.
pub fn load_model(path: impl AsRef<Path>) -> Result<ModelData> {
    let path = path.as_ref();
    let (document, buffers, images) =
        gltf::import(path).with_context(|| format!("failed to load glTF file {path:?}"))?;

    log::info!(
        "loaded {:?}: {} scene(s), {} mesh(es), {} image(s)",
        path,
        document.scenes().count(),
        document.meshes().count(),
        images.len()
    );

    let mut model = ModelData::default();
    for scene in document.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut model.meshes)?;
        }
    }

    if model.meshes.is_empty() {
        anyhow::bail!("no geometry found in {path:?}");
    }

    model.texture = first_base_color_texture(&document, &images);

    Ok(model)
}

fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    meshes: &mut Vec<MeshData>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            meshes.push(read_primitive(&primitive, buffers, &global_transform)?);
        }
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, meshes)?;
    }

    Ok(())
}

fn read_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
) -> Result<MeshData> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    let positions: Vec<Vec3> = reader
        .read_positions()
        .context("mesh primitive has no positions")?
        .map(|p| transform.transform_point3(Vec3::from_array(p)))
        .collect();

    // Rotation part only; model transforms here are rigid.
    let normal_matrix = glam::Mat3::from_mat4(*transform);
    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(normals) => normals
            .map(|n| (normal_matrix * Vec3::from_array(n)).normalize_or_zero())
            .collect(),
        None => vec![Vec3::Y; positions.len()],
    };

    let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
        Some(coords) => coords.into_f32().collect(),
        None => vec![[0.0, 0.0]; positions.len()],
    };

    let vertices: Vec<Vertex> = positions
        .iter()
        .zip(&normals)
        .zip(&uvs)
        .map(|((position, normal), uv)| Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: *uv,
        })
        .collect();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..vertices.len() as u32).collect(),
    };

    Ok(MeshData { vertices, indices })
}

fn first_base_color_texture(
    document: &gltf::Document,
    images: &[gltf::image::Data],
) -> Option<ImageData> {
    let texture = document
        .materials()
        .find_map(|m| m.pbr_metallic_roughness().base_color_texture())?;
    let data = images.get(texture.texture().source().index())?;
    ImageData::from_gltf(data)
}
