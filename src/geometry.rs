use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Vertex layout shared by every pipeline in the crate.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Indexed triangle mesh, CPU side.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Subdivided plane in the XY plane, facing +Z, centered at the origin.
/// `seg_x` by `seg_y` quads, two triangles each.
pub fn plane(width: f32, height: f32, seg_x: u32, seg_y: u32) -> MeshData {
    let seg_x = seg_x.max(1);
    let seg_y = seg_y.max(1);

    let mut vertices = Vec::with_capacity(((seg_x + 1) * (seg_y + 1)) as usize);
    for iy in 0..=seg_y {
        let v = iy as f32 / seg_y as f32;
        let y = height / 2.0 - v * height;
        for ix in 0..=seg_x {
            let u = ix as f32 / seg_x as f32;
            let x = u * width - width / 2.0;
            vertices.push(Vertex {
                position: [x, y, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [u, 1.0 - v],
            });
        }
    }

    let mut indices = Vec::with_capacity((seg_x * seg_y * 6) as usize);
    for iy in 0..seg_y {
        for ix in 0..seg_x {
            let a = iy * (seg_x + 1) + ix;
            let b = a + 1;
            let c = a + seg_x + 1;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    MeshData { vertices, indices }
}

/// Torus around the Z axis.
pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let tubular = tubular_segments.max(3);

    let mut vertices = Vec::with_capacity(((radial + 1) * (tubular + 1)) as usize);
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;

            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            let position = Vec3::new(
                (radius + tube * v.cos()) * u.cos(),
                (radius + tube * v.cos()) * u.sin(),
                tube * v.sin(),
            );
            let normal = (position - center).normalize();

            vertices.push(Vertex {
                position: position.to_array(),
                normal: normal.to_array(),
                uv: [i as f32 / tubular as f32, j as f32 / radial as f32],
            });
        }
    }

    let mut indices = Vec::with_capacity((radial * tubular * 6) as usize);
    for j in 0..radial {
        for i in 0..tubular {
            let a = j * (tubular + 1) + i;
            let b = a + 1;
            let c = a + tubular + 1;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    MeshData { vertices, indices }
}

/// (2,3) torus knot swept by a circular tube.
pub fn torus_knot(radius: f32, tube: f32, tubular_segments: u32, radial_segments: u32) -> MeshData {
    const P: f32 = 2.0;
    const Q: f32 = 3.0;

    let tubular = tubular_segments.max(3);
    let radial = radial_segments.max(3);

    fn curve_point(u: f32, radius: f32) -> Vec3 {
        let qu = Q / P * u;
        Vec3::new(
            radius * (2.0 + qu.cos()) * 0.5 * u.cos(),
            radius * (2.0 + qu.cos()) * 0.5 * u.sin(),
            radius * qu.sin() * 0.5,
        )
    }

    let mut vertices = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);
    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * P * TAU;

        let p1 = curve_point(u, radius);
        let p2 = curve_point(u + 0.01, radius);

        let tangent = p2 - p1;
        let mut normal = p2 + p1;
        let binormal = tangent.cross(normal).normalize();
        normal = binormal.cross(tangent).normalize();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();

            let position = p1 + normal * cx + binormal * cy;
            let vertex_normal = (position - p1).normalize();

            vertices.push(Vertex {
                position: position.to_array(),
                normal: vertex_normal.to_array(),
                uv: [i as f32 / tubular as f32, j as f32 / radial as f32],
            });
        }
    }

    let mut indices = Vec::with_capacity((tubular * radial * 6) as usize);
    for i in 0..tubular {
        for j in 0..radial {
            let a = i * (radial + 1) + j;
            let b = a + radial + 1;
            let c = a + 1;
            let d = b + 1;
            indices.extend_from_slice(&[a, b, c, c, b, d]);
        }
    }

    MeshData { vertices, indices }
}

/// UV sphere, used by the point-light helper mesh.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let width = width_segments.max(3);
    let height = height_segments.max(2);

    let mut vertices = Vec::with_capacity(((width + 1) * (height + 1)) as usize);
    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        let phi = v * PI;
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let theta = u * TAU;

            let normal = Vec3::new(
                -phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );

            vertices.push(Vertex {
                position: (normal * radius).to_array(),
                normal: normal.to_array(),
                uv: [u, 1.0 - v],
            });
        }
    }

    let mut indices = Vec::new();
    for iy in 0..height {
        for ix in 0..width {
            let a = iy * (width + 1) + ix;
            let b = a + width + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, a + 1]);
            }
            if iy != height - 1 {
                indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }
    }

    MeshData { vertices, indices }
}
