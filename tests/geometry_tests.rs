use glam::Vec3;
use shader_lab::geometry::{plane, torus, torus_knot, uv_sphere, MeshData};

fn assert_indices_in_range(mesh: &MeshData) {
    let count = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < count));
    assert_eq!(mesh.indices.len() % 3, 0);
}

#[test]
fn plane_has_grid_vertex_count() {
    let mesh = plane(1.0, 1.0, 32, 32);
    assert_eq!(mesh.vertices.len(), 33 * 33);
    assert_eq!(mesh.triangle_count(), 32 * 32 * 2);
    assert_indices_in_range(&mesh);
}

#[test]
fn plane_faces_positive_z() {
    let mesh = plane(2.0, 2.0, 4, 4);
    for vertex in &mesh.vertices {
        assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        assert_eq!(vertex.position[2], 0.0);
    }
}

#[test]
fn plane_spans_its_dimensions() {
    let mesh = plane(4.0, 2.0, 8, 8);
    let max_x = mesh
        .vertices
        .iter()
        .map(|v| v.position[0])
        .fold(f32::MIN, f32::max);
    let max_y = mesh
        .vertices
        .iter()
        .map(|v| v.position[1])
        .fold(f32::MIN, f32::max);
    assert!((max_x - 2.0).abs() < 1e-5);
    assert!((max_y - 1.0).abs() < 1e-5);
}

#[test]
fn plane_uv_covers_unit_square() {
    let mesh = plane(10.0, 10.0, 64, 64);
    let us: Vec<f32> = mesh.vertices.iter().map(|v| v.uv[0]).collect();
    let vs: Vec<f32> = mesh.vertices.iter().map(|v| v.uv[1]).collect();
    assert!(us.iter().any(|&u| u == 0.0) && us.iter().any(|&u| u == 1.0));
    assert!(vs.iter().any(|&v| v == 0.0) && vs.iter().any(|&v| v == 1.0));
}

#[test]
fn torus_has_unit_normals() {
    let mesh = torus(1.0, 0.4, 64, 48);
    assert_indices_in_range(&mesh);
    for vertex in &mesh.vertices {
        let n = Vec3::from_array(vertex.normal);
        assert!((n.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn torus_points_stay_within_outer_radius() {
    let mesh = torus(1.0, 0.4, 16, 16);
    for vertex in &mesh.vertices {
        let p = Vec3::from_array(vertex.position);
        assert!(p.length() <= 1.4 + 1e-4);
    }
}

#[test]
fn torus_knot_is_well_formed() {
    let mesh = torus_knot(0.5, 0.2, 100, 16);
    assert_eq!(mesh.vertices.len(), 101 * 17);
    assert_eq!(mesh.triangle_count(), 100 * 16 * 2);
    assert_indices_in_range(&mesh);
    for vertex in &mesh.vertices {
        let n = Vec3::from_array(vertex.normal);
        assert!((n.length() - 1.0).abs() < 1e-3);
    }
}

#[test]
fn sphere_vertices_sit_on_the_radius() {
    let mesh = uv_sphere(0.08, 8, 8);
    assert_indices_in_range(&mesh);
    for vertex in &mesh.vertices {
        let p = Vec3::from_array(vertex.position);
        assert!((p.length() - 0.08).abs() < 1e-5);
        let n = Vec3::from_array(vertex.normal);
        assert!((n.length() - 1.0).abs() < 1e-4);
    }
}

#[test]
fn degenerate_segment_counts_are_clamped() {
    let mesh = plane(1.0, 1.0, 0, 0);
    assert_eq!(mesh.vertices.len(), 4);
    assert_eq!(mesh.triangle_count(), 2);
}
