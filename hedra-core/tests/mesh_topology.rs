use hedra_core::mesh::{HalfEdgeId, VertexId};
use hedra_core::{CentroidPolicy, Mesh, NormalPolicy};

#[test]
fn cube_twins_are_symmetric() {
    let cube = Mesh::cube(2.0).expect("cube");
    assert!(cube.is_closed());
    for (i, he) in cube.half_edges().iter().enumerate() {
        let id = HalfEdgeId(i);
        let twin = he.twin.expect("closed mesh has every twin");
        assert_eq!(cube.half_edge(twin).twin, Some(id));
        // The twin starts where this half-edge ends.
        let next = he.next.expect("next");
        assert_eq!(cube.half_edge(twin).origin, cube.half_edge(next).origin);
    }
}

#[test]
fn cube_cycles_are_consistent() {
    let cube = Mesh::cube(2.0).expect("cube");
    for (i, he) in cube.half_edges().iter().enumerate() {
        assert!(he.face.is_some());
        let id = HalfEdgeId(i);
        assert_eq!(cube.half_edge(he.next.expect("next")).prev, Some(id));
        assert_eq!(cube.half_edge(he.prev.expect("prev")).next, Some(id));
    }
    for face in cube.face_ids() {
        assert_eq!(cube.face_half_edges(face).count(), cube.face(face).len());
    }
}

#[test]
fn cube_faces_wind_outward() {
    let cube = Mesh::cube(2.0).expect("cube");
    let center = cube.centroid(CentroidPolicy::MeanOfVertices);
    let mut checked = 0;
    for face in cube.face_ids() {
        let outward = cube.face_centroid(face) - center;
        assert!(cube.face(face).normal.dot(&outward) > 0.0);
        checked += 1;
    }
    assert_eq!(checked, 12);
}

#[test]
fn centroid_policies_differ_on_lopsided_meshes() {
    let pyramid = Mesh::pyramid(2.0, 3.0).expect("pyramid");
    let mean = pyramid.centroid(CentroidPolicy::MeanOfVertices);
    let boxed = pyramid.centroid(CentroidPolicy::WrapBox);
    assert!((mean.y - 0.6).abs() < 1e-12);
    assert!((boxed.y - 1.5).abs() < 1e-12);
}

#[test]
fn normal_policies_differ_in_length() {
    let mut cube = Mesh::cube(2.0).expect("cube");
    cube.determine_normals(NormalPolicy::Foley);
    let foley = cube.vertex(VertexId(0)).normal;
    cube.determine_normals(NormalPolicy::Average);
    let average = cube.vertex(VertexId(0)).normal;
    assert!((foley.norm() - 1.0).abs() < 1e-9);
    assert!(average.norm() < 1.0);
    // Same direction either way.
    assert!((foley.dot(&average) / average.norm() - 1.0).abs() < 1e-9);
}

#[test]
fn open_mesh_rings_terminate() {
    let plane = Mesh::plane(2.0, 2.0, 3).expect("plane");
    for v in 0..plane.num_vertices() {
        let ring = plane.vertex_ring(VertexId(v));
        assert!(!ring.is_empty());
        assert!(ring.len() <= 8);
        let normal = plane.vertex(VertexId(v)).normal;
        assert!(normal.y > 0.99);
    }
}
