//! Half-edge polygon meshes.
//!
//! A [`Mesh`] owns three arenas (vertices, faces, half-edges) and links them
//! by index. Construction pairs twins through a directed-edge map and then
//! stitches the untwinned boundary into an outer cycle of face-less hull
//! half-edges, so every half-edge ends up with `next`, `prev` and `twin`.

pub mod material;
pub mod normals;
pub mod primitives;
pub mod topology;

use std::collections::HashMap;

use tracing::{trace, warn};

use crate::error::{HedraError, Result};
use crate::geometry::Aabb;
use crate::math::{matrix_rotate_xyz, Matrix, Vector3};
use crate::transform::Transform;

pub use material::Material;
pub use normals::{CentroidPolicy, NormalPolicy};
pub use topology::{CycleIter, Face, FaceId, HalfEdge, HalfEdgeId, Vertex, VertexId};

/// A polygon mesh in half-edge form.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub id: u32,
    pub name: String,
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) faces: Vec<Face>,
    pub(crate) half_edges: Vec<HalfEdge>,
    /// Accumulated translate/rotate/scale deltas.
    pub transform: Transform,
    pub material: Material,
    pub visible: bool,
    normal_policy: NormalPolicy,
}

impl Mesh {
    /// Build a mesh from a vertex list and one index list per face.
    ///
    /// Index lists must already be counter-clockwise when seen from outside;
    /// they are used as given. Each directed edge `origin -> dest` may belong
    /// to one face only: a second face using the same directed edge is
    /// rejected with [`HedraError::InvalidMesh`] instead of sharing it.
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, faces: &[Vec<usize>]) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(HedraError::InvalidMesh(format!(
                "need at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if faces.is_empty() {
            return Err(HedraError::InvalidMesh("need at least 1 face".to_string()));
        }

        let mut mesh = Self {
            id: 0,
            name: name.into(),
            vertices,
            faces: Vec::with_capacity(faces.len()),
            half_edges: Vec::new(),
            transform: Transform::default(),
            material: Material::default(),
            visible: true,
            normal_policy: NormalPolicy::default(),
        };

        let mut edge_map: HashMap<(usize, usize), HalfEdgeId> = HashMap::new();
        for indices in faces {
            mesh.add_face(indices, &mut edge_map)?;
        }
        mesh.stitch_hull();

        mesh.update_face_normals();
        mesh.determine_normals(NormalPolicy::default());

        trace!(
            name = %mesh.name,
            vertices = mesh.vertices.len(),
            faces = mesh.faces.len(),
            half_edges = mesh.half_edges.len(),
            "mesh assembled"
        );
        Ok(mesh)
    }

    fn add_face(
        &mut self,
        indices: &[usize],
        edge_map: &mut HashMap<(usize, usize), HalfEdgeId>,
    ) -> Result<()> {
        if indices.len() < 3 {
            return Err(HedraError::DegeneratePlane {
                points: indices.len(),
            });
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.vertices.len()) {
            return Err(HedraError::InvalidMesh(format!(
                "face index {} out of range for {} vertices",
                bad,
                self.vertices.len()
            )));
        }

        let face_id = FaceId(self.faces.len());
        let count = indices.len();
        let mut cycle = Vec::with_capacity(count);

        for k in 0..count {
            let origin = indices[k];
            let dest = indices[(k + 1) % count];
            if origin == dest {
                return Err(HedraError::InvalidMesh(format!(
                    "face {} repeats vertex {} on consecutive corners",
                    face_id.0, origin
                )));
            }
            if edge_map.contains_key(&(origin, dest)) {
                return Err(HedraError::InvalidMesh(format!(
                    "directed edge {}->{} already belongs to another face (inconsistent winding?)",
                    origin, dest
                )));
            }

            let id = HalfEdgeId(self.half_edges.len());
            self.half_edges.push(HalfEdge::new(VertexId(origin), Some(face_id)));
            edge_map.insert((origin, dest), id);

            if let Some(&twin) = edge_map.get(&(dest, origin)) {
                self.half_edges[id.0].twin = Some(twin);
                self.half_edges[twin.0].twin = Some(id);
            }
            if self.vertices[origin].half_edge.is_none() {
                self.vertices[origin].half_edge = Some(id);
            }
            cycle.push(id);
        }

        for k in 0..count {
            let id = cycle[k];
            self.half_edges[id.0].next = Some(cycle[(k + 1) % count]);
            self.half_edges[id.0].prev = Some(cycle[(k + count - 1) % count]);
        }

        let vertex_ids = indices.iter().map(|&i| VertexId(i)).collect();
        self.faces.push(Face::new(vertex_ids, cycle[0]));
        Ok(())
    }

    /// Give every untwinned half-edge a face-less twin and chain those twins
    /// into the outer boundary cycle.
    fn stitch_hull(&mut self) {
        let interior = self.half_edges.len();
        let mut pairs = Vec::new();

        for inner in 0..interior {
            if self.half_edges[inner].twin.is_some() {
                continue;
            }
            let Some(dest) = self.destination(HalfEdgeId(inner)) else {
                continue;
            };
            let hull = HalfEdgeId(self.half_edges.len());
            let mut edge = HalfEdge::new(dest, None);
            edge.twin = Some(HalfEdgeId(inner));
            self.half_edges.push(edge);
            self.half_edges[inner].twin = Some(hull);
            pairs.push((HalfEdgeId(inner), hull));
        }

        let limit = self.half_edges.len();
        for (inner, hull) in pairs {
            // The hull edge ends where `inner` starts; its successor is the
            // hull edge leaving that vertex. Rotate around it via twin->prev.
            let mut current = self.half_edges[inner.0].prev;
            let mut found = None;
            for _ in 0..limit {
                let Some(cur) = current else { break };
                let Some(twin) = self.half_edges[cur.0].twin else { break };
                if self.half_edges[twin.0].is_hull() {
                    found = Some(twin);
                    break;
                }
                current = self.half_edges[twin.0].prev;
            }

            match found {
                Some(next) => {
                    self.half_edges[hull.0].next = Some(next);
                    self.half_edges[next.0].prev = Some(hull);
                }
                None => warn!(
                    mesh = %self.name,
                    half_edge = hull.0,
                    "could not close hull cycle; vertex is not manifold"
                ),
            }
        }
    }

    // -- Accessors ---------------------------------------------------------

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn half_edges(&self) -> &[HalfEdge] {
        &self.half_edges
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.0]
    }

    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.0]
    }

    pub fn half_edge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[id.0]
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn num_half_edges(&self) -> usize {
        self.half_edges.len()
    }

    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> {
        (0..self.faces.len()).map(FaceId)
    }

    /// Vertex a half-edge points at.
    pub fn destination(&self, id: HalfEdgeId) -> Option<VertexId> {
        let he = &self.half_edges[id.0];
        he.next
            .map(|next| self.half_edges[next.0].origin)
            .or_else(|| he.twin.map(|twin| self.half_edges[twin.0].origin))
    }

    /// The half-edge running `from -> to`, if there is one.
    pub fn find_half_edge(&self, from: VertexId, to: VertexId) -> Option<HalfEdgeId> {
        (0..self.half_edges.len())
            .map(HalfEdgeId)
            .find(|&id| self.half_edges[id.0].origin == from && self.destination(id) == Some(to))
    }

    /// Walk the `next` cycle starting at `start`.
    pub fn cycle(&self, start: HalfEdgeId) -> CycleIter<'_> {
        CycleIter {
            half_edges: &self.half_edges,
            start,
            current: Some(start),
            remaining: self.half_edges.len(),
        }
    }

    /// Boundary half-edges of a face, in winding order.
    pub fn face_half_edges(&self, face: FaceId) -> CycleIter<'_> {
        self.cycle(self.faces[face.0].half_edge)
    }

    /// Face corner positions, in winding order.
    pub fn face_points(&self, face: FaceId) -> Vec<Vector3> {
        self.faces[face.0]
            .vertices
            .iter()
            .map(|&v| self.vertices[v.0].point())
            .collect()
    }

    /// Outgoing half-edges around a vertex, following `he -> he.twin.next`.
    ///
    /// Stops early if a link is missing or the ring fails to close.
    pub fn vertex_ring(&self, vertex: VertexId) -> Vec<HalfEdgeId> {
        let mut ring = Vec::new();
        let Some(start) = self.vertices[vertex.0].half_edge else {
            return ring;
        };

        let mut current = start;
        for _ in 0..self.half_edges.len() {
            ring.push(current);
            let next = self.half_edges[current.0]
                .twin
                .and_then(|twin| self.half_edges[twin.0].next);
            match next {
                Some(next) if next == start => return ring,
                Some(next) => current = next,
                None => break,
            }
        }
        warn!(mesh = %self.name, vertex = vertex.0, "vertex ring did not close");
        ring
    }

    /// Hull (face-less) half-edges.
    pub fn boundary_half_edges(&self) -> Vec<HalfEdgeId> {
        (0..self.half_edges.len())
            .map(HalfEdgeId)
            .filter(|&id| self.half_edges[id.0].is_hull())
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.half_edges.iter().all(|he| !he.is_hull())
    }

    // -- Geometry queries --------------------------------------------------

    pub fn bounding_box(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(Vertex::point))
    }

    /// Arithmetic mean of the face corners.
    pub fn face_centroid(&self, face: FaceId) -> Vector3 {
        let f = &self.faces[face.0];
        let sum = f
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, &v| acc + self.vertices[v.0].point());
        sum / f.vertices.len() as f64
    }

    pub fn centroid(&self, policy: CentroidPolicy) -> Vector3 {
        match policy {
            CentroidPolicy::MeanOfVertices => {
                let sum = self
                    .vertices
                    .iter()
                    .fold(Vector3::zeros(), |acc, v| acc + v.point());
                sum / self.vertices.len() as f64
            }
            CentroidPolicy::WrapBox => self.bounding_box().center(),
        }
    }

    pub fn normal_policy(&self) -> NormalPolicy {
        self.normal_policy
    }

    // -- Transforms --------------------------------------------------------

    /// Multiply every vertex position by `matrix`, then refresh normals.
    pub fn apply_matrix(&mut self, matrix: Matrix) {
        for vertex in &mut self.vertices {
            vertex.position = matrix * vertex.position;
        }
        self.update_face_normals();
        self.determine_normals(self.normal_policy);
    }

    pub fn translate(&mut self, delta: Vector3) {
        self.apply_matrix(Matrix::new_translation(&delta));
        self.transform.translate(delta);
    }

    /// Rotate by Euler deltas (radians) about the mesh centroid.
    pub fn rotate(&mut self, delta: Vector3) {
        let pivot = self.centroid(CentroidPolicy::MeanOfVertices);
        self.apply_matrix(about_pivot(pivot, matrix_rotate_xyz(delta)));
        self.transform.rotate(delta.x, delta.y, delta.z);
    }

    /// Scale by per-axis factors about the mesh centroid.
    pub fn scale(&mut self, factors: Vector3) {
        let pivot = self.centroid(CentroidPolicy::MeanOfVertices);
        self.apply_matrix(about_pivot(pivot, Matrix::new_nonuniform_scaling(&factors)));
        self.transform.scale = self.transform.scale.component_mul(&factors);
    }
}

fn about_pivot(pivot: Vector3, matrix: Matrix) -> Matrix {
    Matrix::new_translation(&pivot) * matrix * Matrix::new_translation(&-pivot)
}
