//! Half-edge records and their index handles.
//!
//! Every link (`next`, `prev`, `twin`, `origin`, `face`) is an index into one
//! of the arenas owned by [`Mesh`](super::Mesh), so meshes can be cloned and
//! serialized without any pointer fix-up.

use crate::math::{Vector3, Vector4};

/// Index of a vertex in its mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub usize);

/// Index of a face in its mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId(pub usize);

/// Index of a half-edge in its mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub usize);

/// A mesh vertex.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Label carried through scene documents.
    pub id: String,
    /// Homogeneous position (`w` is 1 for every stored vertex).
    pub position: Vector4,
    /// Averaged normal from the incident faces.
    pub normal: Vector3,
    /// One outgoing half-edge.
    pub half_edge: Option<HalfEdgeId>,
}

impl Vertex {
    pub fn new(id: impl Into<String>, x: f64, y: f64, z: f64) -> Self {
        Self {
            id: id.into(),
            position: Vector4::new(x, y, z, 1.0),
            normal: Vector3::zeros(),
            half_edge: None,
        }
    }

    /// Cartesian part of the position.
    pub fn point(&self) -> Vector3 {
        Vector3::new(self.position.x, self.position.y, self.position.z)
    }
}

/// A directed edge. Hull half-edges (the outer side of a boundary) have no face.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    pub origin: VertexId,
    pub face: Option<FaceId>,
    pub next: Option<HalfEdgeId>,
    pub prev: Option<HalfEdgeId>,
    pub twin: Option<HalfEdgeId>,
}

impl HalfEdge {
    pub fn new(origin: VertexId, face: Option<FaceId>) -> Self {
        Self {
            origin,
            face,
            next: None,
            prev: None,
            twin: None,
        }
    }

    /// True for the synthesized outer-region half-edges.
    pub fn is_hull(&self) -> bool {
        self.face.is_none()
    }
}

/// A polygonal face.
#[derive(Debug, Clone)]
pub struct Face {
    /// Boundary vertices in winding order.
    pub vertices: Vec<VertexId>,
    /// Entry point into the boundary cycle; its origin is `vertices[0]`.
    pub half_edge: HalfEdgeId,
    /// Outward unit normal, refreshed whenever vertex positions change.
    pub normal: Vector3,
    /// Result of the last back-face test.
    pub is_visible: bool,
    /// Reserved for faces that describe holes.
    pub is_hole: bool,
}

impl Face {
    pub fn new(vertices: Vec<VertexId>, half_edge: HalfEdgeId) -> Self {
        Self {
            vertices,
            half_edge,
            normal: Vector3::zeros(),
            is_visible: true,
            is_hole: false,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Iterator over a `next` cycle starting at a half-edge.
pub struct CycleIter<'a> {
    pub(crate) half_edges: &'a [HalfEdge],
    pub(crate) start: HalfEdgeId,
    pub(crate) current: Option<HalfEdgeId>,
    pub(crate) remaining: usize,
}

impl Iterator for CycleIter<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        if self.remaining == 0 {
            self.current = None;
            return None;
        }
        self.remaining -= 1;
        self.current = self.half_edges[current.0]
            .next
            .filter(|&next| next != self.start);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_iter_stops_at_start() {
        let mut half_edges = vec![
            HalfEdge::new(VertexId(0), Some(FaceId(0))),
            HalfEdge::new(VertexId(1), Some(FaceId(0))),
            HalfEdge::new(VertexId(2), Some(FaceId(0))),
        ];
        for i in 0..3 {
            half_edges[i].next = Some(HalfEdgeId((i + 1) % 3));
        }
        let cycle: Vec<_> = CycleIter {
            half_edges: &half_edges,
            start: HalfEdgeId(1),
            current: Some(HalfEdgeId(1)),
            remaining: half_edges.len(),
        }
        .collect();
        assert_eq!(cycle, vec![HalfEdgeId(1), HalfEdgeId(2), HalfEdgeId(0)]);
    }

    #[test]
    fn test_vertex_point() {
        let v = Vertex::new("v0", 1.0, 2.0, 3.0);
        assert_eq!(v.point(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(v.position.w, 1.0);
        assert!(v.half_edge.is_none());
    }
}
