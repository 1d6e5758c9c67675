//! Face and vertex normals, and the centroid strategies.
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{FaceId, Mesh, VertexId};
use crate::math::{vector3_normalize, Vector3};

/// How vertex normals are derived from the incident faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalPolicy {
    /// Sum the unit face normals around the vertex, then renormalize.
    #[default]
    Foley,
    /// Sum the unit face normals and divide by the face count. The result is
    /// generally shorter than unit length and is stored as is.
    Average,
}

/// How a mesh's center is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentroidPolicy {
    /// Arithmetic mean of the vertex positions.
    #[default]
    MeanOfVertices,
    /// Midpoint of the axis-aligned bounding box.
    WrapBox,
}

impl Mesh {
    /// Unit normal of a face from the corner at its entry half-edge.
    ///
    /// With `p2` the entry origin, `p1` the previous origin and `p3` the next,
    /// `(p3 - p2) x (p1 - p2)` points out of a counter-clockwise face.
    pub fn compute_face_normal(&self, face: FaceId) -> Vector3 {
        let entry = self.faces[face.0].half_edge;
        let he = &self.half_edges[entry.0];
        let (Some(prev), Some(next)) = (he.prev, he.next) else {
            return Vector3::zeros();
        };

        let p1 = self.vertices[self.half_edges[prev.0].origin.0].point();
        let p2 = self.vertices[he.origin.0].point();
        let p3 = self.vertices[self.half_edges[next.0].origin.0].point();

        let a = p1 - p2;
        let b = p3 - p2;
        vector3_normalize(b.cross(&a))
    }

    /// Back-face test: the face is visible from `eye` when its normal points
    /// toward the eye. Stores the result on the face.
    pub fn update_face_visibility(&mut self, face: FaceId, eye: Vector3) -> bool {
        let to_eye = vector3_normalize(eye - self.face_centroid(face));
        let visible = self.faces[face.0].normal.dot(&to_eye) > 0.0;
        self.faces[face.0].is_visible = visible;
        visible
    }

    /// Recompute the cached normal on every face.
    pub fn update_face_normals(&mut self) {
        for index in 0..self.faces.len() {
            let normal = self.compute_face_normal(FaceId(index));
            self.faces[index].normal = normal;
        }
    }

    /// Recompute every vertex normal with `policy` and remember the policy for
    /// later refreshes after transforms.
    pub fn determine_normals(&mut self, policy: NormalPolicy) {
        self.normal_policy = policy;
        for index in 0..self.vertices.len() {
            let (sum, count) = self.incident_normal_sum(VertexId(index));
            self.vertices[index].normal = match policy {
                NormalPolicy::Foley => vector3_normalize(sum),
                NormalPolicy::Average if count > 0 => sum / count as f64,
                NormalPolicy::Average => sum,
            };
        }
    }

    /// Sum of unit face normals around a vertex and the number of faces seen.
    ///
    /// Hull half-edges have no face and contribute nothing.
    fn incident_normal_sum(&self, vertex: VertexId) -> (Vector3, usize) {
        let Some(start) = self.vertices[vertex.0].half_edge else {
            return (Vector3::zeros(), 0);
        };

        let mut sum = Vector3::zeros();
        let mut count = 0;
        let mut current = start;
        for _ in 0..self.half_edges.len() {
            let he = &self.half_edges[current.0];
            if let Some(face) = he.face {
                sum += self.faces[face.0].normal;
                count += 1;
            }
            let next = he.twin.and_then(|twin| self.half_edges[twin.0].next);
            match next {
                Some(next) if next == start => return (sum, count),
                Some(next) => current = next,
                None => {
                    warn!(mesh = %self.name, vertex = vertex.0, "open ring while summing normals");
                    return (sum, count);
                }
            }
        }
        warn!(mesh = %self.name, vertex = vertex.0, "vertex ring did not close");
        (sum, count)
    }
}
