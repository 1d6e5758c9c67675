//! Procedural primitives. Every face is wound counter-clockwise seen from
//! outside, so the computed normals point away from the solid.
use std::f64::consts::PI;

use super::{Mesh, Vertex};
use crate::error::Result;

impl Mesh {
    /// Axis-aligned cube centered on the origin: 8 vertices, 12 triangles.
    pub fn cube(size: f64) -> Result<Self> {
        let h = size / 2.0;
        let vertices = vec![
            Vertex::new("v0", -h, -h, -h),
            Vertex::new("v1", h, -h, -h),
            Vertex::new("v2", h, h, -h),
            Vertex::new("v3", -h, h, -h),
            Vertex::new("v4", -h, -h, h),
            Vertex::new("v5", h, -h, h),
            Vertex::new("v6", h, h, h),
            Vertex::new("v7", -h, h, h),
        ];
        let faces = [
            // Front (+z)
            vec![4, 5, 6],
            vec![4, 6, 7],
            // Back (-z)
            vec![1, 0, 3],
            vec![1, 3, 2],
            // Right (+x)
            vec![5, 1, 2],
            vec![5, 2, 6],
            // Left (-x)
            vec![0, 4, 7],
            vec![0, 7, 3],
            // Top (+y)
            vec![7, 6, 2],
            vec![7, 2, 3],
            // Bottom (-y)
            vec![0, 1, 5],
            vec![0, 5, 4],
        ];
        Self::new("cube", vertices, &faces)
    }

    /// Square pyramid standing on the `y = 0` plane, apex at `y = height`.
    /// The base is a single quad.
    pub fn pyramid(base: f64, height: f64) -> Result<Self> {
        let h = base / 2.0;
        let vertices = vec![
            Vertex::new("v0", -h, 0.0, -h),
            Vertex::new("v1", h, 0.0, -h),
            Vertex::new("v2", h, 0.0, h),
            Vertex::new("v3", -h, 0.0, h),
            Vertex::new("apex", 0.0, height, 0.0),
        ];
        let faces = [
            vec![0, 1, 2, 3],
            vec![3, 2, 4],
            vec![2, 1, 4],
            vec![1, 0, 4],
            vec![0, 3, 4],
        ];
        Self::new("pyramid", vertices, &faces)
    }

    /// Open grid of quads in the `y = 0` plane facing `+y`.
    pub fn plane(width: f64, depth: f64, divisions: usize) -> Result<Self> {
        let n = divisions.max(1);
        let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
        for j in 0..=n {
            for i in 0..=n {
                let x = -width / 2.0 + width * i as f64 / n as f64;
                let z = -depth / 2.0 + depth * j as f64 / n as f64;
                vertices.push(Vertex::new(format!("v{}", j * (n + 1) + i), x, 0.0, z));
            }
        }

        let index = |i: usize, j: usize| j * (n + 1) + i;
        let mut faces = Vec::with_capacity(n * n);
        for j in 0..n {
            for i in 0..n {
                faces.push(vec![
                    index(i, j),
                    index(i, j + 1),
                    index(i + 1, j + 1),
                    index(i + 1, j),
                ]);
            }
        }
        Self::new("plane", vertices, &faces)
    }

    /// Latitude/longitude sphere with single-vertex poles: triangle fans at
    /// the caps, quads in between.
    pub fn uv_sphere(radius: f64, segments: usize, rings: usize) -> Result<Self> {
        let segments = segments.max(3);
        let rings = rings.max(2);

        let mut vertices = Vec::with_capacity(2 + (rings - 1) * segments);
        vertices.push(Vertex::new("north", 0.0, radius, 0.0));
        for r in 1..rings {
            let theta = PI * r as f64 / rings as f64;
            for s in 0..segments {
                let phi = 2.0 * PI * s as f64 / segments as f64;
                vertices.push(Vertex::new(
                    format!("r{}s{}", r, s),
                    radius * theta.sin() * phi.cos(),
                    radius * theta.cos(),
                    radius * theta.sin() * phi.sin(),
                ));
            }
        }
        let south = vertices.len();
        vertices.push(Vertex::new("south", 0.0, -radius, 0.0));

        let ring = |r: usize, s: usize| 1 + (r - 1) * segments + s % segments;
        let mut faces = Vec::new();
        for s in 0..segments {
            faces.push(vec![0, ring(1, s + 1), ring(1, s)]);
        }
        for r in 1..rings - 1 {
            for s in 0..segments {
                faces.push(vec![ring(r, s), ring(r, s + 1), ring(r + 1, s + 1), ring(r + 1, s)]);
            }
        }
        for s in 0..segments {
            faces.push(vec![south, ring(rings - 1, s), ring(rings - 1, s + 1)]);
        }
        Self::new("sphere", vertices, &faces)
    }
}
