//! Geometry primitives shared by the mesh and the pipelines.
use serde::{Deserialize, Serialize};

use crate::error::{HedraError, Result};
use crate::math::{vector3_normalize, Vector2, Vector3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vector3,
    pub max: Vector3,
}

impl Aabb {
    pub fn new(min: Vector3, max: Vector3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing all points. An empty iterator gives a
    /// degenerate box at the origin.
    pub fn from_points(points: impl IntoIterator<Item = Vector3>) -> Self {
        let mut points = points.into_iter();
        let Some(first) = points.next() else {
            return Self::new(Vector3::zeros(), Vector3::zeros());
        };
        points.fold(Self::new(first, first), |acc, p| {
            Self::new(acc.min.inf(&p), acc.max.sup(&p))
        })
    }

    pub fn center(&self) -> Vector3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vector3 {
        self.max - self.min
    }

    pub fn contains(&self, p: Vector3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }
}

/// 2D rectangle, used for both the window (logical coordinates on the
/// projection plane) and the viewport (pixel coordinates).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Rect {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min: [min_x, min_y],
            max: [max_x, max_y],
        }
    }

    pub fn min(&self) -> Vector2 {
        Vector2::new(self.min[0], self.min[1])
    }

    pub fn max(&self) -> Vector2 {
        Vector2::new(self.max[0], self.max[1])
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> Vector2 {
        Vector2::new(
            (self.min[0] + self.max[0]) / 2.0,
            (self.min[1] + self.max[1]) / 2.0,
        )
    }

    pub fn contains(&self, p: Vector2) -> bool {
        p.x >= self.min[0] && p.x <= self.max[0] && p.y >= self.min[1] && p.y <= self.max[1]
    }
}

/// Orientation of a polygon projected onto x/y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
    Degenerate,
}

impl Winding {
    pub fn from_area(area: f64) -> Self {
        if area > 0.0 {
            Winding::CounterClockwise
        } else if area < 0.0 {
            Winding::Clockwise
        } else {
            Winding::Degenerate
        }
    }
}

/// Shoelace area of a closed polygon in x/y; positive is counter-clockwise.
pub fn polygon_signed_area(points: &[Vector3]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let twice: f64 = (0..n)
        .map(|i| {
            let p = points[i];
            let q = points[(i + 1) % n];
            p.x * q.y - q.x * p.y
        })
        .sum();
    0.5 * twice
}

/// Oriented plane `normal · p = distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vector3,
    pub distance: f64,
}

impl Plane {
    pub fn new(normal: Vector3, point: Vector3) -> Self {
        let normal = vector3_normalize(normal);
        Self {
            normal,
            distance: normal.dot(&point),
        }
    }

    /// Plane through a polygon using Newell's method; needs at least three
    /// points.
    pub fn from_points(points: &[Vector3]) -> Result<Self> {
        if points.len() < 3 {
            return Err(HedraError::DegeneratePlane {
                points: points.len(),
            });
        }
        let n = points.len();
        let mut normal = Vector3::zeros();
        let mut centroid = Vector3::zeros();
        for i in 0..n {
            let p = points[i];
            let q = points[(i + 1) % n];
            normal.x += (p.y - q.y) * (p.z + q.z);
            normal.y += (p.z - q.z) * (p.x + q.x);
            normal.z += (p.x - q.x) * (p.y + q.y);
            centroid += p;
        }
        let centroid = centroid / n as f64;
        Ok(Self::new(normal, centroid))
    }

    /// Plane through three points, oriented by their winding.
    pub fn from_triangle(a: Vector3, b: Vector3, c: Vector3) -> Self {
        let normal = (b - a).cross(&(c - a));
        Self::new(normal, a)
    }

    /// Positive on the side the normal points to.
    pub fn signed_distance(&self, p: Vector3) -> f64 {
        self.normal.dot(&p) - self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector3_equals;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points([
            Vector3::new(1.0, -2.0, 0.0),
            Vector3::new(-1.0, 4.0, 2.0),
            Vector3::new(0.0, 0.0, -3.0),
        ]);
        assert!(vector3_equals(aabb.min, Vector3::new(-1.0, -2.0, -3.0)));
        assert!(vector3_equals(aabb.max, Vector3::new(1.0, 4.0, 2.0)));
        assert!(vector3_equals(aabb.center(), Vector3::new(0.0, 1.0, -0.5)));
        assert!(aabb.contains(Vector3::new(0.0, 0.0, 0.0)));
    }

    #[test]
    fn test_winding_from_area() {
        assert_eq!(Winding::from_area(0.5), Winding::CounterClockwise);
        assert_eq!(Winding::from_area(-0.5), Winding::Clockwise);
        assert_eq!(Winding::from_area(0.0), Winding::Degenerate);
        let line = [Vector3::zeros(), Vector3::new(1.0, 1.0, 0.0), Vector3::new(2.0, 2.0, 0.0)];
        assert_eq!(Winding::from_area(polygon_signed_area(&line)), Winding::Degenerate);
    }

    #[test]
    fn test_polygon_area() {
        let square = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(2.0, 2.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
        ];
        assert!((polygon_signed_area(&square) - 4.0).abs() < 1e-12);
        let mut reversed = square;
        reversed.reverse();
        assert!((polygon_signed_area(&reversed) + 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_plane_needs_three_points() {
        let err = Plane::from_points(&[Vector3::zeros(), Vector3::new(1.0, 0.0, 0.0)]);
        assert!(matches!(err, Err(HedraError::DegeneratePlane { points: 2 })));

        let plane = Plane::from_points(&[
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(0.0, 1.0, 1.0),
        ])
        .expect("three points");
        assert!(vector3_equals(plane.normal, Vector3::new(0.0, 0.0, 1.0)));
        assert!((plane.signed_distance(Vector3::new(5.0, 5.0, 3.0)) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rect_queries() {
        let rect = Rect::new(-8.0, -6.0, 8.0, 6.0);
        assert_eq!(rect.width(), 16.0);
        assert_eq!(rect.height(), 12.0);
        assert_eq!(rect.center(), Vector2::new(0.0, 0.0));
        assert!(rect.contains(Vector2::new(8.0, 0.0)));
        assert!(!rect.contains(Vector2::new(8.1, 0.0)));
    }
}
