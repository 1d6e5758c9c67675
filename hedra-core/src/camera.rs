//! Camera model: view reference point, focal point and view-up.
use crate::geometry::Plane;
use crate::math::{
    quaternion_from_vector3_to_vector3, quaternion_invert, vector3_normalize,
    vector3_rotate_by_axis_angle, vector3_rotate_by_quaternion, Vector2, Vector3,
};

/// Rotations that would bring the view direction this close to the up vector
/// are refused.
const MAX_UP_ALIGNMENT: f64 = 0.999;

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// View reference point (the eye).
    pub position: Vector3,
    /// Focal point.
    pub target: Vector3,
    /// View-up hint; need not be orthogonal to the view direction.
    pub up: Vector3,
    /// Distance from the eye to the projection plane.
    pub d: f64,
    pub near: f64,
    pub far: f64,
}

impl Camera {
    pub fn new(position: Vector3, target: Vector3, up: Vector3, d: f64) -> Self {
        Self {
            position,
            target,
            up,
            d,
            near: 1.0,
            far: 1000.0,
        }
    }

    /// Unit vector from the eye toward the focal point.
    pub fn forward(&self) -> Vector3 {
        vector3_normalize(self.target - self.position)
    }

    pub fn right(&self) -> Vector3 {
        vector3_normalize(self.forward().cross(&self.up))
    }

    /// View-up made orthogonal to the view direction.
    pub fn up_vector(&self) -> Vector3 {
        vector3_normalize(self.right().cross(&self.forward()))
    }

    pub fn distance_to_target(&self) -> f64 {
        (self.target - self.position).norm()
    }

    /// Depth of `point` along the view direction, measured from the eye.
    pub fn depth_of(&self, point: Vector3) -> f64 {
        (point - self.position).dot(&self.forward())
    }

    /// Near clipping plane, facing into the view volume.
    pub fn near_plane(&self) -> Plane {
        let forward = self.forward();
        Plane::new(forward, self.position + forward * self.near)
    }

    /// Far clipping plane, facing back toward the eye.
    pub fn far_plane(&self) -> Plane {
        let forward = self.forward();
        Plane::new(-forward, self.position + forward * self.far)
    }

    /// True when `point` lies between the near and far planes.
    pub fn in_depth_range(&self, point: Vector3) -> bool {
        self.near_plane().signed_distance(point) >= 0.0
            && self.far_plane().signed_distance(point) >= 0.0
    }

    // -- First-person rotations (the eye stays put) --------------------------

    /// Turn left/right around the up vector.
    pub fn yaw(&mut self, angle: f64) {
        let offset = self.target - self.position;
        self.target = self.position + vector3_rotate_by_axis_angle(offset, self.up, angle);
    }

    /// Look up/down around the right vector.
    pub fn pitch(&mut self, angle: f64) {
        let offset = self.target - self.position;
        let rotated = vector3_rotate_by_axis_angle(offset, self.right(), angle);
        if self.is_aligned_with_up(rotated) {
            return;
        }
        self.target = self.position + rotated;
    }

    /// Tilt the up vector around the view direction.
    pub fn roll(&mut self, angle: f64) {
        self.up = vector3_rotate_by_axis_angle(self.up, self.forward(), angle);
    }

    // -- Orbiting (the focal point stays put) --------------------------------

    /// Swing the eye around the focal point. Positive `pitch` raises the eye.
    pub fn orbit(&mut self, yaw: f64, pitch: f64) {
        let offset = vector3_rotate_by_axis_angle(self.position - self.target, self.up, yaw);
        let right = vector3_normalize((-offset).cross(&self.up));
        let pitched = vector3_rotate_by_axis_angle(offset, right, -pitch);
        let offset = if self.is_aligned_with_up(pitched) {
            offset
        } else {
            pitched
        };
        self.position = self.target + offset;
    }

    /// Virtual trackball drag between two points in normalized viewport
    /// coordinates (`[-1, 1]` on both axes, `+y` up).
    pub fn arcball(&mut self, from: Vector2, to: Vector2) {
        let a = self.arcball_point(from);
        let b = self.arcball_point(to);
        let rotation = quaternion_from_vector3_to_vector3(a, b);
        // Rotating the scene by `rotation` is the camera moving by its inverse.
        let inverse = quaternion_invert(rotation);

        let offset = self.position - self.target;
        self.position = self.target + vector3_rotate_by_quaternion(offset, inverse);
        self.up = vector3_rotate_by_quaternion(self.up, inverse);
    }

    fn arcball_point(&self, p: Vector2) -> Vector3 {
        let length_sq = p.norm_squared();
        let (x, y, z) = if length_sq <= 1.0 {
            (p.x, p.y, (1.0 - length_sq).sqrt())
        } else {
            let ilength = 1.0 / length_sq.sqrt();
            (p.x * ilength, p.y * ilength, 0.0)
        };
        // Sphere bulges toward the viewer, i.e. along -forward.
        vector3_normalize(self.right() * x + self.up_vector() * y - self.forward() * z)
    }

    // -- Translation ---------------------------------------------------------

    /// Move eye and focal point together along the view direction.
    pub fn move_forward(&mut self, distance: f64) {
        let step = self.forward() * distance;
        self.position += step;
        self.target += step;
    }

    /// Slide eye and focal point in the view plane.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let step = self.right() * dx + self.up_vector() * dy;
        self.position += step;
        self.target += step;
    }

    /// Scale the eye's distance to the focal point by `factor`.
    pub fn zoom(&mut self, factor: f64) {
        if factor <= 0.0 {
            return;
        }
        self.position = self.target + (self.position - self.target) * factor;
    }

    fn is_aligned_with_up(&self, direction: Vector3) -> bool {
        let alignment = vector3_normalize(direction).dot(&vector3_normalize(self.up));
        alignment.abs() > MAX_UP_ALIGNMENT
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Vector3::new(0.0, 0.0, 10.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            10.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vector3_equals;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_camera_basis() {
        let camera = Camera::default();
        assert!(vector3_equals(camera.forward(), Vector3::new(0.0, 0.0, -1.0)));
        assert!(vector3_equals(camera.right(), Vector3::new(1.0, 0.0, 0.0)));
        assert!(vector3_equals(camera.up_vector(), Vector3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_depth_range() {
        let mut camera = Camera::default();
        camera.near = 2.0;
        camera.far = 20.0;
        assert!((camera.depth_of(Vector3::zeros()) - 10.0).abs() < 1e-12);
        assert!(camera.in_depth_range(Vector3::zeros()));
        assert!(!camera.in_depth_range(Vector3::new(0.0, 0.0, 9.0)));
        assert!(!camera.in_depth_range(Vector3::new(0.0, 0.0, -11.0)));
    }

    #[test]
    fn test_yaw_full_turn() {
        let mut camera = Camera::default();
        camera.yaw(FRAC_PI_2);
        assert!(vector3_equals(camera.forward(), Vector3::new(-1.0, 0.0, 0.0)));
        camera.yaw(3.0 * FRAC_PI_2);
        assert!(vector3_equals(camera.target, Vector3::zeros()));
    }

    #[test]
    fn test_pitch_refuses_to_flip() {
        let mut camera = Camera::default();
        let before = camera.target;
        camera.pitch(FRAC_PI_2);
        assert!(vector3_equals(camera.target, before));
        camera.pitch(0.2);
        assert!(camera.forward().y > 0.0);
    }

    #[test]
    fn test_roll_tilts_up() {
        let mut camera = Camera::default();
        camera.roll(PI);
        assert!(vector3_equals(camera.up_vector(), Vector3::new(0.0, -1.0, 0.0)));
    }

    #[test]
    fn test_orbit_keeps_distance_and_target() {
        let mut camera = Camera::default();
        camera.orbit(0.7, 0.3);
        assert!((camera.distance_to_target() - 10.0).abs() < 1e-9);
        assert!(vector3_equals(camera.target, Vector3::zeros()));
        assert!(camera.position.y > 0.0);
    }

    #[test]
    fn test_arcball() {
        let mut camera = Camera::default();
        let start = camera.clone();
        camera.arcball(Vector2::new(0.2, 0.1), Vector2::new(0.2, 0.1));
        assert!(vector3_equals(camera.position, start.position));

        camera.arcball(Vector2::new(0.0, 0.0), Vector2::new(0.5, 0.0));
        assert!((camera.distance_to_target() - 10.0).abs() < 1e-9);
        // Dragging right swings the eye to the left of the object.
        assert!(camera.position.x < 0.0);
    }

    #[test]
    fn test_pan_and_zoom() {
        let mut camera = Camera::default();
        camera.pan(1.0, 2.0);
        assert!(vector3_equals(camera.target, Vector3::new(1.0, 2.0, 0.0)));
        camera.zoom(0.5);
        assert!((camera.distance_to_target() - 5.0).abs() < 1e-9);
        camera.move_forward(1.0);
        assert!((camera.distance_to_target() - 5.0).abs() < 1e-9);
        assert!(vector3_equals(camera.position, Vector3::new(1.0, 2.0, 4.0)));
    }
}
