//! Depth and color buffers.
use crate::math::Vector3;

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Narrow a lit color to 8 bits per channel. Channels outside `[0, 255]`
    /// saturate.
    pub fn from_channels(c: Vector3) -> Self {
        Self::opaque(c.x as u8, c.y as u8, c.z as u8)
    }

    pub fn to_channels(self) -> Vector3 {
        Vector3::new(self.r as f64, self.g as f64, self.b as f64)
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// Depth buffer plus color buffer, stored row by row (`index = y * width + x`).
///
/// Depth starts at `+inf` and smaller is closer.
#[derive(Debug, Clone)]
pub struct FrameBuffers {
    width: usize,
    height: usize,
    depth: Vec<f64>,
    color: Vec<Rgba>,
}

impl FrameBuffers {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth: vec![f64::INFINITY; size],
            color: vec![Rgba::TRANSPARENT; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reallocate for a new size. Returns false when the size is unchanged and
    /// the existing storage was only cleared.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == self.width && height == self.height {
            self.clear();
            return false;
        }
        *self = Self::new(width, height);
        true
    }

    pub fn clear(&mut self) {
        self.depth.fill(f64::INFINITY);
        self.color.fill(Rgba::TRANSPARENT);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Depth-tested write. Closer-or-equal wins; coordinates outside the
    /// buffer are ignored. Returns whether the pixel was written.
    pub fn set_pixel(&mut self, x: i64, y: i64, z: f64, color: Rgba) -> bool {
        let Some(index) = self.index(x, y) else {
            return false;
        };
        if z <= self.depth[index] {
            self.depth[index] = z;
            self.color[index] = color;
            true
        } else {
            false
        }
    }

    pub fn depth_at(&self, x: i64, y: i64) -> Option<f64> {
        self.index(x, y).map(|i| self.depth[i])
    }

    pub fn color_at(&self, x: i64, y: i64) -> Option<Rgba> {
        self.index(x, y).map(|i| self.color[i])
    }

    pub fn depth_buffer(&self) -> &[f64] {
        &self.depth
    }

    pub fn color_buffer(&self) -> &[Rgba] {
        &self.color
    }

    /// Binary PPM (P6). Transparent pixels come out black.
    pub fn to_ppm(&self) -> Vec<u8> {
        let header = format!("P6\n{} {}\n255\n", self.width, self.height);
        let mut bytes = Vec::with_capacity(header.len() + self.color.len() * 3);
        bytes.extend_from_slice(header.as_bytes());
        for c in &self.color {
            bytes.extend_from_slice(&[c.r, c.g, c.b]);
        }
        bytes
    }
}
