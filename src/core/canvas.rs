use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One RGBA8 pixel, laid out the way the surface texture expects
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba([0, 0, 0, 0]);
    pub const WHITE: Rgba = Rgba([255, 255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Rgba([r, g, b, a])
    }
}

/// CPU pixel buffer with the handful of primitives the preview needs
#[derive(Clone)]
pub struct Canvas {
    pixels: Vec<Rgba>,
    width: u32,
    height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![Rgba::TRANSPARENT; (width * height) as usize],
            width,
            height,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Reallocates when the size changes; contents are discarded
    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.width, self.height) {
            *self = Self::new(width, height);
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// Out-of-bounds writes are ignored
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        self.pixels[idx] = color;
    }

    /// Raw RGBA bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Bresenham line between two pixel positions
    pub fn line(&mut self, from: Vec2, to: Vec2, color: Rgba) {
        self.walk_line(from, to, |canvas, x, y| canvas.set_pixel(x, y, color));
    }

    /// Line stamped with a disc of `width / 2` at every step
    pub fn thick_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let radius = (width * 0.5).max(0.5);
        self.walk_line(from, to, |canvas, x, y| {
            canvas.filled_circle(Vec2::new(x as f32, y as f32), radius, color)
        });
    }

    pub fn filled_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        let r = radius.ceil() as i32;
        let r_sq = radius * radius;
        let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);

        for dy in -r..=r {
            for dx in -r..=r {
                if (dx * dx + dy * dy) as f32 <= r_sq {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    pub fn triangle_outline(&mut self, vertices: [Vec2; 3], color: Rgba) {
        self.line(vertices[0], vertices[1], color);
        self.line(vertices[1], vertices[2], color);
        self.line(vertices[2], vertices[0], color);
    }

    fn walk_line(&mut self, from: Vec2, to: Vec2, mut plot: impl FnMut(&mut Self, i32, i32)) {
        if !from.is_finite() || !to.is_finite() {
            return;
        }
        // Far off-screen endpoints would make the walk arbitrarily long
        let limit = (self.width.max(self.height) as f32) * 4.0;
        if from.abs().max_element() > limit || to.abs().max_element() > limit {
            return;
        }

        let (mut x, mut y) = (from.x.round() as i32, from.y.round() as i32);
        let (x2, y2) = (to.x.round() as i32, to.y.round() as i32);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            plot(self, x, y);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
