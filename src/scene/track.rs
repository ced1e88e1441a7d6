use glam::{Vec2, Vec3};

use crate::math::Curve;

/// Samples per waypoint when approximating the curve with a line strip
pub const DEFAULT_TRACK_DENSITY: usize = 10;

/// Line color and screen-space thickness
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackStyle {
    /// 0xRRGGBB
    pub color: u32,
    /// Width in pixels
    pub line_width: f32,
}

impl TrackStyle {
    pub fn rgba(&self) -> [u8; 4] {
        [
            ((self.color >> 16) & 0xff) as u8,
            ((self.color >> 8) & 0xff) as u8,
            (self.color & 0xff) as u8,
            0xff,
        ]
    }
}

impl Default for TrackStyle {
    fn default() -> Self {
        Self {
            color: 0xffb703,
            line_width: 8.0,
        }
    }
}

/// Connected line strip drawn along the route
#[derive(Debug, Clone)]
pub struct Track {
    points: Vec<Vec3>,
    style: TrackStyle,
    resolution: Vec2,
}

impl Track {
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn style(&self) -> &TrackStyle {
        &self.style
    }

    /// Flat xyz array, the layout line geometry buffers expect
    pub fn positions(&self) -> Vec<f32> {
        self.points.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Viewport size the line width is currently resolved against
    pub fn resolution(&self) -> Vec2 {
        self.resolution
    }

    /// Called whenever the viewport changes size
    pub fn set_resolution(&mut self, resolution: Vec2) {
        self.resolution = resolution;
    }

    /// Half the line width in normalised device coordinates.
    /// Zero until a resolution has been set.
    pub fn half_width_ndc(&self) -> Vec2 {
        if self.resolution.x <= 0.0 || self.resolution.y <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::splat(self.style.line_width) / self.resolution
    }
}

/// Turns a curve into a `Track`
#[derive(Debug, Clone, Copy)]
pub struct TrackRenderer {
    style: TrackStyle,
    density: usize,
}

impl TrackRenderer {
    pub fn new(style: TrackStyle, density: usize) -> Self {
        Self {
            style,
            density: density.max(1),
        }
    }

    pub fn style(&self) -> &TrackStyle {
        &self.style
    }

    /// Number of samples for a curve through `waypoints` control points
    pub fn sample_count(&self, waypoints: usize) -> usize {
        waypoints * self.density
    }

    /// Samples the curve evenly by arc length, endpoints included
    pub fn render(&self, curve: &Curve) -> Track {
        let count = self.sample_count(curve.points().len());
        let points = if count < 2 {
            vec![curve.point_at(0.0); count]
        } else {
            let last = (count - 1) as f32;
            (0..count).map(|i| curve.point_at(i as f32 / last)).collect()
        };

        Track {
            points,
            style: self.style,
            resolution: Vec2::ZERO,
        }
    }
}

impl Default for TrackRenderer {
    fn default() -> Self {
        Self::new(TrackStyle::default(), DEFAULT_TRACK_DENSITY)
    }
}
