use glam::{DVec2, Vec3};

use super::Coordinate;

/// Mean earth radius used by the map overlay, in meters
pub const EARTH_RADIUS: f64 = 6_371_010.0;

/// Maps geographic coordinates into scene space
pub trait Projector {
    /// Scene-space position of `coord` at the given altitude (meters)
    fn project(&self, coord: Coordinate, altitude: f64) -> Vec3;

    /// Geographic point the scene origin is pinned to
    fn anchor(&self) -> Coordinate;
}

/// Spherical mercator projection relative to a fixed anchor.
///
/// Scene space is z-up: x grows east, y grows north, z is altitude above the
/// anchor. Horizontal offsets are scaled by `cos(anchor.lat)` so one unit is
/// roughly one meter near the anchor.
#[derive(Debug, Clone, Copy)]
pub struct MercatorProjector {
    anchor: Coordinate,
    anchor_altitude: f64,
    anchor_xy: DVec2,
    scale: f64,
}

impl MercatorProjector {
    pub fn new(anchor: Coordinate) -> Self {
        Self::with_altitude(anchor, 0.0)
    }

    pub fn with_altitude(anchor: Coordinate, altitude: f64) -> Self {
        Self {
            anchor,
            anchor_altitude: altitude,
            anchor_xy: mercator_xy(anchor),
            scale: anchor.lat.to_radians().cos(),
        }
    }
}

impl Projector for MercatorProjector {
    fn project(&self, coord: Coordinate, altitude: f64) -> Vec3 {
        let offset = (mercator_xy(coord) - self.anchor_xy) * self.scale;
        Vec3::new(
            offset.x as f32,
            offset.y as f32,
            (altitude - self.anchor_altitude) as f32,
        )
    }

    fn anchor(&self) -> Coordinate {
        self.anchor
    }
}

fn mercator_xy(coord: Coordinate) -> DVec2 {
    DVec2::new(
        EARTH_RADIUS * coord.lng.to_radians(),
        EARTH_RADIUS
            * (0.25 * std::f64::consts::PI + 0.5 * coord.lat.to_radians())
                .tan()
                .ln(),
    )
}
