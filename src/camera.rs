use glam::{Mat2, Vec2, Vec3};

use crate::core::canvas::{Canvas, Rgba};
use crate::geo::{Coordinate, Projector};
use crate::scene::{Character, SceneGraph, SceneObject, Track};

/// Web mercator ground resolution at the equator for zoom 0, meters per pixel
pub const EQUATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;

const BACKGROUND: Rgba = Rgba::new(0x1d, 0x23, 0x2b, 0xff);
const CHARACTER_WIRE: Rgba = Rgba::new(0xe6, 0xe6, 0xe6, 0xff);
const CHARACTER_MARKER: Rgba = Rgba::new(0x21, 0x9e, 0xbc, 0xff);
const MARKER_RADIUS: f32 = 6.0;
const HEADING_TICK: f32 = 18.0;

/// Top-down view of the overlay scene matching the base map's camera.
///
/// Tilt is not modelled. The view is centered on the map center, scaled by the
/// map's ground resolution and rotated so the map heading points up.
#[derive(Debug, Clone, Copy)]
pub struct MapCamera {
    center: Vec2,
    meters_per_pixel: f32,
    rotation: Mat2,
    viewport: Vec2,
}

impl MapCamera {
    /// `heading` is in degrees clockwise from north
    pub fn new(projector: &dyn Projector, center: Coordinate, zoom: f64, heading: f64, viewport: Vec2) -> Self {
        let center_scene = projector.project(center, 0.0);
        Self {
            center: center_scene.truncate(),
            meters_per_pixel: meters_per_pixel(center.lat, zoom) as f32,
            rotation: Mat2::from_angle(heading.to_radians() as f32),
            viewport,
        }
    }

    pub fn meters_per_pixel(&self) -> f32 {
        self.meters_per_pixel
    }

    /// Scene position to pixel coordinates, y down
    pub fn to_pixel(&self, point: Vec3) -> Vec2 {
        let offset = self.rotation * (point.truncate() - self.center) / self.meters_per_pixel;
        self.viewport * 0.5 + Vec2::new(offset.x, -offset.y)
    }

    /// Scene direction to a unit screen direction
    fn to_screen_direction(&self, direction: Vec3) -> Vec2 {
        let d = self.rotation * direction.truncate();
        Vec2::new(d.x, -d.y).normalize_or_zero()
    }
}

/// Ground resolution at `lat` degrees for a given zoom
pub fn meters_per_pixel(lat: f64, zoom: f64) -> f64 {
    EQUATOR_METERS_PER_PIXEL * lat.to_radians().cos() / 2f64.powf(zoom)
}

/// Rasterises every object of the scene onto `canvas`
pub fn render_preview(scene: &SceneGraph, camera: &MapCamera, canvas: &mut Canvas) {
    canvas.clear(BACKGROUND);

    // Tracks first so the character draws on top
    for (_, object) in scene.objects() {
        if let SceneObject::Track(track) = object {
            draw_track(track, camera, canvas);
        }
    }
    for (_, object) in scene.objects() {
        if let SceneObject::Character(character) = object {
            draw_character(character, camera, canvas);
        }
    }
}

fn draw_track(track: &Track, camera: &MapCamera, canvas: &mut Canvas) {
    let color = Rgba(track.style().rgba());
    // Width is resolved against the viewport; convert back to canvas pixels
    let half = track.half_width_ndc() * canvas.size() * 0.5;
    let width = if half == Vec2::ZERO {
        track.style().line_width
    } else {
        half.max_element() * 2.0
    };

    for pair in track.points().windows(2) {
        canvas.thick_line(camera.to_pixel(pair[0]), camera.to_pixel(pair[1]), width, color);
    }
}

fn draw_character(character: &Character, camera: &MapCamera, canvas: &mut Canvas) {
    let transform = character.transform();
    for triangle in character.model().triangles.iter().copied() {
        let vertices = triangle.map(|v| camera.to_pixel(transform.transform_point3(v)));
        canvas.triangle_outline(vertices, CHARACTER_WIRE);
    }

    let position = camera.to_pixel(character.position);
    canvas.filled_circle(position, MARKER_RADIUS, CHARACTER_MARKER);

    // Local +Z is the walking direction once the upright correction is applied
    let heading = camera.to_screen_direction(character.orientation * Vec3::Z);
    canvas.line(position, position + heading * HEADING_TICK, CHARACTER_WIRE);
}
