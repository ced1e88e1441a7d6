use crate::geo::Coordinate;

/// Map host the 3D overlay is attached to
pub trait MapView {
    /// Move the camera to `center` at `zoom`
    fn set_center(&mut self, center: Coordinate, zoom: f64);

    fn center(&self) -> Coordinate;

    fn zoom(&self) -> f64;
}
