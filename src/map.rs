use log::info;

use crate::geo::Coordinate;
use crate::traits::MapView;

/// Initial camera of the base map
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    /// Vector map style id, passed through to the map host
    pub map_id: Option<String>,
    pub center: Coordinate,
    pub zoom: f64,
    /// Degrees clockwise from north
    pub heading: f64,
    /// Degrees from straight down
    pub tilt: f64,
    pub disable_default_ui: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            map_id: None,
            center: Coordinate::new(19.138063642877647, 72.9328973566364),
            zoom: 18.0,
            heading: 25.0,
            tilt: 60.0,
            disable_default_ui: true,
        }
    }
}

/// In-process map camera; every re-center is logged
#[derive(Debug, Clone)]
pub struct MapState {
    options: MapOptions,
    center: Coordinate,
    zoom: f64,
}

impl MapState {
    pub fn new(options: MapOptions) -> Self {
        Self {
            center: options.center,
            zoom: options.zoom,
            options,
        }
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    pub fn heading(&self) -> f64 {
        self.options.heading
    }

    pub fn tilt(&self) -> f64 {
        self.options.tilt
    }
}

impl Default for MapState {
    fn default() -> Self {
        Self::new(MapOptions::default())
    }
}

impl MapView for MapState {
    fn set_center(&mut self, center: Coordinate, zoom: f64) {
        info!("Map centered on {} at zoom {}", center, zoom);
        self.center = center;
        self.zoom = zoom;
    }

    fn center(&self) -> Coordinate {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }
}
