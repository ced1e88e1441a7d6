use log::info;

use super::{DirectionsRequest, DirectionsService, Geocoder, TravelMode};
use crate::error::PipelineError;
use crate::geo::{Address, Route};

/// Address pair to route: geocodes both ends concurrently, then asks for directions.
pub struct RouteFetcher<G, D> {
    geocoder: G,
    directions: D,
    mode: TravelMode,
}

impl<G: Geocoder, D: DirectionsService> RouteFetcher<G, D> {
    pub fn new(geocoder: G, directions: D) -> Self {
        Self {
            geocoder,
            directions,
            mode: TravelMode::Walking,
        }
    }

    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    /// Both lookups must succeed before routing starts; the first failure wins.
    pub async fn fetch(&self, origin: &Address, destination: &Address) -> Result<Route, PipelineError> {
        info!("Resolving {} -> {}", origin, destination);

        let (origin, destination) = futures::try_join!(
            self.geocoder.resolve(origin),
            self.geocoder.resolve(destination),
        )?;
        info!("Resolved origin {} destination {}", origin, destination);

        let request = DirectionsRequest {
            origin,
            destination,
            mode: self.mode,
        };
        let route = self.directions.route(&request).await?;

        match route.summary() {
            Some(summary) => info!(
                "Route ready: {} waypoints, {:.0} m, {:.0} s ({})",
                route.len(),
                summary.distance_m,
                summary.duration_s,
                self.mode
            ),
            None => info!("Route ready: {} waypoints ({})", route.len(), self.mode),
        }

        Ok(route)
    }
}
