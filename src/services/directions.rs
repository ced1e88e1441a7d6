use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, RouteError};
use crate::geo::{Coordinate, Route};

/// Travel mode passed to the directions service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Walking,
    Driving,
    Bicycling,
    Transit,
}

impl TravelMode {
    /// Lowercase name used in request query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walking => "walking",
            TravelMode::Driving => "driving",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "walking" => Ok(TravelMode::Walking),
            "driving" => Ok(TravelMode::Driving),
            "bicycling" | "cycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            _ => Err(ConfigError::UnknownTravelMode(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionsRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub mode: TravelMode,
}

/// Requests a route between two coordinates.
///
/// A single attempt is made; any non-success answer becomes a `RouteError`
/// rather than an absent route.
#[async_trait]
pub trait DirectionsService: Send + Sync {
    async fn route(&self, request: &DirectionsRequest) -> Result<Route, RouteError>;
}

#[async_trait]
impl<T: DirectionsService + ?Sized> DirectionsService for std::sync::Arc<T> {
    async fn route(&self, request: &DirectionsRequest) -> Result<Route, RouteError> {
        (**self).route(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_mode_parse() {
        assert_eq!("WALKING".parse::<TravelMode>().unwrap(), TravelMode::Walking);
        assert_eq!("cycling".parse::<TravelMode>().unwrap(), TravelMode::Bicycling);
        assert!(matches!(
            "teleport".parse::<TravelMode>(),
            Err(ConfigError::UnknownTravelMode(_))
        ));
    }

    #[test]
    fn test_travel_mode_default_is_walking() {
        assert_eq!(TravelMode::default(), TravelMode::Walking);
        assert_eq!(TravelMode::default().to_string(), "walking");
    }
}
