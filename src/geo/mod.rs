mod polyline;
mod projection;
mod route;

pub use polyline::decode_polyline;
pub use projection::{MercatorProjector, Projector, EARTH_RADIUS};
pub use route::{Route, RouteSummary};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-text address handed to the geocoder
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    #[serde(alias = "lon")]
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// `lat,lng` form accepted by the directions service
    pub fn to_query(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_query_format() {
        let c = Coordinate::new(19.5, 72.25);
        assert_eq!(c.to_query(), "19.5,72.25");
    }

    #[test]
    fn test_coordinate_deserializes_lng_alias() {
        let c: Coordinate = serde_json::from_str(r#"{"lat": 1.0, "lon": 2.0}"#).unwrap();
        assert_eq!(c, Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn test_address_display() {
        let a = Address::from("221B Baker Street");
        assert_eq!(a.to_string(), "221B Baker Street");
        assert_eq!(a.as_str(), "221B Baker Street");
    }
}
