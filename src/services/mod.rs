//! Remote collaborators: geocoding and directions.

mod directions;
mod fetcher;
mod geocode;
pub mod google;

pub use directions::{DirectionsRequest, DirectionsService, TravelMode};
pub use fetcher::RouteFetcher;
pub use geocode::Geocoder;
pub use google::GoogleMapsClient;
