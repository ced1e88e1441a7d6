use async_trait::async_trait;

use crate::error::GeocodeError;
use crate::geo::{Address, Coordinate};

/// Turns free-text addresses into coordinates.
///
/// Implementations return `GeocodeError::NotFound` when the address yields no
/// candidates; otherwise the first candidate wins.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn resolve(&self, address: &Address) -> Result<Coordinate, GeocodeError>;
}

#[async_trait]
impl<T: Geocoder + ?Sized> Geocoder for std::sync::Arc<T> {
    async fn resolve(&self, address: &Address) -> Result<Coordinate, GeocodeError> {
        (**self).resolve(address).await
    }
}
