//! Error types for the route walker pipeline.

use thiserror::Error;

/// Failures while decoding an encoded polyline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolylineError {
    /// Byte outside the printable range used by the encoding
    #[error("invalid polyline character {0:?} at offset {1}")]
    InvalidCharacter(char, usize),

    /// Input ended in the middle of a value
    #[error("polyline truncated at offset {0}")]
    Truncated(usize),

    /// Latitude was decoded without a matching longitude
    #[error("polyline has an unpaired coordinate")]
    Unpaired,

    /// Accumulated delta no longer fits the coordinate integer
    #[error("polyline value overflows at offset {0}")]
    Overflow(usize),

    /// Decoded point is not a valid latitude/longitude
    #[error("polyline point {0} is outside the valid coordinate range")]
    OutOfRange(usize),
}

/// Failures while turning an address into a coordinate.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// The service answered but returned zero results
    #[error("no geocoding results for {0:?}")]
    NotFound(String),

    /// The service answered with a non-OK status
    #[error("geocoding failed with status {status}: {message}")]
    Status { status: String, message: String },

    /// Network or HTTP failure
    #[error("geocoding request failed: {0}")]
    Transport(String),

    /// Response body could not be parsed
    #[error("invalid geocoding response: {0}")]
    Decode(String),
}

/// Failures while requesting or flattening a route.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The directions service answered with a non-OK status
    #[error("directions failed with status {status}: {message}")]
    Status { status: String, message: String },

    /// Status was OK but the route list was empty
    #[error("directions response contained no routes")]
    NoRoutes,

    /// A route must contain at least one waypoint
    #[error("route has no waypoints")]
    EmptyPath,

    #[error("invalid overview polyline: {0}")]
    Polyline(#[from] PolylineError),

    /// Network or HTTP failure
    #[error("directions request failed: {0}")]
    Transport(String),

    /// Response body could not be parsed
    #[error("invalid directions response: {0}")]
    Decode(String),
}

/// Anything that stops an address pair from becoming a route.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("geocoding: {0}")]
    Geocode(#[from] GeocodeError),

    #[error("routing: {0}")]
    Route(#[from] RouteError),
}

/// Failures while loading the character asset.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("failed to import glTF asset {path}: {source}")]
    Import {
        path: String,
        #[source]
        source: gltf::Error,
    },

    #[error("failed to download {url}: {message}")]
    Download { url: String, message: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("unsupported asset: {0}")]
    Unsupported(String),

    #[error("asset {0} contains no triangle geometry")]
    NoGeometry(String),

    /// The blocking loader task panicked or was cancelled
    #[error("model loader task failed: {0}")]
    Task(String),
}

/// Invalid command-line or environment configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("animation period must be greater than zero")]
    ZeroPeriod,

    #[error("track density must be at least 1")]
    ZeroDensity,

    #[error("{name} must be a positive number, got {value}")]
    NotPositive { name: &'static str, value: f32 },

    #[error("invalid color {0:?}, expected six hex digits")]
    InvalidColor(String),

    #[error("unknown travel mode {0:?}")]
    UnknownTravelMode(String),

    #[error("MAP_API_KEY is not set")]
    MissingApiKey,
}

impl GeocodeError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}

impl RouteError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }
}
