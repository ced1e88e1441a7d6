use super::Coordinate;
use crate::error::RouteError;

/// Ordered, non-empty sequence of waypoints. Order is the direction of travel.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    waypoints: Vec<Coordinate>,
    summary: Option<RouteSummary>,
}

/// Totals reported by the directions service for a route
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_m: f64,
    pub duration_s: f64,
}

impl Route {
    pub fn new(waypoints: Vec<Coordinate>) -> Result<Self, RouteError> {
        if waypoints.is_empty() {
            return Err(RouteError::EmptyPath);
        }
        Ok(Self {
            waypoints,
            summary: None,
        })
    }

    pub fn with_summary(mut self, summary: RouteSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn waypoints(&self) -> &[Coordinate] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false: routes are non-empty
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn first(&self) -> Coordinate {
        self.waypoints[0]
    }

    pub fn last(&self) -> Coordinate {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Waypoint at index `len / 2`, used to re-center the map
    pub fn midpoint(&self) -> Coordinate {
        self.waypoints[self.waypoints.len() / 2]
    }

    pub fn summary(&self) -> Option<RouteSummary> {
        self.summary
    }
}
