use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Instant;

use super::{Character, SceneObject, TrackRenderer};
use crate::core::animation::{pose_on_curve, AnimationDriver, Pose};
use crate::error::{ModelLoadError, PipelineError};
use crate::geo::{MercatorProjector, Projector, Route};
use crate::loaders::Model;
use crate::math::Curve;
use crate::traits::{MapView, ObjectId, OverlayScene};

/// Zoom the map jumps to when a new route arrives
pub const DEFAULT_ROUTE_ZOOM: f64 = 17.0;

/// Identifies the route a model load was started for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteTicket(u64);

/// What the page is currently showing
#[derive(Debug, Clone, PartialEq)]
pub enum SceneStatus {
    /// Waiting for geocoding and directions
    AwaitingRoute,
    /// Track shown, character still loading
    LoadingModel,
    /// Track and character shown, animation running
    Animating,
    /// Track shown, character could not be loaded
    ModelUnavailable(String),
    /// No route could be produced
    Failed(String),
}

impl SceneStatus {
    pub fn label(&self) -> String {
        match self {
            SceneStatus::AwaitingRoute => "Fetching route".to_string(),
            SceneStatus::LoadingModel => "Loading character".to_string(),
            SceneStatus::Animating => "Walking".to_string(),
            SceneStatus::ModelUnavailable(reason) => format!("Character unavailable: {reason}"),
            SceneStatus::Failed(reason) => format!("Route unavailable: {reason}"),
        }
    }
}

/// Result of handing a finished model load to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    /// Character added and animation started
    Attached,
    /// The load belonged to a route that has since been replaced or torn down
    Stale,
    /// The load failed; the track stays, no character is shown
    Failed,
}

/// Owns the overlay scene and the single track/character pair in it.
///
/// At most one handle per object kind is held. Every replacement removes the
/// previous object before adding the new one.
pub struct SceneController<S: OverlayScene> {
    scene: S,
    projector: MercatorProjector,
    track_renderer: TrackRenderer,
    driver: AnimationDriver,
    route_zoom: f64,
    curve: Option<Arc<Curve>>,
    track: Option<ObjectId>,
    character: Option<ObjectId>,
    generation: u64,
    status: SceneStatus,
}

impl<S: OverlayScene> SceneController<S> {
    /// The projector's anchor stays fixed for the controller's lifetime
    pub fn new(scene: S, projector: MercatorProjector, track_renderer: TrackRenderer, driver: AnimationDriver) -> Self {
        Self {
            scene,
            projector,
            track_renderer,
            driver,
            route_zoom: DEFAULT_ROUTE_ZOOM,
            curve: None,
            track: None,
            character: None,
            generation: 0,
            status: SceneStatus::AwaitingRoute,
        }
    }

    pub fn with_route_zoom(mut self, zoom: f64) -> Self {
        self.route_zoom = zoom;
        self
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn projector(&self) -> &MercatorProjector {
        &self.projector
    }

    pub fn status(&self) -> &SceneStatus {
        &self.status
    }

    pub fn curve(&self) -> Option<&Arc<Curve>> {
        self.curve.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.driver.is_running()
    }

    /// Pose the character would take at `now`, `None` until animating
    pub fn pose_at(&self, now: Instant) -> Option<Pose> {
        self.driver.pose_at(now)
    }

    pub fn character(&self) -> Option<&Character> {
        match self.character.and_then(|id| self.scene.get(id)) {
            Some(SceneObject::Character(character)) => Some(character),
            _ => None,
        }
    }

    /// Replace the current route: tear down, re-center, rebuild curve and track.
    ///
    /// The returned ticket must accompany the model load started for this route.
    pub fn set_route(&mut self, route: &Route, map: &mut dyn MapView) -> RouteTicket {
        self.clear_objects();
        self.generation += 1;

        map.set_center(route.midpoint(), self.route_zoom);

        let curve = Arc::new(Curve::from_route(route, &self.projector));
        let mut track = self.track_renderer.render(&curve);
        track.set_resolution(self.scene.viewport_size());

        info!(
            "Route {} anchored at {}: {} waypoints, {:.0} m curve, {} track samples",
            self.generation,
            self.projector.anchor(),
            route.len(),
            curve.length(),
            track.points().len()
        );

        self.track = Some(self.scene.add(SceneObject::Track(track)));
        self.curve = Some(curve);
        self.status = SceneStatus::LoadingModel;
        self.scene.request_redraw();

        RouteTicket(self.generation)
    }

    /// Merge a finished model load into the scene if it still belongs to the current route
    pub fn attach_model(&mut self, ticket: RouteTicket, result: Result<Model, ModelLoadError>) -> AttachOutcome {
        let Some(curve) = self.curve.clone().filter(|_| ticket.0 == self.generation) else {
            debug!("Discarding model load for route {} (current {})", ticket.0, self.generation);
            return AttachOutcome::Stale;
        };

        let model = match result {
            Ok(model) => model,
            Err(e) => {
                warn!("Character unavailable: {}", e);
                self.status = SceneStatus::ModelUnavailable(e.to_string());
                return AttachOutcome::Failed;
            }
        };

        if let Some(previous) = self.character.take() {
            self.scene.remove(previous);
        }

        let mut character = Character::new(Arc::new(model));
        character.set_pose(&pose_on_curve(&curve, 0.0));
        self.character = Some(self.scene.add(SceneObject::Character(character)));

        self.driver.start(curve);
        self.status = SceneStatus::Animating;
        self.scene.request_redraw();
        info!("Character attached to route {}", self.generation);

        AttachOutcome::Attached
    }

    /// Record a pipeline failure as a visible state
    pub fn report_failure(&mut self, err: &PipelineError) {
        error!("Route pipeline failed: {}", err);
        self.clear_objects();
        self.generation += 1;
        self.status = SceneStatus::Failed(err.to_string());
        self.scene.request_redraw();
    }

    /// Per-frame update: sync track resolution, move the character, ask for a redraw
    pub fn tick(&mut self, now: Instant) {
        let viewport = self.scene.viewport_size();
        if let Some(SceneObject::Track(track)) = self.track.and_then(|id| self.scene.get_mut(id)) {
            if track.resolution() != viewport {
                track.set_resolution(viewport);
            }
        }

        if let (Some(pose), Some(id)) = (self.driver.pose_at(now), self.character) {
            if let Some(SceneObject::Character(character)) = self.scene.get_mut(id) {
                character.set_pose(&pose);
            }
        }

        self.scene.request_redraw();
    }

    /// Remove everything; in-flight loads for the old route become stale
    pub fn teardown(&mut self) {
        self.clear_objects();
        self.generation += 1;
        self.status = SceneStatus::AwaitingRoute;
    }

    fn clear_objects(&mut self) {
        self.driver.stop();
        self.curve = None;
        if let Some(id) = self.track.take() {
            self.scene.remove(id);
        }
        if let Some(id) = self.character.take() {
            self.scene.remove(id);
        }
    }
}
