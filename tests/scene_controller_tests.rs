use glam::{Vec2, Vec3};
use route_walker::core::AnimationDriver;
use route_walker::error::{GeocodeError, ModelLoadError, PipelineError};
use route_walker::geo::{Coordinate, MercatorProjector, Route};
use route_walker::loaders::Model;
use route_walker::map::MapState;
use route_walker::scene::{AttachOutcome, ObjectKind, SceneController, SceneGraph, SceneObject, SceneStatus, TrackRenderer};
use route_walker::traits::MapView;
use std::time::{Duration, Instant};

fn controller() -> SceneController<SceneGraph> {
    SceneController::new(
        SceneGraph::new(Vec2::new(800.0, 600.0)),
        MercatorProjector::new(Coordinate::new(19.138, 72.932)),
        TrackRenderer::default(),
        AnimationDriver::default(),
    )
}

fn route(offset: f64, len: usize) -> Route {
    let waypoints = (0..len)
        .map(|i| Coordinate::new(19.138 + offset + i as f64 * 0.0005, 72.932 + i as f64 * 0.0003))
        .collect();
    Route::new(waypoints).unwrap()
}

fn model() -> Model {
    Model::from_triangles(Some("person".into()), vec![[Vec3::ZERO, Vec3::X, Vec3::Z]]).unwrap()
}

fn counts(controller: &SceneController<SceneGraph>) -> (usize, usize) {
    let scene = controller.scene();
    (scene.count(ObjectKind::Track), scene.count(ObjectKind::Character))
}

#[cfg(test)]
mod scene_controller_tests {
    use super::*;

    #[test]
    fn test_route_replacement_keeps_single_track_and_character() {
        let mut controller = controller();
        let mut map = MapState::default();

        let first = controller.set_route(&route(0.0, 4), &mut map);
        assert_eq!(counts(&controller), (1, 0));
        assert_eq!(controller.attach_model(first, Ok(model())), AttachOutcome::Attached);
        assert_eq!(counts(&controller), (1, 1));

        let second = controller.set_route(&route(0.01, 6), &mut map);
        assert_eq!(counts(&controller), (1, 0));
        assert_eq!(controller.attach_model(second, Ok(model())), AttachOutcome::Attached);
        assert_eq!(counts(&controller), (1, 1));
        assert_eq!(controller.scene().len(), 2);
    }

    #[test]
    fn test_stale_model_load_is_discarded() {
        let mut controller = controller();
        let mut map = MapState::default();

        let stale = controller.set_route(&route(0.0, 3), &mut map);
        let current = controller.set_route(&route(0.01, 3), &mut map);

        assert_eq!(controller.attach_model(stale, Ok(model())), AttachOutcome::Stale);
        assert_eq!(counts(&controller), (1, 0));
        assert_eq!(controller.status(), &SceneStatus::LoadingModel);

        assert_eq!(controller.attach_model(current, Ok(model())), AttachOutcome::Attached);
        assert_eq!(counts(&controller), (1, 1));
    }

    #[test]
    fn test_teardown_leaves_no_orphans() {
        let mut controller = controller();
        let ticket = controller.set_route(&route(0.0, 5), &mut MapState::default());
        controller.attach_model(ticket, Ok(model()));

        controller.teardown();

        assert!(controller.scene().is_empty());
        assert!(!controller.is_animating());
        assert!(controller.curve().is_none());
    }

    #[test]
    fn test_map_recenters_on_middle_waypoint() {
        let mut controller = controller();
        let mut map = MapState::default();
        let route = route(0.0, 5);

        controller.set_route(&route, &mut map);

        assert_eq!(map.center(), route.waypoints()[2]);
        assert_eq!(map.zoom(), 17.0);
    }

    #[test]
    fn test_animation_starts_only_with_model() {
        let mut controller = controller();
        let ticket = controller.set_route(&route(0.0, 3), &mut MapState::default());
        assert!(!controller.is_animating());
        assert!(controller.pose_at(Instant::now()).is_none());

        controller.attach_model(ticket, Ok(model()));

        assert!(controller.is_animating());
        assert_eq!(controller.status(), &SceneStatus::Animating);
    }

    #[test]
    fn test_tick_moves_character_along_curve() {
        let mut controller = controller();
        let ticket = controller.set_route(&route(0.0, 4), &mut MapState::default());
        controller.attach_model(ticket, Ok(model()));

        let start = controller.character().unwrap().position;
        controller.tick(Instant::now() + Duration::from_secs(5));
        let moved = controller.character().unwrap().position;

        assert!(start.distance(moved) > 1.0, "character stayed at {start}");
        let curve = controller.curve().unwrap();
        let expected = controller.pose_at(Instant::now() + Duration::from_secs(5)).unwrap();
        assert!(moved.distance(expected.position) < curve.length() * 0.01);
    }

    #[test]
    fn test_model_failure_keeps_track_visible() {
        let mut controller = controller();
        let ticket = controller.set_route(&route(0.0, 3), &mut MapState::default());

        let outcome = controller.attach_model(ticket, Err(ModelLoadError::Unsupported("scene.fbx".into())));

        assert_eq!(outcome, AttachOutcome::Failed);
        assert_eq!(counts(&controller), (1, 0));
        assert!(matches!(controller.status(), SceneStatus::ModelUnavailable(reason) if reason.contains("scene.fbx")));
    }

    #[test]
    fn test_pipeline_failure_is_visible_state() {
        let mut controller = controller();
        let ticket = controller.set_route(&route(0.0, 3), &mut MapState::default());

        controller.report_failure(&PipelineError::Geocode(GeocodeError::NotFound("nowhere".into())));

        assert!(matches!(controller.status(), SceneStatus::Failed(reason) if reason.contains("nowhere")));
        assert!(controller.scene().is_empty());
        assert_eq!(controller.attach_model(ticket, Ok(model())), AttachOutcome::Stale);
    }

    #[test]
    fn test_track_follows_viewport_resize() {
        let mut controller = controller();
        controller.set_route(&route(0.0, 3), &mut MapState::default());

        controller.scene_mut().set_viewport_size(Vec2::new(1920.0, 1080.0));
        controller.tick(Instant::now());

        let track = controller
            .scene()
            .objects()
            .find_map(|(_, object)| match object {
                SceneObject::Track(track) => Some(track),
                _ => None,
            })
            .unwrap();
        assert_eq!(track.resolution(), Vec2::new(1920.0, 1080.0));
    }
}
