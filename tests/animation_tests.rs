use approx::assert_relative_eq;
use glam::Vec3;
use route_walker::core::animation::{facing, pose_on_curve, FORWARD, UPRIGHT_CORRECTION};
use route_walker::core::{AnimationClock, AnimationDriver};
use route_walker::math::Curve;
use std::sync::Arc;
use std::time::{Duration, Instant};

const PERIOD: Duration = Duration::from_secs(20);

#[cfg(test)]
mod animation_tests {
    use super::*;

    #[test]
    fn test_progress_is_non_decreasing_within_a_period() {
        let clock = AnimationClock::new(PERIOD);
        let mut previous = 0.0;

        for ms in (0..20_000).step_by(7) {
            let progress = clock.progress(Duration::from_millis(ms));
            assert!(progress >= previous, "progress fell at {ms}ms: {progress} < {previous}");
            assert!((0.0..1.0).contains(&progress));
            previous = progress;
        }
    }

    #[test]
    fn test_progress_resets_after_period_boundary() {
        let clock = AnimationClock::new(PERIOD);

        for cycle in 1..4u64 {
            let before = clock.progress(PERIOD * cycle as u32 - Duration::from_millis(1));
            let after = clock.progress(PERIOD * cycle as u32 + Duration::from_millis(1));
            assert!(before > 0.999, "cycle {cycle} before={before}");
            assert!(after < 0.001, "cycle {cycle} after={after}");
        }
    }

    #[test]
    fn test_driver_pose_wraps_with_clock() {
        let origin = Instant::now();
        let curve = Arc::new(Curve::new(vec![Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)]).unwrap());
        let mut driver = AnimationDriver::new(AnimationClock::with_origin(origin, PERIOD));
        driver.start(curve);

        let late = driver.pose_at(origin + Duration::from_millis(19_900)).unwrap();
        let wrapped = driver.pose_at(origin + Duration::from_millis(20_100)).unwrap();

        assert!(late.position.x > 99.0);
        assert!(wrapped.position.x < 1.0);
    }

    #[test]
    fn test_orientation_faces_direction_of_travel() {
        let curve = Curve::new(vec![Vec3::ZERO, Vec3::new(10.0, 10.0, 0.0), Vec3::new(20.0, 0.0, 0.0)]).unwrap();

        for progress in [0.1, 0.5, 0.9] {
            let pose = pose_on_curve(&curve, progress);
            // Undo the upright correction, then the forward axis must point along the tangent
            let arc = pose.orientation * glam::Quat::from_rotation_x(-UPRIGHT_CORRECTION);
            let forward = arc * FORWARD;
            let tangent = curve.tangent_at(progress);
            assert!(forward.abs_diff_eq(tangent, 1e-3), "progress {progress}: {forward} vs {tangent}");
        }
    }

    #[test]
    fn test_facing_opposite_of_forward_is_finite() {
        let q = facing(-FORWARD);
        assert!(q.is_finite());
        assert_relative_eq!(q.length(), 1.0, epsilon = 1e-5);
        let arc = q * glam::Quat::from_rotation_x(-UPRIGHT_CORRECTION);
        assert!((arc * FORWARD).abs_diff_eq(-FORWARD, 1e-4));
    }
}
