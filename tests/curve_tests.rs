use glam::Vec3;
use route_walker::geo::{Coordinate, MercatorProjector, Projector, Route};
use route_walker::math::{Curve, DEGENERATE_TANGENT};

const ANCHOR: Coordinate = Coordinate::new(19.138063642877647, 72.9328973566364);

/// A zig-zag walk a few hundred meters long near the anchor
fn walk(len: usize) -> Route {
    let waypoints = (0..len)
        .map(|i| {
            let wiggle = if i % 2 == 0 { 0.0002 } else { -0.0002 };
            Coordinate::new(ANCHOR.lat + i as f64 * 0.0004, ANCHOR.lng + wiggle + i as f64 * 0.0001)
        })
        .collect();
    Route::new(waypoints).unwrap()
}

fn fractions() -> impl Iterator<Item = f32> {
    (0..=1000).map(|i| i as f32 / 1000.0)
}

#[cfg(test)]
mod curve_tests {
    use super::*;

    #[test]
    fn test_endpoints_match_projected_waypoints() {
        let projector = MercatorProjector::new(ANCHOR);
        for len in [2, 3, 7, 25] {
            let route = walk(len);
            let curve = Curve::from_route(&route, &projector);

            let first = projector.project(route.first(), 0.0);
            let last = projector.project(route.last(), 0.0);
            assert!(curve.point_at(0.0).distance(first) < 1e-2, "len {len} start");
            assert!(curve.point_at(1.0).distance(last) < 1e-2, "len {len} end");
        }
    }

    #[test]
    fn test_point_and_tangent_are_finite_everywhere() {
        let projector = MercatorProjector::new(ANCHOR);
        let curve = Curve::from_route(&walk(12), &projector);

        for u in fractions() {
            let point = curve.point_at(u);
            let tangent = curve.tangent_at(u);
            assert!(point.is_finite(), "point at {u}");
            assert!(tangent.is_finite(), "tangent at {u}");
            assert!((tangent.length() - 1.0).abs() < 1e-3, "tangent length at {u}");
        }
    }

    #[test]
    fn test_single_waypoint_route_is_well_defined() {
        let route = Route::new(vec![ANCHOR]).unwrap();
        let curve = Curve::from_route(&route, &MercatorProjector::new(ANCHOR));

        for u in [0.0, 0.5, 1.0] {
            assert_eq!(curve.point_at(u), Vec3::ZERO);
            assert_eq!(curve.tangent_at(u), DEGENERATE_TANGENT);
        }
    }

    #[test]
    fn test_duplicate_waypoints_stay_finite() {
        let route = Route::new(vec![ANCHOR, ANCHOR, Coordinate::new(ANCHOR.lat + 0.001, ANCHOR.lng), ANCHOR]).unwrap();
        let curve = Curve::from_route(&route, &MercatorProjector::new(ANCHOR));

        for u in fractions() {
            assert!(curve.point_at(u).is_finite(), "point at {u}");
            assert!(curve.tangent_at(u).is_finite(), "tangent at {u}");
        }
    }

    #[test]
    fn test_arc_length_parameterisation_is_even() {
        let curve = Curve::from_route(&walk(8), &MercatorProjector::new(ANCHOR));
        let points = curve.spaced_points(50);
        let steps: Vec<f32> = points.windows(2).map(|w| w[0].distance(w[1])).collect();

        let mean = steps.iter().sum::<f32>() / steps.len() as f32;
        for (i, step) in steps.iter().enumerate() {
            assert!((step - mean).abs() < mean * 0.1, "step {i} is {step}, mean {mean}");
        }
    }

    #[test]
    fn test_progress_along_curve_is_monotonic_in_distance() {
        let curve = Curve::from_route(&walk(6), &MercatorProjector::new(ANCHOR));
        let start = curve.point_at(0.0);
        let end = curve.point_at(1.0);

        // The walk heads steadily north-east, so distance from the start grows
        let mut previous = 0.0;
        for u in (0..=20).map(|i| i as f32 / 20.0) {
            let along = (curve.point_at(u) - start).dot((end - start).normalize());
            assert!(along + 1.0 >= previous, "u={u} went backwards");
            previous = along;
        }
    }
}
