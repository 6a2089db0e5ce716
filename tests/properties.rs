//! Property-based invariants for points, tracks and stitching.
//!
//! 1. Canonical `long,lat,alt` tokens round-trip exactly.
//! 2. Distance is symmetric and zero to itself.
//! 3. Length is invariant to reversal; double reversal is the identity.
//! 4. Distance splitting yields ceil(L/d) +/- 1 pieces that rebuild the track.
//! 5. Nearest point is a true minimum and the earliest one.
//! 6. Cut, flipped and rotated fragments stitch back into the route.

use proptest::prelude::*;
use track_editor::{DistanceUnit, GeoPoint, SplitAt, Stitcher, Track};

// ── Helpers ─────────────────────────────────────────────────────────────

fn point_strategy() -> impl Strategy<Value = GeoPoint> {
    (-90.0f64..=90.0, -180.0f64..=180.0, -500.0f64..9000.0)
        .prop_map(|(lat, long, alt)| GeoPoint::new(lat, long).with_altitude(alt))
}

/// A walk from a random origin; each step moves at most `step` degrees on
/// either axis.
fn walk_strategy_with(min: usize, max: usize, step: f64) -> impl Strategy<Value = Track> {
    (
        -60.0f64..60.0,
        -170.0f64..170.0,
        prop::collection::vec((-step..step, -step..step), min..max),
    )
        .prop_map(|(lat, long, steps)| {
            let mut current = GeoPoint::new(lat, long);
            let mut points = vec![current];
            for (dlat, dlong) in steps {
                current = GeoPoint::new(current.lat + dlat, current.long + dlong);
                points.push(current);
            }
            Track::from_points(points)
        })
}

/// A walk of small steps (at most ~80 m per leg).
fn walk_strategy(min: usize, max: usize) -> impl Strategy<Value = Track> {
    walk_strategy_with(min, max, 0.0005)
}

/// A route whose points are all distinct: latitude strictly increases.
fn route_strategy() -> impl Strategy<Value = Track> {
    prop::collection::vec((0.0001f64..0.002, -0.001f64..0.001), 9..40).prop_map(|steps| {
        let mut current = GeoPoint::new(46.5, 8.0);
        let mut points = vec![current];
        for (dlat, dlong) in steps {
            current = GeoPoint::new(current.lat + dlat, current.long + dlong);
            points.push(current);
        }
        Track::from_points(points)
    })
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Token round-trip
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn canonical_token_round_trips(p in point_strategy()) {
        let token = format!("{},{},{}", p.long, p.lat, p.alt);
        let parsed = GeoPoint::parse(&token).unwrap();
        prop_assert_eq!(parsed.to_string(), token);
        prop_assert_eq!(parsed.alt, p.alt);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Distance symmetry
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn distance_is_symmetric(a in point_strategy(), b in point_strategy()) {
        prop_assert_eq!(a.distance_to(&b), b.distance_to(&a));
        prop_assert_eq!(a.distance_to(&a), 0.0);
        prop_assert!(a.distance_to(&b) >= 0.0);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Reversal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn length_invariant_to_reverse(track in walk_strategy(0, 60)) {
        let mut reversed = track.clone();
        reversed.reverse();
        let forward = track.length(DistanceUnit::Kilometers);
        let backward = reversed.length(DistanceUnit::Kilometers);
        prop_assert!((forward - backward).abs() <= 1e-9 * forward.max(1.0));
    }

    #[test]
    fn double_reverse_is_identity(track in walk_strategy(0, 30)) {
        let mut copy = track.clone();
        copy.reverse();
        copy.reverse();
        prop_assert_eq!(copy, track);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Distance splitting
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    // Legs stay under ~1.6 m, so over at most ~0.5 km the per-piece overshoot
    // past a 40 m+ interval adds up to less than one interval.
    #[test]
    fn split_by_distance_count_and_rebuild(
        track in walk_strategy_with(0, 300, 0.00001),
        interval in 0.04f64..0.4,
    ) {
        let pieces = track.split_by_distance(interval, DistanceUnit::Kilometers).unwrap();

        let total: f64 = track.points().windows(2).map(|w| w[0].distance_to(&w[1])).sum();
        let expected = (total / interval).ceil();
        prop_assert!((pieces.len() as f64 - expected).abs() <= 1.0,
            "{} pieces for ceil({}/{}) = {}", pieces.len(), total, interval, expected);

        let mut rebuilt: Vec<GeoPoint> = pieces[0].points().to_vec();
        for piece in &pieces[1..] {
            prop_assert_eq!(piece.start_point(), rebuilt.last());
            rebuilt.extend_from_slice(&piece.points()[1..]);
        }
        prop_assert_eq!(rebuilt.as_slice(), track.points());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Nearest point
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn nearest_point_is_earliest_minimum(track in walk_strategy(0, 40), query in point_strategy()) {
        let nearest = track.nearest_point_to(&query).unwrap();
        let distances: Vec<f64> = track.points().iter().map(|p| query.distance_to(p)).collect();

        prop_assert_eq!(nearest.distance, distances[nearest.index]);
        prop_assert!(distances.iter().all(|d| *d >= nearest.distance));
        prop_assert!(distances[..nearest.index].iter().all(|d| *d > nearest.distance));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Stitching
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fragments_stitch_back(
        (route, cuts) in route_strategy().prop_flat_map(|route| {
            let interior: Vec<usize> = (1..route.len() - 1).collect();
            (Just(route), prop::sample::subsequence(interior, 1..=4))
        }),
        flips in prop::collection::vec(any::<bool>(), 5),
        rotation in 0usize..5,
    ) {
        let mut rest = route.clone();
        let mut pieces = Vec::new();
        for &index in cuts.iter().rev() {
            pieces.push(rest.split(SplitAt::Index(index), true).unwrap());
        }
        pieces.push(rest);

        for (piece, flip) in pieces.iter_mut().zip(&flips) {
            if *flip {
                piece.reverse();
            }
        }
        let shift = rotation % pieces.len();
        pieces.rotate_left(shift);

        let stitched = Stitcher::new().stitch(pieces).unwrap();
        let mut track = stitched.track;
        if track.start_point() != route.start_point() {
            track.reverse();
        }
        prop_assert_eq!(track.points(), route.points());
    }
}
