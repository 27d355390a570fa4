//! Property tests for placement and relaxation over arbitrary node counts
//! and container sizes.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use eframe::egui::vec2;
use skills_cloud::Container;
use skills_cloud::cloud::{Body, LayoutStrategy, PlacementParams, RelaxParams, relax_frame};

fn strategy_from(ring: bool) -> LayoutStrategy {
    if ring {
        LayoutStrategy::Ring
    } else {
        LayoutStrategy::Scattered
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Placement returns one point per node, all inside the padded bounds.
    #[test]
    fn prop_placement_count_and_bounds(
        count in 0usize..32,
        width in 120.0f32..1600.0,
        height in 120.0f32..1200.0,
        seed in any::<u64>(),
        ring in any::<bool>(),
    ) {
        let params = PlacementParams {
            max_tries: 200,
            ..PlacementParams::for_container(width, height)
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let points = strategy_from(ring).place(count, &params, &mut rng);

        prop_assert_eq!(points.len(), count);
        for point in &points {
            prop_assert!(
                params.contains(point.position),
                "{:?} outside {}x{}", point.position, width, height
            );
        }
    }

    /// Points accepted without falling back honour exclusion and spacing.
    #[test]
    fn prop_accepted_points_respect_constraints(
        count in 1usize..20,
        width in 200.0f32..1200.0,
        height in 200.0f32..900.0,
        seed in any::<u64>(),
    ) {
        let params = PlacementParams {
            max_tries: 300,
            ..PlacementParams::for_container(width, height)
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let points = LayoutStrategy::Scattered.place(count, &params, &mut rng);

        for (index, point) in points.iter().enumerate() {
            if point.fallback {
                continue;
            }
            prop_assert!((point.position - params.center).length() >= params.center_exclusion);
            // Only earlier points were checked when this one was accepted.
            for earlier in &points[..index] {
                prop_assert!(
                    (point.position - earlier.position).length() >= params.min_distance
                );
            }
        }
    }

    /// Same seed and inputs give identical layouts.
    #[test]
    fn prop_placement_is_deterministic(
        count in 0usize..24,
        width in 150.0f32..1000.0,
        height in 150.0f32..1000.0,
        seed in any::<u64>(),
    ) {
        let params = PlacementParams {
            max_tries: 100,
            ..PlacementParams::for_container(width, height)
        };
        let first = LayoutStrategy::Scattered.place(count, &params, &mut StdRng::seed_from_u64(seed));
        let second = LayoutStrategy::Scattered.place(count, &params, &mut StdRng::seed_from_u64(seed));
        prop_assert_eq!(first, second);
    }

    /// Any number of frames from any start keeps bodies finite and inside
    /// the padded container.
    #[test]
    fn prop_relaxation_stays_finite_and_bounded(
        starts in prop::collection::vec((-50.0f32..700.0, -50.0f32..700.0), 0..20),
        width in 100.0f32..800.0,
        height in 100.0f32..800.0,
        delta_ratio in 0.0f32..3.0,
        frames in 1usize..60,
        seed in any::<u64>(),
    ) {
        let container = Container::new(width, height);
        let params = RelaxParams::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut bodies = starts
            .iter()
            .map(|&(x, y)| Body::new(vec2(x, y), vec2(0.3, -0.2), 32.0, 1.5))
            .collect::<Vec<_>>();

        for _ in 0..frames {
            relax_frame(&mut bodies, container, &params, delta_ratio, &mut rng);
            for body in &bodies {
                prop_assert!(body.position.x.is_finite() && body.position.y.is_finite());
                prop_assert!(body.position.x >= params.pad && body.position.x <= width - params.pad);
                prop_assert!(body.position.y >= params.pad && body.position.y <= height - params.pad);
            }
        }
    }
}
