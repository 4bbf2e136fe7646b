//! Property-based invariant tests for the simulation core.
//!
//! 1. Uniform cells never emit segments.
//! 2. Saddle cells always emit exactly two segments.
//! 3. Segment endpoints stay on the cell boundary.
//! 4. Stars stay inside the viewport however long they drift.
//! 5. The ripple registry never exceeds its bound and never holds expired sources.
//! 6. Visibility stays in [0, 1] and never overshoots its target.
//! 7. Extraction emits nothing while contours are invisible.

use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use topo_backdrop::config::{ContourConfig, FieldConfig, RippleConfig, StarfieldConfig};
use topo_backdrop::sim::{
    CellCorners, ContourExtractor, FieldSampler, RippleRegistry, ScalarField, Starfield,
    Visibility, march_cell,
};

// ── Helpers ─────────────────────────────────────────────────────────────

fn corners_strategy() -> impl Strategy<Value = CellCorners> {
    (-2.0f32..2.0, -2.0f32..2.0, -2.0f32..2.0, -2.0f32..2.0).prop_map(|(tl, tr, br, bl)| {
        CellCorners {
            top_left: tl,
            top_right: tr,
            bottom_right: br,
            bottom_left: bl,
        }
    })
}

#[derive(Debug, Clone)]
enum RippleOp {
    Spawn(f32, f32),
    Tick(u16),
}

fn ripple_op_strategy() -> impl Strategy<Value = RippleOp> {
    prop_oneof![
        (0.0f32..2000.0, 0.0f32..2000.0).prop_map(|(x, y)| RippleOp::Spawn(x, y)),
        (1u16..120).prop_map(RippleOp::Tick),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Uniform cells
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn uniform_cell_emits_nothing(value in -2.0f32..2.0, threshold in -2.0f32..2.0) {
        let corners = CellCorners {
            top_left: value,
            top_right: value,
            bottom_right: value,
            bottom_left: value,
        };
        let mut out = Vec::new();
        let case = march_cell(&corners, threshold, Vec2::ZERO, 22.0, &mut out);
        prop_assert!(case == 0 || case == 15, "uniform cell classified as {}", case);
        prop_assert!(out.is_empty());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Saddles
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn saddle_emits_two_segments(
        above in 0.01f32..2.0,
        below in 0.01f32..2.0,
        threshold in -1.0f32..1.0,
        flip in any::<bool>(),
    ) {
        let (hi, lo) = (threshold + above, threshold - below);
        let corners = if flip {
            CellCorners { top_left: lo, top_right: hi, bottom_right: lo, bottom_left: hi }
        } else {
            CellCorners { top_left: hi, top_right: lo, bottom_right: hi, bottom_left: lo }
        };
        let mut out = Vec::new();
        let case = march_cell(&corners, threshold, Vec2::new(44.0, 66.0), 22.0, &mut out);
        prop_assert_eq!(case, if flip { 5 } else { 10 });
        prop_assert_eq!(out.len(), 2);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Endpoints on the cell boundary
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn endpoints_on_cell_boundary(
        corners in corners_strategy(),
        threshold in -1.5f32..1.5,
        ox in 0.0f32..1000.0,
        oy in 0.0f32..1000.0,
    ) {
        let cell = 22.0;
        let mut out = Vec::new();
        march_cell(&corners, threshold, Vec2::new(ox, oy), cell, &mut out);
        prop_assert!(out.len() <= 2);

        let eps = 1e-2;
        for segment in &out {
            for p in [segment.a, segment.b] {
                prop_assert!(p.x >= ox - eps && p.x <= ox + cell + eps, "x {} outside cell", p.x);
                prop_assert!(p.y >= oy - eps && p.y <= oy + cell + eps, "y {} outside cell", p.y);
                let on_vertical = (p.x - ox).abs() < eps || (p.x - ox - cell).abs() < eps;
                let on_horizontal = (p.y - oy).abs() < eps || (p.y - oy - cell).abs() < eps;
                prop_assert!(on_vertical || on_horizontal, "{:?} not on an edge", p);
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Stars stay in bounds
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn stars_stay_in_bounds(
        width in 1.0f32..600.0,
        height in 1.0f32..600.0,
        seed in any::<u64>(),
        ticks in 0usize..400,
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut stars = Starfield::default();
        stars.regenerate(width, height, &StarfieldConfig::default(), &mut rng);

        for _ in 0..ticks {
            stars.advance();
        }
        for p in &stars.particles {
            prop_assert!(p.x >= 0.0 && p.x <= width, "x {} outside 0..{}", p.x, width);
            prop_assert!(p.y >= 0.0 && p.y <= height, "y {} outside 0..{}", p.y, height);
            prop_assert!(p.size >= 0.5 && p.size <= 2.0);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Ripple registry bound
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ripple_registry_bounded(ops in prop::collection::vec(ripple_op_strategy(), 0..64)) {
        let config = RippleConfig::default();
        let mut registry = RippleRegistry::new(&config);

        for op in ops {
            match op {
                RippleOp::Spawn(x, y) => registry.spawn(x, y),
                RippleOp::Tick(n) => {
                    for _ in 0..n {
                        registry.tick();
                    }
                }
            }
            prop_assert!(registry.len() <= config.max_sources);
            prop_assert!(registry.iter().all(|r| r.age < config.lifetime));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Visibility range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn visibility_approaches_without_overshoot(
        start in 0.0f32..=1.0,
        target_home in any::<bool>(),
        smoothing in 0.001f32..1.0,
        steps in 1usize..300,
    ) {
        let target = if target_home { 1.0 } else { 0.0 };
        let mut visibility = Visibility::new(start);
        let mut distance = (visibility.value() - target).abs();

        for _ in 0..steps {
            visibility.update(target, smoothing);
            let value = visibility.value();
            prop_assert!((0.0..=1.0).contains(&value));
            let next = (value - target).abs();
            prop_assert!(next <= distance + 1e-6);
            distance = next;
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 7. Invisible contours
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn invisible_contours_sample_nothing(
        width in 1.0f32..400.0,
        height in 1.0f32..400.0,
        visibility in 0.0f32..=0.01,
    ) {
        let params = FieldConfig::default();
        let ripples = RippleRegistry::new(&RippleConfig::default());
        let field = FieldSampler::new(0.0, &params, &ripples);
        let samples = std::cell::Cell::new(0usize);
        let counting = |x: f32, y: f32| {
            samples.set(samples.get() + 1);
            field.sample(x, y)
        };

        let mut extractor = ContourExtractor::new();
        let layers = extractor.extract(&counting, width, height, &ContourConfig::default(), visibility);
        prop_assert!(layers.is_empty());
        prop_assert_eq!(samples.get(), 0);
    }
}
