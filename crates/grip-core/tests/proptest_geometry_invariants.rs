//! Property-based invariant tests for the resize geometry engine.
//!
//! 1. Committed width/height never leave their configured bounds
//! 2. Leading-edge growth keeps the trailing edge anchored
//! 3. Unresolved axes keep their start size unless an aspect lock derives them
//! 4. An unclamped aspect lock reproduces the start ratio
//! 5. Token encode/decode is stable for every resolvable direction

use grip_core::{
    Bounds, Constraints, Delta, Direction, Margins, Rect, ResizeStart, compute_geometry,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn direction_strategy() -> impl Strategy<Value = Direction> {
    (-1i8..=1, -1i8..=1)
        .prop_filter("at least one axis", |(h, v)| *h != 0 || *v != 0)
        .prop_map(|(h, v)| Direction::from_signs(h, v))
}

fn bound_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), (1.0f64..600.0).prop_map(Some)]
}

fn bounds_strategy() -> impl Strategy<Value = Bounds> {
    (bound_strategy(), bound_strategy()).prop_map(|(a, b)| match (a, b) {
        (Some(a), Some(b)) => Bounds::new(Some(a.min(b)), Some(a.max(b))),
        (min, max) => Bounds::new(min, max),
    })
}

fn start_strategy() -> impl Strategy<Value = ResizeStart> {
    (
        -200.0f64..200.0,
        -200.0f64..200.0,
        1.0f64..500.0,
        1.0f64..500.0,
        -20.0f64..20.0,
        -20.0f64..20.0,
    )
        .prop_map(|(left, top, width, height, ml, mt)| ResizeStart {
            rect: Rect::new(left, top, width, height),
            margins: Margins::new(ml, mt),
        })
}

fn delta_strategy() -> impl Strategy<Value = Delta> {
    (-800.0f64..800.0, -800.0f64..800.0).prop_map(|(x, y)| Delta { x, y })
}

fn within(bounds: Bounds, value: f64) -> bool {
    bounds.min.is_none_or(|min| value >= min) && bounds.max.is_none_or(|max| value <= max)
}

proptest! {
    #[test]
    fn sizes_stay_within_bounds(
        start in start_strategy(),
        delta in delta_strategy(),
        direction in direction_strategy(),
        width in bounds_strategy(),
        height in bounds_strategy(),
        lock in any::<bool>(),
    ) {
        let constraints = Constraints {
            width,
            height,
            aspect_ratio: if lock { start.rect.aspect_ratio() } else { None },
        };
        let g = compute_geometry(&start, delta, direction, &constraints);
        if g.sized.width {
            prop_assert!(within(width, g.width), "width {} outside {:?}", g.width, width);
        }
        if g.sized.height {
            prop_assert!(within(height, g.height), "height {} outside {:?}", g.height, height);
        }
    }

    #[test]
    fn leading_edges_stay_anchored(
        start in start_strategy(),
        delta in delta_strategy(),
        direction in direction_strategy(),
        width in bounds_strategy(),
        height in bounds_strategy(),
    ) {
        let constraints = Constraints { width, height, aspect_ratio: start.rect.aspect_ratio() };
        let g = compute_geometry(&start, delta, direction, &constraints);
        if let Some(margin_left) = g.margin_left {
            let before = start.margins.left + start.rect.width;
            prop_assert!((margin_left + g.width - before).abs() < 1e-6);
        }
        if let Some(margin_top) = g.margin_top {
            let before = start.margins.top + start.rect.height;
            prop_assert!((margin_top + g.height - before).abs() < 1e-6);
        }
    }

    #[test]
    fn margins_only_for_leading_axes(
        start in start_strategy(),
        delta in delta_strategy(),
        direction in direction_strategy(),
    ) {
        let g = compute_geometry(&start, delta, direction, &Constraints::default());
        let (h, v) = direction.signs();
        prop_assert_eq!(g.margin_left.is_some(), h == -1);
        prop_assert_eq!(g.margin_top.is_some(), v == -1);
    }

    #[test]
    fn unresolved_axis_keeps_start_size(
        start in start_strategy(),
        delta in delta_strategy(),
        horizontal in any::<bool>(),
    ) {
        let direction = if horizontal { Direction::EAST } else { Direction::SOUTH };
        let g = compute_geometry(&start, delta, direction, &Constraints::default());
        if horizontal {
            prop_assert_eq!(g.height, start.rect.height);
            prop_assert!(!g.sized.height);
        } else {
            prop_assert_eq!(g.width, start.rect.width);
            prop_assert!(!g.sized.width);
        }
    }

    #[test]
    fn unclamped_lock_preserves_ratio(
        start in start_strategy(),
        dx in 0.0f64..300.0,
    ) {
        let ratio = start.rect.width / start.rect.height;
        let constraints = Constraints { aspect_ratio: Some(ratio), ..Constraints::default() };
        let g = compute_geometry(&start, Delta { x: dx, y: 0.0 }, Direction::EAST, &constraints);
        prop_assert!((g.width / g.height - ratio).abs() < 1e-9 * ratio.max(1.0));
    }

    #[test]
    fn token_round_trip(direction in direction_strategy()) {
        prop_assert_eq!(Direction::from_token(&direction.token()), Some(direction));
    }
}
