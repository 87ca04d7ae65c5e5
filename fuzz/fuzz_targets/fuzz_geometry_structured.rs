#![no_main]

use arbitrary::Arbitrary;
use grip_core::{
    Bounds, Constraints, Delta, Direction, Margins, Rect, ResizeStart, compute_geometry,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct GeometryInput {
    width: u16,
    height: u16,
    margin_left: i16,
    margin_top: i16,
    dx: i32,
    dy: i32,
    horizontal: i8,
    vertical: i8,
    min_width: Option<u16>,
    max_width: Option<u16>,
    min_height: Option<u16>,
    max_height: Option<u16>,
    lock: bool,
}

fn bounds(min: Option<u16>, max: Option<u16>) -> Bounds {
    Bounds::new(min.map(f64::from), max.map(f64::from))
}

fn within(value: f64, bounds: Bounds) -> bool {
    // Inverted ranges snap to one of their ends.
    match (bounds.min, bounds.max) {
        (Some(min), Some(max)) if min > max => value == min || value == max,
        (min, max) => min.is_none_or(|m| value >= m) && max.is_none_or(|m| value <= m),
    }
}

fn anchored(margin: f64, size: f64, before: f64) -> bool {
    (margin + size - before).abs() <= 1e-6 * before.abs().max(1.0)
}

fuzz_target!(|input: GeometryInput| {
    let rect = Rect::new(0.0, 0.0, f64::from(input.width), f64::from(input.height));
    let start = ResizeStart {
        rect,
        margins: Margins::new(f64::from(input.margin_left), f64::from(input.margin_top)),
    };
    let direction = Direction::from_signs(input.horizontal.signum(), input.vertical.signum());
    let constraints = Constraints {
        width: bounds(input.min_width, input.max_width),
        height: bounds(input.min_height, input.max_height),
        aspect_ratio: if input.lock {
            rect.aspect_ratio().filter(|r| *r != 0.0)
        } else {
            None
        },
    };
    let delta = Delta {
        x: f64::from(input.dx),
        y: f64::from(input.dy),
    };

    let geometry = compute_geometry(&start, delta, direction, &constraints);

    if geometry.sized.width {
        assert!(within(geometry.width, constraints.width), "{input:?} -> {geometry:?}");
    } else {
        assert_eq!(geometry.width, rect.width);
    }
    if geometry.sized.height {
        assert!(within(geometry.height, constraints.height), "{input:?} -> {geometry:?}");
    } else {
        assert_eq!(geometry.height, rect.height);
    }
    if let Some(margin) = geometry.margin_left {
        assert!(
            anchored(margin, geometry.width, start.margins.left + rect.width),
            "{input:?} -> {geometry:?}"
        );
    }
    if let Some(margin) = geometry.margin_top {
        assert!(
            anchored(margin, geometry.height, start.margins.top + rect.height),
            "{input:?} -> {geometry:?}"
        );
    }
});
