#![forbid(unsafe_code)]

//! Geometric primitives.

/// A pointer location in client (viewport) pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset from `origin` to `self`.
    #[inline]
    pub fn delta_from(self, origin: Point) -> Delta {
        Delta {
            x: self.x - origin.x,
            y: self.y - origin.y,
        }
    }
}

/// Pointer displacement since the start of an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct Delta {
    pub x: f64,
    pub y: f64,
}

impl Delta {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

/// A layout box snapshot in client pixels.
///
/// Captured once at the start of an interaction and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Create a rectangle from its four edges.
    #[inline]
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// `width / height`, or `None` when the height is zero or the ratio is not finite.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0.0 {
            return None;
        }
        let ratio = self.width / self.height;
        ratio.is_finite().then_some(ratio)
    }
}

/// Leading-edge margins of an element at interaction start.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub left: f64,
    pub top: f64,
}

impl Margins {
    #[inline]
    pub const fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// Inclusive size bounds for one axis. `None` leaves that side unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl Bounds {
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    #[inline]
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Clamp `value` into the bounds.
    ///
    /// The minimum is checked first, so a minimum above the maximum wins.
    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        if let Some(min) = self.min
            && value < min
        {
            return min;
        }
        if let Some(max) = self.max
            && value > max
        {
            return max;
        }
        value
    }
}

/// Parse the leading decimal number of a CSS-ish value (`"12.5px"` → `12.5`).
///
/// Leading whitespace is skipped. Returns `None` when no number prefix exists.
pub fn parse_leading_float(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return trimmed
            .strip_prefix("Infinity")
            .or_else(|| trimmed.strip_prefix("+Infinity"))
            .map(|_| f64::INFINITY)
            .or_else(|| trimmed.strip_prefix("-Infinity").map(|_| f64::NEG_INFINITY));
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }
    trimmed[..end].parse().ok()
}
