#![forbid(unsafe_code)]

//! Resize directions, compact direction tokens, and edge sets.
//!
//! A [`Direction`] selects which edges of an element follow the pointer.
//! Each axis is either unresolved (`None`) or grows from one side:
//!
//! - [`Grow::Leading`]: the left/top edge moves, so the element needs a
//!   margin shift to keep the opposite edge anchored.
//! - [`Grow::Trailing`]: the right/bottom edge moves, no compensation.
//!
//! Tokens are the compass shorthand used by handle maps and data attributes
//! (`"e"`, `"sw"`, `"n"`). Decoding looks for letters anywhere in the token,
//! so `"se"` and `"es"` are the same direction.

use bitflags::bitflags;

/// Which side of an axis grows during a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grow {
    /// Left or top edge moves (sign `-1`).
    Leading,
    /// Right or bottom edge moves (sign `1`).
    Trailing,
}

impl Grow {
    /// Signed representation: `-1` for leading, `1` for trailing.
    #[must_use]
    pub const fn sign(self) -> i8 {
        match self {
            Self::Leading => -1,
            Self::Trailing => 1,
        }
    }

    #[must_use]
    pub const fn is_leading(self) -> bool {
        matches!(self, Self::Leading)
    }
}

/// Signed horizontal/vertical axis selection.
///
/// A direction with neither axis set is never produced by resolution; it is
/// representable only so token encoding can report `"auto"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Direction {
    pub horizontal: Option<Grow>,
    pub vertical: Option<Grow>,
}

impl Direction {
    pub const EAST: Self = Self::new(Some(Grow::Trailing), None);
    pub const WEST: Self = Self::new(Some(Grow::Leading), None);
    pub const SOUTH: Self = Self::new(None, Some(Grow::Trailing));
    pub const NORTH: Self = Self::new(None, Some(Grow::Leading));

    #[must_use]
    pub const fn new(horizontal: Option<Grow>, vertical: Option<Grow>) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Build from the `-1/0/1` sign pair. Out-of-range values are treated by sign.
    #[must_use]
    pub fn from_signs(horizontal: i8, vertical: i8) -> Self {
        fn grow(sign: i8) -> Option<Grow> {
            match sign.signum() {
                -1 => Some(Grow::Leading),
                1 => Some(Grow::Trailing),
                _ => None,
            }
        }
        Self::new(grow(horizontal), grow(vertical))
    }

    /// `(horizontal, vertical)` as `-1/0/1`.
    #[must_use]
    pub fn signs(&self) -> (i8, i8) {
        (
            self.horizontal.map_or(0, Grow::sign),
            self.vertical.map_or(0, Grow::sign),
        )
    }

    /// True when at least one axis is resolved.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.horizontal.is_some() || self.vertical.is_some()
    }

    /// True when both axes are resolved (corner drag).
    #[must_use]
    pub const fn is_corner(&self) -> bool {
        self.horizontal.is_some() && self.vertical.is_some()
    }

    /// Decode a compass token. Returns `None` for empty or unrecognized tokens.
    ///
    /// `e` wins over `w` and `s` wins over `n` when both appear.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.to_ascii_lowercase();
        let horizontal = if token.contains('e') {
            Some(Grow::Trailing)
        } else if token.contains('w') {
            Some(Grow::Leading)
        } else {
            None
        };
        let vertical = if token.contains('s') {
            Some(Grow::Trailing)
        } else if token.contains('n') {
            Some(Grow::Leading)
        } else {
            None
        };
        let direction = Self::new(horizontal, vertical);
        direction.is_resolved().then_some(direction)
    }

    /// Encode as a compass token (vertical letter first), or `"auto"`.
    #[must_use]
    pub fn token(&self) -> String {
        let mut token = String::with_capacity(2);
        match self.vertical {
            Some(Grow::Leading) => token.push('n'),
            Some(Grow::Trailing) => token.push('s'),
            None => {}
        }
        match self.horizontal {
            Some(Grow::Leading) => token.push('w'),
            Some(Grow::Trailing) => token.push('e'),
            None => {}
        }
        if token.is_empty() {
            token.push_str("auto");
        }
        token
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.token())
    }
}

bitflags! {
    /// Element edges eligible for edge-proximity detection.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Edges: u8 {
        const TOP = 0b0001;
        const RIGHT = 0b0010;
        const BOTTOM = 0b0100;
        const LEFT = 0b1000;
    }
}

impl Default for Edges {
    fn default() -> Self {
        Self::all()
    }
}

impl Edges {
    /// Look up one edge by its lowercase name.
    #[must_use]
    pub fn from_edge_name(name: &str) -> Option<Self> {
        match name {
            "top" => Some(Self::TOP),
            "right" => Some(Self::RIGHT),
            "bottom" => Some(Self::BOTTOM),
            "left" => Some(Self::LEFT),
            _ => None,
        }
    }

    /// Collect edges from names, ignoring unknown or empty entries.
    pub fn from_names<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        names
            .into_iter()
            .filter_map(Self::from_edge_name)
            .fold(Self::empty(), |acc, edge| acc | edge)
    }

    /// Parse a whitespace- or comma-separated edge list (`"top, right"`).
    #[must_use]
    pub fn parse_list(list: &str) -> Self {
        Self::from_names(list.split(|c: char| c.is_whitespace() || c == ','))
    }
}
