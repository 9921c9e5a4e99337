//! Geometry primitives
//!
//! Page-space coordinates in CSS pixels with the origin at the top-left of the
//! document. The viewport is just another [`Rect`] that moves as the page
//! scrolls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        origin: Point::ZERO,
        size: Size::ZERO,
    };

    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> f32 {
        self.origin.x
    }

    pub fn y(&self) -> f32 {
        self.origin.y
    }

    pub fn width(&self) -> f32 {
        self.size.width
    }

    pub fn height(&self) -> f32 {
        self.size.height
    }

    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn area(&self) -> f32 {
        self.size.area()
    }

    /// Offset the rect by a delta
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Rect::new(self.origin.x + dx, self.origin.y + dy, self.width(), self.height())
    }

    /// Grow (positive insets) or shrink (negative insets) each edge outward
    ///
    /// Width and height never go below zero.
    pub fn outset(&self, insets: Insets) -> Self {
        let x = self.origin.x - insets.left;
        let y = self.origin.y - insets.top;
        let width = (self.size.width + insets.left + insets.right).max(0.0);
        let height = (self.size.height + insets.top + insets.bottom).max(0.0);
        Rect::new(x, y, width, height)
    }

    /// Overlapping region of two rects
    ///
    /// Edge-adjacent rects produce a zero-area intersection rather than
    /// `None`, so an element sitting exactly on the viewport edge still
    /// intersects it.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x().max(other.x());
        let top = self.y().max(other.y());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right < left || bottom < top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.right()
            && point.y >= self.origin.y
            && point.y <= self.bottom()
    }
}

/// Per-edge offsets in pixels, in CSS order (top, right, bottom, left)
///
/// Parses the CSS margin shorthand: `"0px 0px -50px 0px"`, `"10px 20px"`,
/// `"-100px"`. Bare `0` is accepted without a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    pub const ZERO: Insets = Insets {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Only the bottom edge set
    pub const fn bottom(bottom: f32) -> Self {
        Self::new(0.0, 0.0, bottom, 0.0)
    }

    pub fn is_finite(&self) -> bool {
        self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
            && self.left.is_finite()
    }
}

/// Error returned when an inset shorthand cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseInsetsError(pub String);

impl fmt::Display for ParseInsetsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid inset shorthand: {}", self.0)
    }
}

impl std::error::Error for ParseInsetsError {}

fn parse_px(token: &str) -> Result<f32, ParseInsetsError> {
    let number = match token.strip_suffix("px") {
        Some(n) => n,
        None if token.parse::<f32>().ok() == Some(0.0) => token,
        None => return Err(ParseInsetsError(format!("`{token}` must be in px"))),
    };
    let value: f32 = number
        .parse()
        .map_err(|_| ParseInsetsError(format!("`{token}` is not a number")))?;
    if !value.is_finite() {
        return Err(ParseInsetsError(format!("`{token}` is not finite")));
    }
    Ok(value)
}

impl FromStr for Insets {
    type Err = ParseInsetsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split_whitespace()
            .map(parse_px)
            .collect::<Result<Vec<_>, _>>()?;

        match values.as_slice() {
            [all] => Ok(Insets::new(*all, *all, *all, *all)),
            [v, h] => Ok(Insets::new(*v, *h, *v, *h)),
            [t, h, b] => Ok(Insets::new(*t, *h, *b, *h)),
            [t, r, b, l] => Ok(Insets::new(*t, *r, *b, *l)),
            _ => Err(ParseInsetsError(format!(
                "expected 1 to 4 values, got {}",
                values.len()
            ))),
        }
    }
}

impl TryFrom<String> for Insets {
    type Error = ParseInsetsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Insets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

impl From<Insets> for String {
    fn from(insets: Insets) -> Self {
        insets.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_css_shorthand() {
        let four: Insets = "0px 0px -50px 0px".parse().unwrap();
        assert_eq!(four, Insets::bottom(-50.0));

        let one: Insets = "-100px".parse().unwrap();
        assert_eq!(one, Insets::new(-100.0, -100.0, -100.0, -100.0));

        let two: Insets = "10px 0".parse().unwrap();
        assert_eq!(two, Insets::new(10.0, 0.0, 10.0, 0.0));

        let three: Insets = "1px 2px 3px".parse().unwrap();
        assert_eq!(three, Insets::new(1.0, 2.0, 3.0, 2.0));
    }

    #[test]
    fn test_parse_rejects_bad_units() {
        assert!("10%".parse::<Insets>().is_err());
        assert!("5".parse::<Insets>().is_err());
        assert!("".parse::<Insets>().is_err());
        assert!("1px 2px 3px 4px 5px".parse::<Insets>().is_err());
        assert!("NaNpx".parse::<Insets>().is_err());
    }

    #[test]
    fn test_outset_shrinks_bottom_edge() {
        let viewport = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let root = viewport.outset(Insets::bottom(-50.0));
        assert_eq!(root.bottom(), 750.0);
        assert_eq!(root.y(), 0.0);
        assert_eq!(root.width(), 1000.0);
    }

    #[test]
    fn test_intersection() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        let overlap = a.intersection(&b).unwrap();
        assert_eq!(overlap, Rect::new(50.0, 50.0, 50.0, 50.0));

        let far = Rect::new(200.0, 200.0, 10.0, 10.0);
        assert!(a.intersection(&far).is_none());

        // Touching edges count as a zero-area intersection
        let touching = Rect::new(0.0, 100.0, 100.0, 10.0);
        assert_eq!(a.intersection(&touching).unwrap().area(), 0.0);
    }
}
