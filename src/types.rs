//! Small value types shared across the grading pipeline.

use std::fmt;

/// Geometric tolerances used throughout grading.
///
/// These values are empirically tuned against mouse-drawn input and the
/// rubric corpus. Do not "clean them up": criteria documents were authored
/// against exactly these numbers.
pub mod tolerances {
    /// Two raw intersection points closer than this (per axis) collapse
    /// into one multi-line vertex.
    pub const VERTEX_MERGE: f64 = 15.0;
    /// How far outside a segment's bounding box an intersection may fall
    /// and still count as being on the segment.
    pub const SEGMENT_SLACK: f64 = 15.0;
    /// Euclidean radius for matching a line endpoint to a vertex.
    pub const ENDPOINT_RADIUS: f64 = 10.0;
    /// Max directional angle difference (radians, ~15 degrees) for two
    /// segments to count as same-slope.
    pub const ANGLE_DELTA: f64 = 0.261799;
    /// Max raw slope difference for two segments to count as same-slope.
    pub const SLOPE_DELTA: f64 = 0.3;
    /// Above this |slope| both segments count as "very steep, same slope".
    pub const BOTH_STEEP: f64 = 40.0;
    /// |slope| at or above this is "steep".
    pub const STEEP_MIN: f64 = 2.0;
    /// |slope| at or below this is "shallow".
    pub const SHALLOW_MAX: f64 = 0.5;
    /// |slope| at or above this passes a "vertical" criterion.
    pub const VERTICAL_MIN: f64 = 20.0;
    /// |slope| at or below this passes a "horizontal" criterion.
    pub const HORIZONTAL_MAX: f64 = 0.05;
    /// An area must cover strictly more than this percentage of its
    /// target polygon to count as filled.
    pub const COVERAGE_MIN_PERCENT: f64 = 40.0;
    /// An area must leak strictly fewer than this many fill-colored
    /// pixels outside its target polygon to count as contained.
    pub const LEAKAGE_MAX_PIXELS: u32 = 8000;
}

/// One graded criterion: a display name, a verdict, and feedback text
/// (empty on pass).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Score {
    pub name: String,
    pub passed: bool,
    pub feedback: String,
}

impl Score {
    /// A passing score with empty feedback.
    pub fn pass(name: impl Into<String>) -> Score {
        Score {
            name: name.into(),
            passed: true,
            feedback: String::new(),
        }
    }

    /// A failing score with feedback for the student.
    pub fn fail(name: impl Into<String>, feedback: impl Into<String>) -> Score {
        Score {
            name: name.into(),
            passed: false,
            feedback: feedback.into(),
        }
    }
}

/// An opaque RGB color. Area fill matching is an exact equality test, so
/// no color space math is needed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }

    /// Parse a hex color: `"#rrggbb"` or the shorthand `"#rgb"`, with or
    /// without the leading `#`.
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let expanded;
        let hex = if hex.len() == 3 {
            expanded = hex.chars().flat_map(|c| [c, c]).collect::<String>();
            expanded.as_str()
        } else {
            hex
        };
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb { r, g, b })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The slope of a drawn segment, in mathematical convention.
///
/// Vertical segments carry `f64::INFINITY`. Because canvas Y grows
/// downward, the deriver negates the screen-space rise; rubric data was
/// authored against that convention, so it must not be "corrected" here.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Slope(f64);

impl Slope {
    pub const VERTICAL: Slope = Slope(f64::INFINITY);

    pub fn finite(value: f64) -> Slope {
        Slope(value)
    }

    pub fn is_vertical(self) -> bool {
        self.0 == f64::INFINITY
    }

    pub fn abs(self) -> f64 {
        self.0.abs()
    }

    pub fn raw(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_from_hex_six_digits() {
        assert_eq!(Rgb::from_hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("ff8000"), Some(Rgb::new(255, 128, 0)));
    }

    #[test]
    fn rgb_from_hex_shorthand() {
        assert_eq!(Rgb::from_hex("#f80"), Some(Rgb::new(255, 136, 0)));
    }

    #[test]
    fn rgb_from_hex_rejects_garbage() {
        assert_eq!(Rgb::from_hex("#ggg"), None);
        assert_eq!(Rgb::from_hex("#ffff"), None);
        assert_eq!(Rgb::from_hex(""), None);
    }

    #[test]
    fn rgb_display_roundtrips() {
        let c = Rgb::new(18, 52, 86);
        assert_eq!(Rgb::from_hex(&c.to_string()), Some(c));
    }

    #[test]
    fn score_constructors() {
        let p = Score::pass("x-axis name");
        assert!(p.passed);
        assert!(p.feedback.is_empty());

        let f = Score::fail("x-axis name", "Incorrect name for the x-axis!");
        assert!(!f.passed);
        assert_eq!(f.feedback, "Incorrect name for the x-axis!");
    }

    #[test]
    fn slope_vertical() {
        assert!(Slope::VERTICAL.is_vertical());
        assert!(!Slope::finite(-3.0).is_vertical());
        assert_eq!(Slope::finite(-3.0).abs(), 3.0);
    }
}
