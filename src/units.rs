//! Unit conversion – every inch, point and percentage the author supplies is
//! turned into CSS pixels here and nowhere else.
//!
//! 1 in = 96 px and 1 pt = 96/72 px. Values are never rounded; the browser
//! decides how to snap them when it rasterises.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::Error;

/// CSS reference pixels per inch.
pub const PX_PER_INCH: f64 = 96.0;
/// Typographic points per inch.
pub const POINTS_PER_INCH: f64 = 72.0;

pub fn inches_to_px(inches: f64) -> f64 {
    inches * PX_PER_INCH
}

pub fn points_to_px(points: f64) -> f64 {
    points * PX_PER_INCH / POINTS_PER_INCH
}

/// `pct` percent of `container_px`.
pub fn percentage_to_px(pct: f64, container_px: f64) -> f64 {
    (pct / 100.0) * container_px
}

/// A position or size as the author wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "DimensionRepr")]
pub enum Dimension {
    Inches(f64),
    /// Percent of the page: width for `x`/`w`, height for `y`/`h`.
    Percent(f64),
}

impl Dimension {
    pub fn percent(value: f64) -> Self {
        Dimension::Percent(value)
    }

    /// Resolve against the page extent along this dimension's axis.
    pub fn to_px(self, container_px: f64) -> f64 {
        match self {
            Dimension::Inches(inches) => inches_to_px(inches),
            Dimension::Percent(pct) => percentage_to_px(pct, container_px),
        }
    }
}

/// Unset values resolve to 0 so the renderer's normal flow applies.
pub fn resolve_dimension(value: Option<Dimension>, container_px: f64) -> f64 {
    value.map_or(0.0, |d| d.to_px(container_px))
}

impl From<f64> for Dimension {
    fn from(inches: f64) -> Self {
        Dimension::Inches(inches)
    }
}

impl From<i32> for Dimension {
    fn from(inches: i32) -> Self {
        Dimension::Inches(f64::from(inches))
    }
}

impl FromStr for Dimension {
    type Err = Error;

    /// Accepts `"50%"`, `"1.25"` and `"1.25in"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidDimension(s.to_string());

        let (number, percent) = match trimmed.strip_suffix('%') {
            Some(rest) => (rest.trim_end(), true),
            None => (trimmed.strip_suffix("in").unwrap_or(trimmed).trim_end(), false),
        };
        let value: f64 = number.parse().map_err(|_| invalid())?;
        if !value.is_finite() {
            return Err(invalid());
        }
        Ok(if percent {
            Dimension::Percent(value)
        } else {
            Dimension::Inches(value)
        })
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Inches(v) => write!(f, "{v}in"),
            Dimension::Percent(v) => write!(f, "{v}%"),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DimensionRepr {
    Number(f64),
    Text(String),
}

impl TryFrom<DimensionRepr> for Dimension {
    type Error = Error;

    fn try_from(repr: DimensionRepr) -> Result<Self, Self::Error> {
        match repr {
            DimensionRepr::Number(v) if v.is_finite() => Ok(Dimension::Inches(v)),
            DimensionRepr::Number(v) => Err(Error::InvalidDimension(v.to_string())),
            DimensionRepr::Text(s) => s.parse(),
        }
    }
}

/// Pixel extent of one page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelFrame {
    pub width_px: f64,
    pub height_px: f64,
}

/// Author-facing placement shared by every element kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: Option<Dimension>,
    #[serde(default)]
    pub y: Option<Dimension>,
    #[serde(default)]
    pub w: Option<Dimension>,
    #[serde(default)]
    pub h: Option<Dimension>,
}

impl Position {
    pub fn at(x: impl Into<Dimension>, y: impl Into<Dimension>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
            w: None,
            h: None,
        }
    }

    pub fn sized(mut self, w: impl Into<Dimension>, h: impl Into<Dimension>) -> Self {
        self.w = Some(w.into());
        self.h = Some(h.into());
        self
    }

    /// Resolve into pixel space against the page frame.
    pub fn resolve(&self, frame: PixelFrame) -> Placement {
        Placement {
            x: resolve_dimension(self.x, frame.width_px),
            y: resolve_dimension(self.y, frame.height_px),
            width: self.w.map(|w| w.to_px(frame.width_px)),
            height: self.h.map(|h| h.to_px(frame.height_px)),
        }
    }
}

/// A resolved placement in pixels. Extents stay `None` when the author left
/// them out, so the element sizes to its content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Format a pixel length for a CSS declaration (`96` → `"96px"`).
pub fn px(value: f64) -> String {
    format!("{value}px")
}
