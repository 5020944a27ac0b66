//! Page sizes – physical page dimensions in inches, the common presets, and
//! the named presentation layouts.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::units::{inches_to_px, PixelFrame};

/// Page orientation; swaps the effective width/height of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrientation {
    /// Width > height (default for slides).
    #[default]
    Landscape,
    /// Height > width.
    Portrait,
}

/// Physical page size. Immutable once built; replace it on the document
/// instead of editing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PageSizeRepr")]
pub struct PageSize {
    #[serde(rename = "width")]
    width_in: f64,
    #[serde(rename = "height")]
    height_in: f64,
    name: String,
}

impl PageSize {
    /// Both sides must be finite and strictly positive.
    pub fn new(name: impl Into<String>, width_in: f64, height_in: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width_in) || !valid(height_in) {
            return Err(Error::InvalidPageSize {
                width: width_in,
                height: height_in,
            });
        }
        Ok(Self {
            width_in,
            height_in,
            name: name.into(),
        })
    }

    pub fn width_in(&self) -> f64 {
        self.width_in
    }

    pub fn height_in(&self) -> f64 {
        self.height_in
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width_px(&self) -> f64 {
        inches_to_px(self.width_in)
    }

    pub fn height_px(&self) -> f64 {
        inches_to_px(self.height_in)
    }

    pub fn frame(&self) -> PixelFrame {
        PixelFrame {
            width_px: self.width_px(),
            height_px: self.height_px(),
        }
    }

    /// Look up one of the named presentation layouts (`LAYOUT_16x9`, ...).
    pub fn from_layout_name(name: &str) -> Result<Self> {
        let size = match name {
            "LAYOUT_16x9" => StandardSize::Screen16x9.landscape(),
            "LAYOUT_16x10" => StandardSize::Screen16x10.landscape(),
            "LAYOUT_4x3" => StandardSize::Screen4x3.landscape(),
            "LAYOUT_WIDE" => Self {
                width_in: 13.333,
                height_in: 7.5,
                name: "LAYOUT_WIDE".to_string(),
            },
            _ => return Err(Error::UnknownLayout(name.to_string())),
        };
        Ok(size)
    }
}

#[derive(Deserialize)]
struct PageSizeRepr {
    #[serde(default)]
    name: String,
    width: f64,
    height: f64,
}

impl TryFrom<PageSizeRepr> for PageSize {
    type Error = Error;

    fn try_from(repr: PageSizeRepr) -> Result<Self> {
        PageSize::new(repr.name, repr.width, repr.height)
    }
}

impl Default for PageSize {
    /// 16:9 landscape, 10in × 5.625in.
    fn default() -> Self {
        StandardSize::Screen16x9.landscape()
    }
}

/// Common page sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StandardSize {
    Screen4x3,
    Screen16x9,
    Screen16x10,
    Letter,
    Legal,
    A4,
    A3,
    Tabloid,
}

impl StandardSize {
    pub const ALL: [StandardSize; 8] = [
        StandardSize::Screen4x3,
        StandardSize::Screen16x9,
        StandardSize::Screen16x10,
        StandardSize::Letter,
        StandardSize::Legal,
        StandardSize::A4,
        StandardSize::A3,
        StandardSize::Tabloid,
    ];

    /// (short side, long side) in inches.
    fn sides(self) -> (f64, f64) {
        match self {
            StandardSize::Screen4x3 => (7.5, 10.0),
            StandardSize::Screen16x9 => (5.625, 10.0),
            StandardSize::Screen16x10 => (6.25, 10.0),
            StandardSize::Letter => (8.5, 11.0),
            StandardSize::Legal => (8.5, 14.0),
            StandardSize::A4 => (8.27, 11.69),
            StandardSize::A3 => (11.69, 16.54),
            StandardSize::Tabloid => (11.0, 17.0),
        }
    }

    fn label(self) -> &'static str {
        match self {
            StandardSize::Screen4x3 => "Screen 4:3",
            StandardSize::Screen16x9 => "Screen 16:9",
            StandardSize::Screen16x10 => "Screen 16:10",
            StandardSize::Letter => "Letter",
            StandardSize::Legal => "Legal",
            StandardSize::A4 => "A4",
            StandardSize::A3 => "A3",
            StandardSize::Tabloid => "Tabloid",
        }
    }

    pub fn with_orientation(self, orientation: PageOrientation) -> PageSize {
        let (short, long) = self.sides();
        let (width_in, height_in, suffix) = match orientation {
            PageOrientation::Landscape => (long, short, "Landscape"),
            PageOrientation::Portrait => (short, long, "Portrait"),
        };
        PageSize {
            width_in,
            height_in,
            name: format!("{} {}", self.label(), suffix),
        }
    }

    pub fn landscape(self) -> PageSize {
        self.with_orientation(PageOrientation::Landscape)
    }

    pub fn portrait(self) -> PageSize {
        self.with_orientation(PageOrientation::Portrait)
    }
}
