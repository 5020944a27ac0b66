//! Style mapper – maps the presentation vocabulary (alignment keywords,
//! colour strings, fill and line descriptors, font switches) to CSS values.
//!
//! Every function here is total. Input that is not recognised falls back to
//! a safe default; the element builders decide whether to record a warning.

use serde::Deserialize;

use crate::dom::ElementNode;
use crate::units::{points_to_px, px};

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

/// Normalise a colour to something a browser accepts.
///
/// `#rrggbb`, `rgb(...)`-style functions and colour names pass through;
/// bare hex digits (`"FF0000"`, the presentation convention) gain a `#`;
/// anything else is assumed to be hex missing its marker.
pub fn color_to_css(color: &str) -> String {
    let c = color.trim();
    if c.is_empty() {
        return "transparent".to_string();
    }
    if c.starts_with('#') || is_function_color(c) {
        return c.to_string();
    }
    if is_hex_triplet(c) {
        return format!("#{c}");
    }
    if c.chars().all(|ch| ch.is_ascii_alphabetic()) {
        return c.to_string();
    }
    format!("#{c}")
}

/// Whether [`color_to_css`] will produce a valid CSS colour for `color`.
pub fn is_recognized_color(color: &str) -> bool {
    let c = color.trim();
    match c.strip_prefix('#') {
        Some(hex) => is_hex_triplet(hex),
        None => {
            is_function_color(c)
                || is_hex_triplet(c)
                || (!c.is_empty() && c.chars().all(|ch| ch.is_ascii_alphabetic()))
        }
    }
}

/// 3, 4, 6 or 8 hex digits.
fn is_hex_triplet(s: &str) -> bool {
    matches!(s.len(), 3 | 4 | 6 | 8) && s.chars().all(|ch| ch.is_ascii_hexdigit())
}

/// `rgb(...)`, `hsla(...)` and friends.
fn is_function_color(s: &str) -> bool {
    match s.split_once('(') {
        Some((name, rest)) => {
            !name.is_empty()
                && name.chars().all(|ch| ch.is_ascii_alphabetic())
                && rest.ends_with(')')
        }
        None => false,
    }
}

/// 8-bit RGB colour parsed from hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            6 => Some(Self {
                r: channel(&hex[0..2])?,
                g: channel(&hex[2..4])?,
                b: channel(&hex[4..6])?,
            }),
            3 => Some(Self {
                r: channel(&hex[0..1].repeat(2))?,
                g: channel(&hex[1..2].repeat(2))?,
                b: channel(&hex[2..3].repeat(2))?,
            }),
            _ => None,
        }
    }

    pub fn to_rgba(self, alpha: f64) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }
}

// ---------------------------------------------------------------------------
// Alignment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl HorizontalAlign {
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Some(Self::Left),
            "center" | "ctr" => Some(Self::Center),
            "right" | "r" => Some(Self::Right),
            "justify" | "just" => Some(Self::Justify),
            _ => None,
        }
    }

    /// Unrecognised or absent keywords map to `Left`.
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        keyword.and_then(Self::parse).unwrap_or_default()
    }

    /// `text-align` value.
    pub fn css(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

impl VerticalAlign {
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "top" | "t" => Some(Self::Top),
            "middle" | "center" | "ctr" => Some(Self::Middle),
            "bottom" | "b" => Some(Self::Bottom),
            _ => None,
        }
    }

    /// Unrecognised or absent keywords map to `Top`.
    pub fn from_keyword(keyword: Option<&str>) -> Self {
        keyword.and_then(Self::parse).unwrap_or_default()
    }

    /// `align-items` value for a flex container.
    pub fn flex(self) -> &'static str {
        match self {
            Self::Top => "flex-start",
            Self::Middle => "center",
            Self::Bottom => "flex-end",
        }
    }

    /// `vertical-align` value for a table cell.
    pub fn cell(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Middle => "middle",
            Self::Bottom => "bottom",
        }
    }
}

// ---------------------------------------------------------------------------
// Fill and line descriptors
// ---------------------------------------------------------------------------

/// A background fill: either a bare colour or `{ color, transparency }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Fill {
    Color(String),
    Props(FillProps),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FillProps {
    #[serde(default)]
    pub color: Option<String>,
    /// 0 (opaque) to 100 (invisible).
    #[serde(default)]
    pub transparency: Option<f64>,
}

impl Fill {
    pub fn solid(color: impl Into<String>) -> Self {
        Fill::Color(color.into())
    }

    pub fn color(&self) -> Option<&str> {
        match self {
            Fill::Color(c) => Some(c),
            Fill::Props(p) => p.color.as_deref(),
        }
    }

    /// The `background-color` value, or `None` for a fill with no colour.
    pub fn css(&self) -> Option<String> {
        let color = self.color()?;
        let transparency = match self {
            Fill::Props(FillProps {
                transparency: Some(t),
                ..
            }) => *t,
            _ => 0.0,
        };
        if transparency > 0.0 {
            let alpha = (1.0 - transparency / 100.0).clamp(0.0, 1.0);
            if let Some(rgb) = Rgb::from_hex(color) {
                return Some(rgb.to_rgba(alpha));
            }
        }
        Some(color_to_css(color))
    }
}

/// Outline descriptor. Width is accepted for compatibility, but borders are
/// always drawn 1px wide.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineProps {
    pub color: Option<String>,
    pub width: Option<f64>,
    pub dash_type: Option<String>,
}

impl LineProps {
    pub fn colored(color: impl Into<String>) -> Self {
        Self {
            color: Some(color.into()),
            ..Self::default()
        }
    }

    pub fn border_style(&self) -> &'static str {
        match self.dash_type.as_deref() {
            Some("dash" | "lgDash" | "dashDot" | "lgDashDot" | "lgDashDotDot" | "sysDash") => {
                "dashed"
            }
            Some("sysDot") => "dotted",
            _ => "solid",
        }
    }

    /// `border` shorthand value.
    pub fn css(&self) -> String {
        let color = self
            .color
            .as_deref()
            .map_or_else(|| "#000000".to_string(), color_to_css);
        format!("1px {} {}", self.border_style(), color)
    }
}

// ---------------------------------------------------------------------------
// Typography
// ---------------------------------------------------------------------------

/// Font switches shared by text containers, text runs and table cells.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontOptions {
    pub color: Option<String>,
    /// Points.
    pub font_size: Option<f64>,
    pub font_face: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strike: Option<bool>,
}

impl FontOptions {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Write the font declarations onto `node`. Colour goes through
    /// [`color_to_css`]; size is converted from points.
    pub fn apply(&self, node: &mut ElementNode) {
        if let Some(color) = &self.color {
            node.set_style("color", color_to_css(color));
        }
        if let Some(size) = self.font_size {
            node.set_style("font-size", px(points_to_px(size)));
        }
        if let Some(face) = &self.font_face {
            node.set_style("font-family", face.as_str());
        }
        if let Some(bold) = self.bold {
            node.set_style("font-weight", if bold { "bold" } else { "normal" });
        }
        if let Some(italic) = self.italic {
            node.set_style("font-style", if italic { "italic" } else { "normal" });
        }
        if let Some(decoration) = self.decoration() {
            node.set_style("text-decoration", decoration);
        }
    }

    fn decoration(&self) -> Option<&'static str> {
        match (self.underline, self.strike) {
            (None, None) => None,
            (underline, strike) => Some(match (underline == Some(true), strike == Some(true)) {
                (true, true) => "underline line-through",
                (true, false) => "underline",
                (false, true) => "line-through",
                (false, false) => "none",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tag;

    #[test]
    fn colors_normalise() {
        assert_eq!(color_to_css("#0066CC"), "#0066CC");
        assert_eq!(color_to_css("363636"), "#363636");
        assert_eq!(color_to_css("FFFFFF"), "#FFFFFF");
        assert_eq!(color_to_css("white"), "white");
        assert_eq!(color_to_css("rgb(10, 20, 30)"), "rgb(10, 20, 30)");
        assert_eq!(color_to_css("hsla(0, 0%, 0%, 0.5)"), "hsla(0, 0%, 0%, 0.5)");
        assert_eq!(color_to_css(""), "transparent");
        assert_eq!(color_to_css("12345"), "#12345");
    }

    #[test]
    fn recognised_colors() {
        assert!(is_recognized_color("#fff"));
        assert!(is_recognized_color("4472C4"));
        assert!(is_recognized_color("navy"));
        assert!(is_recognized_color("rgba(0,0,0,0.2)"));
        assert!(!is_recognized_color("#GGG"));
        assert!(!is_recognized_color("12345"));
        assert!(!is_recognized_color("blue!"));
    }

    #[test]
    fn rgb_from_hex() {
        let c = Rgb::from_hex("#ff8800").unwrap();
        assert_eq!(c, Rgb { r: 255, g: 136, b: 0 });
        assert_eq!(Rgb::from_hex("abc").unwrap(), Rgb { r: 0xaa, g: 0xbb, b: 0xcc });
        assert_eq!(Rgb::from_hex("navy"), None);
    }

    #[test]
    fn rgb_from_hex_rejects_non_ascii() {
        assert_eq!(Rgb::from_hex("éa"), None);
        assert_eq!(Rgb::from_hex("aééb"), None);
        assert_eq!(Rgb::from_hex("#ééé"), None);

        let fill = Fill::Props(FillProps {
            color: Some("aééb".to_string()),
            transparency: Some(50.0),
        });
        assert_eq!(fill.css().as_deref(), Some("#aééb"));
    }

    #[test]
    fn alignment_defaults() {
        assert_eq!(HorizontalAlign::from_keyword(Some("CENTER")), HorizontalAlign::Center);
        assert_eq!(HorizontalAlign::from_keyword(Some("sideways")), HorizontalAlign::Left);
        assert_eq!(HorizontalAlign::from_keyword(None).css(), "left");
        assert_eq!(VerticalAlign::from_keyword(Some("middle")).flex(), "center");
        assert_eq!(VerticalAlign::from_keyword(Some("bottom")).cell(), "bottom");
        assert_eq!(VerticalAlign::from_keyword(Some("diagonal")), VerticalAlign::Top);
    }

    #[test]
    fn fill_variants() {
        let bare: Fill = serde_json::from_str("\"#4472C4\"").unwrap();
        assert_eq!(bare.css().as_deref(), Some("#4472C4"));

        let props: Fill = serde_json::from_str(r#"{"color":"336699"}"#).unwrap();
        assert_eq!(props.css().as_deref(), Some("#336699"));

        let faded: Fill =
            serde_json::from_str(r#"{"color":"000000","transparency":75}"#).unwrap();
        assert_eq!(faded.css().as_deref(), Some("rgba(0, 0, 0, 0.25)"));

        assert_eq!(Fill::Props(FillProps::default()).css(), None);
    }

    #[test]
    fn line_is_always_one_pixel() {
        let line = LineProps {
            color: Some("FF0000".to_string()),
            width: Some(6.0),
            dash_type: Some("dash".to_string()),
        };
        assert_eq!(line.css(), "1px dashed #FF0000");
        assert_eq!(LineProps::default().css(), "1px solid #000000");
    }

    #[test]
    fn font_options_apply() {
        let mut span = ElementNode::new(Tag::Span);
        FontOptions {
            color: Some("0066CC".to_string()),
            font_size: Some(18.0),
            font_face: Some("Georgia".to_string()),
            bold: Some(true),
            italic: None,
            underline: Some(true),
            strike: Some(true),
        }
        .apply(&mut span);
        assert_eq!(
            span.style_text(),
            "color: #0066CC; font-size: 24px; font-family: Georgia; font-weight: bold; \
             text-decoration: underline line-through;"
        );
    }
}
