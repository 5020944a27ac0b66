//! Element content and option types.
//!
//! Field names follow the camelCase spelling of the presentation API being
//! mimicked so that existing option objects deserialize as-is.

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use serde::Deserialize;

use crate::style::{Fill, FontOptions, LineProps};
use crate::units::Position;

/// One positioned element on a page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Text {
        text: TextContent,
        #[serde(default)]
        options: TextOptions,
    },
    Shape {
        shape: String,
        #[serde(default)]
        options: ShapeOptions,
    },
    Image {
        #[serde(default)]
        options: ImageOptions,
    },
    Table {
        rows: Vec<Vec<TableCell>>,
        #[serde(default)]
        options: TableOptions,
    },
}

impl Element {
    pub fn kind(&self) -> &'static str {
        match self {
            Element::Text { .. } => "text",
            Element::Shape { .. } => "shape",
            Element::Image { .. } => "image",
            Element::Table { .. } => "table",
        }
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// A single plain string or an ordered list of styled runs.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TextContent {
    Plain(String),
    Runs(Vec<TextRun>),
}

impl From<&str> for TextContent {
    fn from(s: &str) -> Self {
        TextContent::Plain(s.to_string())
    }
}

impl From<String> for TextContent {
    fn from(s: String) -> Self {
        TextContent::Plain(s)
    }
}

impl From<Vec<TextRun>> for TextContent {
    fn from(runs: Vec<TextRun>) -> Self {
        TextContent::Runs(runs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TextRun {
    pub text: String,
    #[serde(default)]
    pub options: RunOptions,
}

impl TextRun {
    pub fn new(text: impl Into<String>, options: RunOptions) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunOptions {
    #[serde(flatten)]
    pub font: FontOptions,
    /// Start a new line after this run.
    pub break_line: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextOptions {
    #[serde(flatten)]
    pub position: Position,
    #[serde(flatten)]
    pub font: FontOptions,
    pub align: Option<String>,
    pub valign: Option<String>,
    pub fill: Option<Fill>,
    pub line: Option<LineProps>,
    /// Inner padding in points.
    pub margin: Option<f64>,
    /// Line height in points.
    pub line_spacing: Option<f64>,
    /// Clockwise rotation in degrees.
    pub rotate: Option<f64>,
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeOptions {
    #[serde(flatten)]
    pub position: Position,
    pub fill: Option<Fill>,
    pub line: Option<LineProps>,
    /// Corner radius of `roundRect`, in inches.
    pub rect_radius: Option<f64>,
    pub rotate: Option<f64>,
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageOptions {
    #[serde(flatten)]
    pub position: Position,
    /// URL or file path.
    pub path: Option<String>,
    /// Inline data, `image/png;base64,...` with or without `data:`.
    /// Wins over `path` when both are set.
    pub data: Option<String>,
    pub alt_text: Option<String>,
    /// Clip to an ellipse.
    pub rounding: Option<bool>,
    pub rotate: Option<f64>,
}

impl ImageOptions {
    pub fn from_path(path: impl Into<String>, position: Position) -> Self {
        Self {
            position,
            path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Embed raw image bytes as base64 inline data.
    pub fn from_bytes(mime: &str, bytes: &[u8], position: Position) -> Self {
        Self {
            position,
            data: Some(format!("{mime};base64,{}", BASE64_STD.encode(bytes))),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    #[serde(flatten)]
    pub position: Position,
    #[serde(flatten)]
    pub font: FontOptions,
    pub fill: Option<Fill>,
    pub align: Option<String>,
    pub valign: Option<String>,
    /// Cell borders.
    pub border: Option<LineProps>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CellOptions {
    #[serde(flatten)]
    pub font: FontOptions,
    pub fill: Option<Fill>,
    pub align: Option<String>,
    pub valign: Option<String>,
    pub colspan: Option<u32>,
    pub rowspan: Option<u32>,
}

/// A table cell: a bare value, or `{ text, options }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TableCell {
    Styled {
        #[serde(default)]
        text: CellValue,
        #[serde(default)]
        options: Option<CellOptions>,
    },
    Bare(CellValue),
}

impl TableCell {
    pub fn styled(text: impl Into<CellValue>, options: CellOptions) -> Self {
        TableCell::Styled {
            text: text.into(),
            options: Some(options),
        }
    }

    pub fn value(&self) -> &CellValue {
        match self {
            TableCell::Styled { text, .. } | TableCell::Bare(text) => text,
        }
    }

    pub fn options(&self) -> Option<&CellOptions> {
        match self {
            TableCell::Styled { options, .. } => options.as_ref(),
            TableCell::Bare(_) => None,
        }
    }

    /// Columns this cell occupies.
    pub fn span(&self) -> usize {
        self.options()
            .and_then(|o| o.colspan)
            .map_or(1, |n| n.max(1) as usize)
    }

    /// Rows this cell occupies, counting its own.
    pub fn row_span(&self) -> usize {
        self.options()
            .and_then(|o| o.rowspan)
            .map_or(1, |n| n.max(1) as usize)
    }
}

impl From<&str> for TableCell {
    fn from(s: &str) -> Self {
        TableCell::Bare(s.into())
    }
}

impl From<String> for TableCell {
    fn from(s: String) -> Self {
        TableCell::Bare(s.into())
    }
}

impl From<f64> for TableCell {
    fn from(n: f64) -> Self {
        TableCell::Bare(n.into())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Text(String::new())
    }
}

impl CellValue {
    /// The text the cell displays.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}
