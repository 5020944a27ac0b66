//! Element builders – one function per element kind, each turning content
//! and options into a styled node subtree.
//!
//! Geometry is always resolved first (through [`Position::resolve`]) and
//! appearance second, so the two never interfere.

use crate::dom::{ElementNode, Tag};
use crate::options::{
    CellOptions, Element, ImageOptions, ShapeOptions, TableCell, TableOptions, TextContent,
    TextOptions,
};
use crate::pagination::classes;
use crate::style::{
    color_to_css, is_recognized_color, Fill, FontOptions, HorizontalAlign, VerticalAlign,
};
use crate::units::{inches_to_px, points_to_px, px, PixelFrame, Position};
use crate::warning::{Warning, WarningKind};

/// Everything a builder may read or report while building one element.
pub struct BuildContext<'a> {
    /// Pixel size of the page the element lands on.
    pub frame: PixelFrame,
    pub page: usize,
    pub warnings: &'a mut Vec<Warning>,
}

impl BuildContext<'_> {
    fn warn(&mut self, kind: WarningKind, message: String) {
        self.warnings.push(Warning::new(Some(self.page), kind, message));
    }

    fn color(&mut self, color: &str) -> String {
        if !is_recognized_color(color) {
            self.warn(
                WarningKind::UnrecognizedColor,
                format!("unrecognized color {color:?}, using {:?}", color_to_css(color)),
            );
        }
        color_to_css(color)
    }

    fn fill(&mut self, fill: &Fill) -> Option<String> {
        if let Some(color) = fill.color() {
            if !is_recognized_color(color) {
                self.warn(
                    WarningKind::UnrecognizedColor,
                    format!("unrecognized fill color {color:?}"),
                );
            }
        }
        fill.css()
    }

    fn h_align(&mut self, keyword: Option<&str>) -> HorizontalAlign {
        if let Some(k) = keyword {
            if HorizontalAlign::parse(k).is_none() {
                self.warn(
                    WarningKind::UnrecognizedAlign,
                    format!("unrecognized align {k:?}, using left"),
                );
            }
        }
        HorizontalAlign::from_keyword(keyword)
    }

    fn v_align(&mut self, keyword: Option<&str>) -> VerticalAlign {
        if let Some(k) = keyword {
            if VerticalAlign::parse(k).is_none() {
                self.warn(
                    WarningKind::UnrecognizedAlign,
                    format!("unrecognized valign {k:?}, using top"),
                );
            }
        }
        VerticalAlign::from_keyword(keyword)
    }

    fn font(&mut self, font: &FontOptions, node: &mut ElementNode) {
        if let Some(color) = &font.color {
            if !is_recognized_color(color) {
                self.warn(
                    WarningKind::UnrecognizedColor,
                    format!("unrecognized text color {color:?}"),
                );
            }
        }
        font.apply(node);
    }
}

/// Build the subtree for any element kind.
pub fn build(element: &Element, ctx: &mut BuildContext<'_>) -> ElementNode {
    match element {
        Element::Text { text, options } => build_text(text, options, ctx),
        Element::Shape { shape, options } => build_shape(shape, options, ctx),
        Element::Image { options } => build_image(options, ctx),
        Element::Table { rows, options } => build_table(rows, options, ctx),
    }
}

/// An absolutely positioned node carrying the element and kind classes.
fn positioned(
    tag: Tag,
    kind_class: &str,
    position: &Position,
    rotate: Option<f64>,
    frame: PixelFrame,
) -> ElementNode {
    let placement = position.resolve(frame);
    let mut node = ElementNode::new(tag);
    node.set_attribute("class", format!("{} {}", classes::ELEMENT, kind_class))
        .set_style("left", px(placement.x))
        .set_style("top", px(placement.y));
    if let Some(width) = placement.width {
        node.set_style("width", px(width));
    }
    if let Some(height) = placement.height {
        node.set_style("height", px(height));
    }
    if let Some(deg) = rotate.filter(|d| *d != 0.0) {
        node.set_style("transform", format!("rotate({deg}deg)"));
    }
    node
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// A flex container for layout (position, size, vertical alignment, fill)
/// wrapping a body for the text itself. Each run becomes its own `<span>`.
pub fn build_text(
    content: &TextContent,
    options: &TextOptions,
    ctx: &mut BuildContext<'_>,
) -> ElementNode {
    let mut container = positioned(
        Tag::Div,
        classes::TEXT,
        &options.position,
        options.rotate,
        ctx.frame,
    );
    let valign = ctx.v_align(options.valign.as_deref());
    container.set_style("align-items", valign.flex());
    if let Some(background) = options.fill.as_ref().and_then(|f| ctx.fill(f)) {
        container.set_style("background-color", background);
    }
    if let Some(line) = &options.line {
        if let Some(color) = &line.color {
            ctx.color(color);
        }
        container.set_style("border", line.css());
    }
    if let Some(margin) = options.margin {
        container.set_style("padding", px(points_to_px(margin)));
    }

    let mut body = ElementNode::new(Tag::Div);
    body.set_attribute("class", classes::TEXT_BODY);
    let align = ctx.h_align(options.align.as_deref());
    body.set_style("text-align", align.css());
    ctx.font(&options.font, &mut body);
    if let Some(spacing) = options.line_spacing {
        body.set_style("line-height", px(points_to_px(spacing)));
    }

    match content {
        TextContent::Plain(text) => {
            body.append_text(text.as_str());
        }
        TextContent::Runs(runs) => {
            for run in runs {
                let mut span = ElementNode::new(Tag::Span);
                ctx.font(&run.options.font, &mut span);
                span.append_text(run.text.as_str());
                body.append_child(span);
                if run.options.break_line == Some(true) {
                    body.append_child(ElementNode::new(Tag::Br));
                }
            }
        }
    }

    container.append_child(body);
    container
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    RoundRect,
    Ellipse,
    Line,
}

impl ShapeKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rect" | "rectangle" => Some(Self::Rect),
            "roundRect" => Some(Self::RoundRect),
            "ellipse" | "oval" => Some(Self::Ellipse),
            "line" => Some(Self::Line),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::RoundRect => "roundRect",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
        }
    }
}

/// Corner radius of `roundRect` when none is given, in inches.
const DEFAULT_RECT_RADIUS_IN: f64 = 0.1;

/// A block; fill becomes the background and line a fixed 1px border.
pub fn build_shape(shape: &str, options: &ShapeOptions, ctx: &mut BuildContext<'_>) -> ElementNode {
    let kind = match ShapeKind::from_name(shape) {
        Some(kind) => kind,
        None => {
            ctx.warn(
                WarningKind::UnrecognizedShape,
                format!("unrecognized shape {shape:?}, drawing a rect"),
            );
            ShapeKind::Rect
        }
    };

    let mut node = positioned(
        Tag::Div,
        classes::SHAPE,
        &options.position,
        options.rotate,
        ctx.frame,
    );
    node.set_attribute("data-shape", kind.name());

    if let Some(background) = options.fill.as_ref().and_then(|f| ctx.fill(f)) {
        node.set_style("background-color", background);
    }
    if let Some(line) = &options.line {
        if let Some(color) = &line.color {
            ctx.color(color);
        }
        let property = if kind == ShapeKind::Line {
            "border-top"
        } else {
            "border"
        };
        node.set_style(property, line.css());
    }
    match kind {
        ShapeKind::RoundRect => {
            let radius = options.rect_radius.unwrap_or(DEFAULT_RECT_RADIUS_IN);
            node.set_style("border-radius", px(inches_to_px(radius)));
        }
        ShapeKind::Ellipse => {
            node.set_style("border-radius", "50%");
        }
        ShapeKind::Rect | ShapeKind::Line => {}
    }
    node
}

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// A replaced `<img>` node. Inline data wins over a path; with neither the
/// node has no `src` and a warning is recorded.
pub fn build_image(options: &ImageOptions, ctx: &mut BuildContext<'_>) -> ElementNode {
    let mut node = positioned(
        Tag::Img,
        classes::IMAGE,
        &options.position,
        options.rotate,
        ctx.frame,
    );

    match image_source(options) {
        Some(src) => {
            node.set_attribute("src", src);
        }
        None => ctx.warn(
            WarningKind::MissingImageSource,
            "image has neither data nor path".to_string(),
        ),
    }
    if let Some(alt) = &options.alt_text {
        node.set_attribute("alt", alt.as_str());
    }
    if options.rounding == Some(true) {
        node.set_style("border-radius", "50%");
    }
    node
}

fn image_source(options: &ImageOptions) -> Option<String> {
    fn non_empty(s: &Option<String>) -> Option<&str> {
        s.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
    if let Some(data) = non_empty(&options.data) {
        return Some(if data.starts_with("data:") {
            data.to_string()
        } else {
            format!("data:{data}")
        });
    }
    non_empty(&options.path).map(str::to_string)
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

/// One `<tr>` per input row and one `<td>` per entry. Rows are not padded or
/// truncated; a row whose width differs from the first records a warning.
pub fn build_table(
    rows: &[Vec<TableCell>],
    options: &TableOptions,
    ctx: &mut BuildContext<'_>,
) -> ElementNode {
    let mut table = positioned(Tag::Table, classes::TABLE, &options.position, None, ctx.frame);
    ctx.font(&options.font, &mut table);
    if let Some(background) = options.fill.as_ref().and_then(|f| ctx.fill(f)) {
        table.set_style("background-color", background);
    }
    if options.align.is_some() {
        let align = ctx.h_align(options.align.as_deref());
        table.set_style("text-align", align.css());
    }
    let table_valign = options.valign.as_deref().map(|k| ctx.v_align(Some(k)));

    let widths = row_widths(rows);
    let expected_width = widths.first().copied();
    for ((row_index, row), width) in rows.iter().enumerate().zip(widths) {
        if let Some(expected) = expected_width.filter(|w| *w != width) {
            ctx.warn(
                WarningKind::IrregularTableRow,
                format!("table row {row_index} spans {width} columns, first row spans {expected}"),
            );
        }

        let mut tr = ElementNode::new(Tag::Tr);
        for cell in row {
            let mut td = ElementNode::new(Tag::Td);
            if let Some(border) = &options.border {
                td.set_style("border", border.css());
            }
            if let Some(valign) = table_valign {
                td.set_style("vertical-align", valign.cell());
            }
            if let Some(cell_options) = cell.options() {
                style_cell(&mut td, cell_options, ctx);
            }
            td.append_text(cell.value().to_text());
            tr.append_child(td);
        }
        table.append_child(tr);
    }

    log::debug!("page {}: table with {} rows", ctx.page + 1, rows.len());
    table
}

/// Columns each row occupies: its own cells' colspans plus the columns still
/// held by a rowspan from an earlier row.
fn row_widths(rows: &[Vec<TableCell>]) -> Vec<usize> {
    // Remaining rows each column is held for by cells above.
    let mut held: Vec<usize> = Vec::new();
    let mut widths = Vec::with_capacity(rows.len());
    for row in rows {
        let mut next: Vec<usize> = held.iter().map(|n| n.saturating_sub(1)).collect();
        let mut col = 0;
        for cell in row {
            while held.get(col).is_some_and(|n| *n > 0) {
                col += 1;
            }
            let end = col + cell.span();
            if next.len() < end {
                next.resize(end, 0);
            }
            for slot in &mut next[col..end] {
                *slot = cell.row_span() - 1;
            }
            col = end;
        }
        let carried = held.iter().filter(|n| **n > 0).count();
        widths.push(carried + row.iter().map(TableCell::span).sum::<usize>());
        held = next;
    }
    widths
}

fn style_cell(td: &mut ElementNode, options: &CellOptions, ctx: &mut BuildContext<'_>) {
    if let Some(background) = options.fill.as_ref().and_then(|f| ctx.fill(f)) {
        td.set_style("background-color", background);
    }
    ctx.font(&options.font, td);
    if options.align.is_some() {
        let align = ctx.h_align(options.align.as_deref());
        td.set_style("text-align", align.css());
    }
    if options.valign.is_some() {
        let valign = ctx.v_align(options.valign.as_deref());
        td.set_style("vertical-align", valign.cell());
    }
    if let Some(colspan) = options.colspan.filter(|n| *n > 1) {
        td.set_attribute("colspan", colspan.to_string());
    }
    if let Some(rowspan) = options.rowspan.filter(|n| *n > 1) {
        td.set_attribute("rowspan", rowspan.to_string());
    }
}
