//! A single page: a fixed-size positioning context holding element nodes in
//! insertion order.

use crate::dom::{ElementNode, Tag};
use crate::elements::{self, BuildContext};
use crate::options::{
    Element, ImageOptions, ShapeOptions, TableCell, TableOptions, TextContent, TextOptions,
};
use crate::pagination::classes;
use crate::style::{color_to_css, is_recognized_color, Fill};
use crate::units::{px, PixelFrame};
use crate::warning::{Warning, WarningKind};

#[derive(Debug, Clone)]
pub struct Page {
    index: usize,
    frame: PixelFrame,
    node: ElementNode,
    element_count: usize,
    warnings: Vec<Warning>,
}

impl Page {
    pub(crate) fn new(index: usize, frame: PixelFrame) -> Self {
        let mut node = ElementNode::new(Tag::Div);
        node.set_attribute("class", classes::PAGE)
            .set_attribute("id", format!("slide-{}", index + 1));
        let mut page = Self {
            index,
            frame,
            node,
            element_count: 0,
            warnings: Vec::new(),
        };
        page.apply_frame();
        page
    }

    /// Build `element` against this page's size and append it. Later
    /// elements paint over earlier ones.
    pub fn add_element(&mut self, element: impl Into<Element>) -> &mut Self {
        let element = element.into();
        let mut ctx = BuildContext {
            frame: self.frame,
            page: self.index,
            warnings: &mut self.warnings,
        };
        let node = elements::build(&element, &mut ctx);
        log::debug!(
            "page {}: added {} element #{}",
            self.index + 1,
            element.kind(),
            self.element_count + 1
        );
        self.node.append_child(node);
        self.element_count += 1;
        self
    }

    pub fn add_text(&mut self, text: impl Into<TextContent>, options: TextOptions) -> &mut Self {
        self.add_element(Element::Text {
            text: text.into(),
            options,
        })
    }

    pub fn add_shape(&mut self, shape: &str, options: ShapeOptions) -> &mut Self {
        self.add_element(Element::Shape {
            shape: shape.to_string(),
            options,
        })
    }

    pub fn add_image(&mut self, options: ImageOptions) -> &mut Self {
        self.add_element(Element::Image { options })
    }

    pub fn add_table(&mut self, rows: Vec<Vec<TableCell>>, options: TableOptions) -> &mut Self {
        self.add_element(Element::Table { rows, options })
    }

    /// Page background colour.
    pub fn set_background(&mut self, fill: &Fill) -> &mut Self {
        if let Some(color) = fill.color() {
            if !is_recognized_color(color) {
                self.warnings.push(Warning::new(
                    Some(self.index),
                    WarningKind::UnrecognizedColor,
                    format!("unrecognized background color {color:?}"),
                ));
            }
        }
        let background = fill.css().unwrap_or_else(|| color_to_css(""));
        self.node.set_style("background-color", background);
        self
    }

    /// Zero-based position in the document.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame(&self) -> PixelFrame {
        self.frame
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Container node; its element children are the page's elements.
    pub fn node(&self) -> &ElementNode {
        &self.node
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// Resize the container. Elements already on the page keep their
    /// pixel positions; only elements added afterwards see the new frame.
    pub(crate) fn set_frame(&mut self, frame: PixelFrame) {
        self.frame = frame;
        self.apply_frame();
    }

    pub(crate) fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    fn apply_frame(&mut self) {
        self.node
            .set_style("width", px(self.frame.width_px))
            .set_style("height", px(self.frame.height_px));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Position;

    const FRAME: PixelFrame = PixelFrame {
        width_px: 960.0,
        height_px: 540.0,
    };

    #[test]
    fn chaining_keeps_insertion_order() {
        let mut page = Page::new(0, FRAME);
        page.add_shape("rect", ShapeOptions::default())
            .add_text("A", TextOptions::default())
            .add_text("B", TextOptions::default());

        assert_eq!(page.element_count(), 3);
        let kids: Vec<_> = page.node().element_children().collect();
        assert!(kids[0].has_class(classes::SHAPE));
        assert_eq!(kids[1].text_content(), "A");
        assert_eq!(kids[2].text_content(), "B");
    }

    #[test]
    fn container_is_page_sized() {
        let page = Page::new(2, FRAME);
        assert_eq!(page.node().id(), Some("slide-3"));
        assert_eq!(page.node().style("width"), Some("960px"));
        assert_eq!(page.node().style("height"), Some("540px"));
    }

    #[test]
    fn resize_spares_existing_elements() {
        let mut page = Page::new(0, FRAME);
        let half = TextOptions {
            position: Position {
                x: Some(crate::units::Dimension::percent(50.0)),
                ..Position::default()
            },
            ..TextOptions::default()
        };
        page.add_text("before", half.clone());
        page.set_frame(PixelFrame {
            width_px: 1280.0,
            height_px: 720.0,
        });
        page.add_text("after", half);

        let lefts: Vec<_> = page
            .node()
            .element_children()
            .map(|e| e.style("left").map(str::to_string))
            .collect();
        assert_eq!(lefts, vec![Some("480px".to_string()), Some("640px".to_string())]);
        assert_eq!(page.node().style("width"), Some("1280px"));
    }

    #[test]
    fn background_fill() {
        let mut page = Page::new(0, FRAME);
        page.set_background(&Fill::solid("F5F5F5"));
        assert_eq!(page.node().style("background-color"), Some("#F5F5F5"));
        assert!(page.warnings().is_empty());
    }
}
