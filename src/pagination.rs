//! Pagination – the document-wide stylesheet that sizes the print page to
//! the page size and forces a break after every page but the last.
//!
//! The stylesheet is regenerated whenever the page size changes and swapped
//! into the head under [`PAGE_RULES_ID`], so there is only ever one
//! `@page` rule in the output.

use crate::dom::{ElementNode, Tag};
use crate::layouts::PageSize;
use crate::units::px;

/// `id` of the `<style>` node holding the pagination rules.
pub const PAGE_RULES_ID: &str = "slide-forge-page-rules";

/// Class names shared between the builders and the stylesheet.
pub mod classes {
    pub const PAGE: &str = "slide-container";
    pub const ELEMENT: &str = "slide-element";
    pub const TEXT: &str = "slide-text";
    pub const TEXT_BODY: &str = "slide-text-body";
    pub const SHAPE: &str = "slide-shape";
    pub const IMAGE: &str = "slide-image";
    pub const TABLE: &str = "slide-table";
}

/// Default body font when an element sets none.
pub const DEFAULT_FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";

/// CSS for the given page size.
pub fn page_rules(size: &PageSize) -> String {
    let width = px(size.width_px());
    let height = px(size.height_px());
    format!(
        "@page {{ size: {w_in}in {h_in}in; margin: 0; }}\n\
         html, body {{ margin: 0; padding: 0; }}\n\
         body {{ font-family: {font}; -webkit-print-color-adjust: exact; print-color-adjust: exact; }}\n\
         .{page} {{ position: relative; width: {width}; height: {height}; overflow: hidden; \
         box-sizing: border-box; break-after: page; page-break-after: always; }}\n\
         .{page}:last-child {{ break-after: auto; page-break-after: auto; }}\n\
         .{element} {{ position: absolute; box-sizing: border-box; margin: 0; }}\n\
         .{text} {{ display: flex; overflow: hidden; }}\n\
         .{text_body} {{ width: 100%; white-space: pre-wrap; overflow-wrap: break-word; }}\n\
         .{image} {{ object-fit: fill; }}\n\
         .{table} {{ border-collapse: collapse; }}\n\
         .{table} td {{ padding: 4px 6px; }}\n",
        w_in = size.width_in(),
        h_in = size.height_in(),
        font = DEFAULT_FONT_FAMILY,
        page = classes::PAGE,
        element = classes::ELEMENT,
        text = classes::TEXT,
        text_body = classes::TEXT_BODY,
        image = classes::IMAGE,
        table = classes::TABLE,
    )
}

/// The `<style>` node carrying [`page_rules`].
pub fn page_rules_node(size: &PageSize) -> ElementNode {
    let mut node = ElementNode::new(Tag::Style);
    node.set_attribute("id", PAGE_RULES_ID)
        .append_text(page_rules(size));
    node
}
