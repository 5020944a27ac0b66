//! # slide-forge – slide decks laid out in inches, printed by a browser
//!
//! Authors describe pages and positioned elements in presentation terms
//! (inches, points, percentages of the page, alignment keywords, bare hex
//! colours). The crate turns them into one self-contained HTML document and
//! hands it to an external renderer that prints one PDF page per slide.
//!
//! 1. **Convert** – inches, points and percentages → CSS pixels ([`units`])
//! 2. **Map** – presentation style vocabulary → CSS ([`style`])
//! 3. **Build** – one node subtree per element ([`elements`], [`page`])
//! 4. **Paginate** – one `@page` rule, a break after every slide ([`pagination`])
//! 5. **Render** – markup → PDF through a [`render::Renderer`] ([`document`])
//!
//! Decks can also be described as JSON ([`deck`]). A C-compatible FFI
//! surface is exposed via the [`ffi`] module.

pub mod deck;
pub mod document;
pub mod dom;
pub mod elements;
pub mod error;
pub mod ffi;
pub mod layouts;
pub mod options;
pub mod page;
pub mod pagination;
pub mod render;
pub mod rendered;
pub mod style;
pub mod templates;
pub mod units;
pub mod warning;

// Re-exports for convenience
pub use deck::Deck;
pub use document::Document;
pub use error::{Error, Result};
pub use layouts::{PageOrientation, PageSize, StandardSize};
pub use options::{
    CellOptions, Element, ImageOptions, RunOptions, ShapeOptions, TableCell, TableOptions,
    TextContent, TextOptions, TextRun,
};
pub use page::Page;
pub use render::{ChromeConfig, ChromeRenderer, RenderJob, Renderer};
pub use rendered::RenderedDocument;
pub use style::{Fill, FontOptions, LineProps};
pub use units::{Dimension, Position};
pub use warning::{Warning, WarningKind};
