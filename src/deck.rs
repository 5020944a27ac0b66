//! Deck documents – a JSON description of a whole presentation, built into
//! a [`Document`] in one call.
//!
//! ```json
//! {
//!   "title": "Q3 Review",
//!   "layout": "LAYOUT_16x9",
//!   "slides": [
//!     { "background": "F5F5F5",
//!       "elements": [ { "type": "text", "text": "Hello", "options": { "x": 1, "y": 1 } } ] }
//!   ]
//! }
//! ```

use serde::Deserialize;

use crate::document::Document;
use crate::error::Result;
use crate::layouts::PageSize;
use crate::options::Element;
use crate::style::Fill;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub layout: Option<DeckLayout>,
    #[serde(default)]
    pub slides: Vec<SlideSpec>,
}

/// A named layout or an explicit `{name, width, height}` in inches.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DeckLayout {
    Named(String),
    Custom(PageSize),
}

impl DeckLayout {
    pub fn page_size(&self) -> Result<PageSize> {
        match self {
            DeckLayout::Named(name) => PageSize::from_layout_name(name),
            DeckLayout::Custom(size) => Ok(size.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SlideSpec {
    #[serde(default)]
    pub background: Option<Fill>,
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Deck {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl Document {
    /// Build a document from a deck. The page size is applied before any
    /// page exists, so every element sees the final size.
    pub fn from_deck(deck: &Deck) -> Result<Self> {
        let page_size = match &deck.layout {
            Some(layout) => layout.page_size()?,
            None => PageSize::default(),
        };
        let mut doc = Document::with_page_size(page_size);
        if let Some(title) = &deck.title {
            doc.set_title(title);
        }
        for slide in &deck.slides {
            let page = doc.add_page();
            if let Some(background) = &slide.background {
                page.set_background(background);
            }
            for element in &slide.elements {
                page.add_element(element.clone());
            }
        }
        log::debug!(
            "built deck with {} slide(s) at {}",
            doc.page_count(),
            doc.page_size().name()
        );
        Ok(doc)
    }
}
