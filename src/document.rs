//! Document – the ordered page sequence, the active page size, and the
//! finalising render/export step.
//!
//! Authoring calls are synchronous. Only [`Document::write`] and
//! [`Document::write_file`] suspend, once, while the renderer runs.
//! Finalisation consumes the document, so nothing can mutate it afterwards.

use std::path::PathBuf;

use crate::dom::{ElementNode, HtmlDocument, Tag};
use crate::error::{Error, Result};
use crate::layouts::PageSize;
use crate::page::Page;
use crate::pagination::{page_rules_node, PAGE_RULES_ID};
use crate::render::Renderer;
use crate::rendered::RenderedDocument;
use crate::warning::{Warning, WarningKind};

const TITLE_ID: &str = "slide-forge-title";

#[derive(Debug, Clone)]
pub struct Document {
    page_size: PageSize,
    head: ElementNode,
    pages: Vec<Page>,
    warnings: Vec<Warning>,
    print_background: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document at the default 16:9 page size.
    pub fn new() -> Self {
        Self::with_page_size(PageSize::default())
    }

    pub fn with_page_size(page_size: PageSize) -> Self {
        let mut charset = ElementNode::new(Tag::Meta);
        charset.set_attribute("charset", "utf-8");
        let mut head = ElementNode::new(Tag::Head);
        head.append_child(charset).append_child(page_rules_node(&page_size));
        Self {
            page_size,
            head,
            pages: Vec::new(),
            warnings: Vec::new(),
            print_background: true,
        }
    }

    /// Append a page bound to the current page size.
    pub fn add_page(&mut self) -> &mut Page {
        let index = self.pages.len();
        self.pages.push(Page::new(index, self.page_size.frame()));
        log::debug!("added page {}", index + 1);
        &mut self.pages[index]
    }

    /// Replace the page size and regenerate the pagination rules.
    ///
    /// Page frames follow the new size, but elements already built keep the
    /// pixel geometry they were given; set the size before adding elements.
    pub fn set_page_size(&mut self, page_size: PageSize) -> &mut Self {
        let built = self.pages.iter().map(Page::element_count).sum::<usize>();
        if built > 0 {
            self.warnings.push(Warning::new(
                None,
                WarningKind::PageSizeChangedAfterBuild,
                format!(
                    "page size changed to {}in x {}in after {built} element(s) were placed; \
                     their positions were not recomputed",
                    page_size.width_in(),
                    page_size.height_in()
                ),
            ));
        }

        self.head.replace_by_id(PAGE_RULES_ID, page_rules_node(&page_size));
        let frame = page_size.frame();
        for page in &mut self.pages {
            page.set_frame(frame);
        }
        log::debug!("page size set to {:?}", page_size.name());
        self.page_size = page_size;
        self
    }

    /// Switch to one of the named layouts, e.g. `LAYOUT_4x3`.
    pub fn set_layout(&mut self, name: &str) -> Result<&mut Self> {
        let size = PageSize::from_layout_name(name)?;
        Ok(self.set_page_size(size))
    }

    pub fn set_title(&mut self, title: &str) -> &mut Self {
        let mut node = ElementNode::new(Tag::Title);
        node.set_attribute("id", TITLE_ID).append_text(title);
        if !self.head.replace_by_id(TITLE_ID, node.clone()) {
            self.head.append_child(node);
        }
        self
    }

    /// Whether the renderer should paint backgrounds (default: true).
    pub fn set_print_background(&mut self, print_background: bool) -> &mut Self {
        self.print_background = print_background;
        self
    }

    pub fn title(&self) -> Option<String> {
        self.head.find_by_id(TITLE_ID).map(ElementNode::text_content)
    }

    pub fn page_size(&self) -> &PageSize {
        &self.page_size
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Warnings recorded so far, document-level first, then by page.
    pub fn warnings(&self) -> Vec<Warning> {
        self.warnings
            .iter()
            .chain(self.pages.iter().flat_map(|p| p.warnings()))
            .cloned()
            .collect()
    }

    /// Preview the markup without finalising.
    pub fn to_markup(&self) -> String {
        let mut body = ElementNode::new(Tag::Body);
        for page in &self.pages {
            body.append_child(page.node().clone());
        }
        HtmlDocument {
            head: &self.head,
            body: &body,
        }
        .to_markup()
    }

    /// Finalise into markup plus the physical page size.
    pub fn render(mut self) -> RenderedDocument {
        let markup = self.to_markup();
        let mut warnings = std::mem::take(&mut self.warnings);
        for page in &mut self.pages {
            warnings.extend(page.take_warnings());
        }
        log::info!(
            "rendered {} page(s) at {}in x {}in with {} warning(s)",
            self.pages.len(),
            self.page_size.width_in(),
            self.page_size.height_in(),
            warnings.len()
        );
        RenderedDocument {
            markup,
            width_in: self.page_size.width_in(),
            height_in: self.page_size.height_in(),
            page_count: self.pages.len(),
            warnings,
        }
    }

    /// Finalise and hand the markup to `renderer`, returning its artifact.
    pub async fn write<R: Renderer>(self, renderer: &R) -> Result<Vec<u8>> {
        let print_background = self.print_background;
        let rendered = self.render();
        renderer.render(&rendered.job(print_background)).await
    }

    /// Finalise, render, and write the artifact to `file_name`.
    ///
    /// An empty name fails with [`Error::MissingFileName`] before the
    /// renderer is invoked.
    pub async fn write_file<R: Renderer>(self, file_name: &str, renderer: &R) -> Result<PathBuf> {
        if file_name.trim().is_empty() {
            return Err(Error::MissingFileName);
        }
        let path = PathBuf::from(file_name);
        let bytes = self.write(renderer).await?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &bytes).await?;
        log::info!("wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}
