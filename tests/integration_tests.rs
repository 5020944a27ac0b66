//! Integration tests for the slide-forge authoring API.
//!
//! These tests validate:
//! - Element geometry lands in the right pixel positions
//! - Tables, text runs, shapes and images produce the expected nodes
//! - Page order, page size changes and pagination rules
//! - Export goes through the renderer exactly once, and not at all when the
//!   file name is missing

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use sha2::{Digest, Sha256};

use slide_forge::dom::{ElementNode, Tag};
use slide_forge::layouts::StandardSize;
use slide_forge::templates;
use slide_forge::{
    CellOptions, Deck, Dimension, Document, Error, Fill, FontOptions, Position, RenderJob,
    Renderer, ShapeOptions, TableCell, TableOptions, TextOptions, WarningKind,
};

// =====================================================================
// Helpers
// =====================================================================

const FAKE_PDF: &[u8] = b"%PDF-1.7 fake";

/// Records every job and returns a fixed artifact.
#[derive(Default)]
struct RecordingRenderer {
    calls: AtomicUsize,
    last: Mutex<Option<(String, f64, f64, bool)>>,
}

impl RecordingRenderer {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Renderer for RecordingRenderer {
    async fn render(&self, job: &RenderJob<'_>) -> slide_forge::Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((
            job.markup.to_string(),
            job.width_in,
            job.height_in,
            job.print_background,
        ));
        Ok(FAKE_PDF.to_vec())
    }
}

struct FailingRenderer;

impl Renderer for FailingRenderer {
    async fn render(&self, _job: &RenderJob<'_>) -> slide_forge::Result<Vec<u8>> {
        Err(Error::Renderer("browser exited with status 127".to_string()))
    }
}

fn elements(doc: &Document, page: usize) -> Vec<&ElementNode> {
    doc.pages()[page].node().element_children().collect()
}

fn header_cell(text: &str) -> TableCell {
    TableCell::styled(
        text,
        CellOptions {
            fill: Some(Fill::solid("4472C4")),
            font: FontOptions {
                color: Some("FFFFFF".to_string()),
                bold: Some(true),
                ..FontOptions::default()
            },
            ..CellOptions::default()
        },
    )
}

// =====================================================================
// Geometry
// =====================================================================

#[test]
fn text_at_one_two_inches() {
    let mut doc = Document::new();
    assert_eq!(doc.page_size().width_in(), 10.0);
    assert_eq!(doc.page_size().height_in(), 5.625);

    doc.add_page().add_text(
        "Hello",
        TextOptions {
            position: Position::at(1, 2).sized(5, 1),
            ..TextOptions::default()
        },
    );

    let text = elements(&doc, 0)[0];
    assert_eq!(text.style("left"), Some("96px"));
    assert_eq!(text.style("top"), Some("192px"));
    assert_eq!(text.style("width"), Some("480px"));
    assert_eq!(text.style("height"), Some("96px"));
}

#[test]
fn percentages_follow_page_axes() {
    let mut doc = Document::new();
    doc.add_page().add_shape(
        "rect",
        ShapeOptions {
            position: Position {
                x: Some(Dimension::percent(10.0)),
                y: Some(Dimension::percent(10.0)),
                w: Some(Dimension::percent(50.0)),
                h: Some(Dimension::percent(50.0)),
            },
            ..ShapeOptions::default()
        },
    );
    let shape = elements(&doc, 0)[0];
    assert_eq!(shape.style("left"), Some("96px"));
    assert_eq!(shape.style("top"), Some("54px"));
    assert_eq!(shape.style("width"), Some("480px"));
    assert_eq!(shape.style("height"), Some("270px"));
}

#[test]
fn unset_position_is_origin_without_extent() {
    let mut doc = Document::new();
    doc.add_page().add_text("flow", TextOptions::default());
    let text = elements(&doc, 0)[0];
    assert_eq!(text.style("left"), Some("0px"));
    assert_eq!(text.style("top"), Some("0px"));
    assert_eq!(text.style("width"), None);
    assert_eq!(text.style("height"), None);
}

// =====================================================================
// Tables
// =====================================================================

#[test]
fn table_with_styled_header_and_three_rows() {
    let rows: Vec<Vec<TableCell>> = vec![
        vec![
            header_cell("Region"),
            header_cell("July"),
            header_cell("August"),
            header_cell("September"),
        ],
        vec!["North".into(), 12500.0.into(), 13200.0.into(), 14100.0.into()],
        vec!["South".into(), 9800.0.into(), 10100.0.into(), 9950.0.into()],
        vec!["West".into(), 15300.0.into(), 16750.0.into(), 18020.0.into()],
    ];
    let mut doc = Document::new();
    doc.add_page().add_table(
        rows,
        TableOptions {
            position: Position::at(0.5, 1.4).sized(9, 3),
            ..TableOptions::default()
        },
    );

    let table = elements(&doc, 0)[0];
    assert_eq!(table.tag, Tag::Table);
    let trs: Vec<_> = table.element_children().collect();
    assert_eq!(trs.len(), 4);
    for tr in &trs {
        assert_eq!(tr.tag, Tag::Tr);
        assert_eq!(tr.element_children().count(), 4);
    }

    for td in trs[0].element_children() {
        assert_eq!(td.style("background-color"), Some("#4472C4"));
        assert_eq!(td.style("color"), Some("#FFFFFF"));
        assert_eq!(td.style("font-weight"), Some("bold"));
    }
    for tr in &trs[1..] {
        for td in tr.element_children() {
            assert_eq!(td.style_text(), "");
        }
    }
    assert_eq!(trs[1].element_children().next().unwrap().text_content(), "North");
    assert_eq!(trs[3].element_children().nth(3).unwrap().text_content(), "18020");
}

#[test]
fn unequal_table_rows_do_not_raise() {
    let rows: Vec<Vec<TableCell>> = vec![
        vec!["a".into(), "b".into(), "c".into()],
        vec!["d".into()],
        vec![],
        vec!["e".into(), "f".into(), "g".into(), "h".into(), "i".into()],
    ];
    let mut doc = Document::new();
    doc.add_page().add_table(rows, TableOptions::default());

    let counts: Vec<_> = elements(&doc, 0)[0]
        .element_children()
        .map(|tr| tr.element_children().count())
        .collect();
    assert_eq!(counts, vec![3, 1, 0, 5]);

    let rendered = doc.render();
    let ragged = rendered
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::IrregularTableRow)
        .count();
    assert_eq!(ragged, 3);
}

// =====================================================================
// Pages and ordering
// =====================================================================

#[test]
fn pages_and_elements_keep_insertion_order() {
    let mut doc = Document::new();
    doc.add_page()
        .add_text("first", TextOptions::default())
        .add_shape("ellipse", ShapeOptions::default())
        .add_text("last", TextOptions::default());
    doc.add_page().add_text("second page", TextOptions::default());

    let kids = elements(&doc, 0);
    assert_eq!(kids.len(), 3);
    assert_eq!(kids[0].text_content(), "first");
    assert!(kids[1].has_class("slide-shape"));
    assert_eq!(kids[2].text_content(), "last");

    let markup = doc.render().markup;
    let first = markup.find(">first<").unwrap();
    let last = markup.find(">last<").unwrap();
    let second = markup.find(">second page<").unwrap();
    assert!(first < last && last < second);
}

#[test]
fn page_size_before_pages_applies_everywhere() {
    let mut doc = Document::new();
    doc.set_page_size(StandardSize::Screen4x3.landscape());
    doc.add_page();
    doc.add_page();

    for page in doc.pages() {
        assert_eq!(page.frame().width_px, 960.0);
        assert_eq!(page.frame().height_px, 720.0);
        assert_eq!(page.node().style("height"), Some("720px"));
    }
    let rendered = doc.render();
    assert!(rendered.markup.contains("size: 10in 7.5in;"));
    assert!(rendered.warnings.is_empty());
}

#[test]
fn page_size_after_pages_moves_frame_not_elements() {
    let mut doc = Document::new();
    doc.add_page().add_text(
        "placed",
        TextOptions {
            position: Position {
                x: Some(Dimension::percent(50.0)),
                y: Some(Dimension::percent(50.0)),
                ..Position::default()
            },
            ..TextOptions::default()
        },
    );
    doc.set_page_size(StandardSize::Letter.landscape());

    let page = &doc.pages()[0];
    assert_eq!(page.node().style("width"), Some("1056px"));
    assert_eq!(page.node().style("height"), Some("816px"));

    let text = elements(&doc, 0)[0];
    assert_eq!(text.style("left"), Some("480px"));
    assert_eq!(text.style("top"), Some("270px"));

    let rendered = doc.render();
    assert!(rendered.markup.contains("size: 11in 8.5in;"));
    assert_eq!(rendered.markup.matches("@page").count(), 1);
    assert_eq!(rendered.warnings[0].kind, WarningKind::PageSizeChangedAfterBuild);
}

#[test]
fn every_page_but_last_breaks() {
    let mut doc = Document::new();
    for _ in 0..3 {
        doc.add_page();
    }
    let rendered = doc.render();
    assert_eq!(rendered.page_count, 3);
    assert_eq!(rendered.markup.matches("class=\"slide-container\"").count(), 3);
    assert!(rendered.markup.contains("page-break-after: always;"));
    assert!(rendered.markup.contains(".slide-container:last-child"));
}

// =====================================================================
// Export
// =====================================================================

#[tokio::test]
async fn empty_file_name_never_reaches_renderer() {
    let renderer = RecordingRenderer::default();
    for name in ["", "   "] {
        let mut doc = Document::new();
        doc.add_page().add_text("unsaved", TextOptions::default());
        let err = doc.write_file(name, &renderer).await.unwrap_err();
        assert!(matches!(err, Error::MissingFileName));
    }
    assert_eq!(renderer.calls(), 0);
}

#[tokio::test]
async fn write_hands_markup_and_size_to_renderer() {
    let renderer = RecordingRenderer::default();
    let mut doc = Document::new();
    doc.set_layout("LAYOUT_WIDE").unwrap();
    doc.add_page().add_text("wide", TextOptions::default());

    let bytes = doc.write(&renderer).await.unwrap();
    assert_eq!(bytes, FAKE_PDF);
    assert_eq!(renderer.calls(), 1);

    let (markup, width, height, background) = renderer.last.lock().unwrap().clone().unwrap();
    assert!(markup.starts_with("<!DOCTYPE html>"));
    assert!(markup.contains("wide"));
    assert_eq!((width, height), (13.333, 7.5));
    assert!(background);
}

#[tokio::test]
async fn write_file_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("decks").join("q3.pdf");
    let renderer = RecordingRenderer::default();

    let mut doc = Document::new();
    doc.add_page();
    let path = doc
        .write_file(target.to_str().unwrap(), &renderer)
        .await
        .unwrap();

    assert_eq!(path, target);
    assert_eq!(std::fs::read(&target).unwrap(), FAKE_PDF);
    assert_eq!(renderer.calls(), 1);
}

#[tokio::test]
async fn renderer_failure_surfaces_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("never.pdf");

    let mut doc = Document::new();
    doc.add_page();
    let err = doc
        .write_file(target.to_str().unwrap(), &FailingRenderer)
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Renderer failure: browser exited with status 127"
    );
    assert!(!target.exists());
}

#[tokio::test]
async fn print_background_can_be_disabled() {
    let renderer = RecordingRenderer::default();
    let mut doc = Document::new();
    doc.set_print_background(false).add_page();
    doc.write(&renderer).await.unwrap();
    let (_, _, _, background) = renderer.last.lock().unwrap().clone().unwrap();
    assert!(!background);
}

// =====================================================================
// Decks and stability
// =====================================================================

fn digest(markup: &str) -> String {
    Sha256::digest(markup.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[test]
fn markup_is_deterministic() {
    let build = || {
        let deck = Deck::from_json(templates::sales_report_deck()).unwrap();
        Document::from_deck(&deck).unwrap().render().markup
    };
    assert_eq!(digest(&build()), digest(&build()));
}

#[test]
fn sales_report_table_shape() {
    let deck = Deck::from_json(templates::sales_report_deck()).unwrap();
    let doc = Document::from_deck(&deck).unwrap();
    let table = elements(&doc, 0)
        .into_iter()
        .find(|e| e.tag == Tag::Table)
        .unwrap();
    let trs: Vec<_> = table.element_children().collect();
    assert_eq!(trs.len(), 4);
    assert!(trs.iter().all(|tr| tr.element_children().count() == 4));

    let emphasised = trs[3].element_children().nth(3).unwrap();
    assert_eq!(emphasised.style("color"), Some("#2E7D32"));
    assert_eq!(emphasised.style("background-color"), None);
}

#[test]
fn deck_with_bad_dimension_is_rejected() {
    let json = r#"{"slides": [{"elements": [
        {"type": "shape", "shape": "rect", "options": {"w": "wide"}}
    ]}]}"#;
    let err = Deck::from_json(json).unwrap_err();
    assert!(matches!(err, Error::Deck(_)));
    assert!(err.to_string().contains("Invalid dimension"), "{err}");
}

#[test]
fn non_ascii_translucent_colors_degrade() {
    let json = r#"{"slides": [{
        "background": {"color": "éa", "transparency": 10},
        "elements": [
            {"type": "shape", "shape": "rect",
             "options": {"w": 1, "h": 1, "fill": {"color": "aééb", "transparency": 40}}}
        ]
    }]}"#;
    let deck = Deck::from_json(json).unwrap();
    let rendered = Document::from_deck(&deck).unwrap().render();
    assert!(rendered.markup.contains("background-color: #éa"));
    assert!(rendered.markup.contains("background-color: #aééb"));
    assert!(rendered
        .warnings
        .iter()
        .all(|w| w.kind == WarningKind::UnrecognizedColor));
    assert_eq!(rendered.warnings.len(), 2);
}

#[test]
fn all_sample_decks_render() {
    for (name, json) in templates::all_decks() {
        let deck = Deck::from_json(json).unwrap();
        let rendered = Document::from_deck(&deck).unwrap().render();
        assert_eq!(rendered.page_count, deck.slides.len(), "{name}");
        assert!(rendered.markup.starts_with("<!DOCTYPE html>"), "{name}");
        assert!(!rendered.to_json().unwrap().is_empty(), "{name}");
    }
}
