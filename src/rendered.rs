//! The frozen output of a finished document: markup plus the physical page
//! size the renderer must print it at.

use serde::Serialize;

use crate::error::Result;
use crate::render::RenderJob;
use crate::warning::Warning;

/// Result of [`Document::render`](crate::document::Document::render).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedDocument {
    /// Complete HTML document, doctype included.
    pub markup: String,
    pub width_in: f64,
    pub height_in: f64,
    pub page_count: usize,
    /// Content and style problems that were degraded to a default.
    pub warnings: Vec<Warning>,
}

impl RenderedDocument {
    /// The job handed to a [`Renderer`](crate::render::Renderer).
    pub fn job(&self, print_background: bool) -> RenderJob<'_> {
        RenderJob {
            markup: &self.markup,
            width_in: self.width_in,
            height_in: self.height_in,
            print_background,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warning::WarningKind;

    #[test]
    fn json_uses_camel_case() {
        let rendered = RenderedDocument {
            markup: "<!DOCTYPE html>".to_string(),
            width_in: 10.0,
            height_in: 5.625,
            page_count: 1,
            warnings: vec![Warning {
                page: Some(0),
                kind: WarningKind::MissingImageSource,
                message: "image has neither data nor path".to_string(),
            }],
        };
        let value: serde_json::Value =
            serde_json::from_str(&rendered.to_json().unwrap()).unwrap();
        assert_eq!(value["widthIn"], 10.0);
        assert_eq!(value["heightIn"], 5.625);
        assert_eq!(value["pageCount"], 1);
        assert_eq!(value["warnings"][0]["kind"], "missingImageSource");
    }

    #[test]
    fn job_borrows_markup() {
        let rendered = RenderedDocument {
            markup: "<html></html>".to_string(),
            width_in: 13.333,
            height_in: 7.5,
            page_count: 0,
            warnings: Vec::new(),
        };
        let job = rendered.job(false);
        assert_eq!(job.markup, "<html></html>");
        assert_eq!(job.width_in, 13.333);
        assert!(!job.print_background);
    }
}
