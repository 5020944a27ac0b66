//! Build warnings – content and style problems that degrade to a default
//! rendering instead of failing the document.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum WarningKind {
    UnrecognizedAlign,
    UnrecognizedColor,
    UnrecognizedShape,
    MissingImageSource,
    IrregularTableRow,
    PageSizeChangedAfterBuild,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Warning {
    /// Zero-based page index, or `None` for document-level warnings.
    pub page: Option<usize>,
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub(crate) fn new(page: Option<usize>, kind: WarningKind, message: impl Into<String>) -> Self {
        let warning = Self {
            page,
            kind,
            message: message.into(),
        };
        log::warn!("{warning}");
        warning
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.page {
            Some(page) => write!(f, "page {}: {}", page + 1, self.message),
            None => f.write_str(&self.message),
        }
    }
}
