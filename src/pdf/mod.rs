//! PDF worksheet generation
//!
//! This module resolves the Korean font, lays out the practice and answer
//! sheets, and renders them to an in-memory PDF using printpdf.

mod fonts;
mod layout;
mod render;

pub use fonts::{
    default_font_search_paths, FontCache, FontLocator, FontStatus, LoadedFont, BUNDLED_FONT_FILE,
};
pub use layout::{
    header_line, layout_worksheet, DrawOp, PageLayout, Sheet, TableRow, TextMeasure,
    WorksheetLayout, ANSWER_TITLE, COLUMN_LABELS, PRACTICE_TITLE,
};
pub use render::render_pdf;

use crate::error::Result;
use crate::worksheet::RenderRequest;
use std::path::PathBuf;

/// A finished worksheet ready to stream
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub font_path: PathBuf,
}

/// Resolve the font, lay out both sheets and render them.
///
/// Fails with [`crate::Error::FontNotFound`] before any layout work when no
/// Korean font is available.
pub fn build_worksheet(request: &RenderRequest, fonts: &FontLocator) -> Result<GeneratedDocument> {
    render_worksheet(request, &fonts.load()?)
}

/// Lay out both sheets with an already loaded font and render them
pub fn render_worksheet(request: &RenderRequest, font: &LoadedFont) -> Result<GeneratedDocument> {
    let layout = layout_worksheet(request, font);
    let bytes = render_pdf(&layout, font, PRACTICE_TITLE)?;

    tracing::info!(
        rows = request.pairs.len(),
        hide_mode = request.hide_mode.as_str(),
        pages = layout.page_count(),
        bytes = bytes.len(),
        "generated worksheet"
    );

    Ok(GeneratedDocument {
        bytes,
        page_count: layout.page_count(),
        font_path: font.path().to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet::{HideMode, WordPair};
    use crate::Error;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_build_worksheet_without_font_fails() {
        let dir = TempDir::new().unwrap();
        let fonts = FontLocator::new(vec![dir.path().join(BUNDLED_FONT_FILE)]);
        let request = RenderRequest::new(
            vec![WordPair::new("apple", "사과")],
            HideMode::HideBack,
            None,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );

        let result = build_worksheet(&request, &fonts);
        assert!(matches!(result, Err(Error::FontNotFound { .. })));
    }
}
