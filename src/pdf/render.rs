//! printpdf backend: draws a [`WorksheetLayout`] into PDF bytes

use crate::error::{Error, Result};
use crate::pdf::fonts::LoadedFont;
use crate::pdf::layout::{DrawOp, PageLayout, WorksheetLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use printpdf::lopdf::{self, Object, StringFormat};
use printpdf::path::PaintMode;
use printpdf::*;
use time::OffsetDateTime;

/// Fixed so that identical worksheets serialize to identical bytes
const DOCUMENT_ID: &str = "vocab-worksheet";
const LAYER_NAME: &str = "Layer 1";

/// Border width in points
const BORDER_THICKNESS: f32 = 0.6;

/// Header cell shade, RGB 230/230/230
const HEADER_SHADE: f32 = 230.0 / 255.0;

fn pdf_error(e: impl std::fmt::Display) -> Error {
    Error::Pdf {
        reason: e.to_string(),
    }
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn shade() -> Color {
    Color::Rgb(Rgb::new(HEADER_SHADE, HEADER_SHADE, HEADER_SHADE, None))
}

/// A4 document with fixed metadata and its first page and layer
fn new_document(title: &str) -> (PdfDocumentReference, PdfPageIndex, PdfLayerIndex) {
    let (doc, first_page, first_layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );

    // No XMP packet: printpdf stamps it with a random instance id
    let doc = doc
        .with_conformance(PdfConformance::Custom(CustomPdfConformance {
            requires_xmp_metadata: false,
            ..Default::default()
        }))
        .with_document_id(DOCUMENT_ID.to_string())
        .with_creation_date(OffsetDateTime::UNIX_EPOCH)
        .with_mod_date(OffsetDateTime::UNIX_EPOCH)
        .with_metadata_date(OffsetDateTime::UNIX_EPOCH);

    (doc, first_page, first_layer)
}

/// Replace the trailer `/ID` pair, which printpdf fills with random strings
/// on every save, by a fixed one
fn stamp_document_id(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut doc = lopdf::Document::load_mem(bytes).map_err(pdf_error)?;
    let id = || Object::String(DOCUMENT_ID.as_bytes().to_vec(), StringFormat::Literal);
    doc.trailer.set("ID", Object::Array(vec![id(), id()]));

    let mut out = Vec::with_capacity(bytes.len());
    doc.save_to(&mut out).map_err(pdf_error)?;
    Ok(out)
}

/// Render every page of `layout` with `font` and serialize the document
pub fn render_pdf(layout: &WorksheetLayout, font: &LoadedFont, title: &str) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = new_document(title);

    let font_ref = doc.add_external_font(font.data()).map_err(pdf_error)?;

    for (i, page) in layout.pages.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, &font_ref, page);
    }

    let bytes = doc.save_to_bytes().map_err(pdf_error)?;
    let bytes = stamp_document_id(&bytes)?;
    tracing::debug!(pages = layout.page_count(), bytes = bytes.len(), "rendered PDF");
    Ok(bytes)
}

/// Layout y runs top-down; PDF y runs bottom-up
fn flip(y: f32) -> Mm {
    Mm(PAGE_HEIGHT_MM - y)
}

fn draw_page(layer: &PdfLayerReference, font: &IndirectFontRef, page: &PageLayout) {
    layer.set_outline_color(black());
    layer.set_outline_thickness(BORDER_THICKNESS);
    layer.set_fill_color(black());

    for op in &page.ops {
        match op {
            DrawOp::Cell {
                x,
                y,
                width,
                height,
                filled,
            } => {
                let rect = Rect::new(Mm(*x), flip(y + height), Mm(x + width), flip(*y));
                if *filled {
                    // Text shares the fill color, so restore black afterwards
                    layer.set_fill_color(shade());
                    layer.add_rect(rect.with_mode(PaintMode::FillStroke));
                    layer.set_fill_color(black());
                } else {
                    layer.add_rect(rect.with_mode(PaintMode::Stroke));
                }
            }
            DrawOp::Text { x, y, size, text } => {
                layer.use_text(text.as_str(), *size, Mm(*x), flip(*y), font);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blank_pdf() -> Vec<u8> {
        let (doc, _, _) = new_document("blank");
        doc.save_to_bytes().unwrap()
    }

    fn trailer_id(bytes: &[u8]) -> Vec<Vec<u8>> {
        let doc = lopdf::Document::load_mem(bytes).unwrap();
        doc.trailer
            .get(b"ID")
            .and_then(Object::as_array)
            .unwrap()
            .iter()
            .map(|part| part.as_str().unwrap().to_vec())
            .collect()
    }

    #[test]
    fn test_printpdf_id_varies_between_saves() {
        assert!(trailer_id(&blank_pdf()) != trailer_id(&blank_pdf()));
    }

    #[test]
    fn test_stamped_id_is_fixed() {
        let stamped = stamp_document_id(&blank_pdf()).unwrap();
        let expected = DOCUMENT_ID.as_bytes().to_vec();
        assert_eq!(trailer_id(&stamped), vec![expected.clone(), expected]);
    }

    #[test]
    fn test_identical_documents_stamp_to_identical_bytes() {
        let first = stamp_document_id(&blank_pdf()).unwrap();
        let second = stamp_document_id(&blank_pdf()).unwrap();
        assert!(first.starts_with(b"%PDF"));
        assert!(first == second, "stamped output should not depend on the save");
    }

    #[test]
    fn test_stamp_rejects_non_pdf() {
        assert!(matches!(
            stamp_document_id(b"not a pdf"),
            Err(Error::Pdf { .. })
        ));
    }
}
