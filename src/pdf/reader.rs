//! Outline reader backed by PDFium

use super::outline::{OutlineNode, OutlineSource, OutlineTarget, PageBox};
use crate::error::{Error, Result};
use pdfium_render::prelude::*;
use std::collections::HashMap;
use std::path::Path;

/// Get PDFium instance (creates new instance each time - PDFium is not thread-safe)
fn create_pdfium() -> Result<Pdfium> {
    // Try to bind to system library or use static linking
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
                "/opt/pdfium/lib",
            ))
        })
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| Error::Pdfium {
            reason: format!("Failed to initialize PDFium: {}", e),
        })?;

    Ok(Pdfium::new(bindings))
}

/// [`OutlineSource`] reading bookmarks with PDFium
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfiumOutlineReader;

impl OutlineSource for PdfiumOutlineReader {
    fn read_outline(&self, path: &Path) -> Result<Option<Vec<OutlineNode>>> {
        let pdfium = create_pdfium()?;
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| Error::Pdfium {
                reason: format!("Failed to open {}: {}", path.display(), e),
            })?;

        let mut boxes = HashMap::new();
        let nodes = collect_bookmarks(&document, document.bookmarks().iter(), &mut boxes);
        tracing::debug!(
            path = %path.display(),
            top_level = nodes.len(),
            "read outline"
        );

        Ok(if nodes.is_empty() { None } else { Some(nodes) })
    }
}

fn collect_bookmarks<'a>(
    document: &PdfDocument,
    bookmarks: impl Iterator<Item = PdfBookmark<'a>>,
    boxes: &mut HashMap<u32, Option<PageBox>>,
) -> Vec<OutlineNode> {
    bookmarks
        .map(|bookmark| {
            let title = bookmark.title().unwrap_or_default();
            let target = bookmark
                .destination()
                .and_then(|dest| destination_target(document, &dest, boxes));

            let children = collect_bookmarks(document, bookmark.iter_direct_children(), boxes);

            OutlineNode {
                title,
                target,
                children,
            }
        })
        .collect()
}

fn destination_target(
    document: &PdfDocument,
    dest: &PdfDestination,
    boxes: &mut HashMap<u32, Option<PageBox>>,
) -> Option<OutlineTarget> {
    let index = dest.page_index().ok()?;
    let page = index as u32 + 1; // Convert to 1-indexed

    let (x, y) = match dest.view_settings() {
        Ok(PdfDestinationViewSettings::SpecificCoordinatesAndZoom(x, y, _)) => {
            (points(x), points(y))
        }
        Ok(PdfDestinationViewSettings::FitPageHorizontallyToWindow(top))
        | Ok(PdfDestinationViewSettings::FitBoundsHorizontallyToWindow(top)) => (0.0, points(top)),
        Ok(PdfDestinationViewSettings::FitPageVerticallyToWindow(left))
        | Ok(PdfDestinationViewSettings::FitBoundsVerticallyToWindow(left)) => (points(left), 0.0),
        _ => (0.0, 0.0),
    };

    let crop_box = *boxes
        .entry(page)
        .or_insert_with(|| page_box(document, index));

    Some(OutlineTarget {
        page,
        x,
        y,
        crop_box,
    })
}

/// Crop box of the page at `index`, falling back to its media box.
fn page_box(document: &PdfDocument, index: PdfPageIndex) -> Option<PageBox> {
    let page = match document.pages().get(index) {
        Ok(page) => page,
        Err(e) => {
            tracing::warn!(page = index as u32 + 1, error = %e, "bookmark target page unreadable");
            return None;
        }
    };

    let boundaries = page.boundaries();
    match boundaries.crop().or_else(|_| boundaries.media()) {
        Ok(boundary) => Some(rect_box(&boundary.bounds)),
        Err(e) => {
            tracing::warn!(page = index as u32 + 1, error = %e, "page has no crop or media box");
            None
        }
    }
}

fn rect_box(rect: &PdfRect) -> PageBox {
    PageBox {
        left: rect.left().value,
        bottom: rect.bottom().value,
        top: rect.top().value,
    }
}

fn points(value: Option<PdfPoints>) -> f32 {
    value.map(|p| p.value).unwrap_or_default()
}
