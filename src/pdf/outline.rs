//! Table of contents model, flattening and coordinate spaces

use crate::error::Result;
use std::path::Path;

/// A location inside a document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Destination {
    /// Page number (1-indexed)
    pub page: u32,
    pub x: f32,
    pub y: f32,
}

/// Where a bookmark points, in PDF page space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutlineTarget {
    /// Page number (1-indexed)
    pub page: u32,
    pub x: f32,
    pub y: f32,
    /// Unrotated crop box of the target page, needed for the MuPDF transform
    pub crop_box: Option<PageBox>,
}

/// Page crop box edges in PDF user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub left: f32,
    pub bottom: f32,
    pub top: f32,
}

impl PageBox {
    /// Box of a `height` tall page with its origin at (0, 0)
    pub fn with_height(height: f32) -> Self {
        Self {
            left: 0.0,
            bottom: 0.0,
            top: height,
        }
    }
}

/// Outline tree node (bookmark) as read from the document
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineNode {
    pub title: String,
    pub target: Option<OutlineTarget>,
    pub children: Vec<OutlineNode>,
}

/// Flattened outline entry offered to the selector
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub title: String,
    /// Nesting depth, 1 for top-level entries
    pub level: usize,
    pub destination: Option<Destination>,
}

impl OutlineEntry {
    /// Title indented by its nesting level
    pub fn display(&self) -> String {
        format!("{}{}", "  ".repeat(self.level.saturating_sub(1)), self.title)
    }
}

/// Coordinate space destinations are reported in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateSpace {
    /// Default PDF user space: origin bottom-left, y grows upwards
    #[default]
    Pdf,
    /// MuPDF space: origin top-left, y grows downwards
    Mupdf,
}

impl OutlineTarget {
    /// Resolve this target into a destination in `space`.
    ///
    /// MuPDF space is relative to the top-left corner of the crop box. Without
    /// a crop box the PDF coordinates are passed through unchanged.
    pub fn destination(&self, space: CoordinateSpace) -> Destination {
        let (x, y) = match (space, self.crop_box) {
            (CoordinateSpace::Mupdf, Some(crop)) => (self.x - crop.left, crop.top - self.y),
            (CoordinateSpace::Mupdf, None) | (CoordinateSpace::Pdf, _) => (self.x, self.y),
        };
        Destination {
            page: self.page,
            x,
            y,
        }
    }
}

/// Read-only access to a document's outline
pub trait OutlineSource {
    /// Open `path` and return its outline tree, `None` if it has none.
    fn read_outline(&self, path: &Path) -> Result<Option<Vec<OutlineNode>>>;
}

/// Flatten an outline tree depth-first, in document order.
pub fn flatten_outline(nodes: &[OutlineNode], space: CoordinateSpace) -> Vec<OutlineEntry> {
    let mut entries = Vec::new();
    collect_entries(nodes, 1, space, &mut entries);
    entries
}

fn collect_entries(
    nodes: &[OutlineNode],
    level: usize,
    space: CoordinateSpace,
    entries: &mut Vec<OutlineEntry>,
) {
    for node in nodes {
        entries.push(OutlineEntry {
            title: node.title.clone(),
            level,
            destination: node.target.map(|t| t.destination(space)),
        });
        collect_entries(&node.children, level + 1, space, entries);
    }
}

/// Read and flatten the outline of `path`.
///
/// A missing outline and a failed read both yield an empty list.
pub fn read_entries<S: OutlineSource + ?Sized>(
    source: &S,
    path: &Path,
    space: CoordinateSpace,
) -> Vec<OutlineEntry> {
    match source.read_outline(path) {
        Ok(Some(nodes)) => flatten_outline(&nodes, space),
        Ok(None) => {
            tracing::info!(path = %path.display(), "document has no outline");
            Vec::new()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "could not read outline");
            Vec::new()
        }
    }
}
