//! PDF outline layer
//!
//! This module reads a document's table of contents using PDFium and
//! flattens it into selectable entries.

mod outline;
mod reader;

pub use outline::{
    flatten_outline, read_entries, CoordinateSpace, Destination, OutlineEntry, OutlineNode,
    OutlineSource, OutlineTarget, PageBox,
};
pub use reader::PdfiumOutlineReader;
