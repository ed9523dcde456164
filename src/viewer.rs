//! Launching the PDF viewer

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::pdf::Destination;
use crate::process::CommandRunner;

const PAGE_PLACEHOLDER: &str = "$page";
const XLOC_PLACEHOLDER: &str = "$xloc";
const YLOC_PLACEHOLDER: &str = "$yloc";

/// Render a coordinate in plain decimal notation, keeping a fractional part.
fn format_coordinate(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Build the full viewer command line.
///
/// Position arguments are only passed when there is a destination, so the
/// viewer never sees unresolved placeholders. The file path comes last.
pub fn viewer_command(
    viewer: &ViewerConfig,
    path: &str,
    destination: Option<&Destination>,
) -> Vec<String> {
    let mut argv = viewer.command.clone();

    if let Some(dest) = destination {
        let page = dest.page.to_string();
        let x = format_coordinate(dest.x);
        let y = format_coordinate(dest.y);
        argv.extend(viewer.position_args.iter().map(|arg| {
            arg.replace(PAGE_PLACEHOLDER, &page)
                .replace(XLOC_PLACEHOLDER, &x)
                .replace(YLOC_PLACEHOLDER, &y)
        }));
    }

    argv.push(path.to_string());
    argv
}

/// Start the viewer on `path` and return without waiting for it.
pub fn open_pdf<R: CommandRunner + ?Sized>(
    runner: &R,
    viewer: &ViewerConfig,
    path: &str,
    destination: Option<&Destination>,
) -> Result<()> {
    let argv = viewer_command(viewer, path, destination);
    tracing::info!(path, ?destination, "opening PDF");
    runner.spawn_detached(&argv)
}
