//! pdf-picker library
//!
//! Interactively open a PDF file, optionally at a table of contents entry:
//! - `search`: find PDF files with `fd`, `find` or a custom command
//! - `selector`: pick an item through an external menu program
//! - `pdf`: read and flatten the document outline
//! - `viewer`: launch the viewer at the chosen destination

pub mod cli;
pub mod config;
pub mod error;
pub mod pdf;
pub mod picker;
pub mod process;
pub mod search;
pub mod selector;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use cli::Cli;
pub use config::{FileConfig, PickerConfig};
pub use error::{Error, Result};
pub use picker::{Outcome, Picker};

use pdf::PdfiumOutlineReader;
use process::SystemRunner;

/// Resolve configuration for `cli` and run the flow with real processes.
pub fn run(cli: &Cli) -> Result<Outcome> {
    let file = FileConfig::load(cli.config.as_deref())?;
    let config = PickerConfig::resolve(cli, file)?;
    tracing::debug!(?config, "resolved configuration");

    Picker::new(&config, &SystemRunner, &PdfiumOutlineReader).run()
}
