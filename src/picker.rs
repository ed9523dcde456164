//! The pick-and-open flow: search, select a file, select a TOC entry, view.

use std::path::Path;

use crate::config::PickerConfig;
use crate::error::Result;
use crate::pdf::{read_entries, Destination, OutlineEntry, OutlineSource};
use crate::process::CommandRunner;
use crate::search::discover_pdfs;
use crate::viewer::open_pdf;

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// No PDF was selected; nothing was opened
    Cancelled,
    /// The viewer was launched
    Opened {
        path: String,
        destination: Option<Destination>,
    },
}

/// Runs the four steps with the given process runner and outline source
pub struct Picker<'a, R: ?Sized, O: ?Sized> {
    config: &'a PickerConfig,
    runner: &'a R,
    outlines: &'a O,
}

impl<'a, R, O> Picker<'a, R, O>
where
    R: CommandRunner + ?Sized,
    O: OutlineSource + ?Sized,
{
    pub fn new(config: &'a PickerConfig, runner: &'a R, outlines: &'a O) -> Self {
        Self {
            config,
            runner,
            outlines,
        }
    }

    pub fn run(&self) -> Result<Outcome> {
        let candidates = discover_pdfs(self.runner, &self.config.search)?;

        let items: Vec<String> = candidates
            .iter()
            .map(|c| c.display(self.config.full_path).to_string())
            .collect();
        let Some(index) = self
            .config
            .selector
            .pdf_selector()
            .select(self.runner, &items)?
        else {
            tracing::info!("no PDF selected");
            return Ok(Outcome::Cancelled);
        };
        let path = candidates[index].path.clone();

        let destination = if self.config.toc {
            self.choose_destination(&path)?
        } else {
            None
        };

        open_pdf(self.runner, &self.config.viewer, &path, destination.as_ref())?;
        Ok(Outcome::Opened { path, destination })
    }

    /// Ask for a TOC entry of `path`.
    ///
    /// No outline, a cancelled selection or an entry without a target all
    /// mean opening the document without a destination.
    fn choose_destination(&self, path: &str) -> Result<Option<Destination>> {
        let entries = read_entries(self.outlines, Path::new(path), self.config.coordinate_space);
        if entries.is_empty() {
            return Ok(None);
        }

        let items: Vec<String> = entries.iter().map(OutlineEntry::display).collect();
        let choice = self
            .config
            .selector
            .toc_selector()
            .select(self.runner, &items)?;

        Ok(choice.and_then(|i| entries[i].destination))
    }
}
