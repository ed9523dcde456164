//! PDF discovery through an external search command

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::process::{CommandOutput, CommandRunner};
use std::path::Path;

/// A discovered PDF file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfCandidate {
    pub path: String,
}

impl PdfCandidate {
    /// Label shown in the selector: the full path or only the file name
    pub fn display(&self, full_path: bool) -> &str {
        if full_path {
            &self.path
        } else {
            self.path.rsplit('/').next().unwrap_or(&self.path)
        }
    }
}

fn fd_command(base: &Path, hidden: bool) -> Vec<String> {
    let mut argv: Vec<String> = ["fd", "-I", "-t", "f", "-e", "pdf", "-a", "."]
        .iter()
        .map(|s| s.to_string())
        .collect();
    argv.push(base.display().to_string());
    if hidden {
        argv.push("-H".to_string());
    }
    argv
}

fn find_command(base: &Path, hidden: bool) -> Vec<String> {
    let base = base.display().to_string();
    let mut argv = vec!["find".to_string(), base.clone()];
    if !hidden {
        // Prune dot-entries below the base, never the base itself
        argv.extend(
            ["(", "-name", ".*", "!", "-path", base.as_str(), ")", "-prune", "-o"]
                .iter()
                .map(|s| s.to_string()),
        );
    }
    argv.extend(["-type", "f", "-name", "*.pdf"].iter().map(|s| s.to_string()));
    if !hidden {
        argv.push("-print".to_string());
    }
    argv
}

/// Search for PDF files.
///
/// A configured search command is run as is. Otherwise `fd` searches the
/// base directory, falling back to `find` when `fd` is not installed.
pub fn discover_pdfs<R: CommandRunner + ?Sized>(
    runner: &R,
    config: &SearchConfig,
) -> Result<Vec<PdfCandidate>> {
    let (argv, output) = match &config.command {
        Some(argv) => (argv.clone(), runner.run(argv, None)?),
        None => default_search(runner, &config.base_directory, config.hidden)?,
    };

    let command = argv.join(" ");
    if !output.success {
        return Err(Error::SearchFailed {
            command,
            status: output.status_text(),
        });
    }

    let candidates = split_paths(&output.stdout);
    tracing::info!(count = candidates.len(), command = %command, "found PDFs");
    if candidates.is_empty() {
        return Err(Error::NoPdfsFound { command });
    }
    Ok(candidates)
}

fn default_search<R: CommandRunner + ?Sized>(
    runner: &R,
    base: &Path,
    hidden: bool,
) -> Result<(Vec<String>, CommandOutput)> {
    let fd = fd_command(base, hidden);
    match runner.run(&fd, None) {
        Err(Error::CommandNotFound { .. }) => {
            tracing::debug!("fd not found, falling back to find");
        }
        other => return other.map(|output| (fd, output)),
    }

    let find = find_command(base, hidden);
    match runner.run(&find, None) {
        Err(Error::CommandNotFound { .. }) => Err(Error::NoSearchTool),
        other => other.map(|output| (find, output)),
    }
}

/// Split newline separated paths, dropping trailing empty lines.
fn split_paths(stdout: &str) -> Vec<PdfCandidate> {
    let mut lines: Vec<&str> = stdout.split('\n').collect();
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
        .into_iter()
        .map(|path| PdfCandidate {
            path: path.to_string(),
        })
        .collect()
}
