//! Configuration: built-in defaults, optional config file, command line.
//!
//! Everything is resolved once into a [`PickerConfig`] which is then passed
//! explicitly to each step. Command strings are split into words here.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::pdf::CoordinateSpace;
use crate::selector::{SelectionMode, Selector};

const CONFIG_FILE: &str = "pdf-picker/config.toml";
const DEFAULT_SELECTOR: &str = "fzf --with-nth 2..";
const DEFAULT_VIEWER: &str = "zathura";
const DEFAULT_VIEWER_ARGS: &str = "-P $page";

/// Where and how to look for PDF files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Custom search command; overrides `base_directory` and `hidden`
    pub command: Option<Vec<String>>,
    pub base_directory: PathBuf,
    pub hidden: bool,
}

/// Selector used for both selection steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorConfig {
    pub selector: Selector,
    /// Extra arguments for the PDF selection
    pub pdf_args: Vec<String>,
    /// Extra arguments for the TOC entry selection
    pub toc_args: Vec<String>,
}

impl SelectorConfig {
    pub fn pdf_selector(&self) -> Selector {
        self.selector.with_args(&self.pdf_args)
    }

    pub fn toc_selector(&self) -> Selector {
        self.selector.with_args(&self.toc_args)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub command: Vec<String>,
    /// Arguments that may contain `$page`, `$xloc` and `$yloc`
    pub position_args: Vec<String>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct PickerConfig {
    pub search: SearchConfig,
    pub selector: SelectorConfig,
    pub viewer: ViewerConfig,
    /// Show full paths instead of file names
    pub full_path: bool,
    /// Ask for a TOC entry
    pub toc: bool,
    pub coordinate_space: CoordinateSpace,
}

/// Contents of the config file; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub search: FileSearch,
    #[serde(default)]
    pub selector: FileSelector,
    #[serde(default)]
    pub viewer: FileViewer,
    #[serde(default)]
    pub display: FileDisplay,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSearch {
    pub command: Option<String>,
    pub base_directory: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSelector {
    pub command: Option<String>,
    #[serde(default)]
    pub indices: bool,
    pub pdf_args: Option<String>,
    pub toc_args: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileViewer {
    pub command: Option<String>,
    pub args: Option<String>,
    #[serde(default)]
    pub mupdf_coordinate_space: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileDisplay {
    #[serde(default)]
    pub full_path: bool,
    #[serde(default = "default_true")]
    pub toc: bool,
}

impl Default for FileDisplay {
    fn default() -> Self {
        Self {
            full_path: false,
            toc: true,
        }
    }
}

fn default_true() -> bool {
    true
}

impl FileConfig {
    /// Load the config file.
    ///
    /// An explicit path must exist; the default location is optional.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path),
                None => Ok(Self::default()),
            },
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let config_error = |reason: String| Error::Config {
            path: path.display().to_string(),
            reason,
        };
        let data = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config = toml::from_str(&data).map_err(|e| config_error(e.to_string()))?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs_next::config_dir().map(|base| base.join(CONFIG_FILE))
}

/// Split a command string into words with shell quoting rules.
pub fn split_command(command: &str) -> Result<Vec<String>> {
    shlex::split(command).ok_or_else(|| Error::InvalidCommand {
        command: command.to_string(),
    })
}

fn split_required(command: &str, role: &'static str) -> Result<Vec<String>> {
    let argv = split_command(command)?;
    if argv.is_empty() {
        return Err(Error::EmptyCommand { role });
    }
    Ok(argv)
}

fn split_optional(command: Option<&str>) -> Result<Vec<String>> {
    command.map(split_command).transpose().map(Option::unwrap_or_default)
}

fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest),
        _ if path == "~" => home.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    }
}

impl PickerConfig {
    /// Resolve settings from the command line over the config file.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        Self::resolve_with_home(cli, file, dirs_next::home_dir())
    }

    fn resolve_with_home(cli: &Cli, file: FileConfig, home: Option<PathBuf>) -> Result<Self> {
        let search_command = cli
            .search_cmd
            .as_deref()
            .or(file.search.command.as_deref())
            .map(|c| split_required(c, "search"))
            .transpose()?;

        let base_directory = match (&cli.base_directory, &file.search.base_directory) {
            (Some(dir), _) => dir.clone(),
            (None, Some(dir)) => expand_home(dir, home.as_deref()),
            // Only the default search needs a root
            (None, None) if search_command.is_some() => PathBuf::from("."),
            (None, None) => home.ok_or(Error::NoHomeDirectory)?,
        };

        let selector = match cli.selector.as_deref().or(file.selector.command.as_deref()) {
            Some(command) => {
                let mode = if cli.selector_indices || file.selector.indices {
                    SelectionMode::IndexPrefixed
                } else {
                    SelectionMode::Direct
                };
                Selector::new(split_required(command, "selector")?, mode)
            }
            // fzf prints the chosen line, so the default needs index prefixes
            None => Selector::new(split_command(DEFAULT_SELECTOR)?, SelectionMode::IndexPrefixed),
        };

        let viewer_args = cli
            .pdf_viewer_args
            .as_deref()
            .or(file.viewer.args.as_deref());
        let viewer = match cli.pdf_viewer.as_deref().or(file.viewer.command.as_deref()) {
            Some(command) => ViewerConfig {
                command: split_required(command, "viewer")?,
                position_args: split_optional(viewer_args)?,
            },
            None => ViewerConfig {
                command: split_command(DEFAULT_VIEWER)?,
                position_args: split_command(viewer_args.unwrap_or(DEFAULT_VIEWER_ARGS))?,
            },
        };

        let coordinate_space = if cli.mupdf_coordinate_space || file.viewer.mupdf_coordinate_space {
            CoordinateSpace::Mupdf
        } else {
            CoordinateSpace::Pdf
        };

        Ok(Self {
            search: SearchConfig {
                command: search_command,
                base_directory,
                hidden: cli.hidden || file.search.hidden,
            },
            selector: SelectorConfig {
                selector,
                pdf_args: split_optional(
                    cli.pdf_selector_args
                        .as_deref()
                        .or(file.selector.pdf_args.as_deref()),
                )?,
                toc_args: split_optional(
                    cli.toc_selector_args
                        .as_deref()
                        .or(file.selector.toc_args.as_deref()),
                )?,
            },
            viewer,
            full_path: cli.full_path || file.display.full_path,
            toc: !cli.no_toc && file.display.toc,
            coordinate_space,
        })
    }
}
