//! Command line interface

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

const EPILOG: &str = "\
example usage:
    # Use rofi as the selector with custom prompts
    pdf-picker -s 'rofi -dmenu -i -format i' -psa='-p PDF' -tsa='-p TOC'

    # Use fuzzel as a selector and sioyek as the pdf viewer
    # Also show full paths and only search within the Documents directory
    pdf-picker -f -b ~/Documents \\
        -s 'fuzzel -d --counter --index -w 100' \\
        -p 'sioyek' -mc -pa '--page $page --xloc $xloc --yloc $yloc'

Have fun reading! :D";

/// Interactively open a PDF file, optionally at a specific TOC entry.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "pdf-picker", version, after_help = EPILOG)]
pub struct Cli {
    /// Show full paths of the pdf files during selection
    #[arg(short = 'f', long)]
    pub full_path: bool,

    /// Never ask for the preferred table of contents entry [short: -nt]
    #[arg(long)]
    pub no_toc: bool,

    /// Also search for hidden files (ignored with --search-cmd) [short: -hi]
    #[arg(long)]
    pub hidden: bool,

    /// Base directory for searching pdf files [default: home directory]
    #[arg(short = 'b', long, value_name = "DIR")]
    pub base_directory: Option<PathBuf>,

    /// Command to launch for selecting items. It needs to print the index
    /// of the selection, not the selection itself; otherwise see
    /// --selector-indices [default: fzf]
    #[arg(short = 's', long, value_name = "CMD", allow_hyphen_values = true)]
    pub selector: Option<String>,

    /// Precede selection items by their indices and read the index back
    /// from the selected line [short: -si]
    #[arg(long)]
    pub selector_indices: bool,

    /// Additional arguments for the selector during pdf selection [short: -psa]
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub pdf_selector_args: Option<String>,

    /// Additional arguments for the selector during toc entry selection [short: -tsa]
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub toc_selector_args: Option<String>,

    /// Command to launch for viewing pdf files [default: zathura]
    #[arg(short = 'p', long, value_name = "CMD", allow_hyphen_values = true)]
    pub pdf_viewer: Option<String>,

    /// Arguments for opening the viewer at a position; '$page', '$xloc' and
    /// '$yloc' are replaced accordingly [short: -pa]
    #[arg(long, value_name = "ARGS", allow_hyphen_values = true)]
    pub pdf_viewer_args: Option<String>,

    /// Pass coordinates in mupdf coordinate space instead of the default
    /// pdf coordinate space [short: -mc]
    #[arg(long)]
    pub mupdf_coordinate_space: bool,

    /// Command to launch for searching pdf files (overrides
    /// --base-directory and --hidden)
    #[arg(long, value_name = "CMD", allow_hyphen_values = true)]
    pub search_cmd: Option<String>,

    /// Config file [default: <config dir>/pdf-picker/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Do not show fatal errors as desktop notifications
    #[arg(long)]
    pub no_notify: bool,
}

/// Multi-letter single-dash spellings and their long forms
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-nt", "--no-toc"),
    ("-hi", "--hidden"),
    ("-si", "--selector-indices"),
    ("-psa", "--pdf-selector-args"),
    ("-tsa", "--toc-selector-args"),
    ("-pa", "--pdf-viewer-args"),
    ("-mc", "--mupdf-coordinate-space"),
];

/// Options followed by a separate value token
const VALUE_FLAGS: &[&str] = &[
    "-b",
    "--base-directory",
    "-s",
    "--selector",
    "-p",
    "--pdf-viewer",
    "--pdf-selector-args",
    "--toc-selector-args",
    "--pdf-viewer-args",
    "--search-cmd",
    "--config",
];

fn rewrite_legacy(arg: &str) -> Option<String> {
    LEGACY_FLAGS.iter().find_map(|(short, long)| {
        if arg == *short {
            Some(long.to_string())
        } else {
            arg.strip_prefix(short)
                .and_then(|rest| rest.strip_prefix('='))
                .map(|value| format!("{}={}", long, value))
        }
    })
}

/// Rewrite multi-letter short flags (`-nt`, `-psa=...`) to their long
/// forms so clap can parse them. The first element is the program name.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut expect_value = false;
    let mut positional_only = false;

    for (position, arg) in args.into_iter().map(Into::into).enumerate() {
        if position == 0 || expect_value || positional_only {
            expect_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };
        if text == "--" {
            positional_only = true;
            normalized.push(arg);
            continue;
        }

        let rewritten = rewrite_legacy(text).unwrap_or_else(|| text.to_string());
        expect_value = VALUE_FLAGS.contains(&rewritten.as_str());
        normalized.push(OsString::from(rewritten));
    }

    normalized
}

impl Cli {
    /// Parse the process arguments, accepting the legacy short flags.
    pub fn parse_args() -> Self {
        Self::parse_from(normalize_args(std::env::args_os()))
    }
}
