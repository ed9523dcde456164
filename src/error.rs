//! Error types for pdf-picker

use thiserror::Error;

/// Result type alias for pdf-picker
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for pdf-picker
///
/// Cancelling a selection is not an error; see [`crate::Outcome`].
#[derive(Error, Debug)]
pub enum Error {
    /// External program is not on the search path
    #[error("Command not found: {program}")]
    CommandNotFound { program: String },

    /// A configured command line has no program in it
    #[error("Empty {role} command")]
    EmptyCommand { role: &'static str },

    /// A configured command line could not be split into words
    #[error("Invalid command line: {command}")]
    InvalidCommand { command: String },

    /// External program exists but could not be started
    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Neither `fd` nor `find` is available
    #[error("No search tool found (tried `fd` and `find`)")]
    NoSearchTool,

    /// Search command exited unsuccessfully
    #[error("Search command `{command}` failed ({status})")]
    SearchFailed { command: String, status: String },

    /// Search produced no candidates
    #[error("No PDF files found by `{command}`")]
    NoPdfsFound { command: String },

    /// Home directory could not be determined for the default search root
    #[error("Could not determine the home directory")]
    NoHomeDirectory,

    /// Selector printed something that is not an item index
    #[error("Malformed selector output: {output:?}")]
    MalformedSelection { output: String },

    /// Selector printed an index past the end of the item list
    #[error("Selected index {index} out of range (items: {count})")]
    SelectionOutOfRange { index: usize, count: usize },

    /// PDFium error
    #[error("PDFium error: {reason}")]
    Pdfium { reason: String },

    /// Config file could not be read or parsed
    #[error("Invalid config file {path}: {reason}")]
    Config { path: String, reason: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the selector misbehaved, as opposed to the environment.
    pub fn is_malformed_selection(&self) -> bool {
        matches!(
            self,
            Error::MalformedSelection { .. } | Error::SelectionOutOfRange { .. }
        )
    }
}
