use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An IO error occurred while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Could not parse {format} input at line {line_number} ('{snippet}'): {reason}")]
    Format {
        format: &'static str,
        line_number: usize,
        snippet: String,
        reason: String,
    },

    #[error("The tool {tool} failed: {message}")]
    ToolFailure { tool: String, message: String },

    #[error("The feature '{0}' is produced by more than one feature source.")]
    DuplicateFeature(String),

    #[error("The {search} search failed: {source}")]
    Search {
        search: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("The worker thread of the {0} search panicked.")]
    TaskPanicked(&'static str),
}

impl Error {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn io_at(action: &str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::io(format!("{action} {:?}", path.into()), source)
    }

    /// Strips all [`Error::Search`] wrappers.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Search { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
