//! Wrappers around the external search binaries.
//!
//! Each wrapper runs its binary synchronously inside a private temporary directory and returns the raw text output.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
    time::Instant,
};

use log::{debug, info};
use tempfile::TempDir;

use crate::error::{Error, Result};

pub use hhblits::HHBlits;
pub use hhsearch::HHSearch;
pub use jackhmmer::Jackhmmer;

mod hhblits;
mod hhsearch;
mod jackhmmer;


/// The number of trailing characters of stderr that are kept in error messages.
const STDERR_TAIL_LENGTH: usize = 2000;

/// A tool that searches a sequence database with a query and reports an alignment.
pub trait MsaSearchTool: Send + Sync {
    fn name(&self) -> &str;

    /// Searches with the single sequence in the given fasta file and returns the raw alignment text.
    fn query(&self, input_fasta_path: &Path) -> Result<String>;
}

/// A tool that searches a template database with an A3M alignment and reports a hit list.
pub trait TemplateSearchTool: Send + Sync {
    fn name(&self) -> &str;

    /// Searches with the given A3M alignment and returns the raw hit report.
    fn query(&self, a3m: &str) -> Result<String>;
}

fn tool_failure(tool: &str, message: impl Into<String>) -> Error {
    Error::ToolFailure {
        tool: tool.to_string(),
        message: message.into(),
    }
}

fn create_temporary_directory(tool: &str) -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(&format!("{tool}-"))
        .tempdir()
        .map_err(|error| Error::io(format!("creating a temporary directory for {tool}"), error))
}

/// Runs the command to completion and fails if it does not exit successfully.
fn run_command(tool: &str, mut command: Command) -> Result<()> {
    debug!("Launching {tool}: {command:?}");
    let start = Instant::now();

    let output = command
        .output()
        .map_err(|error| tool_failure(tool, format!("could not be started: {error}")))?;

    info!(
        "Finished {tool} query in {:.3} seconds",
        start.elapsed().as_secs_f64()
    );

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        let tail_start = stderr
            .char_indices()
            .rev()
            .nth(STDERR_TAIL_LENGTH)
            .map_or(0, |(index, _)| index);
        return Err(tool_failure(
            tool,
            format!("{}; stderr: {}", output.status, &stderr[tail_start..]),
        ));
    }

    Ok(())
}

fn read_tool_output(tool: &str, path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|error| tool_failure(tool, format!("could not read output {path:?}: {error}")))
}

/// Checks that an HH-suite database exists, which is stored as a set of files `<prefix>_*`.
fn check_hh_database(tool: &str, database_path: &Path) -> Result<()> {
    let missing = || Error::Input(format!("{tool} could not find database {database_path:?}"));
    let prefix = database_path
        .file_name()
        .map(|name| format!("{}_", name.to_string_lossy()))
        .ok_or_else(missing)?;
    let directory = match database_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let exists = fs::read_dir(&directory)
        .map_err(|_| missing())?
        .filter_map(|entry| entry.ok())
        .any(|entry| entry.file_name().to_string_lossy().starts_with(&prefix));

    if exists { Ok(()) } else { Err(missing()) }
}
