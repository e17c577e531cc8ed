//! Stylesheet reading and writing

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Where transformed text goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Overwrite the input file
    InPlace,
    /// Write to another file
    Path(PathBuf),
    /// Print to standard output
    Stdout,
}

impl Output {
    /// Destination file for `input`, or `None` when printing
    pub fn target<'a>(&'a self, input: &'a Path) -> Option<&'a Path> {
        match self {
            Output::InPlace => Some(input),
            Output::Path(path) => Some(path),
            Output::Stdout => None,
        }
    }
}

pub fn read_stylesheet(path: &Path) -> CliResult<String> {
    log::info!("Reading stylesheet: {}", path.display());
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_stylesheet(path: &Path, text: &str) -> CliResult<()> {
    log::info!("Writing stylesheet: {}", path.display());
    fs::write(path, text).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}
