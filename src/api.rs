//! Library API for deckmap.
//!
//! The CLI commands print and return exit codes; these functions return
//! `Result`s for callers that embed deckmap.
//!
//! # Example
//!
//! ```no_run
//! use deckmap::analyze_file;
//! use std::path::Path;
//!
//! let summary = analyze_file(Path::new("kong.yaml"))?;
//! println!("{} services, {} routes", summary.service_count, summary.route_count);
//! for plugin in &summary.plugins {
//!     println!("{}", plugin);
//! }
//! # Ok::<(), deckmap::DeckError>(())
//! ```

use crate::analysis::{Summary, summarize};
use crate::config::{Config, ConfigError};
use crate::diff::{ConfigDiff, DiffError, diff_documents, file_label};
use crate::graph::ConfigGraph;
use crate::model::{ConfigDocument, ParseError};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during deckmap operations.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The specified file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// IO error while reading a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a usable configuration document.
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    /// One side of a comparison failed to parse.
    #[error(transparent)]
    Diff(#[from] DiffError),

    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

fn read(path: &Path) -> Result<String, DeckError> {
    if !path.exists() {
        return Err(DeckError::FileNotFound(path.to_path_buf()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Read and parse a decK dump.
///
/// # Example
///
/// ```no_run
/// use deckmap::load_document;
/// use std::path::Path;
///
/// let doc = load_document(Path::new("kong.yaml"))?;
/// for service in &doc.services {
///     println!("{} ({} routes)", service.name, service.routes.len());
/// }
/// # Ok::<(), deckmap::DeckError>(())
/// ```
pub fn load_document(path: &Path) -> Result<ConfigDocument, DeckError> {
    let content = read(path)?;
    ConfigDocument::parse(&content).map_err(|source| DeckError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Count entities and list every plugin with its scope.
pub fn analyze_file(path: &Path) -> Result<Summary, DeckError> {
    Ok(summarize(&load_document(path)?))
}

/// Build the service/route/plugin graph of a file.
///
/// # Example
///
/// ```no_run
/// use deckmap::{MermaidOptions, graph_file, render_mermaid};
/// use std::path::Path;
///
/// let graph = graph_file(Path::new("kong.yaml"))?;
/// println!("{}", render_mermaid(&graph, &MermaidOptions::default()));
/// # Ok::<(), deckmap::DeckError>(())
/// ```
pub fn graph_file(path: &Path) -> Result<ConfigGraph, DeckError> {
    Ok(ConfigGraph::build(&load_document(path)?))
}

/// Compare two files by content, ignoring key order.
///
/// The files are labeled by their base names. Either side failing to parse is an
/// error and no diff is produced.
pub fn diff_files(old: &Path, new: &Path) -> Result<ConfigDiff, DeckError> {
    let old_content = read(old)?;
    let new_content = read(new)?;
    Ok(diff_documents(
        &file_label(old),
        &old_content,
        &file_label(new),
        &new_content,
    )?)
}

/// Load `.deckmap.toml` from `dir`, or defaults when the file is absent.
pub fn load_config(dir: &Path) -> Result<Config, DeckError> {
    Ok(Config::load(dir)?)
}
