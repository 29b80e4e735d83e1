use crate::error::Result;
use crate::fs_utils::{FileSource, FsSource, read_file_contents};
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Inclusion marker syntax: `filename="<name>"`, where `<name>` is at least one
/// character (newlines included) up to the next double quote.
pub const MARKER_PATTERN: &str = r#"(?s)filename="(.+?)""#;

/// Configuration for marker expansion
#[derive(Debug, Clone, Default)]
pub struct ExpandConfig {
    /// Directory relative marker payloads are resolved against.
    /// `None` resolves them against the process working directory.
    pub base_dir: Option<PathBuf>,
}

impl ExpandConfig {
    /// Filesystem read capability matching this configuration
    pub fn file_source(&self) -> FsSource {
        FsSource::new(self.base_dir.clone())
    }
}

/// An inclusion marker found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InclusionMarker {
    /// The full match, e.g. `filename="body.txt"`
    pub full_match: String,
    /// The captured payload, e.g. `body.txt`
    pub filename: String,
    /// Starting byte offset in the scanned document
    pub start: usize,
    /// Ending byte offset in the scanned document
    pub end: usize,
}

/// Finds all inclusion markers in the given text, left to right, non-overlapping
///
/// # Errors
///
/// Returns `RawmailError::Regex` if there's an error compiling the marker pattern.
pub fn find_markers(document: &str) -> Result<Vec<InclusionMarker>> {
    let pattern = Regex::new(MARKER_PATTERN)?;
    let mut markers = Vec::new();

    for capture in pattern.captures_iter(document) {
        if let Some(full_match) = capture.get(0)
            && let Some(name) = capture.get(1)
        {
            markers.push(InclusionMarker {
                full_match: full_match.as_str().to_string(),
                filename: name.as_str().to_string(),
                start: full_match.start(),
                end: full_match.end(),
            });
        }
    }

    Ok(markers)
}

/// Expands every marker of `document` with contents read through `source`.
///
/// The document is scanned once. Each marker found triggers its own read, so a
/// marker repeated three times is read three times, and then every occurrence
/// of the marker's exact text in the working copy is replaced with what was
/// read. Text inserted by a replacement is never scanned for markers, though a
/// later marker's replacement still applies to it.
///
/// # Errors
///
/// The first failing read aborts the expansion; no partial result is returned.
pub fn expand_with<S: FileSource + ?Sized>(document: &str, source: &S) -> Result<String> {
    let markers = find_markers(document)?;

    let mut replacements = Vec::with_capacity(markers.len());
    for marker in &markers {
        debug!(
            marker = %marker.full_match,
            start = marker.start,
            end = marker.end,
            "resolving marker"
        );
        let contents = source.read_to_string(&marker.filename)?;
        replacements.push((marker.full_match.as_str(), contents));
    }

    let expanded = replacements
        .into_iter()
        .fold(document.to_string(), |current, (marker, contents)| {
            current.replace(marker, &contents)
        });

    info!(
        markers = markers.len(),
        input_bytes = document.len(),
        output_bytes = expanded.len(),
        "expansion complete"
    );
    Ok(expanded)
}

/// Expands a document, reading referenced files from the filesystem
///
/// # Errors
///
/// - `RawmailError::FileNotFound` if a referenced file doesn't exist.
/// - `RawmailError::Read` if a referenced file can't be read as text.
pub fn expand(document: &str, config: &ExpandConfig) -> Result<String> {
    expand_with(document, &config.file_source())
}

/// Loads a root document from disk and expands it
///
/// The root document path is taken as given; `config.base_dir` only applies to
/// marker payloads.
///
/// # Errors
///
/// - `RawmailError::FileNotFound` if the root document or a referenced file doesn't exist.
/// - Other errors from `read_file_contents` or `expand`.
pub fn expand_file(path: &Path, config: &ExpandConfig) -> Result<String> {
    let document = read_file_contents(path)?;
    expand(&document, config)
}
