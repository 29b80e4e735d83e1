use crate::error::{RawmailError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read capability handed to the expander.
///
/// Every call must hit the backing store; implementations must not cache.
pub trait FileSource {
    /// Returns the full text of the file named by a marker payload.
    ///
    /// # Errors
    ///
    /// - `RawmailError::FileNotFound` if nothing exists under `name`.
    /// - `RawmailError::Read` for any other open or read failure.
    fn read_to_string(&self, name: &str) -> Result<String>;
}

/// Reads marker payloads from the local filesystem
#[derive(Debug, Clone, Default)]
pub struct FsSource {
    /// Directory relative payloads are joined onto; `None` means the process working directory
    pub base_dir: Option<PathBuf>,
}

impl FsSource {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }
}

impl FileSource for FsSource {
    fn read_to_string(&self, name: &str) -> Result<String> {
        let path = resolve_marker_path(name, self.base_dir.as_deref());
        read_file_contents(&path)
    }
}

/// Reads the contents of a file at the given path
///
/// The file handle is scoped to this call and released on both success and failure.
///
/// # Errors
///
/// - `RawmailError::FileNotFound` if the path doesn't exist.
/// - `RawmailError::Read` if the file can't be opened or isn't valid UTF-8 text.
pub fn read_file_contents(path: &Path) -> Result<String> {
    let contents =
        fs::read_to_string(path).map_err(|source| RawmailError::from_read(path, source))?;
    debug!(path = %path.display(), bytes = contents.len(), "read file");
    Ok(contents)
}

/// Turns a marker payload into a path.
///
/// The payload is used verbatim: no normalisation and no containment check, so
/// `../` and absolute paths pass straight through. With a base directory,
/// relative payloads are joined onto it and absolute ones replace it.
pub fn resolve_marker_path(name: &str, base_dir: Option<&Path>) -> PathBuf {
    match base_dir {
        Some(base) => base.join(name),
        None => PathBuf::from(name),
    }
}
