//! # rawmail
//!
//! Assembles a raw email (or any text document) whose parts are referenced by
//! `filename="..."` markers into one flat JSON payload of the form
//! `{"Data": "..."}`, ready to hand to a raw-email send API.
//!
//! ## Features
//!
//! - Finds every `filename="<name>"` marker in the root document
//! - Replaces each marker with the literal contents of the named file
//! - No recursion: markers inside included files are left as they are
//! - Serializes the result as a single JSON line
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```no_run
//! use rawmail::{ExpandConfig, OutputRecord, expand};
//!
//! let document = "Hello filename=\"name.txt\"!";
//! let config = ExpandConfig::default();
//!
//! match expand(document, &config) {
//!     Ok(result) => print!("{}", OutputRecord::new(result).to_json_line().unwrap()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```
//!
//! ### As a CLI Tool
//!
//! ```bash
//! # Expand and print {"Data": "..."}
//! rawmail mail.txt
//!
//! # List the markers without reading anything
//! rawmail mail.txt --list
//! ```
//!
//! Marker payloads are opened as given. Do not feed documents from untrusted
//! sources: a marker can name any file the process can read.

pub mod error;
pub mod expand;
pub mod fs_utils;
pub mod output;

// Re-export main types and functions for convenience
pub use error::{RawmailError, Result};
pub use expand::{
    ExpandConfig, InclusionMarker, MARKER_PATTERN, expand, expand_file, expand_with,
    find_markers,
};
pub use fs_utils::{FileSource, FsSource};
pub use output::OutputRecord;
