//! Indexer type definitions.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::MatcherError;

#[derive(Error, Debug)]
pub enum IndexerError {
    /// A scan root that does not exist
    #[error("Input path '{}' doesn't exist", path.display())]
    InputPathInvalid { path: PathBuf },

    /// A scan root that is neither a regular file nor a directory
    #[error("Input path '{}' is neither a file nor a directory", path.display())]
    UnsupportedFileType { path: PathBuf },

    #[error("Can't read '{}': {source}", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Matcher(#[from] MatcherError),
}

/// Counters collected over one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    /// Text files whose contents were searched
    pub files_scanned: usize,
    pub binary_skipped: usize,
    /// Candidate strings handed to the sink, duplicates included
    pub candidates: usize,
}
