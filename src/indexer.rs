//! Source tree scanning: file walking, binary detection and string extraction.
/// Lexical extraction of candidate strings
pub mod extractor;
/// Indexer type definitions
pub mod types;
/// Scan root walker
pub mod workspace;

pub use extractor::{
    DEFAULT_BINARY_SAMPLE_SIZE,
    extract_candidates,
    looks_binary,
};
pub use types::{
    IndexerError,
    ScanStats,
};
pub use workspace::SourceWalker;
