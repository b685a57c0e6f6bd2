//! Walks scan roots and feeds every candidate string to a sink.
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use crate::config::{
    FileMatcher,
    I18nSettings,
};
use crate::indexer::extractor::{
    extract_candidates,
    looks_binary,
};
use crate::indexer::types::{
    IndexerError,
    ScanStats,
};

/// Scans files and directory trees for translatable strings.
#[derive(Debug)]
pub struct SourceWalker<'a> {
    settings: &'a I18nSettings,
}

impl<'a> SourceWalker<'a> {
    #[must_use]
    pub const fn new(settings: &'a I18nSettings) -> Self {
        Self { settings }
    }

    /// Scans every root in order, passing each candidate to `sink`.
    ///
    /// A file root is read as is. A directory root is walked recursively in
    /// file name order, keeping the files selected by the include and exclude
    /// patterns. Binary-looking files are skipped.
    ///
    /// The first error stops the scan; candidates already passed to `sink`
    /// are not taken back.
    ///
    /// # Errors
    /// - A root does not exist or is neither a file nor a directory
    /// - A file or directory cannot be read
    /// - The configured patterns do not compile
    pub fn scan<F>(&self, roots: &[PathBuf], mut sink: F) -> Result<ScanStats, IndexerError>
    where
        F: FnMut(&str),
    {
        let mut stats = ScanStats::default();
        for root in roots {
            self.scan_root(root, &mut sink, &mut stats)?;
        }

        tracing::debug!(?stats, "Scan finished");
        Ok(stats)
    }

    fn scan_root<F>(
        &self,
        root: &Path,
        sink: &mut F,
        stats: &mut ScanStats,
    ) -> Result<(), IndexerError>
    where
        F: FnMut(&str),
    {
        // metadata() follows symlinks, so a link to a directory is walked
        let metadata = match std::fs::metadata(root) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(IndexerError::InputPathInvalid { path: root.to_path_buf() });
            }
            Err(source) => {
                return Err(IndexerError::InputUnreadable { path: root.to_path_buf(), source });
            }
        };

        if metadata.is_file() {
            self.scan_file(root, sink, stats)
        } else if metadata.is_dir() {
            tracing::debug!(root = %root.display(), "Scanning directory");
            for file in self.find_source_files(root)? {
                self.scan_file(&file, sink, stats)?;
            }
            Ok(())
        } else {
            Err(IndexerError::UnsupportedFileType { path: root.to_path_buf() })
        }
    }

    /// Reads one file and extracts its candidates unless it looks binary.
    fn scan_file<F>(
        &self,
        path: &Path,
        sink: &mut F,
        stats: &mut ScanStats,
    ) -> Result<(), IndexerError>
    where
        F: FnMut(&str),
    {
        let bytes = std::fs::read(path)
            .map_err(|source| IndexerError::InputUnreadable { path: path.to_path_buf(), source })?;
        let content = String::from_utf8_lossy(&bytes);

        if looks_binary(&content, self.settings.binary_sample_size) {
            tracing::info!("Ignored binary file '{}'", path.display());
            stats.binary_skipped += 1;
            return Ok(());
        }

        let mut found = 0_usize;
        for candidate in extract_candidates(&content) {
            sink(&candidate);
            found += 1;
        }
        tracing::debug!(path = %path.display(), found, "Scanned file");

        stats.files_scanned += 1;
        stats.candidates += found;
        Ok(())
    }

    /// Lists the selected files below `root`, sorted by path.
    fn find_source_files(&self, root: &Path) -> Result<Vec<PathBuf>, IndexerError> {
        let matcher = FileMatcher::new(self.settings)?;
        let respect_ignore_files = self.settings.respect_ignore_files;
        let mut found_files = Vec::new();

        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(true)
            .sort_by_file_name(|a, b| a.cmp(b));
        if respect_ignore_files {
            builder
                .ignore(true)
                .parents(true)
                .git_ignore(true)
                .git_global(true)
                .git_exclude(true)
                .require_git(false);
        }

        for result in builder.build() {
            let entry = result.map_err(|err| IndexerError::InputUnreadable {
                path: root.to_path_buf(),
                source: std::io::Error::other(err),
            })?;

            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                continue;
            }
            if !file_type.is_file() {
                tracing::debug!(path = %entry.path().display(), "Skipped special file");
                continue;
            }

            if matcher.is_source_file(root, entry.path()) {
                found_files.push(entry.into_path());
            }
        }

        Ok(found_files)
    }
}
