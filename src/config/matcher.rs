//! File pattern matcher for scanned source files.

use std::path::Path;

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};

use super::I18nSettings;

#[derive(Debug, thiserror::Error)]
pub enum MatcherError {
    #[error("Invalid source include pattern '{pattern}': {source}")]
    InvalidSourceIncludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid exclude pattern '{pattern}': {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to build glob set: {0}")]
    GlobSetBuild(#[from] globset::Error),
}

/// Matches paths below a scanned directory against the configured globs.
#[derive(Debug, Clone)]
pub struct FileMatcher {
    include_set: GlobSet,
    exclude_set: GlobSet,
}

impl FileMatcher {
    /// # Errors
    /// - Invalid include or exclude glob
    pub fn new(settings: &I18nSettings) -> Result<Self, MatcherError> {
        let include_set = Self::build_glob_set(&settings.include_patterns, |pattern, source| {
            MatcherError::InvalidSourceIncludePattern { pattern, source }
        })?;

        let exclude_set = Self::build_glob_set(&settings.exclude_patterns, |pattern, source| {
            MatcherError::InvalidExcludePattern { pattern, source }
        })?;

        Ok(Self { include_set, exclude_set })
    }

    fn build_glob_set<F>(patterns: &[String], make_error: F) -> Result<GlobSet, MatcherError>
    where
        F: Fn(String, globset::Error) -> MatcherError,
    {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| make_error(pattern.clone(), e))?;
            builder.add(glob);
        }
        Ok(builder.build()?)
    }

    /// Returns true if `absolute_path` lies under `root` and its root-relative
    /// path is selected.
    #[must_use]
    pub fn is_source_file(&self, root: &Path, absolute_path: &Path) -> bool {
        absolute_path
            .strip_prefix(root)
            .is_ok_and(|relative_path| self.is_source_file_relative(relative_path))
    }

    /// Returns true if the path matches `includePatterns` but not `excludePatterns`.
    #[must_use]
    pub fn is_source_file_relative(&self, relative_path: &Path) -> bool {
        self.include_set.is_match(relative_path) && !self.exclude_set.is_match(relative_path)
    }
}
