use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::indexer::DEFAULT_BINARY_SAMPLE_SIZE;
use crate::reconcile::DEFAULT_FUZZY_THRESHOLD;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[1]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct I18nSettings {
    /// Globs, relative to each scanned directory, of the files to read.
    pub include_patterns: Vec<String>,
    pub exclude_patterns: Vec<String>,

    /// A guess is only taken from a catalog entry scoring strictly above this.
    pub fuzzy_threshold: f64,

    /// Number of leading characters inspected to tell text from binary files.
    pub binary_sample_size: usize,

    /// Honor `.gitignore`, `.ignore` and git exclude files while walking.
    ///
    /// Off by default: every file below a scanned directory is considered.
    pub respect_ignore_files: bool,
}

impl I18nSettings {
    /// # Errors
    /// - Threshold outside `[0, 1]`
    /// - Zero binary sample size
    /// - Missing or invalid glob pattern
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            errors.push(ValidationError::new(
                "fuzzyThreshold",
                format!("Must be between 0 and 1, got {}", self.fuzzy_threshold),
            ));
        }

        if self.binary_sample_size == 0 {
            errors.push(ValidationError::new(
                "binarySampleSize",
                "Must be greater than 0. Example: 30",
            ));
        }

        if self.include_patterns.is_empty() {
            errors.push(ValidationError::new(
                "includePatterns",
                "At least one pattern is required. Example: [\"**/*\"]",
            ));
        }

        let pattern_fields = [
            ("includePatterns", &self.include_patterns),
            ("excludePatterns", &self.exclude_patterns),
        ];
        for (field, list) in pattern_fields {
            for (index, pattern) in list.iter().enumerate() {
                if let Err(e) = globset::Glob::new(pattern) {
                    errors.push(ValidationError::new(
                        format!("{field}[{index}]"),
                        format!("Invalid glob pattern '{pattern}': {e}"),
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            include_patterns: vec!["**/*".to_string()],
            exclude_patterns: Vec::new(),
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            binary_sample_size: DEFAULT_BINARY_SAMPLE_SIZE,
            respect_ignore_files: false,
        }
    }
}
