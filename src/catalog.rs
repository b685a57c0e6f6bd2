//! Translation catalog: a named array of original/translation entries.

use std::fmt;
use std::path::{
    Path,
    PathBuf,
};
use std::str::FromStr;

use thiserror::Error;

use crate::value::Value;

/// Child name holding the original string of an entry.
pub const ORIGINAL_KEY: &str = "o";
/// Child name holding the translated string of an entry.
pub const TRANSLATION_KEY: &str = "t";
/// Child name holding the status flag of an entry.
pub const FLAG_KEY: &str = "flag";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog file '{}' is not readable: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Catalog file '{}' is not a regular file", path.display())]
    NotAFile { path: PathBuf },
}

/// Status annotation of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    /// The original string no longer appears in any scanned source.
    Unused,
    /// A new string without a usable translation; the original is used as placeholder.
    Missing,
    /// A new string whose translation was borrowed from a similar entry.
    Guessed,
}

impl Flag {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unused => "UNUSED",
            Self::Missing => "MISSING",
            Self::Guessed => "GUESSED",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error converting a string into a [`Flag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFlagError;

impl FromStr for Flag {
    type Err = ParseFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNUSED" => Ok(Self::Unused),
            "MISSING" => Ok(Self::Missing),
            "GUESSED" => Ok(Self::Guessed),
            _ => Err(ParseFlagError),
        }
    }
}

/// One original/translation pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub original: String,
    pub translation: String,
    pub flag: Option<Flag>,
}

impl Entry {
    #[must_use]
    pub fn new(original: impl Into<String>, translation: impl Into<String>) -> Self {
        Self { original: original.into(), translation: translation.into(), flag: None }
    }

    #[must_use]
    pub const fn with_flag(mut self, flag: Flag) -> Self {
        self.flag = Some(flag);
        self
    }

    /// Reads an entry array. Returns `None` unless both `o` and `t` are strings.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        let original = value.element(ORIGINAL_KEY)?.as_str()?;
        let translation = value.element(TRANSLATION_KEY)?.as_str()?;
        let flag = value.element(FLAG_KEY).and_then(Value::as_str).and_then(|f| f.parse().ok());

        Some(Self { original: original.to_string(), translation: translation.to_string(), flag })
    }

    /// Builds the unnamed entry array with children `o`, `t` and, if flagged, `flag`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut entry = Value::new();
        entry.set_array();

        let mut child = Value::named(ORIGINAL_KEY);
        child.set_string(&self.original);
        entry.push(&child);

        child.set_name(TRANSLATION_KEY);
        child.set_string(&self.translation);
        entry.push(&child);

        if let Some(flag) = self.flag {
            child.set_name(FLAG_KEY);
            child.set_string(flag.as_str());
            entry.push(&child);
        }

        entry
    }
}

/// A whole catalog, named after its language or source file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    pub name: String,
    pub entries: Vec<Entry>,
}

impl Catalog {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), entries: Vec::new() }
    }

    /// Loads and parses a catalog file.
    ///
    /// Malformed text is accepted leniently; every repair is logged as a warning.
    ///
    /// # Errors
    /// - The path is not a regular file
    /// - The file cannot be read
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.is_file() {
            return Err(CatalogError::NotAFile { path: path.to_path_buf() });
        }

        tracing::debug!("Loading catalog from: {:?}", path);
        let bytes = std::fs::read(path)
            .map_err(|source| CatalogError::Unreadable { path: path.to_path_buf(), source })?;
        let text = String::from_utf8_lossy(&bytes);

        let outcome = Value::parse(&text);
        for diagnostic in &outcome.diagnostics {
            tracing::warn!(path = %path.display(), "{diagnostic}");
        }

        Ok(Self::from_value(&outcome.into_lenient()))
    }

    /// Reads a catalog tree, skipping children that are not well-formed entries.
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        if !value.is_array() {
            tracing::warn!("Catalog '{}' is not an array; it has no entries", value.name());
        }

        let entries = value
            .elements()
            .iter()
            .enumerate()
            .filter_map(|(index, element)| {
                let entry = Entry::from_value(element);
                if entry.is_none() {
                    tracing::warn!(index, "Skipped catalog element without string 'o' and 't'");
                }
                entry
            })
            .collect();

        Self { name: value.name().to_string(), entries }
    }

    /// Builds the named catalog tree.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut catalog = Value::named(self.name.as_str());
        catalog.set_array();
        for entry in &self.entries {
            catalog.push_owned(entry.to_value());
        }
        catalog
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    #[rstest]
    #[case::unused(Flag::Unused, "UNUSED")]
    #[case::missing(Flag::Missing, "MISSING")]
    #[case::guessed(Flag::Guessed, "GUESSED")]
    fn flag_text(#[case] flag: Flag, #[case] text: &str) {
        assert_that!(flag.to_string(), eq(text));
        assert_that!(text.parse::<Flag>(), ok(eq(flag)));
    }

    #[rstest]
    fn unknown_flag_is_rejected() {
        assert_that!("unused".parse::<Flag>(), err(eq(ParseFlagError)));
    }

    #[rstest]
    fn entry_to_value_without_flag() {
        let value = Entry::new("Hello", "Bonjour").to_value();

        assert_that!(value.name(), eq(""));
        assert_that!(
            value.elements().iter().map(Value::name).collect::<Vec<_>>(),
            elements_are![eq(&"o"), eq(&"t")]
        );
    }

    #[rstest]
    fn entry_to_value_with_flag() {
        let value = Entry::new("Quit", "Quit").with_flag(Flag::Missing).to_value();

        assert_that!(value.element("flag").and_then(Value::as_str), some(eq("MISSING")));
    }

    #[rstest]
    fn entry_from_value_reads_flag() {
        let value = Entry::new("Quit", "Quitter").with_flag(Flag::Unused).to_value();

        let entry = Entry::from_value(&value);

        assert_that!(
            entry,
            some(all![
                field!(Entry.original, eq("Quit")),
                field!(Entry.translation, eq("Quitter")),
                field!(Entry.flag, some(eq(&Flag::Unused)))
            ])
        );
    }

    #[rstest]
    #[case::missing_translation("[ #o = \"a\" ]")]
    #[case::numeric_original("[ #o = 1, #t = \"a\" ]")]
    #[case::scalar("\"a\"")]
    fn entry_from_value_rejects_incomplete(#[case] text: &str) {
        let value = Value::parse(text).into_lenient();

        assert_that!(Entry::from_value(&value), none());
    }

    #[rstest]
    fn catalog_from_value_skips_malformed_entries() {
        let text = r#"#fr = [
            [ #o = "Yes", #t = "Oui" ],
            [ #t = "orphan" ],
            [ #o = "No", #t = "Non" ]
        ]"#;
        let value = Value::parse(text).into_lenient();

        let catalog = Catalog::from_value(&value);

        assert_that!(catalog.name, eq("fr"));
        assert_that!(
            catalog.entries,
            elements_are![
                field!(Entry.original, eq("Yes")),
                field!(Entry.original, eq("No"))
            ]
        );
    }

    #[rstest]
    fn catalog_to_value_round_trips() {
        let mut catalog = Catalog::new("de");
        catalog.entries.push(Entry::new("Yes", "Ja"));
        catalog.entries.push(Entry::new("Maybe", "Vielleicht").with_flag(Flag::Guessed));

        let text = catalog.to_value().to_text();

        assert_that!(Catalog::from_value(&Value::parse(&text).into_lenient()), eq(&catalog));
    }

    #[rstest]
    fn load_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr.cat");
        fs::write(&path, "#fr = [ [ #o = \"Hello\", #t = \"Bonjour\" ] ]").unwrap();

        let catalog = Catalog::load(&path).unwrap();

        assert_that!(catalog.name, eq("fr"));
        assert_that!(catalog.entries, elements_are![eq(&Entry::new("Hello", "Bonjour"))]);
    }

    #[rstest]
    fn load_tolerates_unterminated_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fr.cat");
        fs::write(&path, "#fr = [ [ #o = \"Hello\", #t = \"Bonjour\" ]").unwrap();

        let catalog = Catalog::load(&path).unwrap();

        assert_that!(catalog.entries, len(eq(1)));
    }

    #[rstest]
    fn load_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();

        let result = Catalog::load(&temp_dir.path().join("absent.cat"));

        assert!(matches!(result, Err(CatalogError::NotAFile { .. })));
    }

    #[rstest]
    fn load_directory_fails() {
        let temp_dir = TempDir::new().unwrap();

        let result = Catalog::load(temp_dir.path());

        assert!(matches!(result, Err(CatalogError::NotAFile { .. })));
        assert_that!(result.unwrap_err().to_string(), contains_substring("not a regular file"));
    }
}
