//! Lexical extraction of translatable strings from source text.
//!
//! Two forms are recognized without any parsing of the host language:
//! gettext-style calls `_("text")` and accelerator labels `"&text"`. The
//! scanner reads one character at a time and never backs up, so a character
//! consumed while testing for `(`, `"` or `&` is not looked at again.

use std::str::Chars;

/// Leading characters inspected by [`looks_binary`] unless configured otherwise.
pub const DEFAULT_BINARY_SAMPLE_SIZE: usize = 30;

/// Characters counted as "looks like source code" by the binary heuristic.
const fn is_source_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '#' | '_'
                | '('
                | ')'
                | '['
                | ']'
                | '{'
                | '}'
                | '.'
                | '-'
                | '@'
                | '='
                | '+'
                | ' '
                | '\t'
                | '\n'
                | '\r'
                | '$'
                | '"'
                | '\''
                | '~'
                | '&'
                | '|'
                | '*'
        )
}

/// Guesses whether `text` is binary from its first `sample_size` characters.
///
/// The text is binary when fewer than half (rounded down) of the sampled
/// characters look like source code. Empty text is not binary.
#[must_use]
pub fn looks_binary(text: &str, sample_size: usize) -> bool {
    let (sampled, allowed) = text
        .chars()
        .take(sample_size)
        .fold((0_usize, 0_usize), |(sampled, allowed), c| {
            (sampled + 1, allowed + usize::from(is_source_char(c)))
        });

    allowed < sampled / 2
}

/// Iterates over the candidate strings found in `text`, in order of appearance.
///
/// ```
/// use i18n_catalog_updater::indexer::extract_candidates;
///
/// let found: Vec<String> = extract_candidates(r#"menu(_("Quit"), "&Save");"#).collect();
/// assert_eq!(found, ["Quit", "Save"]);
/// ```
#[must_use]
pub fn extract_candidates(text: &str) -> Candidates<'_> {
    Candidates { chars: text.chars() }
}

/// Iterator returned by [`extract_candidates`].
#[derive(Debug, Clone)]
pub struct Candidates<'a> {
    chars: Chars<'a>,
}

impl Candidates<'_> {
    /// Reads up to the next `"` or the end of input. `last` ends on the final
    /// character read.
    fn capture(&mut self, last: &mut char) -> String {
        let mut captured = String::new();
        for c in self.chars.by_ref() {
            *last = c;
            if c == '"' {
                break;
            }
            captured.push(c);
        }
        captured
    }
}

impl Iterator for Candidates<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut current) = self.chars.next() {
            let mut found = None;

            if current == '_' && self.chars.next() == Some('(') && self.chars.next() == Some('"') {
                found = Some(self.capture(&mut current));
            }
            // Also reached with the closing quote of a call capture; a second
            // capture replaces the first.
            if current == '"' && self.chars.next() == Some('&') {
                found = Some(self.capture(&mut current));
            }

            if found.is_some() {
                return found;
            }
        }
        None
    }
}
